use std::path::PathBuf;

/// Every error genmark can produce. The heuristics themselves only ever
/// surface `Cancelled`; the rest come from reading files and parsing arguments.
#[derive(Debug)]
pub enum GenmarkError {
    NotFound {
        path: PathBuf,
    },
    PermissionDenied {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidPattern {
        pattern: String,
        reason: String,
    },
    /// The caller's cancellation token fired mid-classification.
    /// The verdict is unknown, not "authored".
    Cancelled,
}

impl std::fmt::Display for GenmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::PermissionDenied { path } => {
                write!(f, "{} [permission denied]", path.display())
            }
            Self::IoError { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern \"{pattern}\": {reason}")
            }
            Self::Cancelled => write!(f, "classification cancelled"),
        }
    }
}

impl std::error::Error for GenmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GenmarkError {
    /// Map an `io::Error` for `path` onto the matching variant.
    pub(crate) fn from_io(path: &std::path::Path, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::IoError {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }

    /// Process exit code for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::IoError { .. } => 2,
            Self::InvalidPattern { .. } => 3,
            Self::PermissionDenied { .. } => 4,
            Self::Cancelled => 130,
        }
    }
}
