//! Generated-code recognition. Two independent checks, OR'd together:
//! the file name, then the leading comments of the first token.

pub mod path;
pub mod trivia;

use serde::Serialize;

use crate::cancel::CancellationToken;
use crate::error::GenmarkError;
use crate::syntax::ParsedUnit;

pub use path::is_generated_by_path;
pub use trivia::{find_generated_marker, is_generated_by_trivia};

/// Which rule classified a file as generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    FileName,
    Marker { marker: &'static str },
}

impl std::fmt::Display for Evidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileName => write!(f, "file name"),
            Self::Marker { marker } => write!(f, "{marker}"),
        }
    }
}

/// Path heuristic first (no parsing); the trivia heuristic only runs when
/// the name doesn't match.
pub fn detect<U: ParsedUnit + ?Sized>(
    file_path: &str,
    unit: &U,
    cancel: &CancellationToken,
) -> Result<Option<Evidence>, GenmarkError> {
    if is_generated_by_path(file_path) {
        return Ok(Some(Evidence::FileName));
    }
    Ok(find_generated_marker(unit, cancel)?.map(|marker| Evidence::Marker { marker }))
}

/// True if either heuristic fires. `Err(Cancelled)` means "unknown".
pub fn is_from_generated_code<U: ParsedUnit + ?Sized>(
    file_path: &str,
    unit: &U,
    cancel: &CancellationToken,
) -> Result<bool, GenmarkError> {
    Ok(is_generated_by_path(file_path) || is_generated_by_trivia(unit, cancel)?)
}

/// Everything one analysis pass carries about a file.
pub struct AnalysisContext<'a, U: ParsedUnit + ?Sized> {
    pub file_path: &'a str,
    pub unit: &'a U,
    pub cancel: &'a CancellationToken,
}

impl<'a, U: ParsedUnit + ?Sized> AnalysisContext<'a, U> {
    pub fn new(file_path: &'a str, unit: &'a U, cancel: &'a CancellationToken) -> Self {
        Self {
            file_path,
            unit,
            cancel,
        }
    }

    pub fn is_from_generated_code(&self) -> Result<bool, GenmarkError> {
        is_from_generated_code(self.file_path, self.unit, self.cancel)
    }
}
