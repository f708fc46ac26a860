use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::cache::VerdictCache;
use crate::cancel::CancellationToken;
use crate::error::GenmarkError;
use crate::generated::{Evidence, is_generated_by_path};
use crate::source::{Contents, SourceFile, read_contents};
use crate::types::Lang;

// Directories that are always skipped: VCS internals and third-party dependencies.
// Build output directories (obj/, build/, out/) are walked: most generated
// sources live there.
pub(crate) const SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "vendor",
    "__pycache__",
    ".venv",
    ".idea",
    ".vs",
    ".gradle",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Empty,
    Binary,
    /// No grammar for this extension and the name didn't match.
    Unsupported,
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Generated { evidence: Evidence },
    Authored,
    Skipped { reason: SkipReason },
    /// Classification was cancelled. Not the same as authored.
    Unknown,
    Failed { error: String },
}

impl FileStatus {
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct FileVerdict {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub generated: usize,
    pub authored: usize,
    pub skipped: usize,
    pub unknown: usize,
    pub failed: usize,
}

impl Summary {
    fn tally(files: &[FileVerdict]) -> Self {
        let mut summary = Self {
            files: files.len(),
            ..Self::default()
        };
        for f in files {
            match f.status {
                FileStatus::Generated { .. } => summary.generated += 1,
                FileStatus::Authored => summary.authored += 1,
                FileStatus::Skipped { .. } => summary.skipped += 1,
                FileStatus::Unknown => summary.unknown += 1,
                FileStatus::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Assembled scan results, sorted by path.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub roots: Vec<PathBuf>,
    pub summary: Summary,
    pub files: Vec<FileVerdict>,
}

#[derive(Debug, Default)]
pub struct ScanOptions {
    exclude: GlobSet,
}

impl ScanOptions {
    /// Build options from `--exclude` globs. Matched against the file name
    /// and the root-relative path.
    pub fn new(exclude: &[String]) -> Result<Self, GenmarkError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob = Glob::new(pattern).map_err(|e| GenmarkError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let exclude = builder.build().map_err(|e| GenmarkError::InvalidPattern {
            pattern: exclude.join(", "),
            reason: e.to_string(),
        })?;
        Ok(Self { exclude })
    }

    fn excludes(&self, path: &Path, root: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let rel = path.strip_prefix(root).unwrap_or(path);
        self.exclude.is_match(name) || self.exclude.is_match(rel)
    }
}

/// Classify every file under `roots`. Per-file failures and cancellations
/// are recorded in the report; only a missing root or a bad walk aborts.
pub fn scan(
    roots: &[PathBuf],
    options: &ScanOptions,
    cache: &VerdictCache,
    cancel: &CancellationToken,
) -> Result<ScanReport, GenmarkError> {
    let files = collect_files(roots, options)?;
    tracing::debug!(roots = roots.len(), files = files.len(), "collected files");

    let files: Vec<FileVerdict> = files
        .into_par_iter()
        .map(|path| {
            let status = classify_file(&path, cache, cancel);
            FileVerdict { path, status }
        })
        .collect();

    Ok(ScanReport {
        roots: roots.to_vec(),
        summary: Summary::tally(&files),
        files,
    })
}

/// Walk all roots. Explicit file roots are kept even if an exclude matches.
fn collect_files(roots: &[PathBuf], options: &ScanOptions) -> Result<Vec<PathBuf>, GenmarkError> {
    let mut files = BTreeSet::new();

    for root in roots {
        let meta = fs::metadata(root).map_err(|e| GenmarkError::from_io(root, e))?;
        if !meta.is_dir() {
            files.insert(root.clone());
            continue;
        }

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .filter_entry(|entry| {
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if let Some(name) = entry.file_name().to_str() {
                        return !SKIP_DIRS.contains(&name);
                    }
                }
                true
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if options.excludes(path, root) {
                tracing::trace!(path = %path.display(), "excluded");
                continue;
            }
            files.insert(path.to_path_buf());
        }
    }

    Ok(files.into_iter().collect())
}

/// Classify one file on disk. The name rule needs no I/O; everything else
/// goes through the cache keyed by mtime.
pub fn classify_file(path: &Path, cache: &VerdictCache, cancel: &CancellationToken) -> FileStatus {
    if is_generated_by_path(&path.to_string_lossy()) {
        return FileStatus::Generated {
            evidence: Evidence::FileName,
        };
    }
    if Lang::from_path(path).is_none() {
        return FileStatus::Skipped {
            reason: SkipReason::Unsupported,
        };
    }

    let result = fs::metadata(path)
        .map_err(|e| GenmarkError::from_io(path, e))
        .and_then(|meta| {
            let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            cache.get_or_compute(path, mtime, || classify_contents(path, cancel))
        });

    match result {
        Ok(status) => status,
        Err(GenmarkError::Cancelled) => {
            tracing::debug!(path = %path.display(), "cancelled before a verdict");
            FileStatus::Unknown
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "classification failed");
            FileStatus::Failed {
                error: e.to_string(),
            }
        }
    }
}

fn classify_contents(path: &Path, cancel: &CancellationToken) -> Result<FileStatus, GenmarkError> {
    cancel.check()?;
    let text = match read_contents(path)? {
        Contents::Empty => {
            return Ok(FileStatus::Skipped {
                reason: SkipReason::Empty,
            });
        }
        Contents::Binary => {
            return Ok(FileStatus::Skipped {
                reason: SkipReason::Binary,
            });
        }
        Contents::Text(text) => text,
    };

    let file = SourceFile::new(path, text);
    let status = match file.detect(cancel)? {
        Some(evidence) => FileStatus::Generated { evidence },
        None => FileStatus::Authored,
    };
    tracing::trace!(path = %path.display(), ?status, "classified");
    Ok(status)
}
