#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::missing_errors_doc,        // every error is GenmarkError, documented on the type
    clippy::missing_panics_doc,        // same
    clippy::must_use_candidate,        // bool-returning checks are obviously used
)]

pub mod cache;
pub mod cancel;
pub mod error;
pub mod format;
pub mod generated;
pub mod scan;
pub mod source;
pub mod syntax;
pub mod types;

use std::path::PathBuf;

pub use cache::VerdictCache;
pub use cancel::CancellationToken;
pub use error::GenmarkError;
pub use generated::{
    AnalysisContext, Evidence, is_from_generated_code, is_generated_by_path,
    is_generated_by_trivia,
};
pub use scan::{FileStatus, ScanOptions, ScanReport};
pub use source::SourceFile;
pub use syntax::{ParsedUnit, SyntaxTree, Trivia, TriviaKind};
pub use types::Lang;

/// One-shot scan with a fresh cache. Everything the CLI does flows through here:
/// build options → walk → classify in parallel → report. Paths are already
/// deduplicated, so this cache never hits; callers that rescan the same tree
/// should keep their own `VerdictCache` and call `scan::scan` directly.
pub fn run(
    roots: &[PathBuf],
    exclude: &[String],
    cancel: &CancellationToken,
) -> Result<ScanReport, GenmarkError> {
    let options = ScanOptions::new(exclude)?;
    let cache = VerdictCache::new();
    scan::scan(roots, &options, &cache, cancel)
}
