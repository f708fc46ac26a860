use std::fmt::Write;
use std::path::Path;

use crate::scan::{FileStatus, ScanReport, SkipReason, Summary};

/// Render a report for the terminal. `all` includes non-generated files.
#[must_use]
pub fn report(report: &ScanReport, all: bool) -> String {
    let mut out = header(&report.roots, &report.summary);

    for file in &report.files {
        if !all && !file.status.is_generated() {
            continue;
        }
        let _ = write!(out, "\n{} [{}]", file.path.display(), status_tag(&file.status));
    }

    out
}

/// `# Scan: src, tests — 120 files, 7 generated (3 skipped, 1 unknown)`
fn header(roots: &[impl AsRef<Path>], summary: &Summary) -> String {
    let roots = roots
        .iter()
        .map(|r| r.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let mut line = format!(
        "# Scan: {roots} — {} files, {} generated",
        summary.files, summary.generated
    );

    let extras: Vec<String> = [
        (summary.skipped, "skipped"),
        (summary.unknown, "unknown"),
        (summary.failed, "failed"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, label)| format!("{n} {label}"))
    .collect();
    if !extras.is_empty() {
        let _ = write!(line, " ({})", extras.join(", "));
    }
    line
}

fn status_tag(status: &FileStatus) -> String {
    match status {
        FileStatus::Generated { evidence } => format!("generated: {evidence}"),
        FileStatus::Authored => "authored".into(),
        FileStatus::Skipped { reason } => match reason {
            SkipReason::Empty => "skipped: empty".into(),
            SkipReason::Binary => "skipped: binary".into(),
            SkipReason::Unsupported => "skipped: unsupported".into(),
        },
        FileStatus::Unknown => "unknown: cancelled".into(),
        FileStatus::Failed { error } => format!("failed: {error}"),
    }
}
