use crate::cancel::CancellationToken;
use crate::error::GenmarkError;
use crate::syntax::{ParsedUnit, TriviaKind};

/// Exact comment lines that mark a file as tool output.
pub const GENERATED_MARKERS: &[&str] = &[
    "// This file has been generated by the GUI designer. Do not modify.",
    "// <auto-generated>",
    "// <autogenerated>",
];

/// How many single-line comments ahead of the first token are examined.
/// Caps the cost on files with long comment headers; a marker placed after
/// a longer header is not seen.
pub const MAX_EXAMINED_COMMENTS: usize = 2;

/// Return the marker found among the first token's leading single-line
/// comments, if any. Only the first `MAX_EXAMINED_COMMENTS` such comments
/// are compared, by exact string equality.
pub fn find_generated_marker<U: ParsedUnit + ?Sized>(
    unit: &U,
    cancel: &CancellationToken,
) -> Result<Option<&'static str>, GenmarkError> {
    let Some(trivia) = unit.first_token_leading_trivia(cancel)? else {
        return Ok(None);
    };
    if trivia.is_empty() {
        return Ok(None);
    }

    let marker = trivia
        .iter()
        .filter(|t| t.kind == TriviaKind::SingleLineComment)
        .take(MAX_EXAMINED_COMMENTS)
        .find_map(|t| GENERATED_MARKERS.iter().copied().find(|m| *m == t.text));
    Ok(marker)
}

/// Trivia heuristic: does the file open with a generated-code marker comment?
pub fn is_generated_by_trivia<U: ParsedUnit + ?Sized>(
    unit: &U,
    cancel: &CancellationToken,
) -> Result<bool, GenmarkError> {
    find_generated_marker(unit, cancel).map(|m| m.is_some())
}
