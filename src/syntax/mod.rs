//! The narrow view of a parsed file that the trivia heuristic needs:
//! the first token's leading trivia, in document order.

pub mod tree;

use crate::cancel::CancellationToken;
use crate::error::GenmarkError;
use crate::types::Lang;

pub use tree::SyntaxTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    /// `// ...` — not a doc comment.
    SingleLineComment,
    /// Block comments, doc comments, directives, anything else.
    Other,
}

/// One item of leading trivia. `text` is the literal source text,
/// comment marker included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia<'a> {
    pub kind: TriviaKind,
    pub text: &'a str,
}

impl<'a> Trivia<'a> {
    #[must_use]
    pub fn single_line(text: &'a str) -> Self {
        Self {
            kind: TriviaKind::SingleLineComment,
            text,
        }
    }

    #[must_use]
    pub fn other(text: &'a str) -> Self {
        Self {
            kind: TriviaKind::Other,
            text,
        }
    }
}

/// Anything that can report the leading trivia of its first token.
///
/// `Ok(None)` means there is no root or no first token; `Ok(Some(vec![]))`
/// means the first token has no leading trivia. Implementations that do
/// real work (parsing, walking) poll `cancel` and return
/// `Err(GenmarkError::Cancelled)` once it fires.
pub trait ParsedUnit {
    fn first_token_leading_trivia(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Trivia<'_>>>, GenmarkError>;
}

/// Classify comment text the way the language's tokenizer does: `//` is a
/// single-line comment unless it is a doc comment. `///` (but not `////`) is
/// a doc comment everywhere; `//!` only in Rust and Zig.
#[must_use]
pub fn comment_kind(text: &str, lang: Lang) -> TriviaKind {
    let Some(rest) = text.strip_prefix("//") else {
        return TriviaKind::Other;
    };
    let inner_doc = matches!(lang, Lang::Rust | Lang::Zig) && rest.starts_with('!');
    let is_doc = (rest.starts_with('/') && !rest.starts_with("//")) || inner_doc;
    if is_doc {
        TriviaKind::Other
    } else {
        TriviaKind::SingleLineComment
    }
}
