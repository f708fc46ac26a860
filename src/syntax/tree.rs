//! Tree-sitter adapter for `ParsedUnit`.
//!
//! Tree-sitter has no trivia: comments are "extra" nodes sprinkled into the
//! tree. The first token is the first non-extra leaf with a non-empty span;
//! every extra node visited before reaching it is leading trivia.
//!
//! C# directives are trivia too, but tree-sitter-c-sharp only models some of
//! them as extras: `#if`/`#elif`/`#else`/`#endif` are ordinary nodes whose
//! keywords show up as leaves. For C#, a leaf on a line that starts with `#`
//! belongs to a directive, and the whole line is recorded as `Other` trivia.

use tree_sitter::{Node, Parser, Tree};

use super::{ParsedUnit, Trivia, TriviaKind, comment_kind};
use crate::cancel::CancellationToken;
use crate::error::GenmarkError;
use crate::types::Lang;

/// A parsed file, borrowing its source text.
pub struct SyntaxTree<'src> {
    tree: Tree,
    source: &'src str,
    lang: Lang,
}

impl<'src> SyntaxTree<'src> {
    /// Parse `source` with the grammar for `lang`. Returns `None` if the
    /// grammar can't be loaded or the parser gives up.
    #[must_use]
    pub fn parse(source: &'src str, lang: Lang) -> Option<Self> {
        let mut parser = Parser::new();
        parser.set_language(&lang.grammar()).ok()?;
        let tree = parser.parse(source, None)?;
        Some(Self { tree, source, lang })
    }

    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Leading trivia with the lifetime of the source text rather than the tree,
    /// so callers that parse on demand can drop the tree and keep the trivia.
    pub fn leading_trivia(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Trivia<'src>>>, GenmarkError> {
        first_token_trivia(self.root(), self.source, self.lang, cancel)
    }
}

impl ParsedUnit for SyntaxTree<'_> {
    fn first_token_leading_trivia(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Trivia<'_>>>, GenmarkError> {
        self.leading_trivia(cancel)
    }
}

/// Pre-order walk from `root` until the first real token, collecting extras.
fn first_token_trivia<'s>(
    root: Node<'_>,
    source: &'s str,
    lang: Lang,
    cancel: &CancellationToken,
) -> Result<Option<Vec<Trivia<'s>>>, GenmarkError> {
    let mut trivia = Vec::new();
    let mut cursor = root.walk();
    // Start offset of the last directive line recorded, so each line is pushed once.
    let mut last_directive: Option<usize> = None;

    loop {
        cancel.check()?;
        let node = cursor.node();

        if node.is_extra() {
            // Don't descend: doc-comment markers etc. are children of the comment.
            trivia.push(to_trivia(node, source, lang));
        } else if node.child_count() == 0 {
            if node.is_missing() || node.start_byte() == node.end_byte() {
                // zero-width: not a token
            } else if let Some((start, line)) = directive_line(source, node.start_byte(), lang) {
                if last_directive != Some(start) {
                    last_directive = Some(start);
                    trivia.push(Trivia::other(line));
                }
            } else {
                tracing::trace!(kind = node.kind(), trivia = trivia.len(), "first token");
                return Ok(Some(trivia));
            }
        } else if cursor.goto_first_child() {
            continue;
        }

        // Next sibling, climbing out of exhausted subtrees.
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return Ok(None);
            }
        }
    }
}

/// For C#, the directive line containing `offset`, with its start offset.
fn directive_line(source: &str, offset: usize, lang: Lang) -> Option<(usize, &str)> {
    if lang != Lang::CSharp {
        return None;
    }
    let start = source.get(..offset)?.rfind('\n').map_or(0, |i| i + 1);
    let rest = &source[start..];
    let line = rest.split('\n').next().unwrap_or(rest);
    let line = line.trim_end_matches('\r');
    line.trim_start().starts_with('#').then_some((start, line))
}

fn to_trivia<'s>(node: Node<'_>, source: &'s str, lang: Lang) -> Trivia<'s> {
    let text = source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or("")
        .trim_end_matches(['\r', '\n']);
    let kind = if node.kind().contains("comment") {
        comment_kind(text, lang)
    } else {
        TriviaKind::Other
    };
    Trivia { kind, text }
}
