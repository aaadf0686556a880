//! Re-indenting syntax trees
//!
//! Indentation is inserted, never recomputed: the caller supplies an
//! indentation unit and every line of a subtree gets one more copy of it,
//! placed right after the line break in the leading trivia of the line's first
//! token. All other text, comments and line breaks included, is preserved
//! exactly.
//!
//! ## Example
//!
//! ```rust
//! use reindent_core::cst::{fixture, Trivia};
//! use reindent_core::indent_node;
//!
//! let root = fixture::parse("a\n\nb // note\n#if DEBUG\nc");
//! let indented = indent_node(&root, &Trivia::whitespace("    ").into());
//!
//! assert_eq!(indented.to_string(), "    a\n\n    b // note\n    #if DEBUG\n    c");
//! ```

mod batch;
mod line_starts;
mod token;

pub use batch::rewrite_tokens;
pub use line_starts::line_start_tokens;
pub use token::indent_token;

use crate::cst::{GreenNode, GreenToken, TokenPath, TriviaList};

/// Indent every line of `node` by `indentation`
///
/// Each token that begins a line, the first token of `node` included, gets
/// `indentation` inserted into its leading trivia. Lines inside directives and
/// other structured trivia are indented too. Lines holding only trivia (blank
/// lines, comment-only lines) are not.
///
/// Subtrees that contain no line start are shared with `node`.
#[tracing::instrument(level = "debug", skip_all, fields(kind = node.kind().0))]
pub fn indent_node(node: &GreenNode, indentation: &TriviaList) -> GreenNode {
    if indentation.is_empty() {
        return node.clone();
    }

    let targets: Vec<TokenPath> = line_start_tokens(node)
        .into_iter()
        .map(|token| token.path().clone())
        .collect();

    rewrite_tokens(node, &targets, |token| indent_token(token, indentation))
}

/// Method form of [`indent_node`] and [`indent_token`]
pub trait Indent: Sized {
    /// A copy of `self` indented by `indentation`
    fn indent(&self, indentation: &TriviaList) -> Self;
}

impl Indent for GreenNode {
    fn indent(&self, indentation: &TriviaList) -> Self {
        indent_node(self, indentation)
    }
}

impl Indent for GreenToken {
    fn indent(&self, indentation: &TriviaList) -> Self {
        indent_token(self, indentation)
    }
}
