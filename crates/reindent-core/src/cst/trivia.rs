//! Trivia attached to tokens
//!
//! Trivia is the non-code text of a source file: whitespace, line breaks,
//! comments and structured content such as preprocessor directives or
//! documentation comments. Every token owns two ordered trivia sequences:
//!
//! - **Leading trivia**: everything between the previous token's trailing
//!   trivia and the token itself
//! - **Trailing trivia**: everything after the token up to and including the
//!   next line break
//!
//! Trivia sequences are exact. Printing the leading trivia, the token text
//! and the trailing trivia of every token in order reproduces the source.
//!
//! # Example
//!
//! ```rust
//! use reindent_core::cst::{Trivia, TriviaList};
//!
//! let leading = TriviaList::from(vec![Trivia::end_of_line(), Trivia::whitespace("  ")]);
//! assert_eq!(leading.to_string(), "\n  ");
//! assert_eq!(leading.last_position(|t| t.is_end_of_line()), Some(0));
//! ```

use super::GreenNode;
use rowan::TextSize;
use std::fmt;

/// Classification of a trivia item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    Comment,
    /// Trivia carrying its own syntax sub-tree (directives, doc comments)
    Structured,
    Other,
}

/// A single trivia item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trivia {
    /// Spaces and tabs, never containing a line break
    Whitespace(String),
    /// A line break (`\n`, `\r\n`, ...)
    EndOfLine(String),
    /// A comment that does not span lines
    Comment(String),
    /// Trivia with internal structure; its sub-tree may contain line breaks
    Structured(GreenNode),
    /// Anything else the parser chose to keep as trivia
    Other(String),
}

impl Trivia {
    /// Create whitespace trivia
    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::Whitespace(text.into())
    }

    /// Create a `\n` end-of-line trivia
    pub fn end_of_line() -> Self {
        Self::EndOfLine("\n".to_string())
    }

    /// Create an end-of-line trivia with a specific line terminator
    pub fn end_of_line_with(text: impl Into<String>) -> Self {
        Self::EndOfLine(text.into())
    }

    /// Create comment trivia
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Create structured trivia from a sub-tree
    pub fn structured(node: GreenNode) -> Self {
        Self::Structured(node)
    }

    /// Create trivia of no particular kind
    pub fn other(text: impl Into<String>) -> Self {
        Self::Other(text.into())
    }

    pub fn kind(&self) -> TriviaKind {
        match self {
            Trivia::Whitespace(_) => TriviaKind::Whitespace,
            Trivia::EndOfLine(_) => TriviaKind::EndOfLine,
            Trivia::Comment(_) => TriviaKind::Comment,
            Trivia::Structured(_) => TriviaKind::Structured,
            Trivia::Other(_) => TriviaKind::Other,
        }
    }

    /// Check if this is a line break
    pub fn is_end_of_line(&self) -> bool {
        matches!(self, Trivia::EndOfLine(_))
    }

    /// Check if this is whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Trivia::Whitespace(_))
    }

    /// Check if this is a comment
    pub fn is_comment(&self) -> bool {
        matches!(self, Trivia::Comment(_))
    }

    /// Check if this trivia carries a syntax sub-tree
    pub fn has_structure(&self) -> bool {
        matches!(self, Trivia::Structured(_))
    }

    /// The sub-tree of structured trivia
    pub fn structure(&self) -> Option<&GreenNode> {
        match self {
            Trivia::Structured(node) => Some(node),
            _ => None,
        }
    }

    /// Length of the printed text of this trivia
    pub fn text_len(&self) -> TextSize {
        match self {
            Trivia::Structured(node) => node.text_len(),
            Trivia::Whitespace(text)
            | Trivia::EndOfLine(text)
            | Trivia::Comment(text)
            | Trivia::Other(text) => TextSize::of(text.as_str()),
        }
    }

    /// Whether any token inside structured trivia carries an annotation
    pub(crate) fn contains_annotations(&self) -> bool {
        self.structure()
            .is_some_and(|node| node.contains_annotations())
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trivia::Structured(node) => fmt::Display::fmt(node, f),
            Trivia::Whitespace(text)
            | Trivia::EndOfLine(text)
            | Trivia::Comment(text)
            | Trivia::Other(text) => f.write_str(text),
        }
    }
}

/// An ordered sequence of trivia
///
/// Also used as the indentation unit handed to the indentation operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriviaList(Vec<Trivia>);

impl TriviaList {
    /// Create an empty trivia list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Trivia> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trivia> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Trivia] {
        &self.0
    }

    /// Length of the printed text of all items
    pub fn text_len(&self) -> TextSize {
        self.0.iter().map(Trivia::text_len).sum()
    }

    /// Index of the last item matching `predicate`
    pub fn last_position(&self, predicate: impl Fn(&Trivia) -> bool) -> Option<usize> {
        self.0.iter().rposition(predicate)
    }

    /// A copy of this list with `items` inserted before position `index`
    ///
    /// # Panics
    ///
    /// Panics if `index > self.len()`.
    pub fn with_inserted(&self, index: usize, items: &TriviaList) -> TriviaList {
        let mut inserted = Vec::with_capacity(self.0.len() + items.0.len());
        inserted.extend_from_slice(&self.0[..index]);
        inserted.extend_from_slice(&items.0);
        inserted.extend_from_slice(&self.0[index..]);
        Self(inserted)
    }

    /// A copy of this list with the item at `index` replaced
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn with_replaced(&self, index: usize, trivia: Trivia) -> TriviaList {
        let mut replaced = self.0.clone();
        replaced[index] = trivia;
        Self(replaced)
    }

    /// A copy of this list with `trivia` appended
    pub fn with_pushed(&self, trivia: Trivia) -> TriviaList {
        let mut pushed = self.0.clone();
        pushed.push(trivia);
        Self(pushed)
    }

    pub(crate) fn contains_annotations(&self) -> bool {
        self.0.iter().any(Trivia::contains_annotations)
    }
}

impl From<Vec<Trivia>> for TriviaList {
    fn from(items: Vec<Trivia>) -> Self {
        Self(items)
    }
}

impl From<Trivia> for TriviaList {
    fn from(trivia: Trivia) -> Self {
        Self(vec![trivia])
    }
}

impl FromIterator<Trivia> for TriviaList {
    fn from_iter<I: IntoIterator<Item = Trivia>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TriviaList {
    type Item = &'a Trivia;
    type IntoIter = std::slice::Iter<'a, Trivia>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TriviaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trivia in &self.0 {
            fmt::Display::fmt(trivia, f)?;
        }
        Ok(())
    }
}
