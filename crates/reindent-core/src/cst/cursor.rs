//! Locating tokens and trivia relative to a root
//!
//! Green values know nothing about their position. A [`TokenPath`] records how
//! to reach a token from a given root, and [`SyntaxToken`] pairs a green token
//! with that path and its offset in the root's text.
//!
//! Paths can step into structured trivia: `Leading(i)` and `Trailing(i)` enter
//! the sub-tree of the structured trivia item at index `i` of the token reached
//! so far. This is what lets navigation treat a line inside a directive as a
//! line of its own.

use super::{GreenNode, GreenToken, Trivia, TriviaList};
use rowan::{NodeOrToken, TextRange, TextSize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// One step of a [`TokenPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Child at index of the current node
    Child(usize),
    /// Structured leading trivia at index of the current token
    Leading(usize),
    /// Structured trailing trivia at index of the current token
    Trailing(usize),
}

/// Position of a token relative to a root node
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPath(Vec<Step>);

impl TokenPath {
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// Whether the path goes through structured trivia
    pub fn is_in_structured_trivia(&self) -> bool {
        self.0
            .iter()
            .any(|step| matches!(step, Step::Leading(_) | Step::Trailing(_)))
    }
}

impl Borrow<[Step]> for TokenPath {
    fn borrow(&self) -> &[Step] {
        &self.0
    }
}

impl From<Vec<Step>> for TokenPath {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match step {
                Step::Child(index) => write!(f, "{index}")?,
                Step::Leading(index) => write!(f, "leading[{index}]")?,
                Step::Trailing(index) => write!(f, "trailing[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A token located in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    path: TokenPath,
    green: GreenToken,
    /// Start of the token's leading trivia
    offset: TextSize,
}

impl SyntaxToken {
    pub(crate) fn new(path: TokenPath, green: GreenToken, offset: TextSize) -> Self {
        Self {
            path,
            green,
            offset,
        }
    }

    pub fn path(&self) -> &TokenPath {
        &self.path
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// Range of the token text, without trivia
    pub fn text_range(&self) -> TextRange {
        let start = self.offset + self.green.leading_trivia().text_len();
        TextRange::at(start, self.green.text_len())
    }

    /// Range of the token text including its trivia
    pub fn full_range(&self) -> TextRange {
        TextRange::at(self.offset, self.green.full_len())
    }

    /// Leading then trailing trivia of this token, located
    pub fn trivia(&self) -> impl Iterator<Item = SyntaxTrivia> + '_ {
        let leading_start = self.offset;
        let trailing_start = self.text_range().end();
        located_trivia(self, TriviaSide::Leading, leading_start)
            .chain(located_trivia(self, TriviaSide::Trailing, trailing_start))
    }
}

fn located_trivia(
    token: &SyntaxToken,
    side: TriviaSide,
    start: TextSize,
) -> impl Iterator<Item = SyntaxTrivia> + '_ {
    let list = match side {
        TriviaSide::Leading => token.green.leading_trivia(),
        TriviaSide::Trailing => token.green.trailing_trivia(),
    };
    list.iter()
        .enumerate()
        .scan(start, move |offset, (index, trivia)| {
            let located = SyntaxTrivia {
                token: token.clone(),
                side,
                index,
                offset: *offset,
            };
            *offset += trivia.text_len();
            Some(located)
        })
}

/// Which trivia sequence of a token an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaSide {
    Leading,
    Trailing,
}

/// A trivia item located in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTrivia {
    token: SyntaxToken,
    side: TriviaSide,
    index: usize,
    offset: TextSize,
}

impl SyntaxTrivia {
    /// The token owning this trivia
    pub fn token(&self) -> &SyntaxToken {
        &self.token
    }

    pub fn side(&self) -> TriviaSide {
        self.side
    }

    /// Index within the owning trivia sequence
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_in_leading_trivia(&self) -> bool {
        self.side == TriviaSide::Leading
    }

    pub fn trivia(&self) -> &Trivia {
        let list = match self.side {
            TriviaSide::Leading => self.token.green.leading_trivia(),
            TriviaSide::Trailing => self.token.green.trailing_trivia(),
        };
        &list.as_slice()[self.index]
    }

    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.trivia().text_len())
    }
}

/// Every token of a tree in document order
///
/// With structured trivia included, the tokens of a structured trivia item
/// sit where the trivia is printed: tokens of leading structured trivia come
/// before their owner, tokens of trailing structured trivia after it.
#[derive(Debug, Clone)]
pub struct DocumentOrder {
    tokens: Vec<SyntaxToken>,
    positions: HashMap<TokenPath, usize>,
}

impl DocumentOrder {
    /// Document order including tokens inside structured trivia
    pub fn new(root: &GreenNode) -> Self {
        Self::build(root, true)
    }

    /// Document order of the tree's own tokens only
    pub fn without_structured_trivia(root: &GreenNode) -> Self {
        Self::build(root, false)
    }

    fn build(root: &GreenNode, include_structured: bool) -> Self {
        let mut walker = Walker {
            path: Vec::new(),
            include_structured,
            tokens: Vec::new(),
        };
        walker.node(root, TextSize::from(0));
        let positions = walker
            .tokens
            .iter()
            .enumerate()
            .map(|(position, token)| (token.path.clone(), position))
            .collect();
        Self {
            tokens: walker.tokens,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&SyntaxToken> {
        self.tokens.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxToken> {
        self.tokens.iter()
    }

    pub fn first(&self) -> Option<&SyntaxToken> {
        self.tokens.first()
    }

    /// Position of the token at `path`
    pub fn position(&self, path: &TokenPath) -> Option<usize> {
        self.positions.get(path).copied()
    }

    /// The token following the one at `path`
    pub fn next_after(&self, path: &TokenPath) -> Option<&SyntaxToken> {
        self.position(path)
            .and_then(|position| self.tokens.get(position + 1))
    }

    /// Every end-of-line trivia attached to a token of this order, sorted by
    /// text offset
    pub fn end_of_line_trivia(&self) -> Vec<SyntaxTrivia> {
        let mut found: Vec<SyntaxTrivia> = self
            .tokens
            .iter()
            .flat_map(SyntaxToken::trivia)
            .filter(|trivia| trivia.trivia().is_end_of_line())
            .collect();
        found.sort_by_key(|trivia| trivia.offset);
        found
    }
}

struct Walker {
    path: Vec<Step>,
    include_structured: bool,
    tokens: Vec<SyntaxToken>,
}

impl Walker {
    fn node(&mut self, node: &GreenNode, start: TextSize) {
        let mut offset = start;
        for (index, child) in node.children().iter().enumerate() {
            self.path.push(Step::Child(index));
            match child {
                NodeOrToken::Node(inner) => {
                    self.node(inner, offset);
                    offset += inner.text_len();
                }
                NodeOrToken::Token(token) => {
                    self.token(token, offset);
                    offset += token.full_len();
                }
            }
            self.path.pop();
        }
    }

    fn token(&mut self, token: &GreenToken, start: TextSize) {
        if self.include_structured {
            self.structured(token.leading_trivia(), Step::Leading, start);
        }
        self.tokens.push(SyntaxToken::new(
            TokenPath(self.path.clone()),
            token.clone(),
            start,
        ));
        if self.include_structured {
            let trailing_start = start + token.leading_trivia().text_len() + token.text_len();
            self.structured(token.trailing_trivia(), Step::Trailing, trailing_start);
        }
    }

    fn structured(&mut self, list: &TriviaList, step: fn(usize) -> Step, start: TextSize) {
        let mut offset = start;
        for (index, trivia) in list.iter().enumerate() {
            if let Some(structure) = trivia.structure() {
                self.path.push(step(index));
                self.node(structure, offset);
                self.path.pop();
            }
            offset += trivia.text_len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::fixture::parse;

    fn texts(order: &DocumentOrder) -> Vec<&str> {
        order.iter().map(SyntaxToken::text).collect()
    }

    #[test]
    fn test_document_order_plain() {
        let root = parse("a b\n{ c }\n");
        let order = DocumentOrder::new(&root);

        assert_eq!(texts(&order), vec!["a", "b", "{", "c", "}"]);
        assert_eq!(order.first().map(SyntaxToken::text), Some("a"));
    }

    #[test]
    fn test_document_order_includes_structured_trivia() {
        let root = parse("a\n#if X\nb");
        let order = DocumentOrder::new(&root);
        assert_eq!(texts(&order), vec!["a", "#if", "X", "b"]);

        let code_only = DocumentOrder::without_structured_trivia(&root);
        assert_eq!(texts(&code_only), vec!["a", "b"]);
    }

    #[test]
    fn test_structured_paths() {
        let root = parse("a\n#if X\nb");
        let order = DocumentOrder::new(&root);

        let directive_token = order.get(1).unwrap();
        assert!(directive_token.path().is_in_structured_trivia());
        assert_eq!(directive_token.path().to_string(), "1/leading[0]/0");
        assert!(!order.get(3).unwrap().path().is_in_structured_trivia());
    }

    #[test]
    fn test_next_after() {
        let root = parse("a\n#if X\nb");
        let order = DocumentOrder::new(&root);

        let a = order.get(0).unwrap();
        assert_eq!(order.next_after(a.path()).map(SyntaxToken::text), Some("#if"));
        let x = order.get(2).unwrap();
        assert_eq!(order.next_after(x.path()).map(SyntaxToken::text), Some("b"));
        let b = order.get(3).unwrap();
        assert!(order.next_after(b.path()).is_none());
    }

    #[test]
    fn test_ranges() {
        let root = parse("  alpha // c\nbeta");
        let order = DocumentOrder::new(&root);

        let alpha = order.get(0).unwrap();
        assert_eq!(alpha.text_range(), TextRange::new(2.into(), 7.into()));
        assert_eq!(alpha.full_range(), TextRange::new(0.into(), 13.into()));

        let beta = order.get(1).unwrap();
        assert_eq!(beta.text_range(), TextRange::new(13.into(), 17.into()));
        assert_eq!(&root.to_string()[beta.text_range()], "beta");
    }

    #[test]
    fn test_end_of_line_trivia_sorted_and_located() {
        let root = parse("a\n\n#if X\nb\n");
        let order = DocumentOrder::new(&root);
        let eols = order.end_of_line_trivia();

        let owners: Vec<(&str, bool)> = eols
            .iter()
            .map(|t| (t.token().text(), t.is_in_leading_trivia()))
            .collect();
        assert_eq!(
            owners,
            vec![("a", false), ("b", true), ("X", false), ("b", false)]
        );

        let starts: Vec<u32> = eols
            .iter()
            .map(|t| u32::from(t.text_range().start()))
            .collect();
        assert_eq!(starts, vec![1, 2, 8, 10]);
    }
}
