//! Incremental construction of green trees
//!
//! [`TreeBuilder`] follows the shape of rowan's `GreenNodeBuilder`: callers
//! open and close nodes around a stream of tokens. Leading trivia is buffered
//! until the next token is added, and trailing trivia is appended to the token
//! added last.
//!
//! ```rust
//! use reindent_core::cst::{Trivia, TreeBuilder};
//! use rowan::SyntaxKind;
//!
//! let mut builder = TreeBuilder::new();
//! builder.start_node(SyntaxKind(0));
//! builder.token(SyntaxKind(1), "a");
//! builder.trailing_trivia(Trivia::end_of_line());
//! builder.leading_trivia(Trivia::whitespace("  "));
//! builder.token(SyntaxKind(1), "b");
//! builder.finish_node();
//!
//! assert_eq!(builder.finish().to_string(), "a\n  b");
//! ```

use super::{GreenElement, GreenNode, GreenToken, Trivia, TriviaList};
use rowan::{NodeOrToken, SyntaxKind};

/// A builder for a green tree
#[derive(Debug, Default)]
pub struct TreeBuilder {
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
    leading: Vec<Trivia>,
}

impl TreeBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new node and make it current
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Finish the current node and restore its parent as current
    ///
    /// # Panics
    ///
    /// Panics if no node is open.
    pub fn finish_node(&mut self) {
        let Some((kind, first_child)) = self.parents.pop() else {
            panic!("finish_node called without a matching start_node");
        };
        let children = self.children.split_off(first_child);
        self.children.push(GreenNode::new(kind, children).into());
    }

    /// Buffer trivia for the next token
    pub fn leading_trivia(&mut self, trivia: Trivia) {
        self.leading.push(trivia);
    }

    /// Add a token to the current node, taking the buffered leading trivia
    pub fn token(&mut self, kind: SyntaxKind, text: impl Into<String>) {
        let leading: TriviaList = std::mem::take(&mut self.leading).into();
        let token = GreenToken::new(kind, text).with_leading_trivia(leading);
        self.children.push(token.into());
    }

    /// Append trivia to the token added last
    ///
    /// # Panics
    ///
    /// Panics if the last element of the current node is not a token.
    pub fn trailing_trivia(&mut self, trivia: Trivia) {
        let first_child = self.parents.last().map_or(0, |(_, first)| *first);
        let last = (self.children.len() > first_child)
            .then(|| self.children.pop())
            .flatten();
        let Some(NodeOrToken::Token(token)) = last else {
            panic!("trailing_trivia called without a preceding token in the current node");
        };
        let trailing = token.trailing_trivia().with_pushed(trivia);
        self.children
            .push(token.with_trailing_trivia(trailing).into());
    }

    /// Complete the tree and return its root
    ///
    /// # Panics
    ///
    /// Panics if nodes are still open, if buffered leading trivia has no token
    /// to attach to, or if the root is not a single node.
    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "unfinished nodes in TreeBuilder");
        assert!(
            self.leading.is_empty(),
            "leading trivia without a following token"
        );
        match (self.children.pop(), self.children.is_empty()) {
            (Some(NodeOrToken::Node(root)), true) => root,
            _ => panic!("TreeBuilder must produce exactly one root node"),
        }
    }
}
