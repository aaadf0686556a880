//! Immutable, trivia-attached syntax trees
//!
//! This module holds the tree that indentation operates on. It borrows rowan's
//! vocabulary (`SyntaxKind`, `TextSize`, `TextRange`, `NodeOrToken`) and its
//! green-tree storage model, but attaches trivia to tokens instead of storing
//! it as sibling tokens.
//!
//! ## Architecture
//!
//! - **Green tree**: immutable, position independent storage
//!   - Nodes and tokens are shared through `Arc`, so cloning is cheap
//!   - Every edit returns a new tree that shares all untouched subtrees
//!
//! - **Located view**: tokens and trivia paired with a path and an offset
//!   - [`DocumentOrder`] lists tokens as they appear in the printed text
//!   - [`TokenPath`] steps may enter structured trivia (directives, doc
//!     comments), whose tokens take part in navigation like any other token
//!
//! ## Trivia Handling
//!
//! Trivia is attached to tokens:
//! - **Leading trivia**: everything before a token since the previous line break
//! - **Trailing trivia**: everything after a token up to and including the next
//!   line break
//!
//! This keeps the tree lossless: `fixture::parse(source).to_string() == source`
//!
//! ## Example
//!
//! ```rust
//! use reindent_core::cst::{fixture, DocumentOrder};
//!
//! let root = fixture::parse("a // comment\n#if X\nb");
//! assert_eq!(root.to_string(), "a // comment\n#if X\nb");
//!
//! let texts: Vec<_> = DocumentOrder::new(&root).iter().map(|t| t.text().to_string()).collect();
//! assert_eq!(texts, ["a", "#if", "X", "b"]);
//! ```

mod annotation;
mod builder;
mod cursor;
pub(crate) mod green;
mod rewrite;

pub mod fixture;
pub mod trivia;

pub use annotation::Annotation;
pub use builder::TreeBuilder;
pub use cursor::{DocumentOrder, Step, SyntaxToken, SyntaxTrivia, TokenPath, TriviaSide};
pub use green::{GreenElement, GreenNode, GreenToken};
pub use trivia::{Trivia, TriviaKind, TriviaList};
