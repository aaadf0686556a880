//! Reindent Core
//!
//! Inserts indentation into immutable syntax trees while preserving every
//! other character of the source text. Used by code generation and
//! transformation tooling that moves, wraps or nests a subtree and needs it
//! re-indented without re-printing the file.
//!
//! - [`cst`]: the immutable, trivia-attached tree indentation works on
//! - [`indent`]: line-start discovery, batch token rewriting and the
//!   single-token indentation rule
//! - [`config`]: the indentation unit, loaded from TOML

pub mod config;
pub mod cst; // Immutable trivia-attached syntax tree
pub mod error;
pub mod indent;
pub mod result;

// Re-export commonly used types
pub use config::{IndentConfiguration, IndentStyle};
pub use cst::{GreenNode, GreenToken, SyntaxToken, TokenPath, Trivia, TriviaList};
pub use error::{ErrorKind, ReindentError};
pub use indent::{Indent, indent_node, indent_token, line_start_tokens, rewrite_tokens};
pub use result::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
