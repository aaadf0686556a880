//! Indentation configuration
//!
//! Describes the indentation unit a caller hands to [`crate::indent_node`].
//! The configuration only says what one level of indentation looks like; how
//! many levels a subtree needs is up to the caller.
//!
//! Configuration is read from TOML, either as a top-level table:
//!
//! ```toml
//! indentStyle = "spaces"
//! indentSize = 4
//! ```
//!
//! or as an `[indent]` section of a larger tool configuration:
//!
//! ```toml
//! [indent]
//! indentStyle = "tabs"
//! ```

use crate::cst::{Trivia, TriviaList};
use crate::error::ReindentError;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of spaces per level when no size is configured
pub const DEFAULT_INDENT_SIZE: usize = 2;

/// Name of the section holding the configuration in a larger TOML document
const SECTION: &str = "indent";

/// Indent style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Use spaces for indentation
    #[default]
    Spaces,
    /// Use tabs for indentation
    Tabs,
}

/// Indentation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndentConfiguration {
    /// Indent style (spaces or tabs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_style: Option<IndentStyle>,

    /// Indentation size in spaces (when indent_style is 'spaces')
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_size: Option<usize>,
}

impl IndentConfiguration {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut document: toml::Table = toml::from_str(content)
            .map_err(|e| ReindentError::config_error(format!("Invalid TOML: {e}")))?;

        let table = match document.remove(SECTION) {
            Some(toml::Value::Table(section)) => section,
            Some(other) => {
                return Err(ReindentError::config_error(format!(
                    "Expected [{SECTION}] to be a table, found {}",
                    other.type_str()
                )));
            }
            None => document,
        };

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| ReindentError::config_error(format!("Invalid indentation settings: {e}")))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ReindentError::io_error(path, e))?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ReindentError::ConfigError { message } => ReindentError::config_error(format!(
                "Failed to load config from '{}': {message}",
                path.display()
            )),
            other => other,
        })?;

        tracing::debug!(path = %path.display(), ?config, "loaded indentation configuration");
        Ok(config)
    }

    /// Configured style, spaces by default
    pub fn style(&self) -> IndentStyle {
        self.indent_style.unwrap_or_default()
    }

    /// Configured size, [`DEFAULT_INDENT_SIZE`] by default
    pub fn size(&self) -> usize {
        self.indent_size.unwrap_or(DEFAULT_INDENT_SIZE)
    }

    /// One level of indentation as trivia
    ///
    /// Tabs always produce a single tab. Spaces produce `size` spaces, or an
    /// empty unit for a size of zero.
    pub fn indent_unit(&self) -> TriviaList {
        match self.style() {
            IndentStyle::Tabs => Trivia::whitespace("\t").into(),
            IndentStyle::Spaces if self.size() == 0 => TriviaList::new(),
            IndentStyle::Spaces => Trivia::whitespace(" ".repeat(self.size())).into(),
        }
    }
}
