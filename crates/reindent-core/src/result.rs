//! Result type alias for reindent operations

use crate::error::ReindentError;

/// Standard Result type for reindent operations
pub type Result<T> = std::result::Result<T, ReindentError>;
