//! Transient token marks
//!
//! An [`Annotation`] tags a token so it can be found again after the tree it
//! lives in has been rewritten. Annotations are invisible in the printed text
//! and travel with the token they are attached to, so they survive edits made
//! elsewhere in the tree.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ANNOTATION_ID: AtomicU64 = AtomicU64::new(1);

/// A unique, process-wide token mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Annotation(NonZeroU64);

impl Annotation {
    /// Create a fresh annotation, distinct from every other one in the process
    ///
    /// # Panics
    ///
    /// Panics once every identifier has been handed out.
    pub fn new() -> Self {
        let next = NEXT_ANNOTATION_ID
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .ok()
            .and_then(NonZeroU64::new);
        match next {
            Some(id) => Self(id),
            None => panic!("annotation identifiers exhausted"),
        }
    }

    /// Raw identifier of this annotation
    pub fn id(self) -> u64 {
        self.0.get()
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "annotation#{}", self.0)
    }
}
