//! Error types for the collate crate.
//!
//! Only configuration mistakes are errors: an unrecognized condition name
//! and an explicit jump to an out-of-range page. Data variance (invalid
//! regex patterns, incomparable values, navigation at the boundaries)
//! degrades to a defined fallback instead.

use thiserror::Error;

/// Errors raised while evaluating a configuration against a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollateError {
    /// A filter group named a condition the registry does not know.
    #[error("unknown filter condition '{condition}' for field '{field}'")]
    UnknownCondition {
        /// Field the group was configured for.
        field: String,
        /// The unrecognized condition name.
        condition: String,
    },

    /// `set_page` was called with a page outside `[1, total_pages]`.
    #[error("page {page} is out of bounds, must be between 1 and {total_pages}")]
    PageOutOfBounds {
        /// The requested page.
        page: usize,
        /// Number of pages the collection currently spans.
        total_pages: usize,
    },
}

/// Result type for collate operations.
pub type Result<T> = std::result::Result<T, CollateError>;
