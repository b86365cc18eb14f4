//! Error types for the filter crate.

use formstate_types::TypeError;

/// Errors that can occur in a configured filter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    /// The two snapshots describe different fields.
    #[error("snapshot names differ: new `{new}`, old `{old}`")]
    NameMismatch { new: String, old: String },

    /// A snapshot could not be built.
    #[error("type error: {0}")]
    Types(#[from] TypeError),
}

/// Convenience alias for filter results.
pub type FilterResult<T> = Result<T, FilterError>;
