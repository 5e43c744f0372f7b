//! Chart and layout error types.

use thiserror::Error;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Chart and layout errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The rows have no column with this name.
    #[error("unknown column {column:?} (available: {})", .available.join(", "))]
    UnknownColumn {
        column: String,
        available: &'static [&'static str],
    },

    /// A column used as a numeric axis holds text.
    #[error("column {0:?} is not numeric")]
    NonNumericColumn(String),

    /// A callback is already registered for this input.
    #[error("callback already registered for {element_id}.{property}")]
    DuplicateCallback {
        element_id: String,
        property: String,
    },

    /// No layout element has this id.
    #[error("unknown layout element: {0}")]
    UnknownElement(String),

    /// Core library error (table loading).
    #[error("core error: {0}")]
    CoreError(#[from] dsinsights_core::Error),
}
