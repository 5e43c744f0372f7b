//! I/O error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The dataset root does not exist or is not a directory.
    #[error("data root not found: {}", .0.display())]
    DataRootNotFound(PathBuf),

    /// No metric in the dataset uses the requested definition id.
    #[error("no metrics with definition id {definition_id} under {}", .data_root.display())]
    DefinitionIdNotFound {
        definition_id: String,
        data_root: PathBuf,
    },

    /// A metrics file is not valid JSON or does not match the expected layout.
    #[error("invalid metrics file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<Error> for dsinsights_core::Error {
    fn from(err: Error) -> Self {
        dsinsights_core::Error::Load(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_into_core_load_error() {
        let err: dsinsights_core::Error = Error::DataRootNotFound(PathBuf::from("/missing")).into();
        assert!(matches!(err, dsinsights_core::Error::Load(_)));
        assert!(err.to_string().contains("/missing"));
    }
}
