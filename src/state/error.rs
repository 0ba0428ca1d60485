//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Picker directory could not be read
    #[error("Failed to read picker directory {path}: {source}")]
    PickerDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Selected file could not be inspected
    #[error("Failed to inspect file {path}: {source}")]
    FileMetadata {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic state error
    #[error("State error: {0}")]
    #[allow(dead_code)]
    Other(String),
}
