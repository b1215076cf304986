//! Store-related errors.

/// Errors that can occur when reading from or writing to a word store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store could not be reached
    #[error("Store unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error on the file backing the store
    #[error("I/O error on store file '{0}'")]
    Io(String, #[source] std::io::Error),

    /// Store contents could not be encoded or decoded
    #[error("Failed to (de)serialize store contents")]
    Serde(#[from] serde_json::Error),
}
