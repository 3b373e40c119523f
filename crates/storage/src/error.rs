use thiserror::Error;

/// Errors surfaced by case-store backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
