use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to persist store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Other(String),
}
