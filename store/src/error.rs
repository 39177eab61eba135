use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage lock poisoned: {0}")]
    Poisoned(String),

    #[error("balance overflow for {0}")]
    Overflow(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
