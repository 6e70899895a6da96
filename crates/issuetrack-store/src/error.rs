use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not an issuetrack data directory: {0}")]
    NotInitialized(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}

impl StoreError {
    pub(crate) fn database(err: impl std::fmt::Display) -> Self {
        StoreError::Database(err.to_string())
    }
}
