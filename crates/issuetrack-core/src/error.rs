use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid issue ID: {0}")]
    InvalidIssueId(String),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("invalid boolean: {0}")]
    InvalidBoolean(String),
}
