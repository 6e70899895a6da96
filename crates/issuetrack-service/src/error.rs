use thiserror::Error;

use issuetrack_core::ValidationError;
use issuetrack_store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Filter,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "could not create",
            Operation::Filter => "could not fetch issues",
            Operation::Update => "could not update",
            Operation::Delete => "could not delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any store access.
    Validation,
    /// Well-formed request naming an issue that does not exist.
    NotFound,
    /// The record store failed.
    Store,
}

/// Every failure an issue operation can report. `Display` is the message
/// clients receive in the `error` field.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", .op.failure_message())]
    NotFound { op: Operation, id: String },
    #[error("{}", .op.failure_message())]
    Store {
        op: Operation,
        id: Option<String>,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::Store { .. } => ErrorKind::Store,
        }
    }

    /// The id the failed request referenced, when it got far enough to have one.
    pub fn id(&self) -> Option<&str> {
        match self {
            ServiceError::Validation(_) => None,
            ServiceError::NotFound { id, .. } => Some(id.as_str()),
            ServiceError::Store { id, .. } => id.as_deref(),
        }
    }
}
