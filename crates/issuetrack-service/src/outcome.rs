use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub const UPDATED: &str = "successfully updated";
pub const DELETED: &str = "successfully deleted";

/// Success body of update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl Acknowledgement {
    pub fn updated(id: impl Into<String>) -> Self {
        Self {
            result: UPDATED.to_string(),
            id: id.into(),
        }
    }

    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            result: DELETED.to_string(),
            id: id.into(),
        }
    }
}

/// `{error, _id?}` body every failed operation is rendered as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ErrorBody {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            id: None,
        }
    }
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_string(),
            id: err.id().map(str::to_string),
        }
    }
}
