use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::IssueId;

/// A stored issue. Serializes to the JSON shape clients see; `project` is a
/// partition key kept by the store and never written to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
    #[serde(skip)]
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    #[serde(with = "crate::time::rfc3339_millis")]
    pub created_on: DateTime<Utc>,
    #[serde(with = "crate::time::rfc3339_millis")]
    pub updated_on: DateTime<Utc>,
    pub created_by: String,
    #[serde(default)]
    pub assigned_to: String,
    pub open: bool,
    #[serde(default)]
    pub status_text: String,
}

/// A validated issue that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl NewRecord {
    pub fn into_issue(self, id: IssueId, project: &str) -> Issue {
        Issue {
            id,
            project: project.to_string(),
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_on: self.created_on,
            updated_on: self.updated_on,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            open: self.open,
            status_text: self.status_text,
        }
    }
}
