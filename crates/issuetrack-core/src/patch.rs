use chrono::{DateTime, Utc};

use crate::issue::Issue;

/// The fields an update assigns. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssuePatch {
    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.issue_title.is_some() {
            names.push("issue_title");
        }
        if self.issue_text.is_some() {
            names.push("issue_text");
        }
        if self.created_by.is_some() {
            names.push("created_by");
        }
        if self.assigned_to.is_some() {
            names.push("assigned_to");
        }
        if self.status_text.is_some() {
            names.push("status_text");
        }
        if self.open.is_some() {
            names.push("open");
        }
        names
    }

    /// Assign every supplied field and refresh `updated_on`.
    /// `id`, `project` and `created_on` are never touched.
    pub fn apply(&self, issue: &mut Issue, now: DateTime<Utc>) {
        if let Some(title) = &self.issue_title {
            issue.issue_title = title.clone();
        }
        if let Some(text) = &self.issue_text {
            issue.issue_text = text.clone();
        }
        if let Some(created_by) = &self.created_by {
            issue.created_by = created_by.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            issue.assigned_to = assigned_to.clone();
        }
        if let Some(status_text) = &self.status_text {
            issue.status_text = status_text.clone();
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
        issue.updated_on = now.max(issue.created_on);
    }
}
