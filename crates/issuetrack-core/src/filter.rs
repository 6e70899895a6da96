use chrono::{DateTime, Utc};

use crate::id::IssueId;
use crate::issue::Issue;
use crate::request::parse_flag;
use crate::time::parse_timestamp;

/// One exact-match condition on a stored attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Id(IssueId),
    Project(String),
    IssueTitle(String),
    IssueText(String),
    CreatedBy(String),
    AssignedTo(String),
    StatusText(String),
    Open(bool),
    CreatedOn(DateTime<Utc>),
    UpdatedOn(DateTime<Utc>),
    /// A key or value that cannot equal anything stored.
    Unsatisfiable(String),
}

impl Criterion {
    /// Coerce a raw query pair to the declared type of its field.
    pub fn from_pair(key: &str, value: &str) -> Self {
        let unsatisfiable = || Criterion::Unsatisfiable(format!("{key}={value}"));
        match key {
            "_id" => IssueId::from_string(value)
                .map(Criterion::Id)
                .unwrap_or_else(|_| unsatisfiable()),
            "project" => Criterion::Project(value.to_string()),
            "issue_title" => Criterion::IssueTitle(value.to_string()),
            "issue_text" => Criterion::IssueText(value.to_string()),
            "created_by" => Criterion::CreatedBy(value.to_string()),
            "assigned_to" => Criterion::AssignedTo(value.to_string()),
            "status_text" => Criterion::StatusText(value.to_string()),
            "open" => parse_flag(value)
                .map(Criterion::Open)
                .unwrap_or_else(|_| unsatisfiable()),
            "created_on" => parse_timestamp(value)
                .map(Criterion::CreatedOn)
                .unwrap_or_else(|_| unsatisfiable()),
            "updated_on" => parse_timestamp(value)
                .map(Criterion::UpdatedOn)
                .unwrap_or_else(|_| unsatisfiable()),
            _ => unsatisfiable(),
        }
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        match self {
            Criterion::Id(id) => issue.id == *id,
            Criterion::Project(project) => issue.project == *project,
            Criterion::IssueTitle(v) => issue.issue_title == *v,
            Criterion::IssueText(v) => issue.issue_text == *v,
            Criterion::CreatedBy(v) => issue.created_by == *v,
            Criterion::AssignedTo(v) => issue.assigned_to == *v,
            Criterion::StatusText(v) => issue.status_text == *v,
            Criterion::Open(open) => issue.open == *open,
            Criterion::CreatedOn(ts) => issue.created_on == *ts,
            Criterion::UpdatedOn(ts) => issue.updated_on == *ts,
            Criterion::Unsatisfiable(_) => false,
        }
    }
}

/// Logical AND of criteria. The empty filter matches every issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    criteria: Vec<Criterion>,
}

impl IssueFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: IssueId) -> Self {
        Self {
            criteria: vec![Criterion::Id(id)],
        }
    }

    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let criteria = pairs
            .into_iter()
            .map(|(k, v)| Criterion::from_pair(k.as_ref(), v.as_ref()))
            .collect();
        Self { criteria }
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.criteria
            .iter()
            .any(|c| matches!(c, Criterion::Unsatisfiable(_)))
    }

    /// The id this filter pins, if any, so stores can do a point lookup.
    pub fn pinned_id(&self) -> Option<IssueId> {
        self.criteria.iter().find_map(|c| match c {
            Criterion::Id(id) => Some(*id),
            _ => None,
        })
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.criteria.iter().all(|c| c.matches(issue))
    }
}
