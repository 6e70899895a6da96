use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use issuetrack_core::{IdGenerator, Issue, IssueFilter, IssueId, IssuePatch, NewRecord};

use crate::{RecordStore, StoreError};

type Key = (String, IssueId);

/// Ephemeral store for tests and `--memory` servers.
#[derive(Default)]
pub struct MemoryStore {
    issues: RwLock<BTreeMap<Key, Issue>>,
    ids: IdGenerator,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }
}

fn key(project: &str, id: IssueId) -> Key {
    (project.to_string(), id)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, project: &str, record: NewRecord) -> Result<Issue, StoreError> {
        let id = self.ids.next_id();
        let issue = record.into_issue(id, project);
        self.issues
            .write()
            .await
            .insert(key(project, id), issue.clone());
        Ok(issue)
    }

    async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        if filter.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        let issues = self.issues.read().await;
        if let Some(id) = filter.pinned_id() {
            return Ok(issues
                .get(&key(project, id))
                .filter(|issue| filter.matches(issue))
                .cloned()
                .into_iter()
                .collect());
        }
        let lower = key(project, IssueId::from_u128(0));
        let upper = key(project, IssueId::from_u128(u128::MAX));
        Ok(issues
            .range(lower..=upper)
            .map(|(_, issue)| issue)
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn update_one(
        &self,
        project: &str,
        id: IssueId,
        patch: &IssuePatch,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut issues = self.issues.write().await;
        match issues.get_mut(&key(project, id)) {
            Some(issue) => {
                patch.apply(issue, now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, project: &str, id: IssueId) -> Result<bool, StoreError> {
        Ok(self.issues.write().await.remove(&key(project, id)).is_some())
    }
}
