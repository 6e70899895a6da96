use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};

use issuetrack_core::{IdGenerator, Issue, IssueFilter, IssueId, IssuePatch, NewRecord};

use crate::{RecordStore, StoreError};

/// Issues keyed by `(project, id)`; values are JSON-encoded issues.
const ISSUES_TABLE: TableDefinition<(&str, u128), &[u8]> = TableDefinition::new("issues");

/// Persistent store backed by a single redb file.
pub struct RedbStore {
    db: Database,
    ids: IdGenerator,
}

impl RedbStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(StoreError::database)?;

        let write_txn = db.begin_write().map_err(StoreError::database)?;
        let mut highest = 0u128;
        {
            let table = write_txn
                .open_table(ISSUES_TABLE)
                .map_err(StoreError::database)?;
            for entry in table.iter().map_err(StoreError::database)? {
                let (key, _) = entry.map_err(StoreError::database)?;
                highest = highest.max(key.value().1);
            }
        }
        write_txn.commit().map_err(StoreError::database)?;

        tracing::debug!("opened issue database {}", path.display());
        Ok(Self {
            db,
            ids: IdGenerator::starting_after(IssueId::from_u128(highest)),
        })
    }
}

fn decode(project: &str, bytes: &[u8]) -> Result<Issue, StoreError> {
    let mut issue: Issue = serde_json::from_slice(bytes)?;
    issue.project = project.to_string();
    Ok(issue)
}

#[async_trait]
impl RecordStore for RedbStore {
    async fn insert(&self, project: &str, record: NewRecord) -> Result<Issue, StoreError> {
        let id = self.ids.next_id();
        let issue = record.into_issue(id, project);
        let bytes = serde_json::to_vec(&issue)?;

        let write_txn = self.db.begin_write().map_err(StoreError::database)?;
        {
            let mut table = write_txn
                .open_table(ISSUES_TABLE)
                .map_err(StoreError::database)?;
            table
                .insert((project, id.as_u128()), bytes.as_slice())
                .map_err(StoreError::database)?;
        }
        write_txn.commit().map_err(StoreError::database)?;
        Ok(issue)
    }

    async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        if filter.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        let read_txn = self.db.begin_read().map_err(StoreError::database)?;
        let table = read_txn
            .open_table(ISSUES_TABLE)
            .map_err(StoreError::database)?;

        let mut found = Vec::new();
        if let Some(id) = filter.pinned_id() {
            let bytes = table
                .get((project, id.as_u128()))
                .map_err(StoreError::database)?
                .map(|guard| guard.value().to_vec());
            if let Some(bytes) = bytes {
                let issue = decode(project, &bytes)?;
                if filter.matches(&issue) {
                    found.push(issue);
                }
            }
            return Ok(found);
        }

        let range = table
            .range((project, 0u128)..=(project, u128::MAX))
            .map_err(StoreError::database)?;
        for entry in range {
            let (_, value) = entry.map_err(StoreError::database)?;
            let issue = decode(project, value.value())?;
            if filter.matches(&issue) {
                found.push(issue);
            }
        }
        Ok(found)
    }

    async fn update_one(
        &self,
        project: &str,
        id: IssueId,
        patch: &IssuePatch,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::database)?;
        {
            let mut table = write_txn
                .open_table(ISSUES_TABLE)
                .map_err(StoreError::database)?;
            let existing = table
                .get((project, id.as_u128()))
                .map_err(StoreError::database)?
                .map(|guard| guard.value().to_vec());
            let Some(bytes) = existing else {
                return Ok(false);
            };

            let mut issue = decode(project, &bytes)?;
            patch.apply(&mut issue, now);
            let updated = serde_json::to_vec(&issue)?;
            table
                .insert((project, id.as_u128()), updated.as_slice())
                .map_err(StoreError::database)?;
        }
        write_txn.commit().map_err(StoreError::database)?;
        Ok(true)
    }

    async fn delete_one(&self, project: &str, id: IssueId) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::database)?;
        let removed = {
            let mut table = write_txn
                .open_table(ISSUES_TABLE)
                .map_err(StoreError::database)?;
            // The guard returned by `remove` borrows `table`; it must drop first.
            let removed = table
                .remove((project, id.as_u128()))
                .map_err(StoreError::database)?
                .is_some();
            removed
        };
        write_txn.commit().map_err(StoreError::database)?;
        Ok(removed)
    }
}
