use std::sync::Arc;

use issuetrack_core::time::now;
use issuetrack_core::{Issue, IssueFilter, IssueId, IssueRef, NewIssue, UpdateIssue};
use issuetrack_store::RecordStore;

use crate::error::{Operation, ServiceError};
use crate::outcome::Acknowledgement;

/// Create, filter, update and delete issues of a project.
///
/// Validation always runs before the store is touched; every store outcome
/// comes back as a `ServiceError` rather than a panic or transport error.
#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn RecordStore>,
}

impl IssueService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, project: &str, fields: NewIssue) -> Result<Issue, ServiceError> {
        let record = fields.validate(now()).map_err(|e| {
            tracing::debug!(project, "create rejected: {e}");
            e
        })?;

        let issue = self
            .store
            .insert(project, record)
            .await
            .map_err(|source| {
                tracing::warn!(project, "insert failed: {source}");
                ServiceError::Store {
                    op: Operation::Create,
                    id: None,
                    source,
                }
            })?;
        tracing::info!(project, id = %issue.id, "issue created");
        Ok(issue)
    }

    /// Issues of `project` matching every `(field, value)` pair, in insertion order.
    pub async fn filter<I, K, V>(&self, project: &str, query: I) -> Result<Vec<Issue>, ServiceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let filter = IssueFilter::from_query(query);
        self.find(project, &filter).await
    }

    pub async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, ServiceError> {
        self.store.find(project, filter).await.map_err(|source| {
            tracing::warn!(project, "find failed: {source}");
            ServiceError::Store {
                op: Operation::Filter,
                id: None,
                source,
            }
        })
    }

    pub async fn update_by_id(
        &self,
        project: &str,
        request: UpdateIssue,
    ) -> Result<Acknowledgement, ServiceError> {
        let update = request.validate().map_err(|e| {
            tracing::debug!(project, "update rejected: {e}");
            e
        })?;

        let not_found = || ServiceError::NotFound {
            op: Operation::Update,
            id: update.id.clone(),
        };
        let Ok(id) = IssueId::from_string(&update.id) else {
            tracing::debug!(project, id = %update.id, "update of malformed id");
            return Err(not_found());
        };

        let updated = self
            .store
            .update_one(project, id, &update.patch, now())
            .await
            .map_err(|source| {
                tracing::warn!(project, %id, "update failed: {source}");
                ServiceError::Store {
                    op: Operation::Update,
                    id: Some(update.id.clone()),
                    source,
                }
            })?;
        if !updated {
            return Err(not_found());
        }

        tracing::info!(project, %id, fields = ?update.patch.field_names(), "issue updated");
        Ok(Acknowledgement::updated(update.id))
    }

    pub async fn delete_by_id(
        &self,
        project: &str,
        request: IssueRef,
    ) -> Result<Acknowledgement, ServiceError> {
        let raw_id = request.validate()?;

        let not_found = || ServiceError::NotFound {
            op: Operation::Delete,
            id: raw_id.clone(),
        };
        let Ok(id) = IssueId::from_string(&raw_id) else {
            tracing::debug!(project, id = %raw_id, "delete of malformed id");
            return Err(not_found());
        };

        let removed = self.store.delete_one(project, id).await.map_err(|source| {
            tracing::warn!(project, %id, "delete failed: {source}");
            ServiceError::Store {
                op: Operation::Delete,
                id: Some(raw_id.clone()),
                source,
            }
        })?;
        if !removed {
            return Err(not_found());
        }

        tracing::info!(project, %id, "issue deleted");
        Ok(Acknowledgement::deleted(raw_id))
    }
}
