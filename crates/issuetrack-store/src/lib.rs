pub mod config;
pub mod error;
pub mod layout;
pub mod memory;
pub mod redb_store;

pub use config::{Backend, TrackerConfig};
pub use error::StoreError;
pub use layout::DataLayout;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use issuetrack_core::{Issue, IssueFilter, IssueId, IssuePatch, NewRecord};

/// Persistence for issues, partitioned by project.
///
/// Every method touches a single project. Implementations assign ids on
/// insert and return issues in insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, project: &str, record: NewRecord) -> Result<Issue, StoreError>;

    async fn find(&self, project: &str, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    /// Apply `patch` to the issue if it exists. `Ok(false)` means no such issue.
    async fn update_one(
        &self,
        project: &str,
        id: IssueId,
        patch: &IssuePatch,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// `Ok(false)` means nothing was removed.
    async fn delete_one(&self, project: &str, id: IssueId) -> Result<bool, StoreError>;
}

/// Open the backend a data directory is configured for.
pub fn open_store(
    layout: &DataLayout,
    backend: Backend,
) -> Result<Arc<dyn RecordStore>, StoreError> {
    match backend {
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
        Backend::Redb => {
            layout.ensure_initialized()?;
            Ok(Arc::new(RedbStore::open(&layout.db_file())?))
        }
    }
}

/// Create a data directory with a default config.
pub fn init(layout: &DataLayout) -> Result<TrackerConfig, StoreError> {
    layout.create_dirs()?;
    if !layout.is_initialized() {
        config::write_default_config(layout)?;
    }
    config::read_config(layout)
}
