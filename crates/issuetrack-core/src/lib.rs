pub mod error;
pub mod filter;
pub mod id;
pub mod issue;
pub mod patch;
pub mod request;
pub mod time;

pub use error::CoreError;
pub use filter::{Criterion, IssueFilter};
pub use id::{IdGenerator, IssueId};
pub use issue::{Issue, NewRecord};
pub use patch::IssuePatch;
pub use request::{IssueRef, NewIssue, UpdateIssue, ValidatedUpdate, ValidationError};
