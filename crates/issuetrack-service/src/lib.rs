pub mod error;
pub mod outcome;
pub mod service;

pub use error::{ErrorKind, Operation, ServiceError};
pub use outcome::{Acknowledgement, ErrorBody};
pub use service::IssueService;
