use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use ulid::Ulid;

use crate::CoreError;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueId(Ulid);

impl IssueId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_u128(value: u128) -> Self {
        Self(Ulid::from(value))
    }

    pub fn as_u128(&self) -> u128 {
        self.0.into()
    }

    pub fn from_string(s: &str) -> Result<Self, CoreError> {
        let ulid = Ulid::from_string(s.trim())
            .map_err(|e| CoreError::InvalidIssueId(format!("{s}: {e}")))?;
        Ok(Self(ulid))
    }
}

impl Default for IssueId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for IssueId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IssueId({})", self.0)
    }
}

/// Hands out strictly increasing ids, so id order is insertion order.
pub struct IdGenerator {
    last: Mutex<Ulid>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(Ulid::nil()),
        }
    }

    /// Ids are never below `floor`; stores pass their highest persisted id.
    pub fn starting_after(floor: IssueId) -> Self {
        Self {
            last: Mutex::new(floor.0),
        }
    }

    pub fn next_id(&self) -> IssueId {
        let candidate = Ulid::new();
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = if candidate > *last {
            candidate
        } else {
            last.increment().unwrap_or(candidate)
        };
        *last = next;
        IssueId(next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
