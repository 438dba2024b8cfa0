//! Domain model for tasks and lists.
//!
//! # Responsibility
//! - Define the canonical records held by the data store.
//! - Define the draft/patch payloads that mutate them, with validation.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer id.
//! - `Task::completed_at` is `Some` exactly when `Task::completed` is true.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod list;
pub mod task;

/// Stable identifier for a task record.
pub type TaskId = u64;

/// Stable identifier for a list record.
pub type ListId = u64;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input validation failure, raised before any store interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace-only.
    EmptyTitle,
    /// List name is empty or whitespace-only.
    EmptyName,
    /// Submitted due date lies before the current calendar day.
    DueDateInPast(chrono::NaiveDate),
    /// Id text did not parse as an integer id.
    InvalidId(String),
    /// Route text named no known scope.
    UnknownScope(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyName => write!(f, "list name must not be empty"),
            Self::DueDateInPast(date) => {
                write!(f, "due date {date} is in the past")
            }
            Self::InvalidId(text) => write!(f, "invalid id `{text}`"),
            Self::UnknownScope(text) => write!(f, "unknown scope `{text}`"),
        }
    }
}

impl Error for ValidationError {}

/// Parses id text into the integer id type used end-to-end.
///
/// Malformed input is rejected instead of being coerced the way loosely
/// typed lookups would.
pub fn parse_id(text: &str) -> ValidationResult<u64> {
    text.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidId(text.to_string()))
}
