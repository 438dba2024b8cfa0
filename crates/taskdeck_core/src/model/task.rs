//! Task record, creation draft and update patch.
//!
//! # Responsibility
//! - Define the canonical task shape shared by store, repositories and the
//!   projection engine.
//! - Keep the completion timestamp rule in one place (`Task::apply`).
//!
//! # Invariants
//! - `created_at` is stamped once at creation and never rewritten.
//! - `completed_at` changes only together with the `completed` flag:
//!   false→true stamps it, true→false clears it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ListId, TaskId, ValidationError, ValidationResult};

/// Task urgency bucket. Ordering for sorting goes through [`Priority::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used by the priority sort: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canonical task record.
///
/// `list_id` is a weak reference: deleting a list does not cascade here, and
/// a dangling reference reads as "no list".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub list_id: Option<ListId>,
    #[serde(default)]
    pub priority: Priority,
    /// Date-only granularity; `None` means no due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Resolved list name, filled by the repository at read time.
    /// Never persisted; a dangling `list_id` leaves it `None`.
    #[serde(skip)]
    pub list_name: Option<String>,
}

impl Task {
    /// Merges a patch onto this record, later fields winning, and keeps the
    /// completion timestamp in step with the `completed` flag.
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(list_id) = patch.list_id {
            self.list_id = list_id;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            if completed && !self.completed {
                self.completed_at = Some(now);
            } else if !completed {
                self.completed_at = None;
            }
            self.completed = completed;
        }
    }
}

/// Creation payload. Omitted optional fields fall back to record defaults.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub list_id: Option<ListId>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Form-level checks, run before the repository is invoked.
    pub fn validate(&self, today: NaiveDate) -> ValidationResult<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(due) = self.due_date {
            if due < today {
                return Err(ValidationError::DueDateInPast(due));
            }
        }
        Ok(())
    }

    /// Builds the stored record with a store-assigned id.
    pub fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            list_id: self.list_id,
            priority: self.priority,
            due_date: self.due_date,
            completed: false,
            created_at: now,
            completed_at: None,
            list_name: None,
        }
    }
}

/// Explicit partial update.
///
/// Outer `Option` marks whether the field is present in the patch; the inner
/// `Option` on nullable columns distinguishes "set" from "clear". There is
/// deliberately no `completed_at` field; that stamp is derived from the
/// `completed` transition inside [`Task::apply`].
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub list_id: Option<Option<ListId>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only toggles the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn validate(&self, today: NaiveDate) -> ValidationResult<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }
        if let Some(Some(due)) = self.due_date {
            if due < today {
                return Err(ValidationError::DueDateInPast(due));
            }
        }
        Ok(())
    }
}
