//! Filter/sort engine over the canonical task collection.
//!
//! Steps run in a fixed order (scope, search, status, priority, sort)
//! because the combination is only correct when scope narrowing happens
//! before the user-selected filters.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::task::{Priority, Task};
use crate::model::{parse_id, ListId, ValidationError, ValidationResult};

use super::dates::is_overdue;

/// Route-level task subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    /// Due today and not completed.
    Today,
    /// Due strictly after today and not completed.
    Upcoming,
    /// Belonging to one list, regardless of completion.
    ByList(ListId),
}

impl Scope {
    /// Parses route text: `all`, `today`, `upcoming` or `list:<id>`.
    pub fn parse(route: &str) -> ValidationResult<Self> {
        match route.trim() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "upcoming" => Ok(Self::Upcoming),
            other => match other.strip_prefix("list:") {
                Some(id_text) => Ok(Self::ByList(parse_id(id_text)?)),
                None => Err(ValidationError::UnknownScope(other.to_string())),
            },
        }
    }
}

/// User-selected completion subset, independent of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    /// Not completed, has a due date, and the due date's start-of-day
    /// instant lies strictly before `now`.
    Overdue,
}

/// Sort key for the projected slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending; tasks without a due date go after all dated tasks and
    /// ties keep their relative order.
    #[default]
    DueDate,
    /// Descending by rank (high=3, medium=2, low=1).
    Priority,
    /// Newest first.
    Created,
    /// Ascending, case-insensitive.
    Title,
    /// Newest completion first, falling back to `created_at`; the archive
    /// sort key.
    CompletedAt,
}

/// Filter selection for one projection call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    pub scope: Scope,
    pub status: StatusFilter,
    /// `None` means all priorities.
    pub priority: Option<Priority>,
    /// Case-insensitive substring against title or description; blank is a
    /// no-op.
    pub search: String,
    pub sort: SortKey,
}

impl TaskQuery {
    /// Dashboard defaults: everything visible, sorted by due date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive defaults: completed tasks, newest completion first.
    pub fn archive() -> Self {
        Self {
            status: StatusFilter::Completed,
            sort: SortKey::CompletedAt,
            ..Self::default()
        }
    }
}

/// Projects the task collection into the ordered, reduced view slice.
pub fn project(tasks: &[Task], query: &TaskQuery, now: DateTime<Utc>) -> Vec<Task> {
    let today = now.date_naive();
    let mut view: Vec<Task> = tasks.to_vec();

    match query.scope {
        Scope::All => {}
        Scope::Today => view.retain(|t| !t.completed && t.due_date == Some(today)),
        Scope::Upcoming => {
            view.retain(|t| !t.completed && t.due_date.is_some_and(|due| due > today))
        }
        Scope::ByList(id) => view.retain(|t| t.list_id == Some(id)),
    }

    let term = query.search.trim().to_lowercase();
    if !term.is_empty() {
        view.retain(|t| {
            t.title.to_lowercase().contains(&term) || t.description.to_lowercase().contains(&term)
        });
    }

    match query.status {
        StatusFilter::All => {}
        StatusFilter::Active => view.retain(|t| !t.completed),
        StatusFilter::Completed => view.retain(|t| t.completed),
        StatusFilter::Overdue => view.retain(|t| !t.completed && is_overdue(t.due_date, now)),
    }

    if let Some(priority) = query.priority {
        view.retain(|t| t.priority == priority);
    }

    sort_tasks(&mut view, query.sort);
    view
}

fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::DueDate => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(&right),
        }),
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::Created => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => {
            tasks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::CompletedAt => tasks.sort_by(|a, b| {
            b.completed_at
                .unwrap_or(b.created_at)
                .cmp(&a.completed_at.unwrap_or(a.created_at))
        }),
    }
}

/// Aggregate counters over one task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub overdue: usize,
}

/// Computes aggregate counters the way the dashboard header shows them.
pub fn stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks
        .iter()
        .filter(|t| !t.completed && is_overdue(t.due_date, now))
        .count();

    TaskStats {
        total,
        completed,
        active: total - completed,
        overdue,
    }
}
