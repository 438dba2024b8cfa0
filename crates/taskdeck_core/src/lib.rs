//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for task/list business rules.
//!
//! Layering, leaves first: `store` (in-memory mock data with simulated
//! latency) → `repo` (async CRUD contracts) → `query` (pure filter/sort
//! projection) → `service` (canonical view state and mutation protocol).

pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{List, ListPatch, NewList, DEFAULT_LIST_COLOR, DEFAULT_LIST_ICON};
pub use model::task::{NewTask, Priority, Task, TaskPatch};
pub use model::{parse_id, ListId, TaskId, ValidationError};
pub use query::dates::{due_label, is_overdue};
pub use query::projection::{project, stats, Scope, SortKey, StatusFilter, TaskQuery, TaskStats};
pub use repo::list_repo::{ListRepository, MemListRepository};
pub use repo::task_repo::{MemTaskRepository, TaskRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::workspace::{Notice, NoticeLevel, TaskCounts, Workspace};
pub use store::{LatencyProfile, MemoryStore, StoreError, Tables};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
