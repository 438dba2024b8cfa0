//! Fixture seeding for the mock store.
//!
//! The JSON records stand in for a remote API's initial dataset; they are
//! parsed once at startup and never touched again.

use crate::model::list::List;
use crate::model::task::Task;

use super::{StoreResult, Tables};

const TASK_FIXTURES: &str = include_str!("../../fixtures/tasks.json");
const LIST_FIXTURES: &str = include_str!("../../fixtures/lists.json");

/// Parses the embedded fixture files into fresh tables.
pub(super) fn fixture_tables() -> StoreResult<Tables> {
    let tasks: Vec<Task> = serde_json::from_str(TASK_FIXTURES)?;
    let lists: Vec<List> = serde_json::from_str(LIST_FIXTURES)?;
    Ok(Tables { tasks, lists })
}

#[cfg(test)]
mod tests {
    use super::fixture_tables;

    #[test]
    fn fixtures_parse_and_respect_the_completion_invariant() {
        let tables = fixture_tables().unwrap();
        assert!(!tables.tasks.is_empty());
        assert!(!tables.lists.is_empty());

        for task in &tables.tasks {
            assert_eq!(
                task.completed,
                task.completed_at.is_some(),
                "task {} breaks the completed/completed_at invariant",
                task.id
            );
        }
    }

    #[test]
    fn fixture_ids_are_unique() {
        let tables = fixture_tables().unwrap();
        let mut task_ids: Vec<_> = tables.tasks.iter().map(|t| t.id).collect();
        task_ids.sort_unstable();
        task_ids.dedup();
        assert_eq!(task_ids.len(), tables.tasks.len());
    }
}
