//! Task repository contract and mock-store implementation.
//!
//! # Responsibility
//! - Provide the task CRUD surface (`GET/POST/PATCH/DELETE /tasks`).
//! - Stamp timestamps, fill defaults and resolve the derived list name.
//!
//! # Invariants
//! - Returned records are snapshots; the store's internal sequence is never
//!   exposed.
//! - `completed_at` is only ever changed through `Task::apply`, together
//!   with the `completed` flag.
//! - Stored records never carry a resolved `list_name`; decoration happens
//!   on the way out, and a dangling `list_id` decorates as `None`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::model::list::List;
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::{ListId, TaskId};
use crate::store::{MemoryStore, StoreOp};

use super::{EntityKind, RepoError, RepoResult};

/// Async CRUD contract for task records.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Snapshot of all tasks, each decorated with its resolved list name.
    async fn get_all(&self) -> RepoResult<Vec<Task>>;
    async fn get_by_id(&self, id: TaskId) -> RepoResult<Task>;
    async fn create(&self, draft: NewTask) -> RepoResult<Task>;
    async fn update(&self, id: TaskId, patch: TaskPatch) -> RepoResult<Task>;
    async fn delete(&self, id: TaskId) -> RepoResult<()>;
}

/// Task repository backed by the in-memory mock store.
#[derive(Clone)]
pub struct MemTaskRepository {
    store: Arc<MemoryStore>,
}

impl MemTaskRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn resolve_list_name(lists: &[List], list_id: Option<ListId>) -> Option<String> {
    let id = list_id?;
    lists.iter().find(|l| l.id == id).map(|l| l.name.clone())
}

fn decorated(mut task: Task, lists: &[List]) -> Task {
    task.list_name = resolve_list_name(lists, task.list_id);
    task
}

fn not_found(id: TaskId) -> RepoError {
    RepoError::NotFound {
        kind: EntityKind::Task,
        id,
    }
}

#[async_trait]
impl TaskRepository for MemTaskRepository {
    async fn get_all(&self) -> RepoResult<Vec<Task>> {
        let tasks = self
            .store
            .with_read(StoreOp::List, |t| {
                t.tasks
                    .iter()
                    .map(|task| decorated(task.clone(), &t.lists))
                    .collect()
            })
            .await;
        Ok(tasks)
    }

    async fn get_by_id(&self, id: TaskId) -> RepoResult<Task> {
        self.store
            .with_read(StoreOp::Lookup, |t| {
                t.tasks
                    .iter()
                    .find(|task| task.id == id)
                    .map(|task| decorated(task.clone(), &t.lists))
                    .ok_or_else(|| not_found(id))
            })
            .await
    }

    async fn create(&self, draft: NewTask) -> RepoResult<Task> {
        let now = Utc::now();
        draft.validate(now.date_naive())?;

        let task = self
            .store
            .with_write(StoreOp::Create, |t| {
                let record = draft.into_task(t.next_task_id(), now);
                t.tasks.push(record.clone());
                decorated(record, &t.lists)
            })
            .await;
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        let now = Utc::now();
        patch.validate(now.date_naive())?;

        self.store
            .with_write(StoreOp::Update, |t| {
                let index = t
                    .tasks
                    .iter()
                    .position(|task| task.id == id)
                    .ok_or_else(|| not_found(id))?;

                let mut record = t.tasks[index].clone();
                record.apply(patch, now);
                t.tasks[index] = record.clone();
                Ok(decorated(record, &t.lists))
            })
            .await
    }

    async fn delete(&self, id: TaskId) -> RepoResult<()> {
        self.store
            .with_write(StoreOp::Delete, |t| {
                let index = t
                    .tasks
                    .iter()
                    .position(|task| task.id == id)
                    .ok_or_else(|| not_found(id))?;
                t.tasks.remove(index);
                Ok(())
            })
            .await
    }
}
