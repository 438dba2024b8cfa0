//! Canonical view state and the mutation protocol around repository calls.
//!
//! # Responsibility
//! - Own the client-side copies of the task/list collections.
//! - Apply confirmed repository results to canonical state and keep the
//!   derived per-scope counts current.
//! - Surface outcomes as drainable notices instead of letting failures
//!   escape the control flow.
//!
//! # Invariants
//! - Canonical state changes only after a repository call confirms; there
//!   is no optimistic update and no automatic retry.
//! - A failed single mutation leaves canonical state untouched.
//! - After a bulk operation, canonical state reflects every individually
//!   confirmed mutation even when siblings in the batch failed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{error, info, warn};

use crate::model::list::{List, ListPatch, NewList};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::{ListId, TaskId};
use crate::query::projection::{project, TaskQuery};
use crate::repo::list_repo::ListRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, RepoResult};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient user-facing notification, drained by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Per-scope counts of non-completed tasks, recomputed on every change to
/// the canonical collections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub all: usize,
    pub today: usize,
    pub upcoming: usize,
    pub by_list: BTreeMap<ListId, usize>,
}

/// The view state controller.
///
/// Generic over the repository contracts so tests can substitute failing
/// doubles for the mock-store implementations.
pub struct Workspace<T: TaskRepository, L: ListRepository> {
    task_repo: T,
    list_repo: L,
    tasks: Vec<Task>,
    lists: Vec<List>,
    counts: TaskCounts,
    notices: Vec<Notice>,
    loading: bool,
    load_error: Option<String>,
}

impl<T: TaskRepository, L: ListRepository> Workspace<T, L> {
    pub fn new(task_repo: T, list_repo: L) -> Self {
        Self {
            task_repo,
            list_repo,
            tasks: Vec::new(),
            lists: Vec::new(),
            counts: TaskCounts::default(),
            notices: Vec::new(),
            loading: false,
            load_error: None,
        }
    }

    /// Canonical task snapshot, in store order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn counts(&self) -> &TaskCounts {
        &self.counts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error of the last failed [`load`](Self::load), until a reload
    /// succeeds; the explicit retry path re-invokes `load`.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Drains queued notices in emission order.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Projects the canonical tasks into the slice a view renders.
    pub fn visible_tasks(&self, query: &TaskQuery, now: DateTime<Utc>) -> Vec<Task> {
        project(&self.tasks, query, now)
    }

    /// Fetches both collections and replaces canonical state wholesale.
    pub async fn load(&mut self) -> RepoResult<()> {
        self.loading = true;
        let loaded = futures::try_join!(self.task_repo.get_all(), self.list_repo.get_all());
        self.loading = false;

        match loaded {
            Ok((tasks, lists)) => {
                info!(
                    "event=workspace_load module=service status=ok tasks={} lists={}",
                    tasks.len(),
                    lists.len()
                );
                self.tasks = tasks;
                self.lists = lists;
                self.load_error = None;
                self.refresh_counts();
                Ok(())
            }
            Err(err) => {
                error!("event=workspace_load module=service status=error error={err}");
                self.load_error = Some(err.to_string());
                self.notice(NoticeLevel::Error, "Failed to load data");
                Err(err)
            }
        }
    }

    pub async fn create_task(&mut self, draft: NewTask) -> RepoResult<Task> {
        self.loading = true;
        let created = self.task_repo.create(draft).await;
        self.loading = false;

        match created {
            Ok(task) => {
                info!(
                    "event=task_create module=service status=ok id={}",
                    task.id
                );
                self.tasks.push(task.clone());
                self.refresh_counts();
                self.notice(NoticeLevel::Success, "Task created successfully");
                Ok(task)
            }
            Err(err) => {
                error!("event=task_create module=service status=error error={err}");
                self.notice(NoticeLevel::Error, "Failed to save task");
                Err(err)
            }
        }
    }

    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        self.loading = true;
        let updated = self.task_repo.update(id, patch).await;
        self.loading = false;

        match updated {
            Ok(task) => {
                info!("event=task_update module=service status=ok id={id}");
                self.replace_task(task.clone());
                self.refresh_counts();
                self.notice(NoticeLevel::Success, "Task updated successfully");
                Ok(task)
            }
            Err(err) => {
                error!("event=task_update module=service status=error id={id} error={err}");
                self.notice(NoticeLevel::Error, "Failed to save task");
                Err(err)
            }
        }
    }

    /// Toggles the completion flag; the repository stamps or clears
    /// `completed_at` together with it.
    pub async fn toggle_complete(&mut self, id: TaskId, completed: bool) -> RepoResult<Task> {
        self.loading = true;
        let toggled = self.task_repo.update(id, TaskPatch::completion(completed)).await;
        self.loading = false;

        match toggled {
            Ok(task) => {
                info!(
                    "event=task_toggle module=service status=ok id={id} completed={completed}"
                );
                self.replace_task(task.clone());
                self.refresh_counts();
                if completed {
                    self.notice(NoticeLevel::Success, "Task completed");
                } else {
                    self.notice(NoticeLevel::Info, "Task marked as incomplete");
                }
                Ok(task)
            }
            Err(err) => {
                error!("event=task_toggle module=service status=error id={id} error={err}");
                self.notice(NoticeLevel::Error, "Failed to update task");
                Err(err)
            }
        }
    }

    pub async fn delete_task(&mut self, id: TaskId) -> RepoResult<()> {
        self.loading = true;
        let deleted = self.task_repo.delete(id).await;
        self.loading = false;

        match deleted {
            Ok(()) => {
                info!("event=task_delete module=service status=ok id={id}");
                self.tasks.retain(|t| t.id != id);
                self.refresh_counts();
                self.notice(NoticeLevel::Success, "Task deleted");
                Ok(())
            }
            Err(err) => {
                error!("event=task_delete module=service status=error id={id} error={err}");
                self.notice(NoticeLevel::Error, "Failed to delete task");
                Err(err)
            }
        }
    }

    /// Archive action: reopen one completed task.
    pub async fn restore_task(&mut self, id: TaskId) -> RepoResult<Task> {
        self.loading = true;
        let restored = self.task_repo.update(id, TaskPatch::completion(false)).await;
        self.loading = false;

        match restored {
            Ok(task) => {
                info!("event=task_restore module=service status=ok id={id}");
                self.replace_task(task.clone());
                self.refresh_counts();
                self.notice(NoticeLevel::Success, "Task restored successfully");
                Ok(task)
            }
            Err(err) => {
                error!("event=task_restore module=service status=error id={id} error={err}");
                self.notice(NoticeLevel::Error, "Failed to restore task");
                Err(err)
            }
        }
    }

    /// Archive bulk action: reopen every completed task.
    ///
    /// Calls are issued concurrently and awaited together. Confirmed
    /// restores are merged into canonical state even when siblings fail,
    /// so client state always matches store contents; any failure makes
    /// the batch itself report `Failed`.
    pub async fn restore_completed(&mut self) -> RepoResult<usize> {
        let targets: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        if targets.is_empty() {
            return Ok(0);
        }

        self.loading = true;
        let results = join_all(
            targets
                .iter()
                .map(|id| self.task_repo.update(*id, TaskPatch::completion(false))),
        )
        .await;
        self.loading = false;

        let mut restored = 0usize;
        let mut failures = 0usize;
        for (id, result) in targets.iter().zip(results) {
            match result {
                Ok(task) => {
                    self.replace_task(task);
                    restored += 1;
                }
                Err(err) => {
                    warn!(
                        "event=archive_restore module=service status=error id={id} error={err}"
                    );
                    failures += 1;
                }
            }
        }
        self.refresh_counts();

        if failures == 0 {
            info!("event=archive_restore module=service status=ok count={restored}");
            self.notice(
                NoticeLevel::Success,
                format!("{restored} tasks restored successfully"),
            );
            Ok(restored)
        } else {
            self.notice(NoticeLevel::Error, "Failed to restore tasks");
            Err(RepoError::Failed(format!(
                "{failures} of {} restore operations failed",
                targets.len()
            )))
        }
    }

    /// Archive bulk action: permanently delete every completed task.
    ///
    /// Same batch semantics as [`restore_completed`](Self::restore_completed).
    pub async fn delete_completed(&mut self) -> RepoResult<usize> {
        let targets: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        if targets.is_empty() {
            return Ok(0);
        }

        self.loading = true;
        let results = join_all(targets.iter().map(|id| self.task_repo.delete(*id))).await;
        self.loading = false;

        let mut removed = 0usize;
        let mut failures = 0usize;
        for (id, result) in targets.iter().zip(results) {
            match result {
                Ok(()) => {
                    self.tasks.retain(|t| t.id != *id);
                    removed += 1;
                }
                Err(err) => {
                    warn!(
                        "event=archive_delete module=service status=error id={id} error={err}"
                    );
                    failures += 1;
                }
            }
        }
        self.refresh_counts();

        if failures == 0 {
            info!("event=archive_delete module=service status=ok count={removed}");
            self.notice(
                NoticeLevel::Success,
                format!("{removed} tasks permanently deleted"),
            );
            Ok(removed)
        } else {
            self.notice(NoticeLevel::Error, "Failed to delete tasks");
            Err(RepoError::Failed(format!(
                "{failures} of {} delete operations failed",
                targets.len()
            )))
        }
    }

    pub async fn create_list(&mut self, draft: NewList) -> RepoResult<List> {
        self.loading = true;
        let created = self.list_repo.create(draft).await;
        self.loading = false;

        match created {
            Ok(list) => {
                info!("event=list_create module=service status=ok id={}", list.id);
                self.lists.push(list.clone());
                self.refresh_counts();
                self.notice(NoticeLevel::Success, "List created successfully");
                Ok(list)
            }
            Err(err) => {
                error!("event=list_create module=service status=error error={err}");
                self.notice(NoticeLevel::Error, "Failed to save list");
                Err(err)
            }
        }
    }

    pub async fn update_list(&mut self, id: ListId, patch: ListPatch) -> RepoResult<List> {
        self.loading = true;
        let updated = self.list_repo.update(id, patch).await;
        self.loading = false;

        match updated {
            Ok(list) => {
                info!("event=list_update module=service status=ok id={id}");
                if let Some(slot) = self.lists.iter_mut().find(|l| l.id == id) {
                    *slot = list.clone();
                }
                self.notice(NoticeLevel::Success, "List updated successfully");
                Ok(list)
            }
            Err(err) => {
                error!("event=list_update module=service status=error id={id} error={err}");
                self.notice(NoticeLevel::Error, "Failed to save list");
                Err(err)
            }
        }
    }

    /// Deletes a list. Tasks referencing it keep their `list_id`; readers
    /// resolve the dangling reference as "no list".
    pub async fn delete_list(&mut self, id: ListId) -> RepoResult<()> {
        self.loading = true;
        let deleted = self.list_repo.delete(id).await;
        self.loading = false;

        match deleted {
            Ok(()) => {
                info!("event=list_delete module=service status=ok id={id}");
                self.lists.retain(|l| l.id != id);
                self.refresh_counts();
                self.notice(NoticeLevel::Success, "List deleted");
                Ok(())
            }
            Err(err) => {
                error!("event=list_delete module=service status=error id={id} error={err}");
                self.notice(NoticeLevel::Error, "Failed to delete list");
                Err(err)
            }
        }
    }

    fn replace_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    fn refresh_counts(&mut self) {
        let today = Utc::now().date_naive();
        let open = |t: &&Task| !t.completed;

        let mut counts = TaskCounts {
            all: self.tasks.iter().filter(open).count(),
            today: self
                .tasks
                .iter()
                .filter(open)
                .filter(|t| t.due_date == Some(today))
                .count(),
            upcoming: self
                .tasks
                .iter()
                .filter(open)
                .filter(|t| t.due_date.is_some_and(|due| due > today))
                .count(),
            by_list: BTreeMap::new(),
        };
        for list in &self.lists {
            let count = self
                .tasks
                .iter()
                .filter(open)
                .filter(|t| t.list_id == Some(list.id))
                .count();
            counts.by_list.insert(list.id, count);
        }
        self.counts = counts;
    }

    fn notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }
}
