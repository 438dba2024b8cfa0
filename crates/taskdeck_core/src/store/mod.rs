//! In-memory mock data store.
//!
//! # Responsibility
//! - Own the canonical task/list tables and assign record ids.
//! - Simulate network latency on every operation class.
//!
//! # Invariants
//! - The table mutex is only taken inside the non-async access closures,
//!   never held across an await point.
//! - Assigned ids are strictly greater than every existing id in the same
//!   table (`max + 1`, `1` on an empty table).
//! - Contents are discarded on process exit; there is no durability.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::info;

use crate::model::list::List;
use crate::model::task::Task;
use crate::model::{ListId, TaskId};

mod seed;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store bootstrap error. The mock store itself never fails at runtime;
/// only seeding from fixture data can go wrong.
#[derive(Debug)]
pub enum StoreError {
    InvalidFixture(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFixture(err) => write!(f, "invalid fixture data: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFixture(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidFixture(value)
    }
}

/// Operation class used to pick the simulated round-trip delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Lookup,
    Create,
    Update,
    Delete,
}

/// Artificial per-operation latency emulating a remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub lookup: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(300),
            lookup: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(250),
        }
    }
}

impl LatencyProfile {
    /// No artificial delay. Intended for tests.
    pub fn zero() -> Self {
        Self {
            list: Duration::ZERO,
            lookup: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    fn delay(&self, op: StoreOp) -> Duration {
        match op {
            StoreOp::List => self.list,
            StoreOp::Lookup => self.lookup,
            StoreOp::Create => self.create,
            StoreOp::Update => self.update,
            StoreOp::Delete => self.delete,
        }
    }
}

/// Raw record tables. Handed to access closures by [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub tasks: Vec<Task>,
    pub lists: Vec<List>,
}

impl Tables {
    /// Next task id: max existing + 1, or 1 when the table is empty.
    pub fn next_task_id(&self) -> TaskId {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Next list id, same assignment rule as tasks.
    pub fn next_list_id(&self) -> ListId {
        self.lists.iter().map(|l| l.id).max().unwrap_or(0) + 1
    }
}

/// Explicitly constructed, injectable in-memory store.
///
/// Repositories reach the tables only through the latency-wrapped
/// [`with_read`](Self::with_read) / [`with_write`](Self::with_write)
/// closures, so every operation suspends once and mutates atomically.
#[derive(Debug)]
pub struct MemoryStore {
    latency: LatencyProfile,
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates a store with empty tables.
    pub fn empty(latency: LatencyProfile) -> Self {
        Self::with_tables(Tables::default(), latency)
    }

    /// Creates a store over caller-provided tables. Intended for tests.
    pub fn with_tables(tables: Tables, latency: LatencyProfile) -> Self {
        Self {
            latency,
            tables: Mutex::new(tables),
        }
    }

    /// Creates a store pre-seeded from the embedded fixture records.
    pub fn seeded(latency: LatencyProfile) -> StoreResult<Self> {
        let tables = seed::fixture_tables()?;
        info!(
            "event=store_seed module=store status=ok tasks={} lists={}",
            tables.tasks.len(),
            tables.lists.len()
        );
        Ok(Self::with_tables(tables, latency))
    }

    /// Runs a read-only closure over the tables after the simulated delay.
    pub async fn with_read<R>(&self, op: StoreOp, read: impl FnOnce(&Tables) -> R) -> R {
        self.wait(op).await;
        let tables = self.lock();
        read(&tables)
    }

    /// Runs a mutating closure over the tables after the simulated delay.
    pub async fn with_write<R>(&self, op: StoreOp, write: impl FnOnce(&mut Tables) -> R) -> R {
        self.wait(op).await;
        let mut tables = self.lock();
        write(&mut tables)
    }

    async fn wait(&self, op: StoreOp) {
        let delay = self.latency.delay(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock can only come from a panicking closure; the
        // tables themselves stay structurally valid, so keep serving.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_assignment_is_max_plus_one() {
        let tables = Tables::default();
        assert_eq!(tables.next_task_id(), 1);
        assert_eq!(tables.next_list_id(), 1);
    }

    #[tokio::test]
    async fn zero_latency_store_round_trips() {
        let store = MemoryStore::empty(LatencyProfile::zero());
        let count = store.with_read(StoreOp::List, |t| t.tasks.len()).await;
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn operations_wait_out_the_configured_delay() {
        let mut latency = LatencyProfile::zero();
        latency.lookup = Duration::from_millis(20);
        let store = MemoryStore::empty(latency);

        let started = std::time::Instant::now();
        store.with_read(StoreOp::Lookup, |_| ()).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
