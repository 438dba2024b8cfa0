//! List repository contract and mock-store implementation.
//!
//! Deleting a list does not cascade into tasks: `Task::list_id` is a weak
//! reference and readers treat dangling ids as "no list".

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::model::list::{List, ListPatch, NewList};
use crate::model::ListId;
use crate::store::{MemoryStore, StoreOp};

use super::{EntityKind, RepoError, RepoResult};

/// Async CRUD contract for list records.
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn get_all(&self) -> RepoResult<Vec<List>>;
    async fn get_by_id(&self, id: ListId) -> RepoResult<List>;
    async fn create(&self, draft: NewList) -> RepoResult<List>;
    async fn update(&self, id: ListId, patch: ListPatch) -> RepoResult<List>;
    async fn delete(&self, id: ListId) -> RepoResult<()>;
}

/// List repository backed by the in-memory mock store.
#[derive(Clone)]
pub struct MemListRepository {
    store: Arc<MemoryStore>,
}

impl MemListRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn not_found(id: ListId) -> RepoError {
    RepoError::NotFound {
        kind: EntityKind::List,
        id,
    }
}

#[async_trait]
impl ListRepository for MemListRepository {
    async fn get_all(&self) -> RepoResult<Vec<List>> {
        let lists = self
            .store
            .with_read(StoreOp::List, |t| t.lists.clone())
            .await;
        Ok(lists)
    }

    async fn get_by_id(&self, id: ListId) -> RepoResult<List> {
        self.store
            .with_read(StoreOp::Lookup, |t| {
                t.lists
                    .iter()
                    .find(|list| list.id == id)
                    .cloned()
                    .ok_or_else(|| not_found(id))
            })
            .await
    }

    async fn create(&self, draft: NewList) -> RepoResult<List> {
        draft.validate()?;
        let now = Utc::now();

        let list = self
            .store
            .with_write(StoreOp::Create, |t| {
                let record = draft.into_list(t.next_list_id(), now);
                t.lists.push(record.clone());
                record
            })
            .await;
        Ok(list)
    }

    async fn update(&self, id: ListId, patch: ListPatch) -> RepoResult<List> {
        patch.validate()?;

        self.store
            .with_write(StoreOp::Update, |t| {
                let index = t
                    .lists
                    .iter()
                    .position(|list| list.id == id)
                    .ok_or_else(|| not_found(id))?;

                let mut record = t.lists[index].clone();
                record.apply(patch);
                t.lists[index] = record.clone();
                Ok(record)
            })
            .await
    }

    async fn delete(&self, id: ListId) -> RepoResult<()> {
        self.store
            .with_write(StoreOp::Delete, |t| {
                let index = t
                    .lists
                    .iter()
                    .position(|list| list.id == id)
                    .ok_or_else(|| not_found(id))?;
                t.lists.remove(index);
                Ok(())
            })
            .await
    }
}
