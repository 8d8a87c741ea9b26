//! In-process store
//!
//! Used when no database is configured and throughout the tests. Rows live in
//! a `BTreeMap` so range scans come back ordered by id, and ids come from a
//! counter that only grows.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::StoreError;
use super::traits::{Store, StoreResult};
use crate::resource::{Resource, UNSET_ID};

#[derive(Debug)]
struct Table<R> {
    rows: BTreeMap<i64, R>,
    last_id: i64,
}

/// Store keeping rows in memory
///
/// Cloning is cheap and clones share the same rows.
#[derive(Debug)]
pub struct MemoryStore<R> {
    table: Arc<RwLock<Table<R>>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> MemoryStore<R> {
    /// An empty store
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            })),
            _resource: PhantomData,
        }
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether no row is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for MemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Store<R> for MemoryStore<R> {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<R>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, record: &R) -> StoreResult<R> {
        let mut table = self.table.write().await;

        let id = record.id();
        if id != UNSET_ID {
            // Same outcome as the identity column in Postgres
            return Err(if table.rows.contains_key(&id) {
                StoreError::already_exists(R::KIND, id)
            } else {
                StoreError::id_assigned(R::KIND, id)
            });
        }

        table.last_id += 1;
        let id = table.last_id;
        let mut stored = record.clone();
        stored.set_id(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, record: &R) -> StoreResult<R> {
        let mut table = self.table.write().await;
        let id = record.id();
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = record.clone();
                Ok(record.clone())
            }
            None => Err(StoreError::not_found(R::KIND, id)),
        }
    }

    async fn list_from(&self, cursor: i64, limit: i64) -> StoreResult<Vec<R>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let table = self.table.read().await;
        Ok(table
            .rows
            .range(cursor..)
            .take(limit)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
