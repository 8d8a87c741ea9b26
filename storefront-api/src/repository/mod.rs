//! Persistence for resource collections
//!
//! This module provides the generic [`Store`] trait, its PostgreSQL and
//! in-memory implementations, and the two algorithms built on it: cursor
//! pagination ([`paginate`]) and create-or-update ([`upsert`]).
//!
//! # Features
//!
//! - **Generic store**: one [`Store`] implementation per backend serves every [`Resource`]
//! - **Runtime backend choice**: [`Backend`] picks PostgreSQL or memory from configuration
//! - **Lookahead pagination**: [`ResourceList`] pages of [`PAGE_SIZE`] items
//! - **Upsert**: insert, else update by id
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::repository::{paginate, upsert, MemoryStore, PageCursor};
//! use storefront_api::resource::Article;
//!
//! let store = MemoryStore::<Article>::new();
//! let mut article = Article::new("Skittles", 1.99);
//! upsert(&store, &mut article).await?;
//! assert_eq!(article.id, 1);
//!
//! let page = paginate(&store, PageCursor::default()).await?;
//! assert_eq!(page.items, vec![article]);
//! ```
//!
//! [`Resource`]: crate::resource::Resource

mod error;
mod memory;
mod pagination;
mod postgres;
mod traits;
mod upsert;

pub use error::{StoreError, StoreErrorKind, StoreOperation};
pub use memory::MemoryStore;
pub use pagination::{paginate, PageCursor, ResourceList, PAGE_SIZE};
pub use postgres::PgStore;
pub use traits::{Store, StoreResult};
pub use upsert::upsert;

use crate::resource::Resource;

/// Store selected at startup
///
/// PostgreSQL when a database is configured, memory otherwise.
#[derive(Debug)]
pub enum Backend<R> {
    /// Rows in a PostgreSQL table
    Postgres(PgStore<R>),
    /// Rows in process memory
    Memory(MemoryStore<R>),
}

impl<R> Clone for Backend<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Postgres(store) => Self::Postgres(store.clone()),
            Self::Memory(store) => Self::Memory(store.clone()),
        }
    }
}

impl<R> Backend<R> {
    /// Short backend name for logs and readiness reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

impl<R> From<PgStore<R>> for Backend<R> {
    fn from(store: PgStore<R>) -> Self {
        Self::Postgres(store)
    }
}

impl<R> From<MemoryStore<R>> for Backend<R> {
    fn from(store: MemoryStore<R>) -> Self {
        Self::Memory(store)
    }
}

impl<R: Resource> Store<R> for Backend<R> {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<R>> {
        match self {
            Self::Postgres(store) => store.get_by_id(id).await,
            Self::Memory(store) => store.get_by_id(id).await,
        }
    }

    async fn insert(&self, record: &R) -> StoreResult<R> {
        match self {
            Self::Postgres(store) => store.insert(record).await,
            Self::Memory(store) => store.insert(record).await,
        }
    }

    async fn update(&self, record: &R) -> StoreResult<R> {
        match self {
            Self::Postgres(store) => store.update(record).await,
            Self::Memory(store) => store.update(record).await,
        }
    }

    async fn list_from(&self, cursor: i64, limit: i64) -> StoreResult<Vec<R>> {
        match self {
            Self::Postgres(store) => store.list_from(cursor, limit).await,
            Self::Memory(store) => store.list_from(cursor, limit).await,
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        match self {
            Self::Postgres(store) => store.ping().await,
            Self::Memory(store) => store.ping().await,
        }
    }
}
