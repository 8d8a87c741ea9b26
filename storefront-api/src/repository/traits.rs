//! Store trait definition
//!
//! [`Store`] uses RPITIT (Return Position Impl Trait In Traits) so implementors
//! write plain `async fn`s without `async_trait`. The trait is generic over the
//! [`Resource`] it holds; one implementation serves every collection.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::repository::{Store, StoreResult};
//!
//! async fn first_page<S: Store<Article>>(store: &S) -> StoreResult<Vec<Article>> {
//!     store.list_from(0, 11).await
//! }
//! ```

use std::future::Future;

use super::error::StoreError;
use crate::resource::Resource;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence operations for one resource kind
///
/// Identifiers are assigned by the store. `insert` is handed a record whose
/// id is [`crate::resource::UNSET_ID`] in the normal case; a non-zero id asks
/// for that exact row and implementations are free to refuse it.
pub trait Store<R: Resource>: Send + Sync {
    /// Look a record up by id, `None` when no row has it
    fn get_by_id(&self, id: i64) -> impl Future<Output = StoreResult<Option<R>>> + Send;

    /// Store a new record and return it with its assigned id
    fn insert(&self, record: &R) -> impl Future<Output = StoreResult<R>> + Send;

    /// Overwrite the row carrying `record.id()`
    ///
    /// Fails with [`super::StoreErrorKind::NotFound`] when no such row exists.
    fn update(&self, record: &R) -> impl Future<Output = StoreResult<R>> + Send;

    /// Up to `limit` records with `id >= cursor`, ascending by id
    fn list_from(&self, cursor: i64, limit: i64)
        -> impl Future<Output = StoreResult<Vec<R>>> + Send;

    /// Check the store is reachable
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;
}
