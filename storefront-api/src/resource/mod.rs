//! Resource kinds exposed by the API
//!
//! A [`Resource`] is the capability set the generic store, paginator and
//! upserter need from a record type: identity access, field validation and the
//! handful of SQL fragments used to persist it. Adding a collection means
//! implementing this trait once; no store or handler code is duplicated.

use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, query_builder::Separated, FromRow, Postgres};
use std::fmt;

mod article;
mod order;

pub use article::Article;
pub use order::Order;

/// Identifier value meaning "not stored yet"
pub const UNSET_ID: i64 = 0;

/// A record type served as a REST collection
pub trait Resource:
    Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + Unpin
    + 'static
    + for<'r> FromRow<'r, PgRow>
{
    /// Singular name used in logs and error messages (e.g. "article")
    const KIND: &'static str;

    /// Collection name, used both as URL segment and table name
    const COLLECTION: &'static str;

    /// Stored columns other than `id`, in the order [`Resource::bind_columns`] binds them
    const COLUMNS: &'static [&'static str];

    /// Select list producing a row decodable by `FromRow`, `id` included
    const SELECT: &'static str;

    /// DDL creating the backing table when it does not exist
    const CREATE_TABLE: &'static str;

    /// Store-assigned identifier, [`UNSET_ID`] before the first insert
    fn id(&self) -> i64;

    /// Overwrite the identifier
    fn set_id(&mut self, id: i64);

    /// Check caller-supplied fields before they reach the store
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Push one bind per entry of [`Resource::COLUMNS`]
    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>);

    /// Whether the record asks to be created rather than updated
    fn is_new(&self) -> bool {
        self.id() == UNSET_ID
    }
}
