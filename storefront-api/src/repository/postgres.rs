//! PostgreSQL store
//!
//! Tables use `id BIGINT GENERATED ALWAYS AS IDENTITY`, so Postgres assigns
//! every id and refuses inserts that name one (SQLSTATE 428C9). Upserts with
//! an explicit id therefore always end up on the update path.

use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::error::{StoreError, StoreOperation};
use super::traits::{Store, StoreResult};
use crate::resource::{Resource, UNSET_ID};

/// Store backed by a table of a shared PostgreSQL pool
#[derive(Debug)]
pub struct PgStore<R> {
    pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for PgStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> PgStore<R> {
    /// Create a store over `pool`
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }

    /// Create the backing table if it does not exist yet
    ///
    /// Should be called once during application startup.
    pub async fn ensure_table(&self) -> StoreResult<()> {
        sqlx::query(R::CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Migrate))?;

        tracing::debug!(table = R::COLLECTION, "Table ready");
        Ok(())
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn insert_query<R: Resource>(record: &R) -> QueryBuilder<'static, Postgres> {
    let explicit_id = record.id() != UNSET_ID;

    let mut query = QueryBuilder::new(format!("INSERT INTO {} (", R::COLLECTION));
    if explicit_id {
        query.push("id, ");
    }
    query.push(R::COLUMNS.join(", "));
    query.push(") VALUES (");
    {
        let mut values = query.separated(", ");
        if explicit_id {
            values.push_bind(record.id());
        }
        record.bind_columns(&mut values);
    }
    query.push(") RETURNING ");
    query.push(R::SELECT);
    query
}

fn update_query<R: Resource>(record: &R) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "UPDATE {} SET ({}) = ROW(",
        R::COLLECTION,
        R::COLUMNS.join(", ")
    ));
    {
        let mut values = query.separated(", ");
        record.bind_columns(&mut values);
    }
    query.push(") WHERE id = ");
    query.push_bind(record.id());
    query.push(" RETURNING ");
    query.push(R::SELECT);
    query
}

fn select_by_id_sql<R: Resource>() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", R::SELECT, R::COLLECTION)
}

fn list_sql<R: Resource>() -> String {
    format!(
        "SELECT {} FROM {} WHERE id >= $1 ORDER BY id ASC LIMIT $2",
        R::SELECT,
        R::COLLECTION
    )
}

impl<R: Resource> Store<R> for PgStore<R> {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<R>> {
        let sql = select_by_id_sql::<R>();
        sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                StoreError::from(e)
                    .with_operation(StoreOperation::GetById)
                    .with_resource(R::KIND, id)
            })
    }

    async fn insert(&self, record: &R) -> StoreResult<R> {
        let mut query = insert_query(record);
        let stored = query
            .build_query_as::<R>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                StoreError::from(e)
                    .with_operation(StoreOperation::Insert)
                    .with_resource(R::KIND, record.id())
            })?;

        tracing::debug!(kind = R::KIND, id = stored.id(), "Inserted row");
        Ok(stored)
    }

    async fn update(&self, record: &R) -> StoreResult<R> {
        let mut query = update_query(record);
        let updated = query
            .build_query_as::<R>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                StoreError::from(e)
                    .with_operation(StoreOperation::Update)
                    .with_resource(R::KIND, record.id())
            })?;

        updated.ok_or_else(|| StoreError::not_found(R::KIND, record.id()))
    }

    async fn list_from(&self, cursor: i64, limit: i64) -> StoreResult<Vec<R>> {
        let sql = list_sql::<R>();
        sqlx::query_as::<_, R>(&sql)
            .bind(cursor)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::List))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::from(e).with_operation(StoreOperation::Ping))
    }
}
