//! Application state management

use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    config::Config,
    database::create_pool,
    error::Result,
    repository::{Backend, MemoryStore, PgStore},
    resource::{Article, Order},
};

/// Application state shared across handlers
///
/// Holds one store per collection. Handlers generic over the resource kind
/// pull their store out with `State<Backend<R>>`.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    articles: Backend<Article>,
    orders: Backend<Order>,
}

impl AppState {
    /// State over the given stores
    pub fn new(config: Config, articles: Backend<Article>, orders: Backend<Order>) -> Self {
        Self {
            config: Arc::new(config),
            articles,
            orders,
        }
    }

    /// State whose stores live in process memory
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            MemoryStore::new().into(),
            MemoryStore::new().into(),
        )
    }

    /// State for `config`: PostgreSQL when a database is configured, memory otherwise
    ///
    /// Connects with retries and creates missing tables.
    pub async fn connect(config: Config) -> Result<Self> {
        let Some(database) = config.database.clone() else {
            tracing::warn!("No database configured, data is kept in memory only");
            return Ok(Self::in_memory(config));
        };

        let pool = create_pool(&database).await?;

        let articles = PgStore::<Article>::new(pool.clone());
        let orders = PgStore::<Order>::new(pool);
        articles.ensure_table().await?;
        orders.ensure_table().await?;

        Ok(Self::new(config, articles.into(), orders.into()))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The article store
    pub fn articles(&self) -> &Backend<Article> {
        &self.articles
    }

    /// The order store
    pub fn orders(&self) -> &Backend<Order> {
        &self.orders
    }
}

impl FromRef<AppState> for Backend<Article> {
    fn from_ref(state: &AppState) -> Self {
        state.articles.clone()
    }
}

impl FromRef<AppState> for Backend<Order> {
    fn from_ref(state: &AppState) -> Self {
        state.orders.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Store;

    #[tokio::test]
    async fn test_connect_without_database_uses_memory() {
        let state = AppState::connect(Config::default()).await.unwrap();
        assert_eq!(state.articles().name(), "memory");
        assert_eq!(state.orders().name(), "memory");
        assert_eq!(state.config().service.name, "storefront-api");
    }

    #[tokio::test]
    async fn test_stores_are_shared_between_clones() {
        let state = AppState::in_memory(Config::default());
        let clone = state.clone();

        let stored = Backend::<Article>::from_ref(&state)
            .insert(&Article::new("Skittles", 1.99))
            .await
            .unwrap();

        let seen = clone.articles().get_by_id(stored.id).await.unwrap();
        assert_eq!(seen, Some(stored));
        assert!(clone.orders().list_from(0, 10).await.unwrap().is_empty());
    }
}
