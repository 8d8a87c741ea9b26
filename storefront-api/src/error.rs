//! Service-level error type
//!
//! These errors surface while the service starts up or serves connections.
//! Request handling never returns them; see [`crate::handlers::ApiError`] for
//! the errors clients get to see.

use thiserror::Error;

use crate::repository::StoreError;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Database could not be reached or prepared
    #[error("{0}")]
    Database(StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid listen address
    #[error("Invalid listen address '{0}'")]
    Address(String),
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Database(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(StoreError::from(err))
    }
}
