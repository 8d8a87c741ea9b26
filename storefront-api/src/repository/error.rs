//! Store error types
//!
//! Structured errors for store operations. The `kind` decides how a failure is
//! classified at the HTTP boundary; the `message` is safe to show a client
//! whenever [`StoreError::is_client_error`] holds.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::repository::{StoreError, StoreErrorKind};
//!
//! let error = StoreError::not_found("article", 7);
//! assert!(matches!(error.kind, StoreErrorKind::NotFound));
//! assert_eq!(error.message, "article 7 does not exist");
//! ```

use std::fmt;

/// Operation being performed when the store error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Point lookup by id
    GetById,
    /// Inserting a new row
    Insert,
    /// Updating a row by id
    Update,
    /// Listing rows from a cursor
    List,
    /// Liveness check
    Ping,
    /// Creating the backing table
    Migrate,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetById => write!(f, "get_by_id"),
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::List => write!(f, "list"),
            Self::Ping => write!(f, "ping"),
            Self::Migrate => write!(f, "migrate"),
        }
    }
}

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// No row has the requested id
    NotFound,
    /// A row with this id already exists
    AlreadyExists,
    /// Ids are assigned by the store and cannot be chosen on insert
    IdAssigned,
    /// The row violates a table constraint
    ConstraintViolation,
    /// Field validation failed before the store was touched
    ValidationFailed,
    /// The database could not be reached
    ConnectionFailed,
    /// The operation timed out
    Timeout,
    /// Any other database failure
    DatabaseError,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::IdAssigned => write!(f, "id_assigned"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured store error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// The operation being performed when the error occurred
    pub operation: StoreOperation,
    /// The category of error
    pub kind: StoreErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The resource kind involved (e.g. "article")
    pub resource: Option<&'static str>,
    /// The id involved
    pub id: Option<i64>,
}

impl StoreError {
    /// Create a new store error
    pub fn new(operation: StoreOperation, kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            resource: None,
            id: None,
        }
    }

    /// No row with `id` exists (raised by updates; lookups return `None` instead)
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::new(
            StoreOperation::Update,
            StoreErrorKind::NotFound,
            format!("{resource} {id} does not exist"),
        )
        .with_resource(resource, id)
    }

    /// A row with `id` is already stored
    pub fn already_exists(resource: &'static str, id: i64) -> Self {
        Self::new(
            StoreOperation::Insert,
            StoreErrorKind::AlreadyExists,
            format!("{resource} {id} already exists"),
        )
        .with_resource(resource, id)
    }

    /// An insert tried to choose its own id
    pub fn id_assigned(resource: &'static str, id: i64) -> Self {
        Self::new(
            StoreOperation::Insert,
            StoreErrorKind::IdAssigned,
            format!("{resource} ids are assigned by the store, cannot insert id {id}"),
        )
        .with_resource(resource, id)
    }

    /// Field validation failed
    pub fn validation_failed(resource: &'static str, message: impl Into<String>) -> Self {
        let mut error = Self::new(
            StoreOperation::Insert,
            StoreErrorKind::ValidationFailed,
            message,
        );
        error.resource = Some(resource);
        error
    }

    /// The database could not be reached
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            StoreOperation::Ping,
            StoreErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Add resource context to an existing error
    #[must_use]
    pub fn with_resource(mut self, resource: &'static str, id: i64) -> Self {
        self.resource = Some(resource);
        self.id = Some(id);
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: StoreOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the failure stems from caller-supplied data
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::NotFound
                | StoreErrorKind::AlreadyExists
                | StoreErrorKind::IdAssigned
                | StoreErrorKind::ConstraintViolation
                | StoreErrorKind::ValidationFailed
        )
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::ConnectionFailed | StoreErrorKind::Timeout
        )
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Store {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(resource), Some(id)) = (self.resource, self.id) {
            write!(f, " [{}: {}]", resource, id)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

// Postgres SQLSTATE codes
const UNIQUE_VIOLATION: &str = "23505";
const GENERATED_ALWAYS: &str = "428C9";
const INTEGRITY_CLASS: &str = "23";
const DATA_EXCEPTION_CLASS: &str = "22";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        let operation = StoreOperation::GetById;
        match err {
            E::RowNotFound => Self::new(operation, StoreErrorKind::NotFound, "Row not found"),
            E::PoolTimedOut => Self::new(
                operation,
                StoreErrorKind::Timeout,
                "Connection pool timed out",
            ),
            E::PoolClosed => Self::connection_failed("Connection pool is closed"),
            E::Io(e) => Self::connection_failed(e.to_string()),
            E::Tls(e) => Self::connection_failed(format!("TLS error: {}", e)),
            E::WorkerCrashed => Self::connection_failed("Database worker crashed"),
            E::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                let kind = if code == UNIQUE_VIOLATION {
                    StoreErrorKind::AlreadyExists
                } else if code == GENERATED_ALWAYS {
                    StoreErrorKind::IdAssigned
                } else if code.starts_with(INTEGRITY_CLASS) || code.starts_with(DATA_EXCEPTION_CLASS)
                {
                    StoreErrorKind::ConstraintViolation
                } else {
                    StoreErrorKind::DatabaseError
                };
                Self::new(operation, kind, db_err.message())
            }
            other => Self::new(operation, StoreErrorKind::DatabaseError, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(StoreOperation::GetById.to_string(), "get_by_id");
        assert_eq!(StoreOperation::Insert.to_string(), "insert");
        assert_eq!(StoreOperation::List.to_string(), "list");
    }

    #[test]
    fn test_not_found_convenience() {
        let error = StoreError::not_found("order", 12);
        assert_eq!(error.operation, StoreOperation::Update);
        assert_eq!(error.kind, StoreErrorKind::NotFound);
        assert_eq!(error.resource, Some("order"));
        assert_eq!(error.id, Some(12));
        assert_eq!(error.message, "order 12 does not exist");
    }

    #[test]
    fn test_client_errors() {
        assert!(StoreError::not_found("article", 1).is_client_error());
        assert!(StoreError::already_exists("article", 1).is_client_error());
        assert!(StoreError::id_assigned("article", 1).is_client_error());
        assert!(StoreError::validation_failed("article", "name must not be empty").is_client_error());
        assert!(!StoreError::connection_failed("refused").is_client_error());
        assert!(!StoreError::new(StoreOperation::List, StoreErrorKind::DatabaseError, "boom")
            .is_client_error());
    }

    #[test]
    fn test_is_retriable() {
        assert!(StoreError::connection_failed("refused").is_retriable());
        assert!(StoreError::from(sqlx::Error::PoolTimedOut).is_retriable());
        assert!(!StoreError::not_found("article", 1).is_retriable());
    }

    #[test]
    fn test_display_with_resource() {
        let display = StoreError::already_exists("article", 3)
            .with_operation(StoreOperation::Insert)
            .to_string();
        assert!(display.contains("already_exists"));
        assert!(display.contains("insert"));
        assert!(display.contains("[article: 3]"));
    }

    #[test]
    fn test_from_sqlx() {
        let error = StoreError::from(sqlx::Error::PoolClosed);
        assert_eq!(error.kind, StoreErrorKind::ConnectionFailed);

        let error = StoreError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.kind, StoreErrorKind::NotFound);
    }
}
