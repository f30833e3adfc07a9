// Error handling framework

use std::collections::BTreeMap;
use thiserror::Error;

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event cannot end before it starts")]
    InvertedTimeWindow { start_min: i32, end_min: i32 },

    /// Every problem found in one request, keyed by field name
    #[error("Invalid event: {}", summarize(.0))]
    Fields(BTreeMap<String, String>),
}

fn summarize(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, reason)| format!("{}: {}", field, reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Field name → reason pairs, suitable for an error response body
    pub fn details(&self) -> BTreeMap<String, String> {
        match self {
            ValidationError::InvertedTimeWindow { .. } => BTreeMap::from([(
                "endMin".to_string(),
                "Event cannot end before it starts".to_string(),
            )]),
            ValidationError::Fields(fields) => fields.clone(),
        }
    }
}

/// Database-specific errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate key violation: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// Errors returned by the event service
#[derive(Error, Debug)]
pub enum EventError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl EventError {
    /// Stable machine-readable kind, used for metrics labels and API bodies
    pub fn kind(&self) -> &'static str {
        match self {
            EventError::Validation(_) => "validation_error",
            EventError::NotFound(_) => "not_found",
            EventError::Database(_) => "database_error",
        }
    }
}

// Implement From for common external errors
impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => DatabaseError::DuplicateKey(db_err.message().to_string()),
                        "23503" => DatabaseError::ForeignKeyViolation(db_err.message().to_string()),
                        "23514" => DatabaseError::CheckViolation(db_err.message().to_string()),
                        _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    DatabaseError::QueryFailed(db_err.message().to_string())
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DatabaseError::ConnectionFailed(err.to_string())
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(err.to_string())
    }
}
