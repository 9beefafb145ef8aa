//! Database error types.
//!
//! Storage-agnostic errors for the workspace store. miette provides the
//! diagnostic codes, thiserror the derive. Lookups of a single missing record
//! are not errors: they come back as `Ok(None)`.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(workdesk::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(workdesk::db::invalid_data), help("{help}"))]
    InvalidData { message: String, help: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(workdesk::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(workdesk::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(workdesk::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(workdesk::db::connection_error),
        help("Check that the database path is writable and not locked by another process.")
    )]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DbError::Validation {
            message: message.into(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
