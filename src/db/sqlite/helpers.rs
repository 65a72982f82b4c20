//! Shared helper functions for SQLite repositories.

use sqlx::error::ErrorKind;

use crate::db::DbError;

/// Translate an sqlx error into the storage-agnostic error type.
///
/// Constraint failures (CHECK, NOT NULL, UNIQUE, FOREIGN KEY) become
/// [`DbError::Constraint`]; pool and I/O failures become
/// [`DbError::Connection`]; anything else is a generic [`DbError::Database`].
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::CheckViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation => DbError::Constraint {
                message: db_err.message().to_string(),
            },
            _ => DbError::Database {
                message: e.to_string(),
            },
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DbError::Connection {
                message: e.to_string(),
            }
        }
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

/// Reject blank values for a required column.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), DbError> {
    if value.trim().is_empty() {
        return Err(DbError::Validation {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_empty_accepts_text() {
        assert!(require_non_empty("title", "Hello").is_ok());
    }

    #[test]
    fn require_non_empty_rejects_blank() {
        let err = require_non_empty("title", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: title must not be empty");
    }

    #[test]
    fn pool_timeout_maps_to_connection_error() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Connection { .. }));
    }

    #[test]
    fn row_not_found_maps_to_database_error() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Database { .. }));
    }
}
