//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn validation_error_displays_correctly() {
    let err = DbError::Validation {
        message: "title must not be empty".to_string(),
    };
    assert_eq!(err.to_string(), "Validation error: title must not be empty");
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::Database {
        message: "disk I/O error".to_string(),
    };
    assert_eq!(err.to_string(), "Database error: disk I/O error");
}

#[test]
fn migration_error_displays_correctly() {
    let err = DbError::Migration {
        message: "cannot add column image_url".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Migration error: cannot add column image_url"
    );
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "unable to open database file".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Connection error: unable to open database file"
    );
}

#[test]
fn constraint_error_displays_correctly() {
    let err = DbError::Constraint {
        message: "CHECK constraint failed: length(title) > 0".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Constraint violation: CHECK constraint failed: length(title) > 0"
    );
}

#[test]
fn db_result_propagates_errors() {
    fn fails() -> DbResult<()> {
        Err(DbError::Validation {
            message: "bad".to_string(),
        })
    }

    fn wrapper() -> DbResult<i64> {
        fails()?;
        Ok(1)
    }

    assert!(matches!(wrapper(), Err(DbError::Validation { .. })));
}
