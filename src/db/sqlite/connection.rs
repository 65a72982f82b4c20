//! SQLite database connection and schema management.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::notification::SqliteNotificationRepository;
use crate::config::{DEFAULT_IMAGE_URL, StorageConfig};
use crate::db::{Database, DbError, DbResult};

/// Required text columns reject values that are empty after trimming
/// whitespace.
const CREATE_NOTIFICATION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS notification (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL CHECK (length(trim(title, char(32, 9, 10, 11, 12, 13))) > 0),
        message TEXT NOT NULL CHECK (length(trim(message, char(32, 9, 10, 11, 12, 13))) > 0),
        image_url TEXT,
        email_address TEXT NOT NULL CHECK (length(trim(email_address, char(32, 9, 10, 11, 12, 13))) > 0)
    )
"#;

/// Columns the notification table must carry, with the declaration used
/// when an older table lacks them. `ALTER TABLE ... ADD COLUMN` cannot add a
/// NOT NULL column without a default.
const NOTIFICATION_COLUMNS: &[(&str, &str)] = &[
    ("title", "TEXT NOT NULL DEFAULT ''"),
    ("message", "TEXT NOT NULL DEFAULT ''"),
    ("image_url", "TEXT"),
    ("email_address", "TEXT NOT NULL DEFAULT ''"),
];

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
    default_image_url: String,
}

impl SqliteDatabase {
    /// Open (creating if missing) the database file selected by `config`.
    pub async fn open(config: &StorageConfig) -> DbResult<Self> {
        let path = config.database_path();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| DbError::Connection {
                message: format!("Failed to create {}: {}", parent.display(), e),
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        info!(
            path = %path.display(),
            environment = %config.environment,
            "Opened notification database"
        );

        Ok(Self {
            pool,
            default_image_url: config.default_image_url.clone(),
        })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            pool,
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
        })
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn existing_columns(&self) -> DbResult<Vec<String>> {
        let rows = sqlx::query("PRAGMA table_info(notification)")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        Ok(rows.iter().map(|row| row.get::<String, _>("name")).collect())
    }
}

impl Database for SqliteDatabase {
    type Notifications<'a> = SqliteNotificationRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::query(CREATE_NOTIFICATION_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        let existing = self.existing_columns().await?;

        for &(name, declaration) in NOTIFICATION_COLUMNS {
            if existing.iter().any(|column| column == name) {
                continue;
            }

            let sql = format!("ALTER TABLE notification ADD COLUMN {name} {declaration}");
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| DbError::Migration {
                    message: format!("Failed to add column {}: {}", name, e),
                })?;

            info!(column = %name, "Added missing column to notification table");
        }

        debug!("Notification schema is up to date");
        Ok(())
    }

    fn notifications(&self) -> Self::Notifications<'_> {
        SqliteNotificationRepository {
            pool: &self.pool,
            default_image_url: &self.default_image_url,
        }
    }
}
