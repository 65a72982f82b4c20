//! SQLite NotificationRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{map_sqlx_error, require_non_empty};
use crate::db::{
    DbError, DbResult, NewNotification, Notification, NotificationPatch, NotificationRepository,
};

/// SQLx-backed notification repository.
pub struct SqliteNotificationRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
    pub(crate) default_image_url: &'a str,
}

impl SqliteNotificationRepository<'_> {
    fn from_row(&self, row: &SqliteRow) -> DbResult<Notification> {
        let decode = |e: sqlx::Error| DbError::Database {
            message: format!("Failed to decode notification row: {}", e),
        };

        // Rows written before image_url existed carry NULL.
        let image_url: Option<String> = row.try_get("image_url").map_err(decode)?;

        Ok(Notification {
            id: row.try_get("id").map_err(decode)?,
            title: row.try_get("title").map_err(decode)?,
            message: row.try_get("message").map_err(decode)?,
            image_url: image_url.unwrap_or_else(|| self.default_image_url.to_string()),
            email_address: row.try_get("email_address").map_err(decode)?,
        })
    }
}

impl<'a> NotificationRepository for SqliteNotificationRepository<'a> {
    async fn find_all(&self) -> DbResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, title, message, image_url, email_address FROM notification ORDER BY id",
        )
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(|row| self.from_row(row)).collect()
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, title, message, image_url, email_address FROM notification WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| self.from_row(&row)).transpose()
    }

    async fn insert(&self, notification: &NewNotification) -> DbResult<Notification> {
        require_non_empty("title", &notification.title)?;
        require_non_empty("message", &notification.message)?;
        require_non_empty("email_address", &notification.email_address)?;

        let image_url = notification
            .image_url
            .as_deref()
            .unwrap_or(self.default_image_url);

        let row = sqlx::query(
            r#"
            INSERT INTO notification (title, message, image_url, email_address)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, message, image_url, email_address
            "#,
        )
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(image_url)
        .bind(&notification.email_address)
        .fetch_one(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.from_row(&row)
    }

    async fn update(&self, id: i64, patch: &NotificationPatch) -> DbResult<Option<Notification>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let row = sqlx::query(
            r#"
            UPDATE notification
            SET title = COALESCE(?, title),
                message = COALESCE(?, message),
                image_url = COALESCE(?, image_url),
                email_address = COALESCE(?, email_address)
            WHERE id = ?
            RETURNING id, title, message, image_url, email_address
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.message)
        .bind(&patch.image_url)
        .bind(&patch.email_address)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| self.from_row(&row)).transpose()
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM notification WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
