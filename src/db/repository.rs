//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the HTTP layer.
//!
//! Methods return `Send` futures so handlers generic over [`Database`] can be
//! served by axum.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{NewNotification, Notification, NotificationPatch},
};

/// Repository for Notification operations.
///
/// Every method is a single statement against the store. There is no
/// cross-record transaction and no conflict detection.
pub trait NotificationRepository {
    /// Get all notifications, ordered by id.
    fn find_all(&self) -> impl Future<Output = DbResult<Vec<Notification>>> + Send;

    /// Get a notification by id. `None` when absent.
    fn find_by_id(&self, id: i64) -> impl Future<Output = DbResult<Option<Notification>>> + Send;

    /// Persist a new notification and return it with its assigned id.
    fn insert(
        &self,
        notification: &NewNotification,
    ) -> impl Future<Output = DbResult<Notification>> + Send;

    /// Overwrite the columns present in `patch`. `None` when the id is absent.
    fn update(
        &self,
        id: i64,
        patch: &NotificationPatch,
    ) -> impl Future<Output = DbResult<Option<Notification>>> + Send;

    /// Hard-delete a notification. Returns whether a row was removed.
    fn delete(&self, id: i64) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Notifications<'a>: NotificationRepository + Send + Sync
    where
        Self: 'a;

    /// Idempotent schema initialization: create missing tables, add missing
    /// columns, never drop anything.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the notification repository.
    fn notifications(&self) -> Self::Notifications<'_>;
}
