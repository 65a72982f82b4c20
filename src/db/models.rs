//! Domain models for the notification store.
//!
//! These models are storage-agnostic and represent the entity and the write
//! payloads used throughout the application.

use serde::{Deserialize, Serialize};

/// A stored notification record.
///
/// Despite the name nothing is delivered; this is a persisted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Assigned by the store on insert, never reused.
    pub id: i64,
    pub title: String,
    pub message: String,
    pub image_url: String,
    pub email_address: String,
}

/// Fields for a new notification.
///
/// `image_url` falls back to the configured default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub email_address: String,
    pub image_url: Option<String>,
}

/// Partial update. `None` leaves the stored column untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub image_url: Option<String>,
    pub email_address: Option<String>,
}

impl NotificationPatch {
    /// True when the patch would not touch any column.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.message.is_none()
            && self.image_url.is_none()
            && self.email_address.is_none()
    }

    /// Narrow the patch to the fields whose value differs from `current`.
    pub fn changes_from(self, current: &Notification) -> NotificationPatch {
        fn differing(new: Option<String>, old: &str) -> Option<String> {
            new.filter(|value| value != old)
        }

        NotificationPatch {
            title: differing(self.title, &current.title),
            message: differing(self.message, &current.message),
            image_url: differing(self.image_url, &current.image_url),
            email_address: differing(self.email_address, &current.email_address),
        }
    }
}
