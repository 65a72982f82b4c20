//! Tests for notification models.

use crate::db::{Notification, NotificationPatch};

fn stored() -> Notification {
    Notification {
        id: 7,
        title: "Notification Subject".to_string(),
        message: "Notification message".to_string(),
        image_url: "https://example.com/a.png".to_string(),
        email_address: "example@example.com".to_string(),
    }
}

#[test]
fn default_patch_is_empty() {
    assert!(NotificationPatch::default().is_empty());
}

#[test]
fn patch_with_any_field_is_not_empty() {
    let patch = NotificationPatch {
        image_url: Some("https://example.com/b.png".to_string()),
        ..Default::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn changes_from_drops_unchanged_fields() {
    let patch = NotificationPatch {
        title: Some("Notification Subject".to_string()),
        message: Some("A new message".to_string()),
        image_url: None,
        email_address: Some("example@example.com".to_string()),
    };

    let changes = patch.changes_from(&stored());
    assert_eq!(
        changes,
        NotificationPatch {
            message: Some("A new message".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn changes_from_identical_values_is_empty() {
    let current = stored();
    let patch = NotificationPatch {
        title: Some(current.title.clone()),
        message: Some(current.message.clone()),
        image_url: Some(current.image_url.clone()),
        email_address: Some(current.email_address.clone()),
    };

    assert!(patch.changes_from(&current).is_empty());
}

