//! Notification management handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::{AppState, HandlerError};
use crate::db::{
    Database, NewNotification, Notification, NotificationPatch, NotificationRepository,
};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Notification response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    /// Identifier assigned on creation
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Notification Subject")]
    pub title: String,
    #[schema(example = "Notification message")]
    pub message: String,
    #[schema(example = "https://example.com/icon.png")]
    pub image_url: String,
    #[schema(example = "example@example.com")]
    pub email_address: String,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            image_url: n.image_url,
            email_address: n.email_address,
        }
    }
}

/// Create notification request DTO
///
/// Every field is optional at the parsing stage so a missing or `null`
/// required field is reported as a validation failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    /// Required
    #[schema(example = "Notification Subject")]
    pub title: Option<String>,
    /// Required
    #[schema(example = "Notification message")]
    pub message: Option<String>,
    /// Required
    #[schema(example = "example@example.com")]
    pub email_address: Option<String>,
    /// Falls back to the configured placeholder image
    #[schema(example = "https://example.com/icon.png")]
    pub image_url: Option<String>,
}

impl CreateNotificationRequest {
    fn validate(self) -> Result<NewNotification, HandlerError> {
        Ok(NewNotification {
            title: required("title", self.title)?,
            message: required("message", self.message)?,
            email_address: required("email_address", self.email_address)?,
            image_url: self.image_url,
        })
    }
}

/// Partial update request DTO
///
/// Absent and `null` fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchNotificationRequest {
    #[schema(example = "Updated Subject")]
    pub title: Option<String>,
    pub message: Option<String>,
    pub image_url: Option<String>,
    pub email_address: Option<String>,
}

impl From<PatchNotificationRequest> for NotificationPatch {
    fn from(req: PatchNotificationRequest) -> Self {
        Self {
            title: req.title,
            message: req.message,
            image_url: req.image_url,
            email_address: req.email_address,
        }
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, HandlerError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(HandlerError::Validation {
            message: format!("{} is required", field),
        }),
    }
}

/// Parse a JSON request body. Empty, malformed and `null` bodies are all
/// validation failures.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, HandlerError> {
    serde_json::from_slice::<Option<T>>(body)
        .map_err(|e| HandlerError::Validation {
            message: format!("Malformed JSON body: {}", e),
        })?
        .ok_or_else(|| HandlerError::Validation {
            message: "Request body is missing".to_string(),
        })
}

/// Ids that are not integers cannot exist, so they are simply not found.
fn parse_id(id: &str) -> Result<i64, HandlerError> {
    id.parse().map_err(|_| not_found(id))
}

fn not_found(id: &str) -> HandlerError {
    HandlerError::NotFound { id: id.to_string() }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all notifications
#[utoipa::path(
    get,
    path = "/notification/all",
    tag = "notifications",
    responses(
        (status = 200, description = "All notifications", body = Vec<NotificationResponse>),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn list_notifications<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<NotificationResponse>>, HandlerError> {
    let notifications = state.db().notifications().find_all().await?;

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Get a notification by id
#[utoipa::path(
    get,
    path = "/notification/{id}",
    tag = "notifications",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification found", body = NotificationResponse),
        (status = 404, description = "Unknown or non-numeric id")
    )
)]
#[instrument(skip(state))]
pub async fn get_notification<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<NotificationResponse>, HandlerError> {
    let notification = state
        .db()
        .notifications()
        .find_by_id(parse_id(&id)?)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(NotificationResponse::from(notification)))
}

/// Create a notification
///
/// Responds with the stored record and a `Location` header for it.
#[utoipa::path(
    put,
    path = "/notification",
    tag = "notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "Missing body or required field"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state, body))]
pub async fn create_notification<D: Database>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<NotificationResponse>,
    ),
    HandlerError,
> {
    let new = parse_body::<CreateNotificationRequest>(&body)?.validate()?;

    let created = state.db().notifications().insert(&new).await?;
    info!(id = created.id, "Created notification");

    let location = format!("/notification/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(NotificationResponse::from(created)),
    ))
}

/// Update a notification
///
/// Only fields present, non-null and different from the stored value are
/// written.
#[utoipa::path(
    post,
    path = "/notification/{id}",
    tag = "notifications",
    params(("id" = String, Path, description = "Notification id")),
    request_body = PatchNotificationRequest,
    responses(
        (status = 200, description = "Notification updated", body = NotificationResponse),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Unknown or non-numeric id"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state, body))]
pub async fn update_notification<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<NotificationResponse>, HandlerError> {
    let patch = NotificationPatch::from(parse_body::<PatchNotificationRequest>(&body)?);
    let numeric_id = parse_id(&id)?;

    let notifications = state.db().notifications();
    let current = notifications
        .find_by_id(numeric_id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    let changes = patch.changes_from(&current);
    if changes.is_empty() {
        return Ok(Json(NotificationResponse::from(current)));
    }

    // The row can vanish between the read and the write.
    let updated = notifications
        .update(numeric_id, &changes)
        .await?
        .ok_or_else(|| not_found(&id))?;
    info!(id = updated.id, "Updated notification");

    Ok(Json(NotificationResponse::from(updated)))
}

/// Delete a notification
#[utoipa::path(
    delete,
    path = "/notification/{id}",
    tag = "notifications",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 404, description = "Unknown or non-numeric id"),
        (status = 500, description = "Storage failure")
    )
)]
#[instrument(skip(state))]
pub async fn delete_notification<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    let deleted = state.db().notifications().delete(parse_id(&id)?).await?;

    if !deleted {
        return Err(not_found(&id));
    }

    info!(id = %id, "Deleted notification");
    Ok(StatusCode::NO_CONTENT)
}
