//! Error types for the HTTP layer.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use thiserror::Error;
use tracing::{error, warn};

use crate::db::DbError;

/// Failures while starting or running the server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(notifications::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(notifications::api::serve))]
    Serve(#[source] std::io::Error),
}

/// Request failures. Rendered as a bare status code with an empty body.
#[derive(Error, Diagnostic, Debug)]
pub enum HandlerError {
    #[error("Invalid request: {message}")]
    #[diagnostic(code(notifications::api::validation))]
    Validation { message: String },

    #[error("Notification '{id}' not found")]
    #[diagnostic(code(notifications::api::not_found))]
    NotFound { id: String },

    #[error("Persistence failed: {0}")]
    #[diagnostic(code(notifications::api::persistence))]
    Persistence(#[from] DbError),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::Validation { .. } => StatusCode::BAD_REQUEST,
            HandlerError::NotFound { .. } => StatusCode::NOT_FOUND,
            HandlerError::Persistence(DbError::Validation { .. }) => StatusCode::BAD_REQUEST,
            HandlerError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        status.into_response()
    }
}
