//! Response decorator for the notification routes.
//!
//! Every response is labelled `application/json`. When the caller passes a
//! `callback` query parameter, a non-empty body is wrapped as
//! `callback(<json>)` so it can be loaded through a script tag. Empty bodies
//! (bare status codes) pass through untouched.

use axum::body::{Body, to_bytes};
use axum::extract::{Query, Request};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, warn};

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub callback: Option<String>,
}

/// Middleware applied after routing and serialization.
///
/// An empty `callback=` still wraps, yielding `(<json>)`. Names outside
/// [`is_valid_callback`] are rejected before the handler runs.
pub async fn wrap_callback(request: Request, next: Next) -> Response {
    let callback = Query::<CallbackParams>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.callback);

    if let Some(name) = &callback
        && !is_valid_callback(name)
    {
        warn!(callback = %name, "Rejected callback name");
        return json_labelled(StatusCode::BAD_REQUEST.into_response());
    }

    let response = json_labelled(next.run(request).await);

    let Some(callback) = callback else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to buffer response body for callback wrapping");
            return json_labelled(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
    };

    if bytes.is_empty() {
        return Response::from_parts(parts, Body::empty());
    }

    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(wrap(&callback, &bytes)))
}

fn json_labelled(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Callback names are plain or dotted identifiers: `[A-Za-z0-9_.$]*`.
pub fn is_valid_callback(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'))
}

/// `name(json)`
pub fn wrap(callback: &str, json: &[u8]) -> Vec<u8> {
    let mut wrapped = Vec::with_capacity(callback.len() + json.len() + 2);
    wrapped.extend_from_slice(callback.as_bytes());
    wrapped.push(b'(');
    wrapped.extend_from_slice(json);
    wrapped.push(b')');
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::Request;
    use axum::middleware;
    use axum::routing::get;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/json", get(|| async { r#"{"ok":true}"# }))
            .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
            .route_layer(middleware::from_fn(wrap_callback))
    }

    async fn call(uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn wrap_surrounds_json_with_callback() {
        assert_eq!(wrap("cb", b"[1,2]"), b"cb([1,2])".to_vec());
    }

    #[tokio::test]
    async fn body_is_wrapped_when_callback_given() {
        let (status, content_type, body) = call("/json?callback=handle").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, r#"handle({"ok":true})"#);
    }

    #[tokio::test]
    async fn body_is_untouched_without_callback() {
        let (_, content_type, body) = call("/json").await;
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn empty_callback_wraps_in_bare_parentheses() {
        let (status, _, body) = call("/json?callback=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"({"ok":true})"#);
    }

    #[tokio::test]
    async fn dotted_callback_is_accepted() {
        let (_, _, body) = call("/json?callback=jQuery.cb_1$").await;
        assert_eq!(body, r#"jQuery.cb_1$({"ok":true})"#);
    }

    #[tokio::test]
    async fn unsafe_callback_is_rejected() {
        let (status, content_type, body) = call("/json?callback=alert(1)%3B").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert!(body.is_empty());
    }

    #[test]
    fn callback_names_are_identifiers() {
        assert!(is_valid_callback("handle"));
        assert!(is_valid_callback("ns.handle_2"));
        assert!(is_valid_callback(""));
        assert!(!is_valid_callback("a b"));
        assert!(!is_valid_callback("x</script>"));
        assert!(!is_valid_callback("f()"));
    }

    #[tokio::test]
    async fn empty_body_is_never_wrapped() {
        let (status, _, body) = call("/empty?callback=handle").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }
}
