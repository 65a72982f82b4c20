//! API route configuration.

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateNotificationRequest, HealthResponse, NotificationResponse,
    PatchNotificationRequest,
};
use super::jsonp;
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notifications API",
        version = "0.1.0",
        description = "Create, read, update and delete stored notifications",
        license(name = "MIT")
    ),
    paths(
        handlers::health,
        handlers::list_notifications,
        handlers::get_notification,
        handlers::create_notification,
        handlers::update_notification,
        handlers::delete_notification,
    ),
    components(
        schemas(
            HealthResponse,
            NotificationResponse,
            CreateNotificationRequest,
            PatchNotificationRequest,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "notifications", description = "Notification management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Notification routes (generic over Database); every response is JSON
    // and honours the `callback` query parameter
    let notification_routes = routes!(D => {
        get "/notification/all" => handlers::list_notifications,
        get "/notification/{id}" => handlers::get_notification,
        put "/notification" => handlers::create_notification,
        post "/notification/{id}" => handlers::update_notification,
        delete "/notification/{id}" => handlers::delete_notification,
    })
    .route_layer(middleware::from_fn(jsonp::wrap_callback));

    system_routes
        .merge(notification_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
