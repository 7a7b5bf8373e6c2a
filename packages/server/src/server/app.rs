//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put, MethodRouter},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::ownership::OwnershipGuard;
use crate::kernel::ServerDeps;
use crate::server::middleware::{jwt_auth_middleware, ownership_guard_middleware};
use crate::server::routes::{
    create_author_account, create_comment, create_news, delete_author, delete_comment,
    delete_news, find_author, find_comment, find_news, health_handler, issue_token,
    update_author, update_comment, update_news,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Resource routes. Methods added before `guarded` runs its layer only run
/// after the ownership guard allows the call; news and comment reads are added
/// afterwards and skip it.
fn api_routes(guard: OwnershipGuard) -> Router {
    // route_layer: runs after routing, so path parameters are available
    let guarded = move |methods: MethodRouter| {
        let guard = guard.clone();
        methods.route_layer(middleware::from_fn(move |req, next| {
            ownership_guard_middleware(guard.clone(), req, next)
        }))
    };

    Router::new()
        .route("/api/v1/auth/token", post(issue_token))
        .route("/api/v1/author/account", post(create_author_account))
        .route(
            "/api/v1/author/:id",
            guarded(get(find_author).put(update_author).delete(delete_author)),
        )
        .route("/api/v1/news", post(create_news))
        .route(
            "/api/v1/news/:id",
            guarded(put(update_news).delete(delete_news)).get(find_news),
        )
        .route("/api/v1/comment", post(create_comment))
        .route(
            "/api/v1/comment/:id",
            guarded(put(update_comment).delete(delete_comment)).get(find_comment),
        )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let guard = OwnershipGuard::from_deps(&deps);
    let jwt_service = deps.jwt_service.clone();
    let authors = deps.authors.clone();

    let app_state = AppState {
        deps: Arc::new(deps),
    };

    Router::new()
        .merge(api_routes(guard))
        // Health check (unauthenticated)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), authors.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(app_state)) // Shared state for handlers
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
