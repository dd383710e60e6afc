//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - public directory    - Static files, checked before any route
//! - `GET /`             - Application metadata and route index (public)
//! - `GET /{alias}`      - Redirect with click recording (public)
//! - `/api/*`            - REST API (Bearer token required, except `GET /api`)
//! - anything else       - 404 envelope
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, for browser clients
//! - **Authentication** - Bearer token on protected routes only
//! - **Path normalization** - Trailing slash handling

use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::api::handlers::not_found_handler;
use crate::api::middleware::{auth, tracing};
use crate::api::routes::{Access, route_table};
use crate::state::AppState;

/// Builds the router from the route table.
///
/// Files in the public directory shadow routes with the same path. Requests
/// no file answers go to the route table, and unmatched ones get the 404
/// envelope, including known paths called with a method they do not serve.
/// Protected entries get the auth middleware as a route layer, so unknown
/// paths and methods never reach it.
pub fn router(state: AppState) -> Router {
    let mut routes = Router::new();

    for entry in route_table() {
        let handler = match entry.access {
            Access::Public => entry.handler,
            Access::Bearer => entry
                .handler
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        };
        routes = routes.route(entry.path, handler);
    }

    let public_dir = state.public_dir.clone();
    let routes = routes
        .method_not_allowed_fallback(not_found_handler)
        .fallback(not_found_handler)
        .with_state(state);

    let public_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(routes);

    Router::new()
        .fallback_service(public_files)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed
/// before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
