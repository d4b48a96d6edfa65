//! Route definitions for the press screener HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes, without transport layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(press_admin_routes())
        .merge(press_public_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Admin press link management
fn press_admin_routes() -> Router<AppState> {
    use handlers::press::admin;

    Router::new()
        .route(
            "/press/admin",
            post(admin::create_link).get(admin::list_links),
        )
        .route(
            "/press/admin/{id}",
            get(admin::get_link)
                .patch(admin::update_link)
                .delete(admin::deactivate_link),
        )
}

/// Anonymous token access
fn press_public_routes() -> Router<AppState> {
    use handlers::press::public;

    Router::new()
        .route("/press/validate/{token}", get(public::validate_link))
        .route("/press/verify/{token}", post(public::verify_password))
        .route("/press/track/{token}", post(public::track_view))
        .route("/press/video/{token}", get(public::video))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
