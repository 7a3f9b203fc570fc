//! Route definitions for the docvault HTTP API.
//!
//! Account and document routes are mounted under `/api`; the health
//! check sits at the root. `get` routes also answer `HEAD` with the
//! same headers and an empty body.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes, body limits, and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(document_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration and sessions
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/auth", post(handlers::auth::login))
        .route("/auth/{token}", delete(handlers::auth::logout))
}

/// Documents
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/docs",
            get(handlers::document::list_documents).post(handlers::document::create_document),
        )
        .route(
            "/docs/{id}",
            get(handlers::document::get_document).delete(handlers::document::delete_document),
        )
}
