//! # docvault-api
//!
//! HTTP API layer for docvault built on Axum.
//!
//! Provides the REST endpoints, the token extractor, request logging,
//! DTOs, and the mapping from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
