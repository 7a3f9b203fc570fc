//! HTTP request handlers.

pub mod auth;
pub mod document;
pub mod health;
