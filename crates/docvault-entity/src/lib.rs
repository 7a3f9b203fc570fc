//! # docvault-entity
//!
//! Domain entity models for docvault. Every struct in this crate
//! represents a database table row or a domain value object; row types
//! additionally derive `sqlx::FromRow`.

pub mod document;
pub mod token;
pub mod user;
