//! # docvault-core
//!
//! Core crate for docvault. Contains configuration schemas, typed
//! identifiers, the list limit type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other docvault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
