//! # docvault-service
//!
//! Document operations. Each call resolves the caller's token, consults
//! the access decision, and only then touches the document store.

pub mod context;
pub mod document;

pub use context::RequestContext;
pub use document::{DocumentService, ListRequest};
