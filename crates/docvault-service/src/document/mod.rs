//! Document operations.

pub mod service;

pub use service::{DocumentService, ListRequest};
