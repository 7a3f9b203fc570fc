//! Opaque session tokens.

pub mod store;

pub use store::TokenStore;
