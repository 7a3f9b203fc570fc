//! Session token entities.

pub mod model;

pub use model::AuthToken;
