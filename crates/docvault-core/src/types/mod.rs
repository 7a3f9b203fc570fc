//! Core type definitions used across the docvault workspace.

pub mod id;
pub mod limit;

pub use id::*;
pub use limit::ListLimit;
