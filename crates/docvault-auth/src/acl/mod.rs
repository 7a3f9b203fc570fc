//! Access decisions for documents.

pub mod decision;
pub mod scope;

pub use decision::{AccessTarget, Action, Verdict, decide};
pub use scope::list_scope;
