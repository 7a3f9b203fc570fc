//! # docvault-database
//!
//! Persistence for docvault: PostgreSQL connection management, the
//! repository traits the rest of the workspace programs against, and two
//! implementations of them (sqlx/PostgreSQL and in-memory).

pub mod backend;
pub mod connection;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use backend::Repositories;
pub use connection::DatabasePool;
pub use traits::{DocumentRepository, TokenRepository, UserRepository};
