//! PostgreSQL repository implementations.

pub mod document;
pub mod token;
pub mod user;

pub use document::PgDocumentRepository;
pub use token::PgTokenRepository;
pub use user::PgUserRepository;
