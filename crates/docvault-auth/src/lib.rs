//! # docvault-auth
//!
//! Authentication and authorization for docvault.
//!
//! ## Modules
//!
//! - `credentials`: login and password format checks
//! - `password`: the hashing collaborator and its Argon2id implementation
//! - `token`: opaque session tokens with single-active-session enforcement
//! - `acl`: the pure access decision and list visibility scope
//! - `session`: registration, login and logout

pub mod acl;
pub mod credentials;
pub mod password;
pub mod session;
pub mod token;

pub use acl::{AccessTarget, Action, Verdict, decide, list_scope};
pub use credentials::CredentialValidator;
pub use password::{Argon2Hasher, PasswordHashing};
pub use session::SessionManager;
pub use token::TokenStore;
