//! Login and password format checks.

pub mod validator;

pub use validator::CredentialValidator;
