//! The hashing collaborator.

pub mod hasher;

pub use hasher::Argon2Hasher;

use docvault_core::result::AppResult;

/// One-way, cost-bounded password hashing.
pub trait PasswordHashing: Send + Sync + 'static {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> AppResult<bool>;
}
