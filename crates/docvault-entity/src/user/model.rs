//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub login: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Bypasses ownership and grant checks.
    pub is_admin: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The identity this user acts under once authenticated.
    pub fn identity(&self) -> Identity {
        Identity {
            login: self.login.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Validated login.
    pub login: String,
    /// Already-hashed password.
    pub password_hash: String,
    /// Admin flag.
    pub is_admin: bool,
}

/// The caller behind a validated token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Identity {
    /// Login of the caller.
    pub login: String,
    /// Whether the caller is an administrator.
    pub is_admin: bool,
}

impl Identity {
    /// Build an identity.
    pub fn new(login: impl Into<String>, is_admin: bool) -> Self {
        Self {
            login: login.into(),
            is_admin,
        }
    }
}
