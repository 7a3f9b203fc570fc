//! Opaque bearer token row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An issued session token. At most one is live per login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    /// The opaque token string.
    pub token: String,
    /// Login the token authenticates.
    pub login: String,
    /// Issue time.
    pub created_at: DateTime<Utc>,
}
