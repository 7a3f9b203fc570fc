//! Session token repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::token::AuthToken;
use docvault_entity::user::Identity;

use crate::traits::TokenRepository;

/// Repository for `auth_tokens` rows.
#[derive(Debug, Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn insert(&self, login: &str, token: &str) -> AppResult<AuthToken> {
        sqlx::query_as::<_, AuthToken>(
            "INSERT INTO auth_tokens (token, login) VALUES ($1, $2) \
             RETURNING token, login, created_at",
        )
        .bind(token)
        .bind(login)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save token", e))
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete token", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_login(&self, login: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("DELETE FROM auth_tokens WHERE login = $1 RETURNING token")
            .bind(login)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete user tokens", e)
            })
    }

    async fn find_identity(&self, token: &str) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>(
            "SELECT u.login, u.is_admin FROM auth_tokens t \
             JOIN users u ON u.login = t.login WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve token", e))
    }
}
