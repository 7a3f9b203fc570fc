//! In-memory token repository.

use async_trait::async_trait;
use chrono::Utc;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::token::AuthToken;
use docvault_entity::user::Identity;

use super::MemoryDatabase;
use crate::traits::TokenRepository;

/// Token repository over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryTokenRepository {
    db: MemoryDatabase,
}

impl MemoryTokenRepository {
    /// Create a repository over shared tables.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn insert(&self, login: &str, token: &str) -> AppResult<AuthToken> {
        let mut tables = self.db.tables.write().await;
        if !tables.users.contains_key(login) {
            return Err(AppError::database(format!(
                "Failed to save token: unknown login '{login}'"
            )));
        }
        if tables.tokens.contains_key(token) {
            return Err(AppError::database("Failed to save token: duplicate token"));
        }
        let row = AuthToken {
            token: token.to_string(),
            login: login.to_string(),
            created_at: Utc::now(),
        };
        tables.tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        Ok(self.db.tables.write().await.tokens.remove(token).is_some())
    }

    async fn delete_all_for_login(&self, login: &str) -> AppResult<Vec<String>> {
        let mut tables = self.db.tables.write().await;
        let doomed: Vec<String> = tables
            .tokens
            .values()
            .filter(|t| t.login == login)
            .map(|t| t.token.clone())
            .collect();
        for token in &doomed {
            tables.tokens.remove(token);
        }
        Ok(doomed)
    }

    async fn find_identity(&self, token: &str) -> AppResult<Option<Identity>> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .tokens
            .get(token)
            .and_then(|t| tables.users.get(&t.login))
            .map(|u| u.identity()))
    }
}
