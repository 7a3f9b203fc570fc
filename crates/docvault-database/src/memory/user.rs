//! In-memory user repository.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::user::{CreateUser, User};

use super::MemoryDatabase;
use crate::traits::UserRepository;

/// User repository over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    db: MemoryDatabase,
}

impl MemoryUserRepository {
    /// Create a repository over shared tables.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &CreateUser) -> AppResult<User> {
        let mut tables = self.db.tables.write().await;
        if tables.users.contains_key(&user.login) {
            return Err(AppError::conflict("Login already taken."));
        }
        let row = User {
            id: Uuid::new_v4(),
            login: user.login.clone(),
            password_hash: user.password_hash.clone(),
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        tables.users.insert(row.login.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        Ok(self.db.tables.read().await.users.get(login).cloned())
    }

    async fn exists(&self, login: &str) -> AppResult<bool> {
        Ok(self.db.tables.read().await.users.contains_key(login))
    }
}
