//! Construction of the repository set for the configured backend.

use std::sync::Arc;

use tracing::info;

use docvault_core::config::{DatabaseBackend, DatabaseConfig};
use docvault_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{
    MemoryDatabase, MemoryDocumentRepository, MemoryTokenRepository, MemoryUserRepository,
};
use crate::repositories::{PgDocumentRepository, PgTokenRepository, PgUserRepository};
use crate::traits::{DocumentRepository, TokenRepository, UserRepository};

/// The three repositories, backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Connect to the backend named in `config`, migrating if asked to.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    pool.migrate().await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory repositories; data is lost at shutdown");
                Ok(Self::memory(MemoryDatabase::new()))
            }
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pg.clone())),
            tokens: Arc::new(PgTokenRepository::new(pg.clone())),
            documents: Arc::new(PgDocumentRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Repositories over shared in-memory tables.
    pub fn memory(db: MemoryDatabase) -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new(db.clone())),
            tokens: Arc::new(MemoryTokenRepository::new(db.clone())),
            documents: Arc::new(MemoryDocumentRepository::new(db)),
            pool: None,
        }
    }

    /// Whether the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
