//! Application state shared across all handlers.

use std::sync::Arc;

use docvault_auth::{Argon2Hasher, SessionManager, TokenStore};
use docvault_cache::TtlCache;
use docvault_core::config::AppConfig;
use docvault_core::result::AppResult;
use docvault_database::Repositories;
use docvault_entity::user::Identity;
use docvault_service::DocumentService;

/// Application state passed to every handler via `State<AppState>`.
///
/// Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Repository set for the configured backend
    pub repos: Repositories,
    /// Register, login, logout
    pub sessions: SessionManager,
    /// Document operations
    pub documents: DocumentService,
}

impl AppState {
    /// Wire services over `repos`, sharing `cache` between them.
    pub fn new(
        config: AppConfig,
        repos: Repositories,
        cache: Arc<TtlCache<Identity>>,
    ) -> AppResult<Self> {
        let tokens = TokenStore::new(Arc::clone(&repos.tokens), cache);
        let hasher = Arc::new(Argon2Hasher::new(&config.auth.hashing)?);
        let sessions = SessionManager::new(
            Arc::clone(&repos.users),
            tokens.clone(),
            hasher,
            config.auth.admin_token().map(str::to_string),
        );
        let documents = DocumentService::new(Arc::clone(&repos.documents), tokens);

        Ok(Self {
            config: Arc::new(config),
            repos,
            sessions,
            documents,
        })
    }
}
