//! Token issuance, revocation, and validation.
//!
//! A login holds at most one live token: issuing revokes every previous
//! token of that login before inserting the new one. Positive validations
//! are cached; revocations evict the affected cache keys.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use docvault_cache::{TtlCache, keys};
use docvault_core::result::AppResult;
use docvault_database::TokenRepository;
use docvault_entity::user::Identity;

/// Session token lifecycle on top of a [`TokenRepository`].
#[derive(Clone)]
pub struct TokenStore {
    repo: Arc<dyn TokenRepository>,
    cache: Arc<TtlCache<Identity>>,
}

impl TokenStore {
    /// Creates a token store using the shared identity cache.
    pub fn new(repo: Arc<dyn TokenRepository>, cache: Arc<TtlCache<Identity>>) -> Self {
        Self { repo, cache }
    }

    /// Revoke every token of `login`, then persist and return a new one.
    pub async fn issue_token(&self, login: &str) -> AppResult<String> {
        self.revoke_all(login).await?;

        let token = Uuid::new_v4().to_string();
        self.repo.insert(login, &token).await?;

        info!(login = %login, "Issued session token");
        Ok(token)
    }

    /// Delete one token. Unknown tokens are not an error and leave the
    /// cache untouched.
    pub async fn revoke_token(&self, token: &str) -> AppResult<()> {
        if token.is_empty() {
            return Ok(());
        }
        let existed = self.repo.delete(token).await?;
        if existed {
            self.cache.invalidate(&keys::token_identity(token));
        }
        debug!(existed, "Revoked session token");
        Ok(())
    }

    /// Delete every token of `login`. Returns how many were removed.
    pub async fn revoke_all(&self, login: &str) -> AppResult<usize> {
        let revoked = self.repo.delete_all_for_login(login).await?;
        for token in &revoked {
            self.cache.invalidate(&keys::token_identity(token));
        }
        if !revoked.is_empty() {
            debug!(login = %login, count = revoked.len(), "Revoked previous session tokens");
        }
        Ok(revoked.len())
    }

    /// Resolve a token to its identity.
    ///
    /// `Ok(None)` means the token is empty or unknown. Store failures are
    /// returned as errors, never folded into "invalid".
    pub async fn validate_token(&self, token: &str) -> AppResult<Option<Identity>> {
        if token.is_empty() {
            return Ok(None);
        }

        let key = keys::token_identity(token);
        if let Some(identity) = self.cache.get(&key) {
            return Ok(Some(identity));
        }

        let identity = self.repo.find_identity(token).await?;
        if let Some(identity) = &identity {
            self.cache.set(key, identity.clone());
        }
        Ok(identity)
    }
}
