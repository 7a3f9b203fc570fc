//! Registration and session workflow.
//!
//! Composes the credential validator, the hashing collaborator, the user
//! repository, and the token store.

use std::sync::Arc;

use tracing::{info, warn};

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_database::UserRepository;
use docvault_entity::user::{CreateUser, User};

use crate::credentials::CredentialValidator;
use crate::password::PasswordHashing;
use crate::token::TokenStore;

const WRONG_CREDENTIALS: &str = "Wrong credentials.";

/// Register, log in, and log out users.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    tokens: TokenStore,
    hasher: Arc<dyn PasswordHashing>,
    validator: CredentialValidator,
    admin_token: Option<String>,
}

impl SessionManager {
    /// Creates a session manager. `admin_token` enables admin registration.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenStore,
        hasher: Arc<dyn PasswordHashing>,
        admin_token: Option<String>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            validator: CredentialValidator::new(),
            admin_token: admin_token.filter(|t| !t.is_empty()),
        }
    }

    /// Create a user after validating the login, then the password, then
    /// login availability. A matching admin token sets the admin flag.
    pub async fn register(
        &self,
        login: &str,
        password: &str,
        admin_token: Option<&str>,
    ) -> AppResult<User> {
        self.validator.validate_login(login)?;
        self.validator.validate_password(password)?;

        if self.users.exists(login).await? {
            return Err(AppError::validation("Login already taken."));
        }

        let is_admin = match admin_token.filter(|t| !t.is_empty()) {
            None => false,
            Some(supplied) => match &self.admin_token {
                Some(expected) if constant_time_eq(supplied, expected) => true,
                _ => {
                    warn!(login = %login, "Registration with invalid admin token");
                    return Err(AppError::authorization("Invalid admin token."));
                }
            },
        };

        let password_hash = self.hash(password).await?;
        let user = self
            .users
            .create(&CreateUser {
                login: login.to_string(),
                password_hash,
                is_admin,
            })
            .await
            .map_err(|e| {
                if e.is(ErrorKind::Conflict) {
                    AppError::validation("Login already taken.")
                } else {
                    e
                }
            })?;

        info!(login = %user.login, is_admin = user.is_admin, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a fresh token, revoking older ones.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<String> {
        if login.is_empty() || password.is_empty() {
            return Err(AppError::authentication(WRONG_CREDENTIALS));
        }

        let Some(user) = self.users.find_by_login(login).await? else {
            return Err(AppError::authentication(WRONG_CREDENTIALS));
        };

        if !self.verify(password, &user.password_hash).await? {
            warn!(login = %login, "Failed login attempt");
            return Err(AppError::authentication(WRONG_CREDENTIALS));
        }

        self.tokens.issue_token(&user.login).await
    }

    /// Revoke a token. Revoking an unknown token succeeds.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.tokens.revoke_token(token).await
    }

    /// The token store behind this manager.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    async fn hash(&self, password: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let (password, hash) = (password.to_string(), hash.to_string());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }
}

/// Compare two secrets without short-circuiting on the first difference.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
