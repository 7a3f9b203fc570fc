//! Repository traits consumed by the auth and service layers.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory one in [`crate::memory`]. Both enforce the same
//! uniqueness, foreign-key, cascade, and atomicity rules.

use async_trait::async_trait;

use docvault_core::result::AppResult;
use docvault_core::types::DocumentId;
use docvault_entity::document::{Document, DocumentQuery, DocumentSummary, NewDocument};
use docvault_entity::token::AuthToken;
use docvault_entity::user::{CreateUser, Identity, User};

/// Registered users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user. A taken login is a `Conflict`.
    async fn create(&self, user: &CreateUser) -> AppResult<User>;

    /// Look up a user by login.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Whether a login is registered.
    async fn exists(&self, login: &str) -> AppResult<bool>;
}

/// Persisted session tokens.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Persist a token for a registered login.
    async fn insert(&self, login: &str, token: &str) -> AppResult<AuthToken>;

    /// Delete one token. Returns whether a row was removed.
    async fn delete(&self, token: &str) -> AppResult<bool>;

    /// Delete every token of a login, returning the deleted token strings.
    async fn delete_all_for_login(&self, login: &str) -> AppResult<Vec<String>>;

    /// Resolve a token to the identity of its owner.
    async fn find_identity(&self, token: &str) -> AppResult<Option<Identity>>;
}

/// Documents and their grant rows.
#[async_trait]
pub trait DocumentRepository: Send + Sync + 'static {
    /// Persist a document and all of its grants as one unit.
    ///
    /// Either everything is stored or, on any failure, nothing is.
    async fn create(&self, doc: &NewDocument) -> AppResult<Document>;

    /// Fetch a document with its aggregated grant list.
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>>;

    /// Summaries admitted by `query`, ordered by name then creation time.
    async fn list(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentSummary>>;

    /// Delete a document and its grants. Returns whether it existed.
    async fn delete(&self, id: DocumentId) -> AppResult<bool>;
}
