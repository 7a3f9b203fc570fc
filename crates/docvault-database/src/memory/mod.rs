//! In-memory repositories for single-node runs and tests.
//!
//! All three repositories share one [`MemoryDatabase`] so that foreign
//! keys between users, tokens, documents, and grants can be checked the
//! way PostgreSQL checks them.

pub mod document;
pub mod token;
pub mod user;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use docvault_core::types::DocumentId;
use docvault_entity::document::Document;
use docvault_entity::token::AuthToken;
use docvault_entity::user::User;

pub use document::MemoryDocumentRepository;
pub use token::MemoryTokenRepository;
pub use user::MemoryUserRepository;

/// A stored document with its insertion sequence for stable ordering.
#[derive(Debug, Clone)]
pub(crate) struct StoredDocument {
    pub(crate) seq: u64,
    pub(crate) doc: Document,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<String, User>,
    pub(crate) tokens: HashMap<String, AuthToken>,
    pub(crate) documents: HashMap<DocumentId, StoredDocument>,
    pub(crate) next_seq: u64,
}

/// Shared in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    pub(crate) tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn document_count(&self) -> usize {
        self.tables.read().await.documents.len()
    }

    /// Number of live tokens.
    pub async fn token_count(&self) -> usize {
        self.tables.read().await.tokens.len()
    }
}
