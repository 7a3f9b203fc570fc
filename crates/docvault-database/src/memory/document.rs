//! In-memory document repository.

use async_trait::async_trait;
use chrono::Utc;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::DocumentId;
use docvault_entity::document::{Document, DocumentQuery, DocumentSummary, NewDocument};

use super::{MemoryDatabase, StoredDocument};
use crate::traits::DocumentRepository;

/// Document repository over [`MemoryDatabase`].
///
/// Every check runs before the first mutation under a single write
/// guard, so a failed create leaves no trace.
#[derive(Debug, Clone)]
pub struct MemoryDocumentRepository {
    db: MemoryDatabase,
}

impl MemoryDocumentRepository {
    /// Create a repository over shared tables.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn create(&self, doc: &NewDocument) -> AppResult<Document> {
        let mut tables = self.db.tables.write().await;

        if tables.documents.contains_key(&doc.id) {
            return Err(AppError::database(format!(
                "Failed to insert document: duplicate id {}",
                doc.id
            )));
        }
        if !tables.users.contains_key(&doc.owner) {
            return Err(AppError::database(format!(
                "Failed to insert document: unknown owner '{}'",
                doc.owner
            )));
        }
        if let Some(missing) = doc
            .granted_to
            .iter()
            .find(|login| !tables.users.contains_key(login.as_str()))
        {
            return Err(AppError::database(format!(
                "Failed to grant access to '{missing}'"
            )));
        }

        let mut granted_to = doc.granted_to.clone();
        granted_to.sort();
        let stored = Document {
            id: doc.id,
            filename: doc.filename.clone(),
            owner: doc.owner.clone(),
            is_public: doc.is_public,
            granted_to,
            created_at: Utc::now(),
            payload: doc.payload.clone(),
        };

        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.documents.insert(
            doc.id,
            StoredDocument {
                seq,
                doc: stored.clone(),
            },
        );
        Ok(stored)
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let tables = self.db.tables.read().await;
        Ok(tables.documents.get(&id).map(|s| s.doc.clone()))
    }

    async fn list(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentSummary>> {
        let tables = self.db.tables.read().await;
        let mut matched: Vec<(u64, DocumentSummary)> = tables
            .documents
            .values()
            .map(|s| (s.seq, s.doc.summary()))
            .filter(|(_, summary)| query.admits(summary))
            .collect();

        matched.sort_by(|(seq_a, a), (seq_b, b)| {
            a.filename
                .cmp(&b.filename)
                .then(a.created_at.cmp(&b.created_at))
                .then(seq_a.cmp(seq_b))
        });

        Ok(matched
            .into_iter()
            .take(query.limit.as_usize())
            .map(|(_, summary)| summary)
            .collect())
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        Ok(self.db.tables.write().await.documents.remove(&id).is_some())
    }
}
