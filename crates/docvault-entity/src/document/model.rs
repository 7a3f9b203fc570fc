//! Persisted document and its listing projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::types::DocumentId;

use super::payload::DocumentPayload;

/// A stored document with its full grant list and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Immutable identifier.
    pub id: DocumentId,
    /// Display and download name.
    pub filename: String,
    /// Login of the single owner.
    pub owner: String,
    /// Readable by anyone when set.
    pub is_public: bool,
    /// Logins other than the owner with read access.
    pub granted_to: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Document body.
    pub payload: DocumentPayload,
}

impl Document {
    /// Whether this document holds file bytes.
    pub fn is_file(&self) -> bool {
        self.payload.is_file()
    }

    /// Projection without the body.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            filename: self.filename.clone(),
            is_file: self.is_file(),
            is_public: self.is_public,
            mimetype: self.payload.mimetype().map(|m| m.as_str().to_string()),
            owner: self.owner.clone(),
            granted_to: self.granted_to.clone(),
            created_at: self.created_at,
        }
    }
}

/// A document as returned by list operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub filename: String,
    pub is_file: bool,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    pub owner: String,
    pub granted_to: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl DocumentSummary {
    /// Whether `login` owns the document or holds a grant on it.
    pub fn involves(&self, login: &str) -> bool {
        self.owner == login || self.granted_to.iter().any(|g| g == login)
    }
}
