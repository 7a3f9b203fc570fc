//! Request DTOs.

use serde::{Deserialize, Serialize};

use docvault_entity::document::DocumentDraft;

/// POST /api/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub pswd: String,
    /// Admin token; a match registers an administrator.
    #[serde(default)]
    pub token: Option<String>,
}

/// POST /api/auth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub pswd: String,
}

/// The `meta` part of a document upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    pub name: String,
    pub file: bool,
    pub public: bool,
    pub mime: Option<String>,
    pub grant: Vec<String>,
}

impl DocumentMeta {
    /// Combine with the uploaded parts into an unvalidated draft.
    ///
    /// A file part's own content type stands in when `mime` is absent.
    pub fn into_draft(
        self,
        structured: Option<serde_json::Value>,
        binary: Option<bytes::Bytes>,
        part_content_type: Option<String>,
    ) -> DocumentDraft {
        DocumentDraft {
            filename: self.name,
            is_file: self.file,
            mimetype: self.mime.filter(|m| !m.is_empty()).or(part_content_type),
            is_public: self.public,
            granted_to: self.grant,
            structured,
            binary,
        }
    }
}
