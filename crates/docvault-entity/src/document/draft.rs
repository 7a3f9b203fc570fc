//! Unvalidated upload input and its validated form.

use bytes::Bytes;
use serde_json::Value;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::DocumentId;

use super::mime::AllowedMimeType;
use super::payload::DocumentPayload;

/// Everything a client sends when creating a document.
#[derive(Debug, Clone, Default)]
pub struct DocumentDraft {
    pub filename: String,
    pub is_file: bool,
    pub mimetype: Option<String>,
    pub is_public: bool,
    pub granted_to: Vec<String>,
    pub structured: Option<Value>,
    pub binary: Option<Bytes>,
}

/// A validated document ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub id: DocumentId,
    pub owner: String,
    pub filename: String,
    pub is_public: bool,
    /// Deduplicated and never containing the owner.
    pub granted_to: Vec<String>,
    pub payload: DocumentPayload,
}

impl DocumentDraft {
    /// Check the draft and turn it into a [`NewDocument`] owned by `owner`.
    ///
    /// The payload matching `is_file` must be present and non-empty; the
    /// other one is discarded.
    pub fn validate(self, id: DocumentId, owner: &str) -> AppResult<NewDocument> {
        let filename = self.filename.trim().to_string();
        if filename.is_empty() {
            return Err(AppError::validation("Invalid file name."));
        }

        let payload = if self.is_file {
            let mimetype: AllowedMimeType = self.mimetype.as_deref().unwrap_or("").parse()?;
            let bytes = self
                .binary
                .filter(|b| !b.is_empty())
                .ok_or_else(|| AppError::validation("File not provided."))?;
            DocumentPayload::Binary { bytes, mimetype }
        } else {
            match self.structured {
                Some(Value::Object(map)) if !map.is_empty() => DocumentPayload::Structured(map),
                Some(Value::Object(_)) | None | Some(Value::Null) => {
                    return Err(AppError::validation("JSON not provided."));
                }
                Some(_) => return Err(AppError::validation("JSON payload must be an object.")),
            }
        };

        let mut granted_to: Vec<String> = Vec::with_capacity(self.granted_to.len());
        for login in self.granted_to {
            let login = login.trim();
            if login.is_empty() || login == owner || granted_to.iter().any(|g| g == login) {
                continue;
            }
            granted_to.push(login.to_string());
        }

        Ok(NewDocument {
            id,
            owner: owner.to_string(),
            filename,
            is_public: self.is_public,
            granted_to,
            payload,
        })
    }
}
