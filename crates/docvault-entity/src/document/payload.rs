//! The two shapes a document body can take.

use bytes::Bytes;
use serde_json::{Map, Value};

use super::mime::AllowedMimeType;

/// Document body, selected by the is-file flag.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentPayload {
    /// Raw file contents.
    Binary {
        bytes: Bytes,
        mimetype: AllowedMimeType,
    },
    /// An ordered JSON object.
    Structured(Map<String, Value>),
}

impl DocumentPayload {
    /// Whether this is a file upload.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }

    /// MIME type of a binary payload.
    pub fn mimetype(&self) -> Option<AllowedMimeType> {
        match self {
            Self::Binary { mimetype, .. } => Some(*mimetype),
            Self::Structured(_) => None,
        }
    }
}
