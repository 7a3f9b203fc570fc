//! Response DTOs.

use serde::{Deserialize, Serialize};

use docvault_entity::document::DocumentSummary;

/// `{"response": ...}` wrapper used by account and delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub response: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn new(response: T) -> Self {
        Self { response }
    }
}

/// `{"data": ...}` wrapper used by document endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredLogin {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}

/// GET /api/docs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    pub docs: Vec<DocumentSummary>,
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// `{"<key>": true}`, acknowledging a removal.
pub fn removed(key: impl Into<String>) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert(key.into(), serde_json::Value::Bool(true));
    map
}
