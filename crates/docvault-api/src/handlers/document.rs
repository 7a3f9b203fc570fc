//! Document upload, download, listing, and removal handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::Value;

use docvault_core::error::AppError;
use docvault_entity::document::{Document, DocumentPayload, DocumentSummary};
use docvault_service::ListRequest;

use crate::dto::request::DocumentMeta;
use crate::dto::response::{DataEnvelope, DocumentList, ResponseEnvelope, removed};
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::state::AppState;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// POST /api/docs (multipart: `meta`, then `json` or `file`)
pub async fn create_document(
    State(state): State<AppState>,
    caller: Caller,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<DocumentSummary>>), ApiError> {
    let mut multipart = multipart?;

    let mut meta: Option<DocumentMeta> = None;
    let mut structured: Option<Value> = None;
    let mut binary: Option<Bytes> = None;
    let mut part_content_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "meta" => {
                let text = field.text().await?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::validation(format!("Invalid meta: {e}")))?;
                meta = Some(parsed);
            }
            "json" => {
                let text = field.text().await?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::validation(format!("Invalid JSON payload: {e}")))?;
                structured = Some(parsed);
            }
            "file" => {
                part_content_type = field.content_type().map(str::to_string);
                binary = Some(field.bytes().await?);
            }
            _ => {}
        }
    }

    let meta = meta.ok_or_else(|| AppError::validation("Meta not provided."))?;
    let draft = meta.into_draft(structured, binary, part_content_type);
    let doc = state.documents.create(&caller, draft).await?;

    Ok((StatusCode::CREATED, Json(DataEnvelope::new(doc.summary()))))
}

/// GET|HEAD /api/docs
pub async fn list_documents(
    State(state): State<AppState>,
    caller: Caller,
    query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<DataEnvelope<DocumentList>>, ApiError> {
    let Query(request) = query?;
    let docs = state.documents.list(&caller, &request).await?;
    Ok(Json(DataEnvelope::new(DocumentList { docs })))
}

/// GET|HEAD /api/docs/{id}
pub async fn get_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let doc = state.documents.read(&caller, &id).await?;
    Ok(document_response(doc)?)
}

/// DELETE /api/docs/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ResponseEnvelope<serde_json::Map<String, Value>>>, ApiError> {
    let id = state.documents.delete(&caller, &id).await?;
    Ok(Json(ResponseEnvelope::new(removed(id.to_string()))))
}

fn document_response(doc: Document) -> Result<Response, AppError> {
    let last_modified = doc.created_at.format(HTTP_DATE).to_string();
    match doc.payload {
        DocumentPayload::Structured(map) => {
            Ok(Json(DataEnvelope::new(Value::Object(map))).into_response())
        }
        DocumentPayload::Binary { bytes, mimetype } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mimetype.as_str())
            .header(header::CONTENT_DISPOSITION, attachment(&doc.filename))
            .header(header::CONTENT_LENGTH, bytes.len())
            .header(header::LAST_MODIFIED, last_modified)
            .body(Body::from(bytes))
            .map_err(|e| AppError::internal(format!("Response build failed: {e}"))),
    }
}

fn attachment(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' { '\'' } else { c })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
