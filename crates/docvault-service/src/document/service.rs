//! Document create, read, list, and delete.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use docvault_auth::{AccessTarget, Action, CredentialValidator, TokenStore, decide, list_scope};
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::{DocumentId, ListLimit};
use docvault_database::DocumentRepository;
use docvault_entity::document::{AttributeFilter, Document, DocumentDraft, DocumentQuery, DocumentSummary};
use docvault_entity::user::Identity;

use crate::context::RequestContext;

/// Raw list parameters as supplied by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequest {
    /// Whose documents to list; defaults to the caller.
    pub login: Option<String>,
    /// Allow-listed attribute to filter on.
    pub key: Option<String>,
    /// Value the attribute must equal.
    pub value: Option<String>,
    /// Maximum number of results; 0 or absent means 10.
    pub limit: Option<u32>,
}

/// Service for document operations.
#[derive(Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentRepository>,
    tokens: TokenStore,
    validator: CredentialValidator,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(documents: Arc<dyn DocumentRepository>, tokens: TokenStore) -> Self {
        Self {
            documents,
            tokens,
            validator: CredentialValidator::new(),
        }
    }

    /// Store a new document owned by the caller under a fresh id.
    pub async fn create(&self, ctx: &RequestContext, draft: DocumentDraft) -> AppResult<Document> {
        self.create_with_id(ctx, DocumentId::new(), draft).await
    }

    /// Store a new document under a caller-chosen id.
    ///
    /// Nothing is written unless the draft validates, and a failure while
    /// writing grants leaves no document behind.
    pub async fn create_with_id(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        draft: DocumentDraft,
    ) -> AppResult<Document> {
        let owner = self.require_identity(ctx).await?;

        for grantee in draft.granted_to.iter().filter(|g| !g.trim().is_empty()) {
            self.validator.validate_login(grantee.trim()).map_err(|e| {
                AppError::validation(format!("Invalid grant '{grantee}': {}", e.message))
            })?;
        }
        let new_doc = draft.validate(id, &owner.login)?;

        let doc = ctx.run(self.documents.create(&new_doc)).await?;
        info!(
            document_id = %doc.id,
            owner = %doc.owner,
            is_file = doc.is_file(),
            "Document created"
        );
        Ok(doc)
    }

    /// Fetch a document the caller may read.
    pub async fn read(&self, ctx: &RequestContext, raw_id: &str) -> AppResult<Document> {
        let id = DocumentId::parse(raw_id)?;
        let requester = self.resolve(ctx).await?;

        let doc = ctx
            .run(self.documents.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found."))?;

        let verdict = decide(
            Action::Read,
            AccessTarget::from(&doc),
            requester.as_ref(),
            ctx.token_present(),
        );
        debug!(document_id = %id, ?verdict, "Read access decided");
        verdict.into_result()?;
        Ok(doc)
    }

    /// List documents visible to the caller.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        request: &ListRequest,
    ) -> AppResult<Vec<DocumentSummary>> {
        let filter = AttributeFilter::parse(request.key.as_deref(), request.value.as_deref())?;
        let requester = self.require_identity(ctx).await?;

        let query = DocumentQuery {
            scope: list_scope(&requester, request.login.as_deref()),
            filter,
            limit: ListLimit::from(request.limit),
        };
        ctx.run(self.documents.list(&query)).await
    }

    /// Delete a document the caller owns, holds a grant on, or administers.
    pub async fn delete(&self, ctx: &RequestContext, raw_id: &str) -> AppResult<DocumentId> {
        let requester = self.require_identity(ctx).await?;
        let id = DocumentId::parse(raw_id)?;

        let doc = ctx
            .run(self.documents.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found."))?;

        decide(
            Action::Delete,
            AccessTarget::from(&doc),
            Some(&requester),
            ctx.token_present(),
        )
        .into_result()?;

        if !ctx.run(self.documents.delete(id)).await? {
            return Err(AppError::not_found("Document not found."));
        }

        info!(document_id = %id, by = %requester.login, "Document deleted");
        Ok(id)
    }

    async fn resolve(&self, ctx: &RequestContext) -> AppResult<Option<Identity>> {
        match ctx.token.as_deref() {
            None => Ok(None),
            Some(token) => ctx.run(self.tokens.validate_token(token)).await,
        }
    }

    async fn require_identity(&self, ctx: &RequestContext) -> AppResult<Identity> {
        self.resolve(ctx)
            .await?
            .ok_or_else(|| AppError::authentication("Unauthorized."))
    }
}
