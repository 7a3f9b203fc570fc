//! Document repository implementation.
//!
//! Creation writes the document row and its grant rows in one
//! transaction. Listing builds its predicate with [`QueryBuilder`]: column
//! names come from `FilterKey::column` and every caller value is bound.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{error, info};

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::types::DocumentId;
use docvault_entity::document::{
    AllowedMimeType, Document, DocumentPayload, DocumentQuery, DocumentSummary, FilterValue,
    NewDocument,
};

use crate::traits::DocumentRepository;

const GRANTS_AGG: &str = "COALESCE(array_agg(g.user_login::text ORDER BY g.user_login) \
     FILTER (WHERE g.user_login IS NOT NULL), ARRAY[]::text[]) AS granted_to";

/// Full document row with aggregated grants.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: DocumentId,
    name: String,
    is_file: bool,
    is_public: bool,
    mimetype: Option<String>,
    json_data: Option<Json<Map<String, Value>>>,
    file_data: Option<Vec<u8>>,
    owner_login: String,
    created_at: DateTime<Utc>,
    granted_to: Vec<String>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = AppError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let payload = if row.is_file {
            let mimetype: AllowedMimeType = row.mimetype.as_deref().unwrap_or("").parse()?;
            let bytes = row.file_data.ok_or_else(|| {
                AppError::database(format!("Document {} has no file data", row.id))
            })?;
            DocumentPayload::Binary {
                bytes: Bytes::from(bytes),
                mimetype,
            }
        } else {
            let Json(map) = row.json_data.ok_or_else(|| {
                AppError::database(format!("Document {} has no JSON data", row.id))
            })?;
            DocumentPayload::Structured(map)
        };

        Ok(Document {
            id: row.id,
            filename: row.name,
            owner: row.owner_login,
            is_public: row.is_public,
            granted_to: row.granted_to,
            created_at: row.created_at,
            payload,
        })
    }
}

/// Listing row without payload columns.
#[derive(Debug, FromRow)]
struct SummaryRow {
    id: DocumentId,
    name: String,
    is_file: bool,
    is_public: bool,
    mimetype: Option<String>,
    owner_login: String,
    created_at: DateTime<Utc>,
    granted_to: Vec<String>,
}

impl From<SummaryRow> for DocumentSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            filename: row.name,
            is_file: row.is_file,
            is_public: row.is_public,
            mimetype: row.mimetype,
            owner: row.owner_login,
            granted_to: row.granted_to,
            created_at: row.created_at,
        }
    }
}

/// Repository for documents and their grants.
#[derive(Debug, Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_rows(
        tx: &mut Transaction<'_, Postgres>,
        doc: &NewDocument,
    ) -> AppResult<DateTime<Utc>> {
        let (mimetype, json_data, file_data) = match &doc.payload {
            DocumentPayload::Binary { bytes, mimetype } => {
                (Some(mimetype.as_str()), None, Some(&bytes[..]))
            }
            DocumentPayload::Structured(map) => (None, Some(Json(map)), None),
        };

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO documents \
             (id, name, is_file, is_public, mimetype, json_data, file_data, owner_login) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING created_at",
        )
        .bind(doc.id)
        .bind(&doc.filename)
        .bind(doc.payload.is_file())
        .bind(doc.is_public)
        .bind(mimetype)
        .bind(json_data)
        .bind(file_data)
        .bind(&doc.owner)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert document", e))?;

        for login in &doc.granted_to {
            sqlx::query("INSERT INTO document_grants (document_id, user_login) VALUES ($1, $2)")
                .bind(doc.id)
                .bind(login)
                .execute(&mut **tx)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        format!("Failed to grant access to '{login}'"),
                        e,
                    )
                })?;
        }

        Ok(created_at)
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, doc: &NewDocument) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let created_at = match Self::insert_rows(&mut tx, doc).await {
            Ok(created_at) => created_at,
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    error!(document_id = %doc.id, error = %rollback, "Rollback failed");
                }
                return Err(err);
            }
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit document", e)
        })?;

        info!(
            document_id = %doc.id,
            owner = %doc.owner,
            grants = doc.granted_to.len(),
            "Document stored"
        );

        let mut granted_to = doc.granted_to.clone();
        granted_to.sort();
        Ok(Document {
            id: doc.id,
            filename: doc.filename.clone(),
            owner: doc.owner.clone(),
            is_public: doc.is_public,
            granted_to,
            created_at,
            payload: doc.payload.clone(),
        })
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let sql = format!(
            "SELECT d.id, d.name, d.is_file, d.is_public, d.mimetype, d.json_data, d.file_data, \
             d.owner_login, d.created_at, {GRANTS_AGG} \
             FROM documents d LEFT JOIN document_grants g ON g.document_id = d.id \
             WHERE d.id = $1 GROUP BY d.id"
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))?;

        row.map(Document::try_from).transpose()
    }

    async fn list(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentSummary>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT d.id, d.name, d.is_file, d.is_public, d.mimetype, d.owner_login, \
             d.created_at, {GRANTS_AGG} \
             FROM documents d LEFT JOIN document_grants g ON g.document_id = d.id \
             WHERE (d.owner_login = "
        ));
        qb.push_bind(query.scope.subject.clone());
        qb.push(
            " OR EXISTS (SELECT 1 FROM document_grants s \
             WHERE s.document_id = d.id AND s.user_login = ",
        );
        qb.push_bind(query.scope.subject.clone());
        qb.push("))");

        if query.scope.public_only {
            qb.push(" AND d.is_public");
        }

        if let Some(filter) = &query.filter {
            qb.push(" AND ").push(filter.key.column()).push(" = ");
            match &filter.value {
                FilterValue::Text(value) => qb.push_bind(value.clone()),
                FilterValue::Flag(value) => qb.push_bind(*value),
            };
        }

        qb.push(" GROUP BY d.id ORDER BY d.name ASC, d.created_at ASC LIMIT ");
        qb.push_bind(i64::from(query.limit.get()));

        let rows = qb
            .build_query_as::<SummaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        Ok(rows.into_iter().map(DocumentSummary::from).collect())
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::PgUserRepository;
    use crate::traits::UserRepository;
    use docvault_core::types::ListLimit;
    use docvault_entity::document::{AttributeFilter, ListScope};
    use docvault_entity::user::CreateUser;
    use serde_json::json;

    async fn seed_users(pool: &PgPool, logins: &[&str]) {
        let users = PgUserRepository::new(pool.clone());
        for login in logins {
            users
                .create(&CreateUser {
                    login: login.to_string(),
                    password_hash: "hash".into(),
                    is_admin: false,
                })
                .await
                .unwrap();
        }
    }

    fn pdf(owner: &str, name: &str, grants: &[&str]) -> NewDocument {
        NewDocument {
            id: DocumentId::new(),
            owner: owner.into(),
            filename: name.into(),
            is_public: false,
            granted_to: grants.iter().map(|g| g.to_string()).collect(),
            payload: DocumentPayload::Binary {
                bytes: Bytes::from_static(b"%PDF"),
                mimetype: AllowedMimeType::Pdf,
            },
        }
    }

    fn owned_by(login: &str, filter: Option<AttributeFilter>, limit: u32) -> DocumentQuery {
        DocumentQuery {
            scope: ListScope {
                subject: login.into(),
                public_only: false,
            },
            filter,
            limit: ListLimit::new(limit),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn unknown_grantee_rolls_back_whole_create(pool: PgPool) {
        seed_users(&pool, &["alice0001", "bob00001", "carl0001"]).await;
        let repo = PgDocumentRepository::new(pool.clone());

        let doc = pdf("alice0001", "a.pdf", &["bob00001", "nobody01", "carl0001"]);
        let err = repo.create(&doc).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(repo.find_by_id(doc.id).await.unwrap().is_none());

        let grants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM document_grants")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(grants, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn stored_document_reads_back_with_sorted_grants(pool: PgPool) {
        seed_users(&pool, &["alice0001", "bob00001", "carl0001"]).await;
        let repo = PgDocumentRepository::new(pool);

        let doc = pdf("alice0001", "a.pdf", &["carl0001", "bob00001"]);
        let created = repo.create(&doc).await.unwrap();
        let read = repo.find_by_id(doc.id).await.unwrap().unwrap();

        assert_eq!(read.granted_to, vec!["bob00001", "carl0001"]);
        assert_eq!(read.granted_to, created.granted_to);
        assert_eq!(read.owner, "alice0001");
        assert_eq!(read.payload.mimetype(), Some(AllowedMimeType::Pdf));

        let mut note = pdf("alice0001", "settings", &[]);
        note.payload = DocumentPayload::Structured(
            json!({"zeta": 1, "alpha": [true, null]})
                .as_object()
                .cloned()
                .unwrap(),
        );
        repo.create(&note).await.unwrap();
        let read = repo.find_by_id(note.id).await.unwrap().unwrap();
        assert!(read.granted_to.is_empty());
        match read.payload {
            DocumentPayload::Structured(map) => {
                assert_eq!(Value::Object(map), json!({"zeta": 1, "alpha": [true, null]}));
            }
            other => panic!("expected JSON payload, got {other:?}"),
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn list_orders_by_name_then_creation_and_limits(pool: PgPool) {
        seed_users(&pool, &["alice0001"]).await;
        let repo = PgDocumentRepository::new(pool);

        let mut ids = Vec::new();
        for name in ["b", "a", "c", "a"] {
            ids.push(repo.create(&pdf("alice0001", name, &[])).await.unwrap().id);
        }

        let all = repo.list(&owned_by("alice0001", None, 10)).await.unwrap();
        let order: Vec<_> = all.iter().map(|d| d.id).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);

        let first_two = repo.list(&owned_by("alice0001", None, 2)).await.unwrap();
        let names: Vec<_> = first_two.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["a", "a"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn list_filter_values_are_bound_not_spliced(pool: PgPool) {
        seed_users(&pool, &["alice0001", "bob00001"]).await;
        let repo = PgDocumentRepository::new(pool);

        let quoted = r#"o'brien "draft".pdf"#;
        repo.create(&pdf("alice0001", quoted, &[])).await.unwrap();
        repo.create(&pdf("alice0001", "plain.pdf", &[])).await.unwrap();
        repo.create(&pdf("bob00001", "bobs.pdf", &["alice0001"])).await.unwrap();

        let filter = AttributeFilter::parse(Some("name"), Some(quoted)).unwrap();
        let hits = repo.list(&owned_by("alice0001", filter, 10)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].filename, quoted);

        let injection = AttributeFilter::parse(Some("name"), Some("x' OR '1'='1")).unwrap();
        let hits = repo.list(&owned_by("alice0001", injection, 10)).await.unwrap();
        assert!(hits.is_empty());

        let granted = repo.list(&owned_by("alice0001", None, 10)).await.unwrap();
        assert_eq!(granted.len(), 3);
        assert!(granted.iter().any(|d| d.owner == "bob00001"));
    }
}
