use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::document::validate_document_for_insert;
use crate::{
    Document, DocumentBody, DocumentId, Filter, Result, StoreError,
    store::{DocumentStore, FindOptions},
};

/// PostgreSQL-backed document store.
///
/// Every collection lives in one `documents` table, each record stored as a
/// JSONB object next to its id and collection name.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgreSQL document store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_document(row: PgRow) -> Result<Document> {
        let body: serde_json::Value = row.try_get("body")?;
        let serde_json::Value::Object(body) = body else {
            return Err(StoreError::InvalidDocument(
                "stored body is not a JSON object".to_string(),
            ));
        };

        Ok(Document {
            id: DocumentId::from_uuid(row.try_get::<Uuid, _>("id")?),
            collection: row.try_get("collection")?,
            body,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A bind parameter produced while rendering a [`Filter`].
#[derive(Debug, Clone, PartialEq)]
enum Param {
    Text(String),
    Float(f64),
    Json(serde_json::Value),
}

/// Renders filters into a SQL predicate over the `body` column.
///
/// Field names are bound as parameters like values, so nothing from the
/// filter is ever spliced into the statement text.
struct SqlPredicate {
    params: Vec<Param>,
    offset: usize,
}

impl SqlPredicate {
    /// Starts numbering placeholders after `offset` already-bound parameters.
    fn new(offset: usize) -> Self {
        Self {
            params: Vec::new(),
            offset,
        }
    }

    fn bind(&mut self, param: Param) -> String {
        self.params.push(param);
        format!("${}", self.offset + self.params.len())
    }

    fn render(mut self, filter: &Filter) -> (String, Vec<Param>) {
        let sql = self.push(filter);
        (sql, self.params)
    }

    fn push(&mut self, filter: &Filter) -> String {
        match filter {
            Filter::All => "TRUE".to_string(),
            Filter::Eq { field, value } => {
                let f = self.bind(Param::Text(field.clone()));
                let v = self.bind(Param::Json(value.clone()));
                format!("(body -> {f}) = {v}")
            }
            Filter::EqIgnoreCase { field, value } => {
                let f = self.bind(Param::Text(field.clone()));
                let v = self.bind(Param::Text(value.clone()));
                format!(
                    "(CASE WHEN jsonb_typeof(body -> {f}) = 'string' \
                     THEN lower(body ->> {f}) = lower({v}) ELSE FALSE END)"
                )
            }
            Filter::ContainsIgnoreCase { field, value } => {
                let f = self.bind(Param::Text(field.clone()));
                let v = self.bind(Param::Text(value.clone()));
                format!(
                    "(CASE WHEN jsonb_typeof(body -> {f}) = 'string' \
                     THEN strpos(lower(body ->> {f}), lower({v})) > 0 ELSE FALSE END)"
                )
            }
            Filter::Gte { field, value } => self.push_numeric(field, ">=", *value),
            Filter::Lte { field, value } => self.push_numeric(field, "<=", *value),
            Filter::And(filters) => self.push_group(filters, " AND ", "TRUE"),
            Filter::Or(filters) => self.push_group(filters, " OR ", "FALSE"),
        }
    }

    fn push_numeric(&mut self, field: &str, op: &str, value: f64) -> String {
        let f = self.bind(Param::Text(field.to_string()));
        let v = self.bind(Param::Float(value));
        format!(
            "(CASE WHEN jsonb_typeof(body -> {f}) = 'number' \
             THEN (body ->> {f})::double precision {op} {v} ELSE FALSE END)"
        )
    }

    fn push_group(&mut self, filters: &[Filter], joiner: &str, empty: &str) -> String {
        if filters.is_empty() {
            return empty.to_string();
        }
        let parts: Vec<String> = filters.iter().map(|f| self.push(f)).collect();
        format!("({})", parts.join(joiner))
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(&self, collection: &str, body: DocumentBody) -> Result<DocumentId> {
        validate_document_for_insert(collection, &body)?;

        let id = DocumentId::new();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(collection)
        .bind(Json(serde_json::Value::Object(body)))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>> {
        // $1 is the collection name
        let (predicate, params) = SqlPredicate::new(1).render(filter);

        let mut sql = format!(
            "SELECT id, collection, body, created_at FROM documents \
             WHERE collection = $1 AND {predicate} ORDER BY seq ASC"
        );
        if options.limit.is_some() {
            sql.push_str(&format!(" LIMIT ${}", params.len() + 2));
        }

        let mut query = sqlx::query(&sql).bind(collection);
        for param in params {
            query = match param {
                Param::Text(text) => query.bind(text),
                Param::Float(value) => query.bind(value),
                Param::Json(value) => query.bind(Json(value)),
            };
        }
        if let Some(limit) = options.limit {
            query = query.bind(limit as i64);
        }

        tracing::debug!(%collection, %sql, "running document query");
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_document).collect()
    }

    async fn find_by_id(&self, collection: &str, id: DocumentId) -> Result<Option<Document>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, collection, body, created_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_document).transpose()
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }
}
