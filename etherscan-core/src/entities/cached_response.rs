use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;

/// A stored API response body.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CachedResponse {
    pub key: String,
    pub body: Vec<u8>,
    /// Unix time in milliseconds.
    pub stored_at: i64,
}

/// Create the `responses` table if it does not exist.
#[derive(Debug, Clone, Copy)]
pub struct CreateResponsesTable;

impl Processor<CreateResponsesTable> for DatabaseProcessor {
    type Output = ();
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CreateResponsesTable")]
    async fn process(&self, _query: CreateResponsesTable) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS responses (
                key TEXT PRIMARY KEY NOT NULL,
                body BLOB NOT NULL,
                stored_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GetCachedResponse {
    pub key: String,
}

impl Processor<GetCachedResponse> for DatabaseProcessor {
    type Output = Option<CachedResponse>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetCachedResponse")]
    async fn process(&self, query: GetCachedResponse) -> Result<Option<CachedResponse>, sqlx::Error> {
        sqlx::query_as::<_, CachedResponse>(
            r#"
            SELECT key, body, stored_at
            FROM responses
            WHERE key = ?
            "#,
        )
        .bind(query.key)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Insert a response, replacing any older body stored under the same key.
#[derive(Debug, Clone)]
pub struct UpsertCachedResponse {
    pub key: String,
    pub body: Vec<u8>,
    pub stored_at: i64,
}

impl Processor<UpsertCachedResponse> for DatabaseProcessor {
    type Output = ();
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpsertCachedResponse")]
    async fn process(&self, insert: UpsertCachedResponse) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO responses (key, body, stored_at)
            VALUES (?, ?, ?)
            ON CONFLICT (key) DO UPDATE SET
                body = excluded.body,
                stored_at = excluded.stored_at
            "#,
        )
        .bind(insert.key)
        .bind(insert.body)
        .bind(insert.stored_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCachedResponse {
    pub key: String,
}

impl Processor<DeleteCachedResponse> for DatabaseProcessor {
    type Output = ();
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteCachedResponse")]
    async fn process(&self, query: DeleteCachedResponse) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM responses WHERE key = ?")
            .bind(query.key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Delete every response stored before `stored_before` (Unix ms).
/// Returns the number of rows removed.
#[derive(Debug, Clone, Copy)]
pub struct DeleteExpiredResponses {
    pub stored_before: i64,
}

impl Processor<DeleteExpiredResponses> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteExpiredResponses")]
    async fn process(&self, query: DeleteExpiredResponses) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM responses WHERE stored_at < ?")
            .bind(query.stored_before)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClearCachedResponses;

impl Processor<ClearCachedResponses> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ClearCachedResponses")]
    async fn process(&self, _query: ClearCachedResponses) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM responses").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
