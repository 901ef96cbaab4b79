//! PostgreSQL implementation of HandlerRepository

use async_trait::async_trait;
use sqlx::PgPool;

use gitcord::{DomainError, Handler, HandlerRepository, TemplateSet};

/// PostgreSQL implementation of HandlerRepository
pub struct PgHandlerRepository {
    pool: PgPool,
}

impl PgHandlerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct HandlerRow {
    token: String,
    discord_url: String,
    enabled: bool,
    templates: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<HandlerRow> for Handler {
    fn from(row: HandlerRow) -> Self {
        let templates: TemplateSet =
            serde_json::from_value(row.templates).unwrap_or_default();

        Self {
            id: row.token,
            templates,
            discord_url: row.discord_url,
            enabled: row.enabled,
            created: row.created_at,
        }
    }
}

#[async_trait]
impl HandlerRepository for PgHandlerRepository {
    async fn find(&self, token: &str) -> Result<Option<Handler>, DomainError> {
        let row = sqlx::query_as::<_, HandlerRow>(
            "SELECT token, discord_url, enabled, templates, created_at
             FROM handlers WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Handler::from))
    }

    async fn save(&self, handler: &Handler) -> Result<(), DomainError> {
        let templates = serde_json::to_value(&handler.templates)
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        sqlx::query(
            "INSERT INTO handlers (token, discord_url, enabled, templates, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (token) DO UPDATE
             SET discord_url = EXCLUDED.discord_url,
                 enabled = EXCLUDED.enabled,
                 templates = EXCLUDED.templates",
        )
        .bind(&handler.id)
        .bind(&handler.discord_url)
        .bind(handler.enabled)
        .bind(templates)
        .bind(handler.created)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM handlers WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
