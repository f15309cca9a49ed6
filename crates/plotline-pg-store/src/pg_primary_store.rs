//! PostgreSQL implementation of the `PrimaryStore` trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use plotline_core::error::WriteError;
use plotline_core::item::{ContentItem, ContentPayload};
use plotline_core::outcome::WriteOutcome;
use plotline_core::store::PrimaryStore;

use crate::map_store_error;

/// System-of-record store backed by the `content_items` table.
#[derive(Debug, Clone)]
pub struct PgPrimaryStore {
    pool: PgPool,
}

impl PgPrimaryStore {
    /// Creates a new `PgPrimaryStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrimaryStore for PgPrimaryStore {
    async fn upsert(&self, item: &ContentItem) -> WriteOutcome {
        // Serialization of derived Serialize types to Value is infallible.
        let payload = serde_json::to_value(&item.payload)
            .expect("ContentPayload serialization is infallible");

        let result = sqlx::query(
            r"INSERT INTO content_items (id, content_type, project_id, source, user_id, created_at, payload)
              VALUES ($1, $2, $3, $4, $5, $6, $7)
              ON CONFLICT (id) DO UPDATE SET
                  content_type = EXCLUDED.content_type,
                  project_id   = EXCLUDED.project_id,
                  source       = EXCLUDED.source,
                  user_id      = EXCLUDED.user_id,
                  created_at   = EXCLUDED.created_at,
                  payload      = EXCLUDED.payload",
        )
        .bind(&item.id)
        .bind(item.content_type().as_str())
        .bind(item.project_id)
        .bind(&item.source)
        .bind(item.user_id)
        .bind(item.created_at)
        .bind(payload)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => WriteOutcome::ok(item.id.clone()),
            Err(err) => {
                tracing::warn!(item_id = %item.id, error = %err, "primary upsert failed");
                WriteOutcome::failed(map_store_error(&err))
            }
        }
    }

    async fn undo(&self, id: &str) -> WriteOutcome {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => WriteOutcome::ok(id),
            Err(err) => {
                tracing::error!(item_id = %id, error = %err, "primary undo failed");
                WriteOutcome::failed(map_store_error(&err))
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ContentItem>, WriteError> {
        let row = sqlx::query(
            r"SELECT id, project_id, source, user_id, created_at, payload
              FROM content_items
              WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_store_error(&err))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: serde_json::Value =
            row.try_get("payload").map_err(|err| map_store_error(&err))?;
        let payload: ContentPayload =
            serde_json::from_value(payload).map_err(|err| WriteError::Unavailable {
                message: format!("stored payload failed to deserialize: {err}"),
            })?;

        Ok(Some(ContentItem {
            id: row.try_get("id").map_err(|err| map_store_error(&err))?,
            project_id: row
                .try_get("project_id")
                .map_err(|err| map_store_error(&err))?,
            source: row.try_get("source").map_err(|err| map_store_error(&err))?,
            created_at: row
                .try_get("created_at")
                .map_err(|err| map_store_error(&err))?,
            user_id: row
                .try_get("user_id")
                .map_err(|err| map_store_error(&err))?,
            payload,
        }))
    }
}
