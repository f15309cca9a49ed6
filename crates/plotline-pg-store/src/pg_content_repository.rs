//! PostgreSQL implementation of the `ContentRepository` trait.
//!
//! Destination table names come from the closed router mapping and contain
//! dashes, so they are interpolated as quoted identifiers. The identifier
//! check guards against anything else reaching the SQL.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use plotline_core::error::WriteError;
use plotline_core::store::{ContentRepository, HealthStatus, StorageHealth};

use crate::map_store_error;

/// Per-content-type query store backed by one table per destination.
#[derive(Debug, Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    /// Creates a new `PgContentRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn check_table(table: &str) -> Result<(), WriteError> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(WriteError::Constraint {
            message: format!("invalid destination table name: {table}"),
        })
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn save(
        &self,
        table: &str,
        id: &str,
        user_id: Uuid,
        record: &serde_json::Value,
    ) -> Result<String, WriteError> {
        check_table(table)?;
        sqlx::query(&format!(
            r#"INSERT INTO "{table}" (item_id, user_id, record)
               VALUES ($1, $2, $3)
               ON CONFLICT (item_id) DO UPDATE SET
                   user_id  = EXCLUDED.user_id,
                   record   = EXCLUDED.record,
                   saved_at = NOW()"#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(record)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            tracing::warn!(table, item_id = %id, error = %err, "secondary save failed");
            map_store_error(&err)
        })?;

        Ok(id.to_owned())
    }

    async fn find_by_id(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, WriteError> {
        check_table(table)?;
        let row = sqlx::query(&format!(
            r#"SELECT record FROM "{table}" WHERE item_id = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_store_error(&err))?;

        row.map(|row| row.try_get("record").map_err(|err| map_store_error(&err)))
            .transpose()
    }

    async fn find_by_user_id(
        &self,
        table: &str,
        user_id: Uuid,
    ) -> Result<Vec<serde_json::Value>, WriteError> {
        check_table(table)?;
        let rows = sqlx::query(&format!(
            r#"SELECT record FROM "{table}" WHERE user_id = $1 ORDER BY saved_at"#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_store_error(&err))?;

        rows.into_iter()
            .map(|row| row.try_get("record").map_err(|err| map_store_error(&err)))
            .collect()
    }

    async fn update(
        &self,
        table: &str,
        id: &str,
        record: &serde_json::Value,
    ) -> Result<(), WriteError> {
        check_table(table)?;
        let result = sqlx::query(&format!(
            r#"UPDATE "{table}" SET record = $2, saved_at = NOW() WHERE item_id = $1"#
        ))
        .bind(id)
        .bind(record)
        .execute(&self.pool)
        .await
        .map_err(|err| map_store_error(&err))?;

        if result.rows_affected() == 0 {
            return Err(WriteError::Constraint {
                message: format!("no record {id} in {table}"),
            });
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), WriteError> {
        check_table(table)?;
        sqlx::query(&format!(r#"DELETE FROM "{table}" WHERE item_id = $1"#))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| map_store_error(&err))?;
        Ok(())
    }

    async fn storage_health(&self) -> StorageHealth {
        let started = Instant::now();
        let probe = sqlx::query("SELECT 1").execute(&self.pool).await;
        let response_time_ms =
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match probe {
            Ok(_) => StorageHealth {
                status: HealthStatus::Healthy,
                response_time_ms,
                is_connected: true,
            },
            Err(err) => {
                tracing::warn!(error = %err, "secondary storage health probe failed");
                StorageHealth {
                    status: HealthStatus::Unhealthy,
                    response_time_ms,
                    is_connected: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_table_accepts_routed_destinations() {
        for table in ["scenario-table", "prompt-table", "video-asset-table", "story-table"] {
            assert!(check_table(table).is_ok());
        }
    }

    #[test]
    fn test_check_table_rejects_sql_metacharacters() {
        for table in ["", "a\"b", "t; DROP TABLE x", "sp ace"] {
            assert!(check_table(table).is_err(), "{table:?} should be rejected");
        }
    }
}
