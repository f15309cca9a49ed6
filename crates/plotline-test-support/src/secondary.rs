//! In-memory `ContentRepository` mock that records per-table saves.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use plotline_core::error::WriteError;
use plotline_core::store::{ContentRepository, HealthStatus, StorageHealth};
use uuid::Uuid;

/// A content repository backed by a `HashMap` keyed on (table, item id).
/// Saves can be configured to fail; clearing the failure afterwards lets
/// tests replay the retry-after-partial path.
#[derive(Debug, Default)]
pub struct MemoryContentRepository {
    records: Mutex<HashMap<(String, String), (Uuid, serde_json::Value)>>,
    save_calls: Mutex<u32>,
    save_error: Mutex<Option<WriteError>>,
    latency: Mutex<Option<Duration>>,
}

impl MemoryContentRepository {
    /// An empty repository where every operation succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose `save` always fails with the given error.
    #[must_use]
    pub fn with_save_error(error: WriteError) -> Self {
        let repo = Self::default();
        *repo.save_error.lock().unwrap() = Some(error);
        repo
    }

    /// Clear any configured save failure so later saves succeed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn heal(&self) {
        *self.save_error.lock().unwrap() = None;
    }

    /// Make every `save` sleep for `delay` before completing, simulating
    /// database round-trip time.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set_latency(&self, delay: Duration) {
        *self.latency.lock().unwrap() = Some(delay);
    }

    /// Snapshot of the record stored in `table` under `id`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn record(&self, table: &str, id: &str) -> Option<serde_json::Value> {
        self.records
            .lock()
            .unwrap()
            .get(&(table.to_owned(), id.to_owned()))
            .map(|(_, record)| record.clone())
    }

    /// Number of records currently stored in `table`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn table_len(&self, table: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .keys()
            .filter(|(t, _)| t == table)
            .count()
    }

    /// How many times `save` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn save_count(&self) -> u32 {
        *self.save_calls.lock().unwrap()
    }
}

#[async_trait]
impl ContentRepository for MemoryContentRepository {
    async fn save(
        &self,
        table: &str,
        id: &str,
        user_id: Uuid,
        record: &serde_json::Value,
    ) -> Result<String, WriteError> {
        *self.save_calls.lock().unwrap() += 1;
        let delay = *self.latency.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.save_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.records
            .lock()
            .unwrap()
            .insert((table.to_owned(), id.to_owned()), (user_id, record.clone()));
        Ok(id.to_owned())
    }

    async fn find_by_id(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, WriteError> {
        Ok(self.record(table, id))
    }

    async fn find_by_user_id(
        &self,
        table: &str,
        user_id: Uuid,
    ) -> Result<Vec<serde_json::Value>, WriteError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|((t, _), (owner, _))| t == table && *owner == user_id)
            .map(|(_, (_, record))| record.clone())
            .collect())
    }

    async fn update(
        &self,
        table: &str,
        id: &str,
        record: &serde_json::Value,
    ) -> Result<(), WriteError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&(table.to_owned(), id.to_owned())) {
            Some((_, stored)) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(WriteError::Constraint {
                message: format!("no record {id} in {table}"),
            }),
        }
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), WriteError> {
        self.records
            .lock()
            .unwrap()
            .remove(&(table.to_owned(), id.to_owned()));
        Ok(())
    }

    async fn storage_health(&self) -> StorageHealth {
        StorageHealth {
            status: HealthStatus::Healthy,
            response_time_ms: 0,
            is_connected: true,
        }
    }
}
