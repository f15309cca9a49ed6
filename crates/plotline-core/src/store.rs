//! Store abstractions for the dual-write path.
//!
//! The primary store is the relational system of record, authoritative for
//! existence and ownership of a content item. The secondary store is a
//! per-content-type destination used for specialized querying — denormalized
//! and never authoritative. Both are injected into the coordinator as
//! trait objects; process-wide lifecycle is the caller's concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WriteError;
use crate::item::ContentItem;
use crate::outcome::WriteOutcome;

/// System-of-record store, keyed by item id.
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    /// Idempotently upsert the item: calling twice with the same id and
    /// payload yields the same stored state, so retries are safe.
    async fn upsert(&self, item: &ContentItem) -> WriteOutcome;

    /// Compensating delete, used only for rollback. A failed undo must be
    /// reported in the outcome, never swallowed.
    async fn undo(&self, id: &str) -> WriteOutcome;

    /// Look up an item by id.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the store could not be queried.
    async fn find_by_id(&self, id: &str) -> Result<Option<ContentItem>, WriteError>;
}

/// Connectivity state of a store, as reported by a health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The store answered the probe.
    Healthy,
    /// The store did not answer or answered with an error.
    Unhealthy,
}

/// Result of an out-of-band storage health probe. Never consulted during a
/// write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageHealth {
    /// Probe verdict.
    pub status: HealthStatus,
    /// Round-trip time of the probe.
    pub response_time_ms: u64,
    /// Whether a connection could be established at all.
    pub is_connected: bool,
}

/// Repository abstraction the secondary store adapter is built against.
/// Records are already transformed into the destination's expected shape;
/// `table` is the routed destination name.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Save a record into the destination table, keyed by item id so that
    /// retries do not duplicate rows. Returns the stored record id.
    async fn save(
        &self,
        table: &str,
        id: &str,
        user_id: Uuid,
        record: &serde_json::Value,
    ) -> Result<String, WriteError>;

    /// Fetch one record from the destination table by item id.
    async fn find_by_id(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, WriteError>;

    /// Fetch all records in the destination table owned by a user.
    async fn find_by_user_id(
        &self,
        table: &str,
        user_id: Uuid,
    ) -> Result<Vec<serde_json::Value>, WriteError>;

    /// Replace the record stored under an item id.
    async fn update(
        &self,
        table: &str,
        id: &str,
        record: &serde_json::Value,
    ) -> Result<(), WriteError>;

    /// Delete the record stored under an item id. Deleting a missing record
    /// is not an error.
    async fn delete(&self, table: &str, id: &str) -> Result<(), WriteError>;

    /// Out-of-band health probe.
    async fn storage_health(&self) -> StorageHealth;
}
