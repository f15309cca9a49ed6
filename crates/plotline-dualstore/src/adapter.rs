//! Secondary store adapter.
//!
//! Wraps the repository abstraction and folds its `Result` into a
//! [`WriteOutcome`], so store-level failures reach the coordinator as
//! inspectable data rather than control flow.

use std::sync::Arc;

use uuid::Uuid;

use plotline_core::outcome::WriteOutcome;
use plotline_core::store::{ContentRepository, StorageHealth};

/// Adapter over the per-type secondary store.
#[derive(Clone)]
pub struct SecondaryStoreAdapter {
    repository: Arc<dyn ContentRepository>,
}

impl SecondaryStoreAdapter {
    /// Wrap an already-configured repository client.
    #[must_use]
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Insert an already-transformed record into the routed destination.
    pub async fn insert(
        &self,
        destination: &str,
        id: &str,
        user_id: Uuid,
        record: &serde_json::Value,
    ) -> WriteOutcome {
        match self.repository.save(destination, id, user_id, record).await {
            Ok(stored_id) => WriteOutcome::ok(stored_id),
            Err(error) => WriteOutcome::failed(error),
        }
    }

    /// Out-of-band health probe, surfaced for health endpoints. Never used
    /// during a write.
    pub async fn storage_health(&self) -> StorageHealth {
        self.repository.storage_health().await
    }
}
