//! In-memory `PrimaryStore` mock that records calls.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use plotline_core::error::WriteError;
use plotline_core::item::ContentItem;
use plotline_core::outcome::WriteOutcome;
use plotline_core::store::PrimaryStore;

/// A primary store backed by a `HashMap`, keyed by item id. Records upsert
/// and undo call counts and can be configured to fail either operation.
#[derive(Debug, Default)]
pub struct MemoryPrimaryStore {
    items: Mutex<HashMap<String, ContentItem>>,
    upsert_calls: Mutex<u32>,
    undo_calls: Mutex<u32>,
    upsert_error: Mutex<Option<WriteError>>,
    fail_undo: Mutex<bool>,
    latency: Mutex<Option<Duration>>,
}

impl MemoryPrimaryStore {
    /// An empty store where every operation succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `upsert` always fails with the given error.
    #[must_use]
    pub fn with_upsert_error(error: WriteError) -> Self {
        let store = Self::default();
        *store.upsert_error.lock().unwrap() = Some(error);
        store
    }

    /// Make `undo` fail from now on. Upserts still succeed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fail_undo(&self) {
        *self.fail_undo.lock().unwrap() = true;
    }

    /// Make every `upsert` sleep for `delay` before completing, simulating
    /// database round-trip time.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set_latency(&self, delay: Duration) {
        *self.latency.lock().unwrap() = Some(delay);
    }

    /// Snapshot of the item stored under `id`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn stored(&self, id: &str) -> Option<ContentItem> {
        self.items.lock().unwrap().get(id).cloned()
    }

    /// Number of items currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Whether the store holds no items.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// How many times `upsert` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn upsert_count(&self) -> u32 {
        *self.upsert_calls.lock().unwrap()
    }

    /// How many times `undo` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn undo_count(&self) -> u32 {
        *self.undo_calls.lock().unwrap()
    }
}

#[async_trait]
impl PrimaryStore for MemoryPrimaryStore {
    async fn upsert(&self, item: &ContentItem) -> WriteOutcome {
        *self.upsert_calls.lock().unwrap() += 1;
        let delay = *self.latency.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.upsert_error.lock().unwrap().clone() {
            return WriteOutcome::failed(error);
        }
        self.items
            .lock()
            .unwrap()
            .insert(item.id.clone(), item.clone());
        WriteOutcome::ok(item.id.clone())
    }

    async fn undo(&self, id: &str) -> WriteOutcome {
        *self.undo_calls.lock().unwrap() += 1;
        if *self.fail_undo.lock().unwrap() {
            return WriteOutcome::failed(WriteError::Unavailable {
                message: "undo: connection refused".to_owned(),
            });
        }
        self.items.lock().unwrap().remove(id);
        WriteOutcome::ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ContentItem>, WriteError> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }
}
