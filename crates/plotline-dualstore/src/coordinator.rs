//! The dual-store write coordinator.
//!
//! Orchestrates one self-contained write attempt:
//! validate → primary upsert → secondary insert → policy-driven resolution.
//! The primary write always happens-before the secondary write so rollback
//! has a well-defined target; the policy is re-resolved on every call.

use std::sync::Arc;

use thiserror::Error;

use plotline_core::error::WriteError;
use plotline_core::item::{ContentItem, UserRef};
use plotline_core::store::{ContentRepository, PrimaryStore};

use crate::adapter::SecondaryStoreAdapter;
use crate::policy::{ConsistencyPolicy, PolicyResolver};
use crate::result::{DualStorageResult, ResultAggregator};
use crate::router;

/// The only condition that escapes the coordinator as an error: a
/// REQUIRED-policy rollback whose undo itself failed. Primary and secondary
/// now disagree and no automatic remedy exists, so this demands operator
/// attention.
#[derive(Debug, Error)]
pub enum DualStoreError {
    /// Undo of the primary write failed after a secondary store rejection.
    #[error("rollback failed for item {id}: primary and secondary stores have diverged")]
    RollbackFailed {
        /// The item whose stores diverged.
        id: String,
        /// Why the undo failed.
        undo_error: Option<WriteError>,
        /// Why the secondary write failed in the first place.
        secondary_error: Option<WriteError>,
    },
}

/// Coordinates dual writes against injected store clients. Holds no
/// per-call state; concurrent calls for different items are fully
/// parallel-safe.
#[derive(Clone)]
pub struct DualStoreCoordinator {
    primary: Arc<dyn PrimaryStore>,
    secondary: SecondaryStoreAdapter,
    resolver: PolicyResolver,
}

impl DualStoreCoordinator {
    /// Create a coordinator over already-configured store clients. The
    /// caller owns their process-wide lifecycle and reuses the coordinator
    /// across calls.
    #[must_use]
    pub fn new(
        primary: Arc<dyn PrimaryStore>,
        secondary: Arc<dyn ContentRepository>,
        resolver: PolicyResolver,
    ) -> Self {
        Self {
            primary,
            secondary: SecondaryStoreAdapter::new(secondary),
            resolver,
        }
    }

    /// Access to the secondary adapter, for out-of-band health probes.
    #[must_use]
    pub fn secondary(&self) -> &SecondaryStoreAdapter {
        &self.secondary
    }

    /// Persist one content item into both stores and report an honest,
    /// per-store verdict.
    ///
    /// Validation failures and store failures are returned inside the
    /// [`DualStorageResult`], never as `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`DualStoreError::RollbackFailed`] only when a
    /// REQUIRED-policy rollback could not undo the primary write.
    pub async fn save_dual_storage(
        &self,
        item: &ContentItem,
        user: &UserRef,
    ) -> Result<DualStorageResult, DualStoreError> {
        let aggregator = ResultAggregator::start();
        let content_type = item.content_type();

        tracing::debug!(
            item_id = %item.id,
            content_type = %content_type,
            user_id = %user.id,
            "dual write: validating"
        );

        let missing = router::validate(item);
        if !missing.is_empty() {
            let missing: Vec<String> = missing.iter().map(|m| m.field.to_owned()).collect();
            tracing::warn!(
                item_id = %item.id,
                content_type = %content_type,
                missing = ?missing,
                "dual write rejected before store I/O"
            );
            return Ok(aggregator.validation_failure(missing));
        }

        let primary = self.primary.upsert(item).await;
        if !primary.saved {
            tracing::warn!(
                item_id = %item.id,
                error = ?primary.error,
                "primary write failed, secondary not attempted"
            );
            return Ok(aggregator.primary_failure(primary));
        }

        let route = router::route(content_type);
        let record = router::to_record(item);
        let secondary = self
            .secondary
            .insert(route.destination, &item.id, item.user_id, &record)
            .await;

        if secondary.saved {
            tracing::debug!(
                item_id = %item.id,
                destination = route.destination,
                "dual write complete"
            );
            return Ok(aggregator.success(primary, secondary, content_type));
        }

        match self.resolver.resolve() {
            ConsistencyPolicy::BestEffort => {
                tracing::warn!(
                    item_id = %item.id,
                    destination = route.destination,
                    error = ?secondary.error,
                    "secondary write failed; retaining primary (degraded partial)"
                );
                Ok(aggregator.degraded_partial(primary, secondary))
            }
            ConsistencyPolicy::Required => {
                let undo = self.primary.undo(&item.id).await;
                if undo.saved {
                    tracing::warn!(
                        item_id = %item.id,
                        destination = route.destination,
                        error = ?secondary.error,
                        "secondary write failed; primary write rolled back"
                    );
                    Ok(aggregator.rolled_back(undo, secondary))
                } else {
                    tracing::error!(
                        item_id = %item.id,
                        undo_error = ?undo.error,
                        secondary_error = ?secondary.error,
                        "rollback failed: stores have diverged and need manual repair"
                    );
                    Err(DualStoreError::RollbackFailed {
                        id: item.id.clone(),
                        undo_error: undo.error,
                        secondary_error: secondary.error,
                    })
                }
            }
        }
    }
}
