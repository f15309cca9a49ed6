//! The caller-facing dual-write result and its aggregator.
//!
//! A `DualStorageResult` is built exactly once per coordinator call and
//! never mutated afterward. The aggregator owns the latency clock: it is
//! started at coordinator entry and stamps elapsed wall time on every exit
//! path, including early validation failure.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use plotline_core::error::WriteError;
use plotline_core::item::ContentType;
use plotline_core::outcome::WriteOutcome;

/// The secondary store's outcome, extended with the per-type table flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryWriteOutcome {
    /// The underlying write outcome.
    #[serde(flatten)]
    pub outcome: WriteOutcome,
    /// One entry per content type; at most one is true, and it matches the
    /// item's type whenever the secondary save succeeded.
    pub tables: BTreeMap<ContentType, bool>,
}

/// The coordinator's verdict for one dual-write attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualStorageResult {
    /// True iff both stores saved.
    pub success: bool,
    /// Outcome of the system-of-record write (or of the undo, after a
    /// rollback).
    pub primary_result: WriteOutcome,
    /// Outcome of the per-type secondary write.
    pub secondary_result: SecondaryWriteOutcome,
    /// Whether a rollback of the primary write was performed.
    pub rollback_executed: bool,
    /// Elapsed wall time from coordinator entry to this result.
    pub latency_ms: u64,
}

fn table_flags(saved: Option<ContentType>) -> BTreeMap<ContentType, bool> {
    ContentType::ALL
        .iter()
        .map(|ty| (*ty, Some(*ty) == saved))
        .collect()
}

/// Assembles the `DualStorageResult` for each terminal coordinator state.
#[derive(Debug)]
pub struct ResultAggregator {
    started: Instant,
}

impl ResultAggregator {
    /// Start the latency clock. Call at coordinator entry.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn latency_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Validation failed; no store was touched. The enumerated missing
    /// fields ride on the primary outcome, the first write that would have
    /// been attempted.
    #[must_use]
    pub fn validation_failure(self, missing: Vec<String>) -> DualStorageResult {
        DualStorageResult {
            success: false,
            primary_result: WriteOutcome::failed(WriteError::Validation { missing }),
            secondary_result: SecondaryWriteOutcome {
                outcome: WriteOutcome::not_attempted(),
                tables: table_flags(None),
            },
            rollback_executed: false,
            latency_ms: self.latency_ms(),
        }
    }

    /// The primary write failed; the secondary write was never attempted
    /// and there is nothing to roll back.
    #[must_use]
    pub fn primary_failure(self, primary: WriteOutcome) -> DualStorageResult {
        DualStorageResult {
            success: false,
            primary_result: primary,
            secondary_result: SecondaryWriteOutcome {
                outcome: WriteOutcome::not_attempted(),
                tables: table_flags(None),
            },
            rollback_executed: false,
            latency_ms: self.latency_ms(),
        }
    }

    /// Both writes landed.
    #[must_use]
    pub fn success(
        self,
        primary: WriteOutcome,
        secondary: WriteOutcome,
        content_type: ContentType,
    ) -> DualStorageResult {
        DualStorageResult {
            success: true,
            primary_result: primary,
            secondary_result: SecondaryWriteOutcome {
                outcome: secondary,
                tables: table_flags(Some(content_type)),
            },
            rollback_executed: false,
            latency_ms: self.latency_ms(),
        }
    }

    /// Secondary failed under BEST_EFFORT: the primary write stays in
    /// place and the divergence is reported, not hidden.
    #[must_use]
    pub fn degraded_partial(
        self,
        primary: WriteOutcome,
        secondary: WriteOutcome,
    ) -> DualStorageResult {
        DualStorageResult {
            success: false,
            primary_result: primary,
            secondary_result: SecondaryWriteOutcome {
                outcome: secondary,
                tables: table_flags(None),
            },
            rollback_executed: false,
            latency_ms: self.latency_ms(),
        }
    }

    /// Secondary failed under REQUIRED and the undo succeeded: the primary
    /// result reflects the undone state.
    #[must_use]
    pub fn rolled_back(self, undo: WriteOutcome, secondary: WriteOutcome) -> DualStorageResult {
        DualStorageResult {
            success: false,
            primary_result: WriteOutcome {
                saved: false,
                id: undo.id,
                error: undo.error,
            },
            secondary_result: SecondaryWriteOutcome {
                outcome: secondary,
                tables: table_flags(None),
            },
            rollback_executed: true,
            latency_ms: self.latency_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secondary_error() -> WriteOutcome {
        WriteOutcome::failed(WriteError::PermissionDenied {
            message: "api key lacks write scope".to_owned(),
        })
    }

    #[test]
    fn test_success_sets_exactly_one_table_flag() {
        let result = ResultAggregator::start().success(
            WriteOutcome::ok("s1"),
            WriteOutcome::ok("s1"),
            ContentType::Scenario,
        );

        assert!(result.success);
        assert!(!result.rollback_executed);
        assert_eq!(result.secondary_result.tables.len(), 4);
        let set: Vec<_> = result
            .secondary_result
            .tables
            .iter()
            .filter(|(_, saved)| **saved)
            .map(|(ty, _)| *ty)
            .collect();
        assert_eq!(set, vec![ContentType::Scenario]);
    }

    #[test]
    fn test_validation_failure_reports_missing_fields_and_no_tables() {
        let result = ResultAggregator::start()
            .validation_failure(vec!["title".to_owned(), "story".to_owned()]);

        assert!(!result.success);
        assert!(!result.rollback_executed);
        assert!(result.secondary_result.tables.values().all(|saved| !saved));
        match result.primary_result.error {
            Some(WriteError::Validation { missing }) => {
                assert_eq!(missing, vec!["title".to_owned(), "story".to_owned()]);
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_degraded_partial_keeps_primary_outcome() {
        let result =
            ResultAggregator::start().degraded_partial(WriteOutcome::ok("s1"), secondary_error());

        assert!(!result.success);
        assert!(!result.rollback_executed);
        assert!(result.primary_result.saved);
        assert!(!result.secondary_result.outcome.saved);
        assert!(result.secondary_result.outcome.error.is_some());
    }

    #[test]
    fn test_rolled_back_reflects_undone_primary() {
        let result = ResultAggregator::start().rolled_back(WriteOutcome::ok("s1"), secondary_error());

        assert!(!result.success);
        assert!(result.rollback_executed);
        assert!(!result.primary_result.saved);
        assert_eq!(result.primary_result.id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_result_json_shape() {
        let result = ResultAggregator::start().success(
            WriteOutcome::ok("p1"),
            WriteOutcome::ok("p1"),
            ContentType::Prompt,
        );

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["secondary_result"]["saved"], true);
        assert_eq!(json["secondary_result"]["tables"]["prompt"], true);
        assert_eq!(json["secondary_result"]["tables"]["scenario"], false);
        assert!(json["latency_ms"].is_u64());
    }
}
