//! Per-store write outcomes.

use serde::{Deserialize, Serialize};

use crate::error::WriteError;

/// The result of one write attempt against one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    /// Whether the store accepted the write.
    pub saved: bool,
    /// The stored record id, when the write succeeded.
    pub id: Option<String>,
    /// The store-reported reason, when it did not.
    pub error: Option<WriteError>,
}

impl WriteOutcome {
    /// A successful write of the given record id.
    #[must_use]
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            saved: true,
            id: Some(id.into()),
            error: None,
        }
    }

    /// A rejected write with the store's reason.
    #[must_use]
    pub fn failed(error: WriteError) -> Self {
        Self {
            saved: false,
            id: None,
            error: Some(error),
        }
    }

    /// A write that was never attempted (an earlier phase failed first).
    #[must_use]
    pub fn not_attempted() -> Self {
        Self {
            saved: false,
            id: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_outcome_carries_id_and_no_error() {
        let outcome = WriteOutcome::ok("s1");

        assert!(outcome.saved);
        assert_eq!(outcome.id.as_deref(), Some("s1"));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_failed_outcome_carries_error() {
        let outcome = WriteOutcome::failed(WriteError::Unavailable {
            message: "connection refused".to_owned(),
        });

        assert!(!outcome.saved);
        assert!(outcome.id.is_none());
        assert_eq!(outcome.error.unwrap().code(), "unavailable");
    }
}
