//! Write error taxonomy.
//!
//! A `WriteError` is data, not a control-flow exception: it travels inside a
//! [`WriteOutcome`](crate::outcome::WriteOutcome) so callers can see which
//! half of a dual write failed and why. Nothing in this taxonomy is meant to
//! be thrown past the coordinator boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured reason a write was rejected or skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum WriteError {
    /// One or more required fields were missing for the declared content
    /// type. Detected before any store I/O; enumerates every missing field.
    #[error("missing required fields: {}", missing.join(", "))]
    Validation {
        /// All missing field names, not just the first.
        missing: Vec<String>,
    },

    /// The store rejected the write for authorization reasons.
    #[error("permission denied: {message}")]
    PermissionDenied {
        /// Store-reported reason.
        message: String,
    },

    /// The store rejected the write because a column/attribute was absent.
    #[error("store rejected record, missing field: {field}")]
    MissingField {
        /// The field the store complained about.
        field: String,
    },

    /// A constraint (uniqueness, foreign key, check) was violated.
    #[error("constraint violation: {message}")]
    Constraint {
        /// Store-reported reason.
        message: String,
    },

    /// The store client timed out. Adapter timeouts surface here rather
    /// than hanging the coordinator.
    #[error("store timeout: {message}")]
    Timeout {
        /// Store-reported reason.
        message: String,
    },

    /// The store was unreachable or otherwise failed transiently.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Store-reported reason.
        message: String,
    },
}

impl WriteError {
    /// Stable machine-readable code for this error, matching the serialized
    /// `code` tag.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::MissingField { .. } => "missing_field",
            Self::Constraint { .. } => "constraint",
            Self::Timeout { .. } => "timeout",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_enumerates_all_fields() {
        let err = WriteError::Validation {
            missing: vec!["title".to_owned(), "story".to_owned()],
        };

        assert_eq!(err.to_string(), "missing required fields: title, story");
    }

    #[test]
    fn test_serialized_form_carries_code_tag() {
        let err = WriteError::PermissionDenied {
            message: "api key lacks write scope".to_owned(),
        };

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "permission_denied");
        assert_eq!(json["message"], "api key lacks write scope");
    }

    #[test]
    fn test_code_matches_serde_tag() {
        let err = WriteError::Timeout {
            message: "deadline exceeded".to_owned(),
        };

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], err.code());
    }
}
