//! PostgreSQL implementations of the Plotline store traits.
//!
//! Two independent stores, usually two independent databases: the
//! system-of-record `content_items` table behind [`PgPrimaryStore`], and the
//! per-content-type query tables behind [`PgContentRepository`].

pub mod pg_content_repository;
pub mod pg_primary_store;
pub mod schema;

pub use pg_content_repository::PgContentRepository;
pub use pg_primary_store::PgPrimaryStore;

use plotline_core::error::WriteError;

/// Translate a sqlx error into the structured write-error taxonomy so the
/// coordinator can act on it as data.
pub(crate) fn map_store_error(err: &sqlx::Error) -> WriteError {
    match err {
        sqlx::Error::PoolTimedOut => WriteError::Timeout {
            message: "connection pool timed out".to_owned(),
        },
        sqlx::Error::Database(db) => {
            let code = db.code().unwrap_or_default();
            if code == "42501" {
                WriteError::PermissionDenied {
                    message: db.message().to_owned(),
                }
            } else if code == "23502" {
                WriteError::MissingField {
                    field: db.message().to_owned(),
                }
            } else if code.starts_with("23") {
                WriteError::Constraint {
                    message: db.message().to_owned(),
                }
            } else {
                WriteError::Unavailable {
                    message: db.message().to_owned(),
                }
            }
        }
        other => WriteError::Unavailable {
            message: other.to_string(),
        },
    }
}
