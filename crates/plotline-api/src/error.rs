//! Plotline API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use plotline_dualstore::DualStoreError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server: bad environment configuration, a
/// store that cannot be reached while building the pools or applying the
/// schema, or a socket that cannot be bound.
#[derive(Debug, Error)]
pub enum AppError {
    /// `DATABASE_URL`, `PORT`, or the host/port combination is missing or
    /// invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Pool construction or schema setup against either store failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error while serving.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DualStoreError` that implements
/// `IntoResponse`. Ordinary write failures never reach this path — they are
/// data inside the `DualStorageResult`; only a failed rollback escalates.
#[derive(Debug)]
pub struct ApiError(pub DualStoreError);

impl From<DualStoreError> for ApiError {
    fn from(err: DualStoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DualStoreError::RollbackFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "rollback_failed")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_config_error_names_the_setting() {
        let err = AppError::Config("PORT must be a valid u16: invalid digit".to_owned());

        assert_eq!(
            err.to_string(),
            "configuration error: PORT must be a valid u16: invalid digit"
        );
    }

    #[test]
    fn test_pool_errors_convert_to_database_variant() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);

        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_io_errors_convert_to_server_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");

        let err = AppError::from(io);

        assert!(matches!(err, AppError::Server(_)));
    }

    #[test]
    fn test_rollback_failed_maps_to_500() {
        let err = DualStoreError::RollbackFailed {
            id: "s1".to_owned(),
            undo_error: None,
            secondary_error: None,
        };

        let response = ApiError(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
