//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use plotline_dualstore::{DualStoreConfig, DualStoreCoordinator, PolicyResolver};
use plotline_pg_store::{PgContentRepository, PgPrimaryStore};
use sqlx::PgPool;
use tower::ServiceExt;

use plotline_api::routes;
use plotline_api::state::AppState;

/// Build the full app router over real Postgres stores with the REQUIRED
/// consistency policy. Uses the same route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_policy(pool, true)
}

/// Build the full app router with an explicit strict-consistency flag.
pub fn build_test_app_with_policy(pool: PgPool, strict_consistency: bool) -> Router {
    let coordinator = DualStoreCoordinator::new(
        Arc::new(PgPrimaryStore::new(pool.clone())),
        Arc::new(PgContentRepository::new(pool)),
        PolicyResolver::new(DualStoreConfig { strict_consistency }),
    );
    let app_state = AppState::new(coordinator);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/content", routes::content::router())
        .with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
