//! Integration tests for the content persistence endpoint.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

fn scenario_body(id: &str, user_id: Uuid) -> serde_json::Value {
    serde_json::json!({
        "user": { "id": user_id },
        "item": {
            "id": id,
            "project_id": Uuid::new_v4(),
            "source": "wizard",
            "created_at": "2026-03-01T12:00:00Z",
            "user_id": user_id,
            "type": "scenario",
            "title": "The Lighthouse",
            "story": "A keeper discovers the lamp has been lit from the inside."
        }
    })
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_scenario_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user_id = Uuid::new_v4();

    let (status, json) = common::post_json(app, "/api/v1/content", &scenario_body("s1", user_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["rollback_executed"], false);
    assert_eq!(json["primary_result"]["saved"], true);
    assert_eq!(json["secondary_result"]["saved"], true);
    assert_eq!(json["secondary_result"]["tables"]["scenario"], true);
    assert_eq!(json["secondary_result"]["tables"]["prompt"], false);
    assert!(json["latency_ms"].is_u64());

    // Both stores hold exactly one copy.
    let primary_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    let secondary_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "scenario-table""#)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(primary_count, 1);
    assert_eq!(secondary_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_twice_is_idempotent(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let body = scenario_body("s1", user_id);

    let app = common::build_test_app(pool.clone());
    let (status, _) = common::post_json(app, "/api/v1/content", &body).await;
    assert_eq!(status, StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let (status, json) = common::post_json(app, "/api/v1/content", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let primary_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(primary_count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_required_field_returns_422_without_writes(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user_id = Uuid::new_v4();
    let body = serde_json::json!({
        "user": { "id": user_id },
        "item": {
            "id": "p1",
            "project_id": Uuid::new_v4(),
            "source": "wizard",
            "created_at": "2026-03-01T12:00:00Z",
            "user_id": user_id,
            "type": "prompt",
            "template": "   "
        }
    });

    let (status, json) = common::post_json(app, "/api/v1/content", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["success"], false);
    assert_eq!(json["primary_result"]["error"]["code"], "validation");
    assert_eq!(
        json["primary_result"]["error"]["missing"],
        serde_json::json!(["template"])
    );

    let primary_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(primary_count, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_content_type_is_rejected_at_the_boundary(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user_id = Uuid::new_v4();
    let body = serde_json::json!({
        "user": { "id": user_id },
        "item": {
            "id": "x1",
            "project_id": Uuid::new_v4(),
            "source": "wizard",
            "created_at": "2026-03-01T12:00:00Z",
            "user_id": user_id,
            "type": "podcast",
            "title": "nope"
        }
    });

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/content")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    // The closed tagged union fails deserialization before the coordinator
    // runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_each_type_lands_in_its_own_table(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let items = [
        serde_json::json!({
            "id": "v1", "type": "video",
            "provider": "lumen", "media_url": "https://cdn.example/v1.mp4"
        }),
        serde_json::json!({
            "id": "st1", "type": "story",
            "text": "Once, a keeper rowed out to a lighthouse that was already lit."
        }),
    ];

    for mut item in items {
        item["project_id"] = serde_json::json!(Uuid::new_v4());
        item["source"] = "wizard".into();
        item["created_at"] = "2026-03-01T12:00:00Z".into();
        item["user_id"] = serde_json::json!(user_id);
        let body = serde_json::json!({ "user": { "id": user_id }, "item": item });

        let app = common::build_test_app(pool.clone());
        let (status, json) = common::post_json(app, "/api/v1/content", &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
    }

    let video_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "video-asset-table""#)
        .fetch_one(&pool)
        .await
        .unwrap();
    let story_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "story-table""#)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(video_count, 1);
    assert_eq!(story_count, 1);
}
