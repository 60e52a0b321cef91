//! Integration tests for preview seeding and the cache-fallback read path.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: seeding a draft preview succeeds and is readable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seed_then_read_preview() {
    let (app, _) = build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/preview",
        json!({"id": "draft-1-abc", "name": "", "pages": [[{"label": "Q1"}]]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);

    let preview = body_json(get(app, "/api/v1/forms/draft-1-abc/preview").await).await;
    assert_eq!(preview["id"], "draft-1-abc");
    assert_eq!(preview["pages"][0]["fields"][0]["name"], "q1");
}

// ---------------------------------------------------------------------------
// Test: seeding without an id is a bad request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seed_without_id_is_rejected() {
    let (app, _) = build_test_app();

    let response = post_json(app, "/api/v1/preview", json!({"name": "No Id"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_id");
}

// ---------------------------------------------------------------------------
// Test: the cache write survives a gateway outage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seed_during_outage_still_serves_the_preview() {
    let (app, gateway) = build_test_app();
    gateway.set_offline(true);

    // The gateway write fails, the cache write does not, and the endpoint
    // stays positive.
    let response = post_json(
        app.clone(),
        "/api/v1/preview",
        json!({"id": "draft-2-off", "name": "Offline Draft"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);

    let preview = body_json(get(app, "/api/v1/forms/draft-2-off/preview").await).await;
    assert_eq!(preview["name"], "Offline Draft");
}

// ---------------------------------------------------------------------------
// Test: read precedence prefers the live record, then the snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preview_falls_back_to_snapshot_when_gateway_is_down() {
    let (app, gateway) = build_test_app();

    post_json(
        app.clone(),
        "/api/v1/forms",
        json!({"id": "f1", "name": "Server Copy", "pages": [[{"label": "A"}]]}),
    )
    .await;

    gateway.set_offline(true);

    // The stored record is unreachable; the snapshot written at save time
    // is served unchanged.
    let response = get(app, "/api/v1/forms/f1/preview").await;
    assert_eq!(response.status(), StatusCode::OK);
    let preview = body_json(response).await;
    assert_eq!(preview["name"], "Server Copy");
    assert_eq!(preview["pages"][0]["fields"][0]["name"], "a");
}

// ---------------------------------------------------------------------------
// Test: both sources missing collapses to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preview_of_unknown_form_is_404() {
    let (app, gateway) = build_test_app();

    let response = get(app.clone(), "/api/v1/forms/never/preview").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Indistinguishable from the gateway being down with no snapshot.
    gateway.set_offline(true);
    let response = get(app, "/api/v1/forms/never/preview").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
