//! Integration tests for the `/api/v1/forms` CRUD and lifecycle flows.

mod common;

use axum::http::{Method, StatusCode};
use common::{auth_token, body_json, build_test_app, delete, get, get_auth, post_json, put_json, send};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: create assigns an id and derives field names
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_id_and_derives_field_names() {
    let (app, _) = build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/forms",
        json!({
            "name": "Trip",
            "pages": [{"pageName": "Page 1", "fields": [{"type": "text", "label": "Name"}]}]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let form = body_json(response).await;
    let id = form["id"].as_str().expect("assigned id");
    assert_eq!(form["pages"][0]["fields"][0]["name"], "name");
    assert_eq!(form["published"], false);
    assert_eq!(form["userId"], "anon");

    // Read-back returns the same normalized document.
    let fetched = body_json(get(app, &format!("/api/v1/forms/{id}")).await).await;
    assert_eq!(fetched, form);
}

// ---------------------------------------------------------------------------
// Test: create without a name is rejected before persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_name_is_rejected() {
    let (app, _) = build_test_app();

    let response = post_json(app, "/api/v1/forms", json!({"name": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: legacy payloads (flat fields + isDraft) come back canonical
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_payload_is_stored_canonically() {
    let (app, _) = build_test_app();

    let response = post_json(
        app,
        "/api/v1/forms",
        json!({
            "name": "Legacy",
            "fields": [[{"label": "A"}], [{"label": "B"}, {"label": "C"}]],
            "isDraft": true
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let form = body_json(response).await;
    assert_eq!(form["published"], false);
    assert!(form.get("isDraft").is_none());
    assert_eq!(form["pages"][0]["pageName"], "Page 1");
    assert_eq!(form["pages"][1]["pageName"], "Page 2");
    assert_eq!(form["pages"][0]["fields"][0]["name"], "a");
    assert_eq!(form["pages"][1]["fields"][0]["name"], "b");
    assert_eq!(form["pages"][1]["fields"][1]["name"], "c");
}

// ---------------------------------------------------------------------------
// Test: client-supplied draft ids are kept
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_draft_id_is_kept() {
    let (app, _) = build_test_app();

    let response = post_json(
        app,
        "/api/v1/forms",
        json!({"id": "draft-1700000000000-ab12cd", "name": "Draft"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let form = body_json(response).await;
    assert_eq!(form["id"], "draft-1700000000000-ab12cd");
}

// ---------------------------------------------------------------------------
// Test: unknown form reads as 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_form_is_404() {
    let (app, _) = build_test_app();

    let response = get(app, "/api/v1/forms/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: update merges only the provided fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_merges_partial_fields() {
    let (app, _) = build_test_app();

    post_json(
        app.clone(),
        "/api/v1/forms",
        json!({"id": "f1", "name": "Before", "pages": [[{"label": "Keep Me"}]]}),
    )
    .await;

    let response = put_json(app.clone(), "/api/v1/forms/f1", json!({"name": "After"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let form = body_json(response).await;
    assert_eq!(form["name"], "After");
    // Pages were not in the patch and must be unchanged.
    assert_eq!(form["pages"][0]["fields"][0]["name"], "keep_me");
}

// ---------------------------------------------------------------------------
// Test: update of an unknown id is 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_unknown_form_is_404() {
    let (app, _) = build_test_app();

    let response = put_json(app, "/api/v1/forms/nope", json!({"name": "X"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: publish flips the flag and cannot be reverted
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_is_terminal() {
    let (app, _) = build_test_app();

    post_json(app.clone(), "/api/v1/forms", json!({"id": "f1", "name": "X"})).await;

    let response = send(
        app.clone(),
        Method::POST,
        "/api/v1/forms/f1/publish",
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["published"], true);

    // An update that tries to clear the flag is rejected by the store.
    let response = put_json(app.clone(), "/api/v1/forms/f1", json!({"published": false})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let form = body_json(get(app, "/api/v1/forms/f1").await).await;
    assert_eq!(form["published"], true);
}

// ---------------------------------------------------------------------------
// Test: delete is 204 and idempotent for cleanup callers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_is_idempotent_cleanup() {
    let (app, _) = build_test_app();

    post_json(app.clone(), "/api/v1/forms", json!({"id": "f1", "name": "X"})).await;

    let response = delete(app.clone(), "/api/v1/forms/f1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/forms/f1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again still reports success.
    let response = delete(app, "/api/v1/forms/f1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Test: drafts listing excludes published forms, newest first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drafts_listing_is_newest_first_without_published() {
    let (app, _) = build_test_app();

    post_json(app.clone(), "/api/v1/forms", json!({"id": "f1", "name": "One"})).await;
    post_json(app.clone(), "/api/v1/forms", json!({"id": "f2", "name": "Two"})).await;
    post_json(
        app.clone(),
        "/api/v1/forms",
        json!({"id": "f3", "name": "Live", "published": true}),
    )
    .await;

    let drafts = body_json(get(app, "/api/v1/forms/drafts").await).await;
    let ids: Vec<&str> = drafts
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["f2", "f1"]);
}

// ---------------------------------------------------------------------------
// Test: owner listing requires a verified token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_listing_requires_verified_token() {
    let (app, _) = build_test_app();

    let response = get(app.clone(), "/api/v1/forms").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/forms", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owner_listing_returns_only_own_forms() {
    let (app, _) = build_test_app();

    // Created with a verified identity.
    send(
        app.clone(),
        Method::POST,
        "/api/v1/forms",
        Some(json!({"id": "mine", "name": "Mine"})),
        Some(&auth_token("user-1")),
    )
    .await;
    // Created anonymously.
    post_json(
        app.clone(),
        "/api/v1/forms",
        json!({"id": "anon-form", "name": "Theirs"}),
    )
    .await;

    let response = get_auth(app, "/api/v1/forms", &auth_token("user-1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let forms = body_json(response).await;
    let ids: Vec<&str> = forms
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["mine"]);
}

// ---------------------------------------------------------------------------
// Test: a client-supplied owner field is ignored in favor of the token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_supplied_owner_is_ignored() {
    let (app, _) = build_test_app();

    let response = post_json(
        app,
        "/api/v1/forms",
        json!({"id": "f1", "name": "X", "userId": "someone-else"}),
    )
    .await;

    let form = body_json(response).await;
    assert_eq!(form["userId"], "anon");
}

// ---------------------------------------------------------------------------
// Test: embed codes are generated from the configured base URL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn embed_code_has_iframe_widget_and_link() {
    let (app, _) = build_test_app();

    let response = get(app, "/api/v1/forms/abc-123/embed").await;

    assert_eq!(response.status(), StatusCode::OK);
    let code = body_json(response).await;
    assert_eq!(
        code["iframe"],
        "<iframe src=\"http://localhost:5173/embed/abc-123\" width=\"100%\" height=\"500\"></iframe>"
    );
    assert_eq!(
        code["widget"],
        "<script src=\"http://localhost:5173/widget.js\" data-form-id=\"abc-123\"></script>"
    );
    assert_eq!(code["link"], "http://localhost:5173/embed/abc-123");
}

// ---------------------------------------------------------------------------
// Test: template catalog and instantiation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn template_catalog_lists_premade_templates() {
    let (app, _) = build_test_app();

    let templates = body_json(get(app, "/api/v1/templates").await).await;
    let names: Vec<&str> = templates
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["License Application", "Payment Request"]);
}

#[tokio::test]
async fn create_from_template_seeds_a_draft() {
    let (app, _) = build_test_app();

    let response = send(
        app.clone(),
        Method::POST,
        "/api/v1/forms/from-template/License%20Application",
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let form = body_json(response).await;
    assert!(form["id"].as_str().unwrap().starts_with("draft-"));
    assert_eq!(form["name"], "License Application");
    assert_eq!(form["published"], false);
    assert_eq!(form["pages"][0]["fields"][0]["name"], "full_name");
    assert_eq!(form["pages"][0]["fields"][2]["name"], "license_type");
}

#[tokio::test]
async fn create_from_unknown_template_is_404() {
    let (app, _) = build_test_app();

    let response = send(
        app,
        Method::POST,
        "/api/v1/forms/from-template/Nope",
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
