// SPDX-License-Identifier: MIT

//! Project CRUD tests: round-trip, listing, partial update, deletion.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/projects",
            &json!({
                "userId": "u1",
                "name": "Shop",
                "description": "A shop app",
                "theme": "dark",
                "language": "en"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = common::response_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(get(&format!("/api/projects/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = common::response_json(response).await;

    assert_eq!(fetched["name"], "Shop");
    assert_eq!(fetched["description"], "A shop app");
    assert_eq!(fetched["theme"], "dark");
    assert_eq!(fetched["language"], "en");
    assert_eq!(fetched["status"], "draft");
    assert!(fetched["generatedCode"].is_null());
}

#[tokio::test]
async fn test_list_requires_user_id() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/api/projects")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "userId is required");
}

#[tokio::test]
async fn test_list_returns_owned_projects_in_insertion_order() {
    let (app, _state) = common::create_test_app();

    for name in ["first", "second", "third"] {
        app.clone()
            .oneshot(common::json_request(
                "POST",
                "/api/projects",
                &json!({ "userId": "u1", "name": name, "description": "d" }),
            ))
            .await
            .unwrap();
    }
    app.clone()
        .oneshot(common::json_request(
            "POST",
            "/api/projects",
            &json!({ "userId": "someone-else", "name": "not mine", "description": "d" }),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/projects?userId=u1")).await.unwrap();
    let body = common::response_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/projects",
            &json!({ "name": "missing owner" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_updates_only_named_fields() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/projects",
            &json!({
                "userId": "u1",
                "name": "Shop",
                "description": "A shop app",
                "theme": "dark"
            }),
        ))
        .await
        .unwrap();
    let created = common::response_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PATCH",
            &format!("/api/projects/{}", id),
            &json!({ "name": "Storefront" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::response_json(response).await;

    assert_eq!(updated["name"], "Storefront");
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["theme"], created["theme"]);
    assert_eq!(updated["status"], created["status"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn test_patch_rejects_ownership_transfer() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/projects",
            &json!({ "userId": "u1", "name": "Shop", "description": "d" }),
        ))
        .await
        .unwrap();
    let created = common::response_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/api/projects/{}", id),
            &json!({ "userId": "attacker" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_missing_project_404() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "PATCH",
            "/api/projects/no-such-id",
            &json!({ "name": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_404() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/projects",
            &json!({ "userId": "u1", "name": "Shop", "description": "d" }),
        ))
        .await
        .unwrap();
    let created = common::response_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/projects/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Project deleted successfully");

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/projects/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_patch_merges_fields() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({ "username": "amira", "email": "amira@example.com" }),
        ))
        .await
        .unwrap();
    let body = common::response_json(response).await;
    let id = body["user"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "PATCH",
            &format!("/api/users/{}", id),
            &json!({ "theme": "dark", "language": "ar" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::response_json(response).await;

    assert_eq!(updated["theme"], "dark");
    assert_eq!(updated["language"], "ar");
    assert_eq!(updated["username"], "amira");
    assert_eq!(updated["credits"], 100);
    assert!(updated.get("password").is_none());
}

#[tokio::test]
async fn test_get_unknown_user_404() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/api/users/no-such-id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
