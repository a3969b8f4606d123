// SPDX-License-Identifier: MIT

//! Registration and login tests.
//!
//! Verifies conflict handling, bcrypt hashing at rest, the vague 401 on
//! every login failure, and that no response ever carries the password.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_register_applies_defaults_and_hides_password() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "username": "amira",
                "email": "amira@example.com",
                "password": "s3cret-pass"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    let user = &body["user"];

    assert_eq!(user["username"], "amira");
    assert_eq!(user["credits"], 100);
    assert_eq!(user["subscription"], "free");
    assert_eq!(user["provider"], "email");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_register_stores_bcrypt_hash_not_plaintext() {
    let (app, state) = common::create_test_app();

    app.oneshot(common::json_request(
        "POST",
        "/api/auth/register",
        &json!({
            "username": "amira",
            "email": "amira@example.com",
            "password": "s3cret-pass"
        }),
    ))
    .await
    .unwrap();

    let stored = state
        .store
        .get_user_by_email("amira@example.com")
        .await
        .unwrap();
    let hash = stored.password.unwrap();
    assert_ne!(hash, "s3cret-pass");
    assert!(bcrypt::verify("s3cret-pass", &hash).unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email_rejected_without_second_record() {
    let (app, state) = common::create_test_app();

    let first = json!({
        "username": "amira",
        "email": "amira@example.com",
        "password": "pw-one-111"
    });
    app.clone()
        .oneshot(common::json_request("POST", "/api/auth/register", &first))
        .await
        .unwrap();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "username": "other",
                "email": "amira@example.com",
                "password": "pw-two-222"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "User already exists");
    // Only the first record exists
    assert!(state.store.get_user_by_username("other").await.is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_rejected() {
    let (app, _state) = common::create_test_app();

    app.clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({ "username": "amira", "email": "a@example.com" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({ "username": "amira", "email": "b@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_missing_fields_rejected() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({ "username": "", "email": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success_hides_password() {
    let (app, _state) = common::create_test_app();

    app.clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "username": "amira",
                "email": "amira@example.com",
                "password": "s3cret-pass"
            }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": "amira@example.com", "password": "s3cret-pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["user"]["email"], "amira@example.com");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_vague_401() {
    let (app, _state) = common::create_test_app();

    app.clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "username": "amira",
                "email": "amira@example.com",
                "password": "s3cret-pass"
            }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": "amira@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_same_401() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": "nobody@example.com", "password": "whatever" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_google_account_without_password_rejected() {
    let (app, _state) = common::create_test_app();

    // Externally-authenticated identity: no password on the record
    app.clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            &json!({
                "username": "gia",
                "email": "gia@example.com",
                "provider": "google"
            }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": "gia@example.com", "password": "anything" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
