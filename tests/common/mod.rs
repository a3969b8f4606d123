// SPDX-License-Identifier: MIT

use appio_flow::config::Config;
use appio_flow::routes::create_router;
use appio_flow::services::{GeminiClient, GeneratorService, PayPalClient};
use appio_flow::store::{MemStorage, Storage};
use appio_flow::AppState;
use axum::body::Body;
use axum::http::{header, Request};
use serde_json::Value;
use std::sync::Arc;

/// Create a test app with a fresh in-memory store.
///
/// External clients point at their real base URLs; tests that exercise
/// them use `create_test_app_with_mocks` instead.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(None, None)
}

/// Create a test app whose Gemini and PayPal clients point at mock servers.
#[allow(dead_code)]
pub fn create_test_app_with_mocks(
    gemini_base: &str,
    paypal_base: &str,
) -> (axum::Router, Arc<AppState>) {
    build_app(Some(gemini_base.to_string()), Some(paypal_base.to_string()))
}

fn build_app(
    gemini_base: Option<String>,
    paypal_base: Option<String>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store: Arc<dyn Storage> = Arc::new(MemStorage::new());

    let mut gemini = GeminiClient::new(config.gemini_api_key.clone());
    if let Some(base) = gemini_base {
        gemini = gemini.with_base_url(base);
    }

    let mut paypal = PayPalClient::new(
        config.paypal_client_id.clone(),
        config.paypal_client_secret.clone(),
    );
    if let Some(base) = paypal_base {
        paypal = paypal.with_base_url(base);
    }

    let generator = GeneratorService::new(store.clone(), gemini.clone());

    let state = Arc::new(AppState {
        config,
        store,
        gemini,
        paypal,
        generator,
    });

    (create_router(state.clone()), state)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid Gemini generateContent response wrapping the given artifact.
#[allow(dead_code)]
pub fn gemini_response_with(artifact: &Value) -> Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [{ "text": artifact.to_string() }] } }
        ]
    })
}

/// A small, well-formed generation artifact.
#[allow(dead_code)]
pub fn sample_artifact() -> Value {
    serde_json::json!({
        "mainDart": "void main() => runApp(const ShopApp());",
        "pubspecYaml": "name: shop\nsdk: flutter",
        "pages": { "home": "class HomePage {}" },
        "widgets": { "product_card": "class ProductCard {}" },
        "assets": ["logo.png"]
    })
}
