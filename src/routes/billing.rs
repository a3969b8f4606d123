// SPDX-License-Identifier: MIT

//! Billing: PayPal pass-through endpoints and subscription lookup.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, AppJson, Result};
use crate::models::Subscription;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/paypal/setup", get(paypal_setup))
        .route("/api/paypal/order", post(create_order))
        .route("/api/paypal/order/{order_id}/capture", post(capture_order))
        .route("/api/subscriptions/{user_id}", get(get_subscription))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetupResponse {
    pub client_token: String,
}

/// Client token for initializing the PayPal web SDK.
async fn paypal_setup(State(state): State<Arc<AppState>>) -> Result<Json<SetupResponse>> {
    let client_token = state.paypal.client_token().await?;
    Ok(Json(SetupResponse { client_token }))
}

#[derive(Deserialize)]
struct CreateOrderRequest {
    amount: String,
    currency: String,
    intent: String,
}

/// Create a payment order. The provider response passes through verbatim.
async fn create_order(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<CreateOrderRequest>,
) -> Result<Json<Value>> {
    let amount: f64 = request
        .amount
        .parse()
        .map_err(|_| AppError::Validation("Invalid amount. Amount must be a positive number.".to_string()))?;
    if amount <= 0.0 {
        return Err(AppError::Validation(
            "Invalid amount. Amount must be a positive number.".to_string(),
        ));
    }
    if request.currency.trim().is_empty() {
        return Err(AppError::Validation("Invalid currency".to_string()));
    }
    if request.intent.trim().is_empty() {
        return Err(AppError::Validation("Invalid intent".to_string()));
    }

    let order = state
        .paypal
        .create_order(&request.amount, &request.currency, &request.intent)
        .await?;
    Ok(Json(order))
}

/// Capture a previously-created order.
async fn capture_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>> {
    let capture = state.paypal.capture_order(&order_id).await?;
    Ok(Json(capture))
}

/// Fetch a user's subscription; JSON `null` when none exists.
async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Option<Subscription>>> {
    Ok(Json(state.store.get_subscription_by_user(&user_id).await))
}
