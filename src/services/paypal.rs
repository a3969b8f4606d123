// SPDX-License-Identifier: MIT

//! PayPal Orders API client.
//!
//! Thin pass-through over the provider: client-token setup for the web
//! SDK, order creation, and order capture. Provider response bodies are
//! returned verbatim as JSON values.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;

/// PayPal REST client.
#[derive(Clone)]
pub struct PayPalClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl PayPalClient {
    /// Create a client against the PayPal sandbox environment.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api-m.sandbox.paypal.com".to_string(),
            client_id,
            client_secret,
        }
    }

    /// Override the API base URL (production deployments, test mocks).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch an OAuth access token via client credentials.
    async fn access_token(&self) -> Result<String, AppError> {
        let url = format!("{}/v1/oauth2/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::PaymentApi(format!("Token request failed: {}", e)))?;

        let token: AccessTokenResponse = self.check_response_json(response).await?;
        Ok(token.access_token)
    }

    /// Fetch a client token for initializing the web SDK.
    pub async fn client_token(&self) -> Result<String, AppError> {
        let access_token = self.access_token().await?;
        let url = format!("{}/v1/identity/generate-token", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| AppError::PaymentApi(format!("Client token request failed: {}", e)))?;

        let token: ClientTokenResponse = self.check_response_json(response).await?;
        Ok(token.client_token)
    }

    /// Create an order. The provider response passes through verbatim.
    pub async fn create_order(
        &self,
        amount: &str,
        currency: &str,
        intent: &str,
    ) -> Result<Value, AppError> {
        let access_token = self.access_token().await?;
        let url = format!("{}/v2/checkout/orders", self.base_url);

        let body = json!({
            "intent": intent.to_uppercase(),
            "purchase_units": [{
                "amount": {
                    "currency_code": currency,
                    "value": amount,
                }
            }],
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::PaymentApi(format!("Order creation failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Capture a previously-created order.
    pub async fn capture_order(&self, order_id: &str) -> Result<Value, AppError> {
        let access_token = self.access_token().await?;
        let url = format!("{}/v2/checkout/orders/{}/capture", self.base_url, order_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| AppError::PaymentApi(format!("Order capture failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::PaymentApi(format!("JSON parse error: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ClientTokenResponse {
    client_token: String,
}
