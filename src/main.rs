// SPDX-License-Identifier: MIT

//! Appio Flow API Server
//!
//! Turns natural-language prompts into generated Flutter application
//! source trees via Gemini, with credit-based billing through PayPal.

use appio_flow::{
    config::Config,
    services::{GeminiClient, GeneratorService, PayPalClient},
    store::{MemStorage, Storage},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Appio Flow API");

    // One store per process, injected everywhere. Records live for the
    // process lifetime only; a durable backend would slot in here.
    let store: Arc<dyn Storage> = Arc::new(MemStorage::new());

    let gemini = GeminiClient::new(config.gemini_api_key.clone());
    let paypal = PayPalClient::new(
        config.paypal_client_id.clone(),
        config.paypal_client_secret.clone(),
    );
    let generator = GeneratorService::new(store.clone(), gemini.clone());
    tracing::info!("Generation services initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        gemini,
        paypal,
        generator,
    });

    // Build router
    let app = appio_flow::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("appio_flow=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
