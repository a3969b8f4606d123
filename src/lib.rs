// SPDX-License-Identifier: MIT

//! Appio Flow: turn natural-language prompts into generated Flutter
//! application source trees.
//!
//! This crate provides the backend API: project/generation CRUD over an
//! injected record store, the credit-bearing generation workflow around
//! one Gemini call, artifact packaging, and PayPal billing pass-through.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use services::{GeminiClient, GeneratorService, PayPalClient};
use store::Storage;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Storage>,
    pub gemini: GeminiClient,
    pub paypal: PayPalClient,
    pub generator: GeneratorService,
}
