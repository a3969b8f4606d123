// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod gemini;
pub mod generator;
pub mod packaging;
pub mod paypal;

pub use gemini::{GeminiClient, PromptValidation};
pub use generator::{GenerateRequest, GeneratorService, GENERATION_COST};
pub use paypal::PayPalClient;
