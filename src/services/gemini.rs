// SPDX-License-Identifier: MIT

//! Gemini API client for Flutter app generation.
//!
//! Two operations:
//! - `generate_app`: one synchronous call with a fixed response schema,
//!   either a complete artifact or a `Generation` error. No retry, no
//!   streaming, no partial results.
//! - `validate_prompt`: advisory classification that fails open.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::FlutterBundle;

/// Model used for full app generation.
const GENERATION_MODEL: &str = "gemini-2.5-pro";

/// Model used for the lightweight prompt-validation call.
const VALIDATION_MODEL: &str = "gemini-2.5-flash";

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against the Gemini Developer API.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key,
        }
    }

    /// Override the API base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Generate a complete Flutter application for the given prompt.
    ///
    /// The request declares a JSON response schema matching
    /// [`FlutterBundle`], so a successful parse is the artifact as-is.
    pub async fn generate_app(
        &self,
        prompt: &str,
        theme: &str,
        language: &str,
    ) -> Result<FlutterBundle, AppError> {
        let system_prompt = format!(
            "You are an expert Flutter developer. Generate a complete Flutter \
             application based on the user's description.\n\n\
             Theme: {theme}\n\
             Language: {language}\n\n\
             Requirements:\n\
             1. Generate a complete main.dart file with proper Material app structure\n\
             2. Create a valid pubspec.yaml with all necessary dependencies\n\
             3. Generate individual page files for each screen\n\
             4. Create reusable widget components\n\
             5. Follow Flutter best practices and Material Design guidelines\n\
             6. Include proper navigation between screens\n\
             7. Use appropriate widgets for the requested functionality\n\n\
             Respond with a single JSON object: mainDart, pubspecYaml, \
             pages (name -> source), widgets (name -> source), assets (filenames).\n\n\
             Focus on creating production-ready, well-structured Flutter code."
        );

        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": bundle_schema(),
            },
        });

        let text = self
            .generate_content(GENERATION_MODEL, &body)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            AppError::Generation(format!("Response did not match the artifact schema: {}", e))
        })
    }

    /// Ask the model whether a prompt is workable and what it might cost.
    ///
    /// Advisory only: any upstream failure falls back to permissive
    /// defaults rather than blocking the caller.
    pub async fn validate_prompt(&self, prompt: &str) -> PromptValidation {
        match self.try_validate_prompt(prompt).await {
            Ok(validation) => validation,
            Err(e) => {
                tracing::warn!(error = %e, "Prompt validation failed, falling back to defaults");
                PromptValidation::fail_open()
            }
        }
    }

    async fn try_validate_prompt(&self, prompt: &str) -> Result<PromptValidation, AppError> {
        let system_prompt = "Analyze this app idea prompt and provide validation feedback.\n\n\
             Respond with JSON: isValid (boolean), suggestions (array of improvement \
             suggestions), estimatedCredits (number between 10-50 based on complexity).\n\n\
             Consider clarity of requirements, technical feasibility, feature \
             complexity, and the number of screens/components needed.";

        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "object",
                    "properties": {
                        "isValid": { "type": "boolean" },
                        "suggestions": { "type": "array", "items": { "type": "string" } },
                        "estimatedCredits": { "type": "number" },
                    },
                    "required": ["isValid", "suggestions", "estimatedCredits"],
                },
            },
        });

        let text = self
            .generate_content(VALIDATION_MODEL, &body)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        serde_json::from_str(&text)
            .map_err(|e| AppError::Generation(format!("Invalid validation response: {}", e)))
    }

    /// Issue one generateContent call and return the first candidate text.
    async fn generate_content(&self, model: &str, body: &Value) -> Result<String, AppError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!("HTTP {}: {}", status, body)));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("JSON parse error: {}", e)))?;

        payload
            .first_text()
            .ok_or_else(|| AppError::Generation("Empty response from model".to_string()))
    }
}

/// Advisory verdict on a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptValidation {
    pub is_valid: bool,
    pub suggestions: Vec<String>,
    /// Bounded 10-50 by the instruction; informational only, never wired
    /// into the actual charge.
    pub estimated_credits: i64,
}

impl PromptValidation {
    /// Permissive defaults used when the advisory call fails.
    pub fn fail_open() -> Self {
        Self {
            is_valid: true,
            suggestions: Vec::new(),
            estimated_credits: 10,
        }
    }
}

/// JSON schema for the generation response, declared to the model.
fn bundle_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "mainDart": { "type": "string" },
            "pubspecYaml": { "type": "string" },
            "pages": { "type": "object", "additionalProperties": { "type": "string" } },
            "widgets": { "type": "object", "additionalProperties": { "type": "string" } },
            "assets": { "type": "array", "items": { "type": "string" } },
        },
        "required": ["mainDart", "pubspecYaml", "pages", "widgets", "assets"],
    })
}

// ─── Gemini wire types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_extraction() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\": 1}" }] } }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text().unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_empty_candidates_yield_none() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
    }

    #[test]
    fn test_fail_open_defaults() {
        let fallback = PromptValidation::fail_open();
        assert!(fallback.is_valid);
        assert!(fallback.suggestions.is_empty());
        assert_eq!(fallback.estimated_credits, 10);
    }
}
