// SPDX-License-Identifier: MIT

//! Generation workflow trigger, attempt listing, and the advisory
//! prompt-validation endpoint.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppJson, Result};
use crate::models::Generation;
use crate::services::gemini::PromptValidation;
use crate::services::generator::GenerateRequest;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/api/generations/{project_id}", get(list_generations))
        .route("/api/validate", post(validate_prompt))
}

/// `{generation}` envelope with the artifact inlined on success.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub generation: Generation,
}

/// Run the generation workflow.
async fn generate(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    let generation = state.generator.generate(request).await?;
    Ok(Json(GenerateResponse { generation }))
}

/// List generation attempts for a project, in insertion order.
async fn list_generations(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Generation>>> {
    Ok(Json(
        state.store.list_generations_by_project(&project_id).await,
    ))
}

#[derive(Deserialize)]
struct ValidateRequest {
    prompt: String,
}

/// Advisory prompt validation. Always 200; upstream failures fall back to
/// permissive defaults inside the client.
async fn validate_prompt(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<ValidateRequest>,
) -> Result<Json<PromptValidation>> {
    Ok(Json(state.gemini.validate_prompt(&request.prompt).await))
}
