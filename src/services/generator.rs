// SPDX-License-Identifier: MIT

//! The generation workflow: the one multi-entity, credit-bearing
//! operation in the system.
//!
//! prompt -> credit check -> external generation -> persisted artifact.
//! The check-then-debit sequence is serialized per user, so two racing
//! requests for the same user cannot both pass the credit precondition.
//! The Generation record is always terminal when this returns.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{
    Generation, GenerationPatch, GenerationStatus, Language, NewGeneration, ProjectPatch,
    ProjectStatus, UserPatch,
};
use crate::services::gemini::GeminiClient;
use crate::store::Storage;

/// Fixed cost per generation attempt. The advisory estimate from prompt
/// validation is never wired into this.
pub const GENERATION_COST: i64 = 10;

/// Request to run the generation workflow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub project_id: String,
    pub user_id: String,
    pub prompt: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
}

/// Orchestrates credit validation, record creation, the Gemini call, and
/// the success write-set across the three entities.
#[derive(Clone)]
pub struct GeneratorService {
    store: Arc<dyn Storage>,
    gemini: GeminiClient,
    /// Per-user mutex serializing the check-then-debit sequence.
    user_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl GeneratorService {
    pub fn new(store: Arc<dyn Storage>, gemini: GeminiClient) -> Self {
        Self {
            store,
            gemini,
            user_locks: Arc::new(DashMap::new()),
        }
    }

    /// Run one generation attempt end to end.
    ///
    /// Fails fast with no writes when the request is malformed or the user
    /// lacks `GENERATION_COST` credits. Otherwise a Generation record is
    /// created in `pending` before the external call and driven to a
    /// terminal state before returning, success or not.
    pub async fn generate(&self, request: GenerateRequest) -> Result<Generation, AppError> {
        if request.project_id.trim().is_empty()
            || request.user_id.trim().is_empty()
            || request.prompt.trim().is_empty()
        {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }

        let lock = self
            .user_locks
            .entry(request.user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Precondition: the user exists and can afford the attempt. Checked
        // under the lock so a concurrent attempt sees the debited balance.
        let user = match self.store.get_user(&request.user_id).await {
            Some(user) if user.credits >= GENERATION_COST => user,
            _ => return Err(AppError::InsufficientCredits),
        };

        // Durable evidence of the attempt, created before the external call.
        let generation = self
            .store
            .create_generation(NewGeneration {
                project_id: request.project_id.clone(),
                user_id: request.user_id.clone(),
                prompt: request.prompt.clone(),
            })
            .await;

        let theme = request.theme.as_deref().unwrap_or("modern");
        let language = request.language.unwrap_or(Language::En);

        tracing::info!(
            generation_id = %generation.id,
            user_id = %request.user_id,
            project_id = %request.project_id,
            "Starting app generation"
        );

        match self
            .gemini
            .generate_app(&request.prompt, theme, language.as_str())
            .await
        {
            Ok(bundle) => {
                let completed = self
                    .store
                    .update_generation(
                        &generation.id,
                        GenerationPatch {
                            generated_code: Some(bundle.clone()),
                            credits_used: Some(GENERATION_COST),
                            status: Some(GenerationStatus::Completed),
                            error_message: None,
                        },
                    )
                    .await
                    .ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "Generation {} vanished mid-workflow",
                            generation.id
                        ))
                    })?;

                self.store
                    .update_user(
                        &request.user_id,
                        UserPatch {
                            credits: Some(user.credits - GENERATION_COST),
                            ..Default::default()
                        },
                    )
                    .await;

                // A missing project is tolerated: the update is a no-op and
                // the generation still counts.
                self.store
                    .update_project(
                        &request.project_id,
                        ProjectPatch {
                            generated_code: Some(bundle),
                            status: Some(ProjectStatus::Completed),
                            ..Default::default()
                        },
                    )
                    .await;

                tracing::info!(
                    generation_id = %completed.id,
                    credits_used = GENERATION_COST,
                    "Generation completed"
                );
                Ok(completed)
            }
            Err(e) => {
                let message = e.to_string();
                self.store
                    .update_generation(
                        &generation.id,
                        GenerationPatch {
                            status: Some(GenerationStatus::Error),
                            error_message: Some(message.clone()),
                            ..Default::default()
                        },
                    )
                    .await;

                tracing::warn!(
                    generation_id = %generation.id,
                    error = %message,
                    "Generation failed"
                );
                Err(e)
            }
        }
    }
}
