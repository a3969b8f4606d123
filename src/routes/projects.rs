// SPDX-License-Identifier: MIT

//! Project CRUD and artifact download.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, AppJson, Result};
use crate::models::{NewProject, Project, ProjectPatch};
use crate::services::packaging::bundle_to_zip;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/api/projects/{id}/download", get(download_project))
}

#[derive(Deserialize)]
struct ListProjectsParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListProjectsParams>,
) -> Result<Json<Vec<Project>>> {
    let user_id = params
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;

    Ok(Json(state.store.list_projects_by_user(&user_id).await))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewProject>,
) -> Result<Json<Project>> {
    if input.user_id.trim().is_empty()
        || input.name.trim().is_empty()
        || input.description.trim().is_empty()
    {
        return Err(AppError::Validation(
            "userId, name, and description are required".to_string(),
        ));
    }

    let project = state.store.create_project(input).await;
    tracing::info!(project_id = %project.id, user_id = %project.user_id, "Project created");
    Ok(Json(project))
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    let project = state
        .store
        .get_project(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<ProjectPatch>,
) -> Result<Json<Project>> {
    let project = state
        .store
        .update_project(&id, patch)
        .await
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.store.delete_project(&id).await {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    tracing::info!(project_id = %id, "Project deleted");
    Ok(Json(MessageResponse {
        message: "Project deleted successfully".to_string(),
    }))
}

/// Download the generated artifact as a ZIP archive.
async fn download_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let project = state
        .store
        .get_project(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let bundle = project
        .generated_code
        .as_ref()
        .ok_or_else(|| AppError::Validation("Project has no generated code yet".to_string()))?;

    let bytes = bundle_to_zip(bundle)?;
    tracing::info!(
        project_id = %project.id,
        size = bytes.len(),
        packaged_at = %format_utc_rfc3339(chrono::Utc::now()),
        "Artifact packaged for download"
    );

    let filename = sanitize_filename(&project.name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.zip\"", filename),
            ),
        ],
        bytes,
    ))
}

/// Keep download filenames header-safe.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "project".to_string()
    } else {
        cleaned
    }
}
