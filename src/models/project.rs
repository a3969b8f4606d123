//! Project model: a named container for one app idea.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::bundle::FlutterBundle;
use crate::models::user::Language;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Generating,
    Completed,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    /// Owning user. Expected to reference an existing user; the store does
    /// not enforce it.
    pub user_id: String,
    pub name: String,
    pub description: String,
    /// Free-form visual theme tag passed through to generation
    pub theme: String,
    pub language: Language,
    pub status: ProjectStatus,
    pub generated_code: Option<FlutterBundle>,
    pub assets: Option<Value>,
    pub settings: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub user_id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub assets: Option<Value>,
    #[serde(default)]
    pub settings: Option<Value>,
}

/// Partial update for a project. Absent fields are left unchanged.
///
/// No `userId` field: ownership transfer is not an exposed operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub language: Option<Language>,
    pub status: Option<ProjectStatus>,
    pub generated_code: Option<FlutterBundle>,
    pub assets: Option<Value>,
    pub settings: Option<Value>,
}
