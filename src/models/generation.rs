//! Generation model: one generation attempt, immutable once terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::bundle::FlutterBundle;

/// Generation attempt status. Starts `pending` and transitions exactly once
/// to `completed` or `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Completed,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub prompt: String,
    pub generated_code: Option<FlutterBundle>,
    pub credits_used: i64,
    pub status: GenerationStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a generation record. Status defaults to `pending`,
/// credits used to 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGeneration {
    pub project_id: String,
    pub user_id: String,
    pub prompt: String,
}

/// The single terminal update applied when the external call resolves.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerationPatch {
    pub generated_code: Option<FlutterBundle>,
    pub credits_used: Option<i64>,
    pub status: Option<GenerationStatus>,
    pub error_message: Option<String>,
}
