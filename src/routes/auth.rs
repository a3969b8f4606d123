// SPDX-License-Identifier: MIT

//! Registration and login.
//!
//! Passwords are bcrypt-hashed before storage and verified with bcrypt on
//! login; they are never serialized in any response. Login failures are
//! deliberately indistinguishable (unknown email, externally-authenticated
//! account, wrong password all surface the same 401).

use axum::{extract::State, routing::post, Json, Router};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, AppJson, Result};
use crate::models::{NewUser, User};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// `{user}` envelope returned by both auth endpoints.
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: User,
}

/// Register a new account.
///
/// Uniqueness of email and username is checked here, not in the store.
async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(mut input): AppJson<NewUser>,
) -> Result<Json<AuthResponse>> {
    if input.username.trim().is_empty() || input.email.trim().is_empty() {
        return Err(AppError::Validation(
            "username and email are required".to_string(),
        ));
    }

    if state.store.get_user_by_email(&input.email).await.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }
    if state
        .store
        .get_user_by_username(&input.username)
        .await
        .is_some()
    {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    if let Some(password) = input.password.take() {
        let hashed = hash(&password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;
        input.password = Some(hashed);
    }

    let user = state.store.create_user(input).await;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(AuthResponse { user }))
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Authenticate with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = state
        .store
        .get_user_by_email(&request.email)
        .await
        .ok_or(AppError::Auth)?;

    // Accounts from external identity providers carry no hash and cannot
    // log in with a password.
    let hashed = user.password.as_deref().ok_or(AppError::Auth)?;

    let matches = verify(&request.password, hashed).unwrap_or(false);
    if !matches {
        return Err(AppError::Auth);
    }

    Ok(Json(AuthResponse { user }))
}
