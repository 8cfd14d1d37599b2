use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::db::NewServerUser;
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub birthdate: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub status: &'static str,
    pub user_id: i64,
}

/// `POST /api/users`. Idempotent by username: replaying a registration
/// returns 201 with the already-assigned remote id.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();
    let birthdate = req.birthdate.unwrap_or_default();

    let mut missing = Vec::new();
    if username.is_empty() {
        missing.push("username");
    }
    if password.is_empty() {
        missing.push("password");
    }
    if birthdate.is_empty() {
        missing.push("birthdate");
    }
    if !missing.is_empty() {
        return Err(ApiError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let user_id = state
        .store
        .create_user(&NewServerUser {
            username,
            password,
            full_name: req.full_name,
            birthdate,
            email: req.email,
        })
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            status: "ok",
            user_id: i64::from(user_id),
        }),
    ))
}
