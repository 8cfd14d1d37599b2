use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::db::NewServerVital;
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateVitalRequest {
    /// Remote user id, when the caller already knows it.
    pub user_id: Option<i32>,
    /// Natural-key fallback: the owning user's username. Sync clients use
    /// this, since their local ids mean nothing here.
    pub user_external: Option<String>,
    pub date: Option<String>,
    pub pressure_systolic: Option<i32>,
    pub pressure_diastolic: Option<i32>,
    pub glucose: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateVitalResponse {
    pub status: &'static str,
    pub vital_id: i64,
}

/// `POST /api/vitals`. Not idempotent: replaying the same reading creates a
/// second row. 404 when `user_external` does not resolve.
pub async fn create_vital(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateVitalRequest>,
) -> Result<(StatusCode, Json<CreateVitalResponse>), ApiError> {
    let user_id = match (req.user_id, req.user_external.as_deref()) {
        (Some(id), _) => id,
        (None, Some(username)) => state
            .store
            .find_user_id_by_username(username)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
            .ok_or_else(|| ApiError::user_not_found(username))?,
        (None, None) => {
            return Err(ApiError::validation("user_id or user_external is required"));
        }
    };

    let date = req.date.unwrap_or_default();
    if date.is_empty() {
        return Err(ApiError::validation("Missing required fields: date"));
    }

    let vital_id = state
        .store
        .create_vital(
            user_id,
            &NewServerVital {
                date,
                pressure_systolic: req.pressure_systolic,
                pressure_diastolic: req.pressure_diastolic,
                glucose: req.glucose,
                notes: req.notes,
            },
        )
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateVitalResponse {
            status: "ok",
            vital_id: i64::from(vital_id),
        }),
    ))
}
