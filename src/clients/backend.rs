//! HTTP client for the remote replication endpoint.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::outbox::{UserPayload, VitalPayload};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl BackendError {
    /// Transport faults and server errors are worth retrying on a later
    /// sync; client errors mean the payload itself was rejected.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedUser {
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct CreatedVital {
    vital_id: i64,
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
    request_timeout: Duration,
}

impl BackendClient {
    pub fn new(
        base_url: &str,
        health_timeout_seconds: u64,
        request_timeout_seconds: u64,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("vitalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout: Duration::from_secs(health_timeout_seconds),
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bounded-timeout health probe. Any transport error, timeout, or
    /// non-success status counts as unreachable.
    pub async fn is_reachable(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("Backend unreachable: {err}");
                false
            }
        }
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<i64, BackendError> {
        let url = format!("{}/api/users", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, message });
        }

        let created: CreatedUser = response.json().await?;
        Ok(created.user_id)
    }

    pub async fn create_vital(&self, payload: &VitalPayload) -> Result<i64, BackendError> {
        let url = format!("{}/api/vitals", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, message });
        }

        let created: CreatedVital = response.json().await?;
        Ok(created.vital_id)
    }
}
