//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ReservationRepository;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub repository: Arc<dyn ReservationRepository>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store cannot be read
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Reservations held in memory (any status)
    pub reservations: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let (http_status, status, reservations) = match state.repository.count().await {
        Ok(count) => (StatusCode::OK, "ok", Some(count)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read the store");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", None)
        }
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            reservations,
        }),
    )
}
