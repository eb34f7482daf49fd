//! Handlers for health check endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, ReadinessResponse, StatusResponse};
use crate::state::AppState;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// { "status": "ok" }
/// ```
pub async fn health_handler() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Readiness probe with component checks.
///
/// # Endpoint
///
/// `GET /health/ready`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` through the user repository
/// 2. **Sessions**: token blacklist backend (Redis PING or in-memory)
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "sessions": { "status": "ok", "message": "redis" }
///   }
/// }
/// ```
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let database = match state.auth_service.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    };

    let backend = state.sessions.backend();
    let sessions = if state.sessions.health_check().await {
        CheckStatus::ok(backend)
    } else {
        CheckStatus::error(format!("{backend} unreachable"))
    };

    let all_healthy = database.is_ok() && sessions.is_ok();

    let response = ReadinessResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, sessions },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        tracing::warn!(?response, "Readiness check failed");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
