use crate::models::ServiceStatus;
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

const SERVICE_NAME: &str = "internship-service";

/// `GET /`: liveness banner. `supabase_connected` reflects credential
/// presence at startup, not live connectivity.
pub async fn root(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        message: "Backend is running!".to_string(),
        supabase_connected: state.supabase.is_some(),
    })
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check endpoint for K8s readiness probes.
///
/// An unconfigured data store does not block readiness; a configured but
/// unreachable one does.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(supabase) = state.supabase.as_ref() else {
        return StatusCode::OK;
    };

    match supabase.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Supabase readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
