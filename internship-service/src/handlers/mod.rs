//! HTTP handlers for the internship service.

pub mod chat;
pub mod review;
pub mod status;

pub use chat::project_chat;
pub use review::code_review;
pub use status::{health_check, metrics_endpoint, readiness_check, root};

use crate::services::metrics::record_model_call;
use crate::startup::AppState;
use service_core::error::AppError;
use std::time::Instant;

/// Detail returned when no model credential was configured at startup.
pub const MODEL_NOT_CONFIGURED: &str = "GEMINI_API_KEY not configured";

/// Sends one prompt to the configured model and returns its trimmed text.
///
/// No retry: any provider failure becomes a 500 carrying the provider's message.
pub(crate) async fn call_model(
    state: &AppState,
    operation: &'static str,
    prompt: &str,
) -> Result<String, AppError> {
    let provider = state
        .text_provider
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable(MODEL_NOT_CONFIGURED.to_string()))?;

    let start = Instant::now();
    let result = provider.generate(prompt).await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(response) => {
            record_model_call(operation, provider.model(), "ok", elapsed);
            tracing::info!(
                operation,
                model = %provider.model(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                elapsed_ms = (elapsed * 1000.0) as u64,
                "Model call completed"
            );
            Ok(response.text.trim().to_string())
        }
        Err(e) => {
            record_model_call(operation, provider.model(), e.kind(), elapsed);
            tracing::warn!(
                operation,
                model = %provider.model(),
                error = %e,
                "Model call failed"
            );
            Err(AppError::InternalError(anyhow::Error::new(e)))
        }
    }
}
