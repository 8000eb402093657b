use super::call_model;
use crate::models::{ChatReply, ProjectChatRequest};
use crate::prompts::build_customer_prompt;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

/// `POST /api/chat`: next reply from the simulated client.
pub async fn project_chat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ProjectChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    tracing::debug!(
        project_id = %req.project_id,
        messages = req.messages.len(),
        language = ?req.language,
        "Building client reply"
    );

    let prompt = build_customer_prompt(&req);
    let reply = call_model(&state, "chat", &prompt).await?;

    Ok(Json(ChatReply { reply }))
}
