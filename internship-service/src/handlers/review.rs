use super::call_model;
use crate::models::{CodeReviewRequest, ReviewResult};
use crate::prompts::build_review_prompt;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

/// `POST /api/review`: reviewer feedback plus an approve/reject verdict.
pub async fn code_review(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CodeReviewRequest>,
) -> Result<Json<ReviewResult>, AppError> {
    let prompt = build_review_prompt(&req);
    let text = call_model(&state, "review", &prompt).await?;
    let result = ReviewResult::from_model_text(&text);

    tracing::info!(
        project_id = %req.project_id,
        language = %req.language,
        approved = result.approved,
        "Code review completed"
    );

    Ok(Json(result))
}
