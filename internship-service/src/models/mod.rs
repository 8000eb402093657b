//! Request and response types. Nothing here outlives a request.

pub mod chat;
pub mod review;

use serde::{Deserialize, Serialize};

pub use chat::{ChatMessage, ChatReply, ChatRole, ProjectChatRequest, ReplyLanguage};
pub use review::{CodeReviewRequest, ReviewResult};

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub supabase_connected: bool,
}
