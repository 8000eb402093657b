//! Common test utilities for internship-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use internship_service::services::providers::mock::MockTextProvider;
use internship_service::services::providers::TextProvider;
use internship_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Router whose model always answers with `reply`, plus a handle to inspect prompts.
pub fn app_replying(reply: &str) -> (Router, Arc<MockTextProvider>) {
    app_with_provider(MockTextProvider::replying(reply))
}

pub fn app_with_provider(provider: MockTextProvider) -> (Router, Arc<MockTextProvider>) {
    let provider = Arc::new(provider);
    let text_provider: Arc<dyn TextProvider> = provider.clone();
    let state = AppState {
        text_provider: Some(text_provider),
        supabase: None,
    };
    (build_router(state), provider)
}

/// Router with no model credential configured.
pub fn app_without_model() -> Router {
    build_router(AppState::default())
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn chat_body() -> Value {
    serde_json::json!({
        "project_id": "proj-1",
        "project_title": "Inventory dashboard",
        "project_description": "Track stock levels for a small shop",
        "client_persona": "Retired accountant who loves spreadsheets",
        "client_mood": "grumpy",
        "messages": [
            {"role": "user", "content": "I pushed the first table view."},
            {"role": "assistant", "content": "Why is the total column missing?"},
            {"role": "user", "content": "It is coming in the next commit."}
        ],
        "language": "en"
    })
}

pub fn review_body() -> Value {
    serde_json::json!({
        "project_id": "proj-1",
        "project_title": "Inventory dashboard",
        "project_description": "Track stock levels for a small shop",
        "code": "def total(items):\n    return sum(i.qty for i in items)\n",
        "language": "python"
    })
}
