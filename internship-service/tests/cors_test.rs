mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{app_replying, chat_body};
use tower::util::ServiceExt;

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chat")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn preflight_from_frontend_origins_is_allowed() {
    for origin in ["http://localhost:3000", "http://127.0.0.1:3000"] {
        let (app, _) = app_replying("ok");
        let response = app.oneshot(preflight(origin)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], origin);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "content-type,x-custom"
        );
    }
}

#[tokio::test]
async fn preflight_from_other_origin_gets_no_allow_origin() {
    for origin in ["http://evil.example", "http://localhost:3001", "https://localhost:3000"] {
        let (app, _) = app_replying("ok");
        let response = app.oneshot(preflight(origin)).await.unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none(),
            "{}",
            origin
        );
    }
}

#[tokio::test]
async fn simple_request_from_frontend_echoes_origin() {
    let (app, _) = app_replying("ok");

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/chat")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(chat_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}
