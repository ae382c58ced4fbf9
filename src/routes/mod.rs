//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - quiz API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/locales", get(http::http_get_locales))
        .route("/api/v1/quiz", post(http::http_post_quiz))
        .route("/api/v1/quiz/:id", get(http::http_get_quiz))
        .route("/api/v1/quiz/:id/next", post(http::http_post_next))
        .route("/api/v1/quiz/:id/answer", post(http::http_post_answer))
        .route("/api/v1/quiz/:id/restart", post(http::http_post_restart))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use axum::body::{self, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::with_config(QuizConfig { rng_seed: Some(9), ..QuizConfig::default() });
        build_router(Arc::new(state))
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_and_locales() {
        let app = app();
        let (status, json) = call(&app, Request::get("/api/v1/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);

        let (status, json) = call(&app, Request::get("/api/v1/locales").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["defaultLocale"], "en");
        assert_eq!(json["locales"][0]["code"], "en");
    }

    #[tokio::test]
    async fn quiz_lifecycle_over_http() {
        let app = app();
        let (status, quiz) = call(&app, post_json("/api/v1/quiz", r#"{"kind":"general","locale":"de"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(quiz["locale"], "de");
        assert_eq!(quiz["status"]["state"], "in_progress");
        assert_eq!(quiz["status"]["total"], 40);
        let id = quiz["quizId"].as_str().unwrap().to_string();

        let (status, err) = call(&app, post_json(&format!("/api/v1/quiz/{id}/answer"), r#"{"index":0}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(err["error"].is_string());

        let (status, next) = call(&app, Request::post(format!("/api/v1/quiz/{id}/next")).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let options = next["question"]["options"].as_array().unwrap().len();
        assert!(options == 2 || options == 4);

        let (status, _) = call(&app, post_json(&format!("/api/v1/quiz/{id}/answer"), r#"{"index":7}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, out) = call(&app, post_json(&format!("/api/v1/quiz/{id}/answer"), r#"{"index":0}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(out["status"]["remaining"], 39);

        let (status, st) = call(&app, Request::get(format!("/api/v1/quiz/{id}")).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(st["remaining"], 39);

        let (status, restarted) = call(&app, Request::post(format!("/api/v1/quiz/{id}/restart")).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(restarted["status"]["score"], 0);
        assert_eq!(restarted["status"]["remaining"], 40);
    }

    #[tokio::test]
    async fn empty_body_and_unknown_quiz() {
        let app = app();
        let (status, quiz) = call(&app, Request::post("/api/v1/quiz").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(quiz["kind"], "city");

        let (status, quiz) = call(&app, post_json("/api/v1/quiz", "  ")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(quiz["kind"], "city");

        let missing = uuid::Uuid::new_v4();
        let (status, _) = call(&app, Request::get(format!("/api/v1/quiz/{missing}")).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_quiz_body_is_rejected() {
        let app = app();
        let (status, err) = call(&app, post_json("/api/v1/quiz", r#"{"kind":"flagg"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err["error"].as_str().unwrap().contains("flagg"));

        let (status, err) = call(&app, post_json("/api/v1/quiz", r#"{"kind":"flag""#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].is_string());

        let (status, _) = call(&app, post_json("/api/v1/quiz", r#"{"kind":"flag","scope":{"by":"continent"}}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn restart_of_a_failed_quiz_is_refused() {
        let app = app();
        let (status, quiz) = call(&app, post_json("/api/v1/quiz", r#"{"kind":"city","scope":{"by":"difficulty","value":9}}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(quiz["status"]["state"], "error");
        let id = quiz["quizId"].as_str().unwrap().to_string();

        let (status, err) = call(&app, Request::post(format!("/api/v1/quiz/{id}/restart")).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err["error"].is_string());
    }
}
