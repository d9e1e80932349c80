pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

/// Upper bound for a scoring request, resume upload included.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/score", post(handlers::handle_score))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::intake::job_fetcher::JobFetcher;
    use crate::llm_client::GeminiClient;
    use crate::persistence::DisabledScoreStore;
    use crate::scoring::orchestrator::ScoringOrchestrator;

    fn state() -> AppState {
        let generator = GeminiClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:9",
            "gemini-1.5-flash",
            Duration::from_secs(1),
        )
        .unwrap();
        AppState {
            scorer: Arc::new(ScoringOrchestrator::new(Arc::new(generator))),
            job_fetcher: JobFetcher::new(Duration::from_secs(1)).unwrap(),
            store: Arc::new(DisabledScoreStore),
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "talentmatch");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = build_router(state())
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
