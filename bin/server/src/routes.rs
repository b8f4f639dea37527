//! HTTP routes.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use std::collections::HashMap;
use std::sync::Arc;
use study_assistant_core::{RequestId, StudyContent, StudyMode, StudyRequest};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

/// Builds the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/study", get(study))
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}

async fn unknown_route() -> ApiError {
    ApiError::unknown_route()
}

/// Successful `/study` response: the payload fields sit beside `status` and `topic`.
#[derive(Debug, Serialize)]
struct StudyResponse {
    status: &'static str,
    topic: String,
    #[serde(flatten)]
    content: StudyContent,
}

fn parse_topic(params: &HashMap<String, String>) -> Result<String, ApiError> {
    params
        .get("topic")
        .map(|topic| topic.trim())
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::invalid_request(r#"Query parameter "topic" is required."#))
}

fn parse_mode(params: &HashMap<String, String>) -> Result<StudyMode, ApiError> {
    match params.get("mode").filter(|mode| !mode.is_empty()) {
        None => Ok(StudyMode::Default),
        Some(mode) => mode
            .to_lowercase()
            .parse()
            .map_err(|_| ApiError::invalid_request(r#"Invalid mode. Use "default" or "math"."#)),
    }
}

#[instrument(skip_all, fields(request_id = %RequestId::new()))]
async fn study(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<StudyResponse>, ApiError> {
    let topic = parse_topic(&params)?;
    let mode = parse_mode(&params)?;
    info!(%topic, %mode, "study request");

    let summary = state.summaries.fetch_summary(&topic).await?;
    if summary.is_empty() {
        return Err(ApiError::not_found(format!("No data found for topic: {topic}")));
    }

    let content = state
        .generator
        .generate_study_content(&StudyRequest::new(&topic, mode, summary))
        .await?;

    Ok(Json(StudyResponse {
        status: "ok",
        topic,
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use std::sync::Mutex;
    use study_assistant_ai::{
        GenerateContentResponse, LlmBackend, LlmError, LlmRequest, ModelClient, RateLimiter,
        StudyContentGenerator,
    };
    use study_assistant_core::Result as ReportResult;
    use study_assistant_encyclopedia::{EncyclopediaError, SummarySource};
    use tower::ServiceExt;

    const SOURCE: &str = "Photosynthesis converts light into chemical energy. It takes place in chloroplasts. Oxygen is released.";

    /// Summary source answering every topic the same way and recording lookups.
    struct StubSummaries {
        answer: Result<String, EncyclopediaError>,
        topics: Mutex<Vec<String>>,
    }

    impl StubSummaries {
        fn answering(answer: Result<&str, EncyclopediaError>) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.map(str::to_string),
                topics: Mutex::new(Vec::new()),
            })
        }

        fn topics(&self) -> Vec<String> {
            self.topics.lock().expect("topics lock").clone()
        }
    }

    #[async_trait]
    impl SummarySource for StubSummaries {
        async fn fetch_summary(&self, topic: &str) -> ReportResult<String, EncyclopediaError> {
            self.topics.lock().expect("topics lock").push(topic.to_string());
            self.answer.clone().map_err(Into::into)
        }
    }

    /// Model backend that always answers with the same result.
    struct FixedBackend {
        answer: Option<Result<String, LlmError>>,
    }

    #[async_trait]
    impl LlmBackend for FixedBackend {
        async fn generate(
            &self,
            _request: &LlmRequest,
        ) -> Result<GenerateContentResponse, LlmError> {
            match &self.answer {
                Some(answer) => answer.clone().map(GenerateContentResponse::from_text),
                None => Err(LlmError::Unconfigured),
            }
        }

        fn is_configured(&self) -> bool {
            self.answer.is_some()
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    fn router_with(summaries: Arc<StubSummaries>, backend: FixedBackend) -> Router {
        let client = ModelClient::new(Arc::new(backend), RateLimiter::default());
        let state = AppState::new(summaries, StudyContentGenerator::new(client));
        build_router(Arc::new(state))
    }

    fn offline_router(summaries: Arc<StubSummaries>) -> Router {
        router_with(summaries, FixedBackend { answer: None })
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, JsonValue) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) =
            get_json(offline_router(StubSummaries::answering(Ok(SOURCE))), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let (status, body) =
            get_json(offline_router(StubSummaries::answering(Ok(SOURCE))), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "error", "message": "Not Found"}));
    }

    #[tokio::test]
    async fn missing_or_blank_topic_is_rejected() {
        for uri in ["/study", "/study?topic=", "/study?topic=%20%20", "/study?mode=math"] {
            let summaries = StubSummaries::answering(Ok(SOURCE));
            let (status, body) = get_json(offline_router(summaries.clone()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                body,
                json!({"status": "error", "message": "Query parameter \"topic\" is required."})
            );
            assert!(summaries.topics().is_empty());
        }
    }

    #[tokio::test]
    async fn unknown_mode_is_rejected() {
        let summaries = StubSummaries::answering(Ok(SOURCE));
        let (status, body) =
            get_json(offline_router(summaries.clone()), "/study?topic=Cells&mode=poetry").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid mode. Use \"default\" or \"math\".");
        assert!(summaries.topics().is_empty());
    }

    #[tokio::test]
    async fn offline_default_mode_returns_fallback_payload() {
        let summaries = StubSummaries::answering(Ok(SOURCE));
        let (status, body) = get_json(
            offline_router(summaries.clone()),
            "/study?topic=%20Photosynthesis%20",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["topic"], "Photosynthesis");
        assert_eq!(body["summary"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["summary"][0], "Photosynthesis converts light into chemical energy.");
        assert_eq!(body["quiz"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["quiz"][0]["answerIndex"], 0);
        assert_eq!(body["quiz"][0]["choices"][0], body["summary"][0]);
        assert_eq!(
            body["studyTip"],
            "Review the main definitions of Photosynthesis twice today."
        );
        assert_eq!(summaries.topics(), vec!["Photosynthesis".to_string()]);
    }

    #[tokio::test]
    async fn mode_is_case_insensitive() {
        let (status, body) = get_json(
            offline_router(StubSummaries::answering(Ok(SOURCE))),
            "/study?topic=Probability&mode=MATH",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mathQuestion"]["answer"], "45 minutes");
        assert!(body.get("summary").is_none());
    }

    #[tokio::test]
    async fn model_output_is_passed_through() {
        let model = json!({
            "status": "ok",
            "topic": "Probability",
            "mathQuestion": {
                "question": "Two coins are flipped. P(two heads)?",
                "answer": "1/4",
                "explanation": "Four equally likely outcomes, one favourable."
            }
        });
        let router = router_with(
            StubSummaries::answering(Ok(SOURCE)),
            FixedBackend {
                answer: Some(Ok(model.to_string())),
            },
        );

        let (status, body) = get_json(router, "/study?topic=Probability&mode=math").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "ok",
                "topic": "Probability",
                "mathQuestion": {
                    "question": "Two coins are flipped. P(two heads)?",
                    "answer": "1/4",
                    "explanation": "Four equally likely outcomes, one favourable."
                }
            })
        );
    }

    #[tokio::test]
    async fn encyclopedia_not_found_is_404() {
        let summaries = StubSummaries::answering(Err(EncyclopediaError::NotFound {
            topic: "Qwxzzy".into(),
        }));
        let (status, body) = get_json(offline_router(summaries), "/study?topic=Qwxzzy").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"status": "error", "message": "No summary found for topic: Qwxzzy"})
        );
    }

    #[tokio::test]
    async fn encyclopedia_outage_is_502_with_details() {
        let summaries = StubSummaries::answering(Err(EncyclopediaError::RequestFailed {
            cause: "connection refused".into(),
        }));
        let (status, body) = get_json(offline_router(summaries), "/study?topic=Cells").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({
                "status": "error",
                "message": "Failed to fetch topic data from encyclopedia",
                "details": "connection refused"
            })
        );
    }

    #[tokio::test]
    async fn empty_summary_is_404() {
        let (status, body) = get_json(
            offline_router(StubSummaries::answering(Ok(""))),
            "/study?topic=Void",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No data found for topic: Void");
    }

    #[tokio::test]
    async fn misconfigured_model_is_500() {
        let router = router_with(
            StubSummaries::answering(Ok(SOURCE)),
            FixedBackend {
                answer: Some(Err(LlmError::InvalidConfig {
                    reason: "invalid endpoint".into(),
                })),
            },
        );
        let (status, body) = get_json(router, "/study?topic=Cells").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let response = offline_router(StubSummaries::answering(Ok(SOURCE)))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://example.org")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }
}
