pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::conversation::handlers::handle_conversation;
use crate::generation::handlers::handle_generate;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview
        .route("/api/conversation", post(handle_conversation))
        // Draft generation (rate limited, safety screened)
        .route("/api/generate", post(handle_generate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::admission::safety::UnsafeContent;
    use crate::errors::{INVALID_BODY_MESSAGE, MISSING_FIELDS_MESSAGE, RATE_LIMITED_MESSAGE};
    use crate::test_utils::{api_error, test_state, ScriptedModel};

    fn generate_request(ip: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json");
        if let Some(ip) = ip {
            builder = builder.header("x-forwarded-for", ip);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn generate_request_raw(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "9.9.9.9")
            .body(Body::from(body))
            .unwrap()
    }

    fn conversation_request(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/conversation")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(Arc::new(ScriptedModel::fixed(""))));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_without_history_returns_three_versions() {
        let model = Arc::new(ScriptedModel::echo_tone());
        let app = build_router(test_state(model.clone()));

        let (status, body) = send(
            &app,
            generate_request(Some("1.2.3.4"), json!({ "messageType": "apology" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let versions = body["versions"].as_array().unwrap();
        assert_eq!(versions.len(), 3);
        assert_eq!(versions[0]["tone"], "vulnerable");
        assert_eq!(versions[0]["title"], "Open and Emotional");
        assert_eq!(versions[1]["tone"], "direct");
        assert_eq!(versions[1]["content"], "direct draft");
        assert_eq!(versions[2]["tone"], "gentle");
        assert_eq!(model.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_unsafe_answer_rejected_before_any_llm_call() {
        let model = Arc::new(ScriptedModel::echo_tone());
        let app = build_router(test_state(model.clone()));

        let (status, body) = send(
            &app,
            generate_request(
                Some("1.2.3.4"),
                json!({
                    "messageType": "apology",
                    "qaHistory": [{ "question": "who", "answer": "I wish I could kill them" }]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], UnsafeContent::Answer.to_string());
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unsafe_message_type_rejected() {
        let app = build_router(test_state(Arc::new(ScriptedModel::echo_tone())));
        let (status, body) = send(
            &app,
            generate_request(Some("1.2.3.4"), json!({ "messageType": "weapon" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Message type contains inappropriate content.");
    }

    #[tokio::test]
    async fn test_missing_message_type_is_bad_request() {
        let app = build_router(test_state(Arc::new(ScriptedModel::echo_tone())));
        let (status, body) = send(
            &app,
            generate_request(Some("1.2.3.4"), json!({ "qaHistory": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn test_downstream_failure_is_generic_500() {
        let model = Arc::new(ScriptedModel::new(|_| Err(api_error("secret upstream detail"))));
        let app = build_router(test_state(model));

        let (status, body) = send(
            &app,
            generate_request(Some("1.2.3.4"), json!({ "messageType": "love" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate messages");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_scenario_per_client() {
        let app = build_router(test_state(Arc::new(ScriptedModel::echo_tone())));
        let body = json!({ "messageType": "gratitude" });

        for i in 0..5 {
            let (status, _) = send(&app, generate_request(Some("1.2.3.4"), body.clone())).await;
            assert_eq!(status, StatusCode::OK, "request {} should pass", i + 1);
            tokio::time::advance(Duration::from_secs(2)).await;
        }

        let (status, rejected) = send(&app, generate_request(Some("1.2.3.4"), body.clone())).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(rejected["error"], RATE_LIMITED_MESSAGE);

        // Another client is unaffected.
        let (status, _) = send(&app, generate_request(Some("5.6.7.8"), body.clone())).await;
        assert_eq!(status, StatusCode::OK);

        tokio::time::advance(Duration::from_secs(60)).await;
        let (status, _) = send(&app, generate_request(Some("1.2.3.4"), body)).await;
        assert_eq!(status, StatusCode::OK, "7th request after the window must pass");
    }

    #[tokio::test]
    async fn test_requests_without_origin_share_one_bucket() {
        let app = build_router(test_state(Arc::new(ScriptedModel::echo_tone())));
        let body = json!({ "messageType": "love" });
        for _ in 0..5 {
            let (status, _) = send(&app, generate_request(None, body.clone())).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = send(&app, generate_request(None, body)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_conversation_requires_message_type() {
        let app = build_router(test_state(Arc::new(ScriptedModel::fixed("Hi"))));
        let request = conversation_request(json!({ "userAnswer": "hello" }).to_string());
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing message type");
    }

    #[tokio::test]
    async fn test_conversation_reports_completion() {
        let app = build_router(test_state(Arc::new(ScriptedModel::fixed(
            "Thank you. [CONVERSATION_COMPLETE]",
        ))));
        let request = conversation_request(
            json!({
                "messageType": "gratitude",
                "conversationHistory": [{ "role": "assistant", "content": "Who?" }],
                "userAnswer": "My piano instructor"
            })
            .to_string(),
        );
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"], "Thank you.");
        assert_eq!(body["isComplete"], true);
    }

    #[tokio::test]
    async fn test_conversation_accepts_null_history() {
        let model = Arc::new(ScriptedModel::fixed("Who is this message for?"));
        let app = build_router(test_state(model.clone()));
        let request = conversation_request(
            json!({ "messageType": "love", "conversationHistory": null }).to_string(),
        );
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"], "Who is this message for?");
        assert_eq!(body["isComplete"], false);
        assert!(model.calls()[0].history.is_empty());
    }

    #[tokio::test]
    async fn test_conversation_model_failure_is_its_own_500() {
        let model = Arc::new(ScriptedModel::new(|_| Err(api_error("secret upstream detail"))));
        let app = build_router(test_state(model));
        let request = conversation_request(json!({ "messageType": "apology" }).to_string());
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process conversation");
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_a_fixed_message() {
        let app = build_router(test_state(Arc::new(ScriptedModel::echo_tone())));

        let (status, body) = send(&app, generate_request_raw("{\"messageType\": [1,")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BODY_MESSAGE);

        let (status, body) = send(&app, conversation_request("{\"messageType\": 3}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BODY_MESSAGE);
    }
}
