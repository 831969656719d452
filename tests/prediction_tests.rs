//! # Prediction Client Tests
//!
//! Chat completion client against a mock HTTP server, including retries and
//! the circuit breaker.

use httpmock::prelude::*;
use match_forecast::bot_config::{LlmConfig, RecoveryConfig};
use match_forecast::prediction::{MatchContext, OpenAiPredictor, Prediction, Predictor};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_recovery() -> RecoveryConfig {
        RecoveryConfig {
            max_retries: 2,
            base_retry_delay_ms: 1,
            max_retry_delay_ms: 5,
            operation_timeout_secs: 5,
            circuit_breaker_threshold: 2,
            circuit_breaker_reset_secs: 60,
        }
    }

    fn create_predictor(server: &MockServer) -> OpenAiPredictor {
        let config = LlmConfig {
            base_url: server.base_url(),
            ..LlmConfig::new("test-key")
        };
        OpenAiPredictor::new(config, fast_recovery()).expect("Failed to build prediction client")
    }

    fn create_context() -> MatchContext {
        MatchContext {
            team1: "Спартак".to_string(),
            team2: "ЦСКА".to_string(),
            tournament: "РПЛ".to_string(),
            date: "20 марта".to_string(),
            min_output_length: 1200,
            team1_form: "Нет информации о последних матчах Спартак".to_string(),
            team2_form: "Нет информации о последних матчах ЦСКА".to_string(),
            team1_roster: "Нет информации о составе Спартак".to_string(),
            team2_roster: "Нет информации о составе ЦСКА".to_string(),
        }
    }

    #[tokio::test]
    async fn test_prediction_generated() {
        let server = MockServer::start_async().await;
        let completion = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .body_contains("Спартак")
                    .body_contains("1200");
                then.status(200).json_body(json!({
                    "choices": [{
                        "message": { "role": "assistant", "content": "  Спартак победит.  " }
                    }]
                }));
            })
            .await;

        let predictor = create_predictor(&server);
        let prediction = predictor.predict(&create_context()).await;

        completion.assert_async().await;
        assert_eq!(prediction, Prediction::Generated("Спартак победит.".to_string()));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start_async().await;
        let completion = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401);
            })
            .await;

        let predictor = create_predictor(&server);
        let prediction = predictor.predict(&create_context()).await;

        assert!(matches!(prediction, Prediction::Failed(reason) if reason.contains("401")));
        assert_eq!(completion.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start_async().await;
        let completion = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(502);
            })
            .await;

        let predictor = create_predictor(&server);
        let prediction = predictor.predict(&create_context()).await;

        assert!(matches!(prediction, Prediction::Failed(_)));
        assert_eq!(completion.hits_async().await, 3);
    }

    #[tokio::test]
    async fn test_empty_choices_fail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let predictor = create_predictor(&server);
        let prediction = predictor.predict(&create_context()).await;

        assert!(matches!(prediction, Prediction::Failed(reason) if reason.contains("empty response")));
    }

    #[tokio::test]
    async fn test_circuit_opens_after_repeated_failures() {
        let server = MockServer::start_async().await;
        let completion = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(400);
            })
            .await;

        let predictor = create_predictor(&server);
        let context = create_context();
        predictor.predict(&context).await;
        predictor.predict(&context).await;

        let prediction = predictor.predict(&context).await;
        assert!(matches!(prediction, Prediction::Failed(reason) if reason.contains("circuit breaker open")));
        assert_eq!(completion.hits_async().await, 2);
    }
}
