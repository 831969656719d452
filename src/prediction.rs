//! # Prediction Module
//!
//! Prompt assembly and the OpenAI-compatible chat completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::bot_config::{LlmConfig, RecoveryConfig};
use crate::circuit_breaker::CircuitBreaker;
use crate::recovery::with_retry;
use crate::service_errors::{Result, ServiceError};

pub const SYSTEM_PROMPT: &str = "Ты - опытный спортивный аналитик, создающий прогнозы на футбольные матчи на основе предоставленных данных.";

/// Everything the model is told about one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    pub team1: String,
    pub team2: String,
    pub tournament: String,
    pub date: String,
    pub min_output_length: u32,
    pub team1_form: String,
    pub team2_form: String,
    pub team1_roster: String,
    pub team2_roster: String,
}

impl MatchContext {
    /// `Team1 - Team2`
    pub fn team_label(&self) -> String {
        format!("{} - {}", self.team1, self.team2)
    }

    pub fn user_prompt(&self) -> String {
        format!(
            "Напиши оригинальный прогноз на футбольный матч между командами {team1} и {team2} \
             в рамках турнира {tournament}, дата: {date}.\n\n\
             Используй следующую информацию:\n\
             - Последние матчи {team1}: {form1}\n\
             - Последние матчи {team2}: {form2}\n\
             - Состав {team1}: {roster1}\n\
             - Состав {team2}: {roster2}\n\n\
             Прогноз должен содержать не менее {min} символов и быть оригинальным.",
            team1 = self.team1,
            team2 = self.team2,
            tournament = self.tournament,
            date = self.date,
            form1 = self.team1_form,
            form2 = self.team2_form,
            roster1 = self.team1_roster,
            roster2 = self.team2_roster,
            min = self.min_output_length,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Generated(String),
    /// Reason the prediction could not be produced
    Failed(String),
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, context: &MatchContext) -> Prediction;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Chat completion client with retry and circuit breaker
#[derive(Debug)]
pub struct OpenAiPredictor {
    http: reqwest::Client,
    config: LlmConfig,
    recovery: RecoveryConfig,
    breaker: CircuitBreaker,
}

impl OpenAiPredictor {
    pub fn new(config: LlmConfig, recovery: RecoveryConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(recovery.operation_timeout_secs))
            .build()?;
        let breaker = CircuitBreaker::new(&recovery);
        Ok(Self {
            http,
            config,
            recovery,
            breaker,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn complete(&self, context: &MatchContext) -> Result<String> {
        let url = self.completions_url();
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: context.user_prompt(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| ServiceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus { url, status });
        }

        let body: ChatResponse = response.json().await.map_err(|source| ServiceError::Decode {
            url: url.clone(),
            source,
        })?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ServiceError::EmptyResponse { url })
    }
}

#[async_trait]
impl Predictor for OpenAiPredictor {
    #[instrument(skip(self, context), fields(teams = %context.team_label()))]
    async fn predict(&self, context: &MatchContext) -> Prediction {
        match with_retry("openai", &self.recovery, &self.breaker, || self.complete(context)).await {
            Ok(text) => {
                info!(chars = text.chars().count(), "Prediction generated");
                Prediction::Generated(text)
            }
            Err(error) => {
                warn!(error = %error, "Prediction failed");
                Prediction::Failed(error.to_string())
            }
        }
    }
}
