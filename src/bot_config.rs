//! # Bot Configuration Module
//!
//! This module defines configuration structures for the forecast bot,
//! including parser limits, recovery settings for upstream services,
//! rate limiting and the transport mode.

use anyhow::{bail, Context, Result};
use std::str::FromStr;

// Constants for parser configuration
pub const DEFAULT_MAX_INPUT_CHARS: usize = 4000;
pub const DEFAULT_MATCH_CEILING: usize = 5;
pub const HARD_MATCH_CEILING: usize = 10;
pub const DEFAULT_COLUMN_GAP: usize = 3;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SPORTSDB_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json";
pub const DEFAULT_SPORTSDB_API_KEY: &str = "3"; // Free public test key
pub const DEFAULT_PORT: u16 = 5000;

/// Limits and defaults of the match-request parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Input beyond this many characters is truncated
    pub max_input_chars: usize,
    /// Match ceiling when the message carries no count directive
    pub default_ceiling: usize,
    /// Upper bound for any count directive
    pub hard_ceiling: usize,
    /// Minimum prediction length when a line gives none
    pub default_min_output_length: u32,
    /// Minimum run of spaces separating teams from tournament on numbered lines
    pub min_column_gap: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            default_ceiling: DEFAULT_MATCH_CEILING,
            hard_ceiling: HARD_MATCH_CEILING,
            default_min_output_length: crate::match_model::DEFAULT_MIN_OUTPUT_LENGTH,
            min_column_gap: DEFAULT_COLUMN_GAP,
        }
    }
}

/// Recovery configuration for upstream service calls
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Timeout for a single upstream call in seconds
    pub operation_timeout_secs: u64,
    /// Circuit breaker failure threshold
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 1000,  // 1 second
            max_retry_delay_ms: 10000,  // 10 seconds
            operation_timeout_secs: 60, // LLM completions are slow
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

/// Per-user sliding window limits
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Accepted messages per user within one window
    pub max_requests: usize,
    /// Window length in seconds
    pub window_secs: u64,
    /// How often expired entries are swept, in seconds
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window_secs: 60,
            sweep_interval_secs: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FulfillmentConfig {
    /// Matches looked up and predicted at the same time for one message
    pub max_concurrent_matches: usize,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            max_concurrent_matches: 3,
        }
    }
}

/// OpenAI-compatible chat completion settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

/// TheSportsDB client settings
#[derive(Debug, Clone)]
pub struct SportsDbConfig {
    pub api_key: String,
    pub base_url: String,
    /// Recent results included in a team report
    pub recent_results_limit: usize,
    /// Players included in a team report
    pub roster_limit: usize,
    pub request_timeout_secs: u64,
}

impl Default for SportsDbConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_SPORTSDB_API_KEY.to_string(),
            base_url: DEFAULT_SPORTSDB_BASE_URL.to_string(),
            recent_results_limit: 5,
            roster_limit: 10,
            request_timeout_secs: 15,
        }
    }
}

/// Complete bot configuration, usually read from the environment
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub llm: LlmConfig,
    pub sports_db: SportsDbConfig,
    pub parser: ParserConfig,
    pub recovery: RecoveryConfig,
    pub rate_limit: RateLimitConfig,
    pub fulfillment: FulfillmentConfig,
    /// Long polling instead of the webhook listener
    pub use_polling: bool,
    /// Public base URL of the webhook
    pub app_url: Option<String>,
    pub port: u16,
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    ///
    /// # Errors
    ///
    /// Returns an error when a required key is missing, a numeric value does
    /// not parse, or webhook mode is selected without `APP_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;

        let mut llm = LlmConfig::new(required(&lookup, "OPENAI_API_KEY")?);
        if let Some(base_url) = non_empty(&lookup, "OPENAI_BASE_URL") {
            llm.base_url = base_url;
        }
        if let Some(model) = non_empty(&lookup, "OPENAI_MODEL") {
            llm.model = model;
        }
        llm.max_tokens = parse_or(&lookup, "OPENAI_MAX_TOKENS", llm.max_tokens)?;

        let mut sports_db = SportsDbConfig::default();
        if let Some(api_key) = non_empty(&lookup, "SPORTSDB_API_KEY") {
            sports_db.api_key = api_key;
        }
        if let Some(base_url) = non_empty(&lookup, "SPORTSDB_BASE_URL") {
            sports_db.base_url = base_url;
        }

        let mut parser = ParserConfig::default();
        parser.max_input_chars = parse_or(&lookup, "MAX_INPUT_CHARS", parser.max_input_chars)?;
        parser.default_ceiling = parse_or(&lookup, "DEFAULT_MATCH_CEILING", parser.default_ceiling)?
            .clamp(1, parser.hard_ceiling);

        let mut rate_limit = RateLimitConfig::default();
        rate_limit.max_requests =
            parse_or(&lookup, "RATE_LIMIT_MAX_REQUESTS", rate_limit.max_requests)?;
        rate_limit.window_secs = parse_or(&lookup, "RATE_LIMIT_WINDOW_SECS", rate_limit.window_secs)?;

        let use_polling = non_empty(&lookup, "USE_POLLING")
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);
        let app_url = non_empty(&lookup, "APP_URL");
        if !use_polling && app_url.is_none() {
            bail!("APP_URL must be set unless USE_POLLING=true");
        }
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            telegram_token,
            llm,
            sports_db,
            parser,
            recovery: RecoveryConfig::default(),
            rate_limit,
            fulfillment: FulfillmentConfig::default(),
            use_polling,
            app_url,
            port,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).with_context(|| format!("{key} must be set"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
