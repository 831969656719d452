//! # Match Forecast Telegram Bot
//!
//! A Telegram bot that reads free-text Russian match requests, looks up
//! team data on TheSportsDB and asks a chat completion model for a written
//! forecast of every match.

pub mod block_assembler;
pub mod bot;
pub mod bot_config;
pub mod circuit_breaker;
pub mod event_dates;
pub mod fulfillment;
pub mod localization;
pub mod match_model;
pub mod match_parser;
pub mod parse_errors;
pub mod prediction;
pub mod rate_limiter;
pub mod recovery;
pub mod service_errors;
pub mod sports_data;
pub mod team_aliases;
pub mod text_processing;
