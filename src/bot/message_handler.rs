//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, warn};

use crate::fulfillment::Fulfiller;
use crate::localization::{t_args_lang, t_lang};
use crate::match_parser::{MatchParser, ParseReport};
use crate::rate_limiter::{InFlightPermit, Rejection, RequestGuard};
use crate::sports_data::{Lookup, TeamDataSource};
use crate::team_aliases::team_alias;

use super::ui_builder::{
    format_block_header, format_outcome, format_skipped_lines, format_team_report, split_message,
    TELEGRAM_MESSAGE_LIMIT,
};

/// Prefix some clients put in front of forwarded requests
pub const REQUEST_PREFIX: &str = "@Get articles";

/// Services shared by every handler invocation
pub struct AppState {
    pub parser: MatchParser,
    pub guard: RequestGuard,
    pub fulfiller: Fulfiller,
    pub teams: Arc<dyn TeamDataSource>,
}

pub async fn message_handler(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_deref());

    match msg.text() {
        Some(text) => handle_text_message(&bot, &msg, text, state, language_code).await,
        None => {
            debug!(user_id = %msg.chat.id, "Ignoring non-text message");
            bot.send_message(msg.chat.id, t_lang("unsupported-message", language_code))
                .await?;
            Ok(())
        }
    }
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    text: &str,
    state: Arc<AppState>,
    language_code: Option<&str>,
) -> Result<()> {
    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    let (command, argument) = split_command(text);
    match command {
        Some("/start") => {
            bot.send_message(msg.chat.id, t_lang("start-message", language_code))
                .await?;
        }
        Some("/help") => {
            bot.send_message(msg.chat.id, t_lang("help-message", language_code))
                .await?;
        }
        Some("/team") => {
            handle_team_command(bot, msg.chat.id, argument, &state, language_code).await?;
        }
        _ => {
            handle_match_request(bot, msg.chat.id, text, state, language_code).await?;
        }
    }

    Ok(())
}

/// Split `/command@botname rest` into the bare command and its argument
pub fn split_command(text: &str) -> (Option<&str>, &str) {
    let text = text.trim();
    if !text.starts_with('/') {
        return (None, text);
    }
    let (head, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let command = head.split('@').next().unwrap_or(head);
    (Some(command), rest.trim())
}

/// Remove the request prefix wherever it appears
pub fn strip_request_prefix(text: &str) -> String {
    text.replace(REQUEST_PREFIX, "").trim().to_string()
}

async fn handle_team_command(
    bot: &Bot,
    chat_id: ChatId,
    team_name: &str,
    state: &AppState,
    language_code: Option<&str>,
) -> Result<()> {
    if team_name.is_empty() {
        bot.send_message(chat_id, t_lang("team-usage", language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(
        chat_id,
        t_args_lang("team-searching", &[("team", team_name)], language_code),
    )
    .await?;

    match state.teams.team_report(team_name, team_alias(team_name)).await {
        Lookup::Found(report) => {
            info!(user_id = %chat_id, team = team_name, "Team report sent");
            send_long(bot, chat_id, &format_team_report(&report)).await?;
        }
        Lookup::NotFound => {
            bot.send_message(
                chat_id,
                t_args_lang("team-not-found", &[("team", team_name)], language_code),
            )
            .await?;
        }
    }
    Ok(())
}

async fn handle_match_request(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    state: Arc<AppState>,
    language_code: Option<&str>,
) -> Result<()> {
    let permit = match state.guard.try_acquire(chat_id.0) {
        Ok(permit) => permit,
        Err(Rejection::Busy) => {
            info!(user_id = %chat_id, "Request rejected, previous one still running");
            bot.send_message(chat_id, t_lang("busy", language_code)).await?;
            return Ok(());
        }
        Err(Rejection::RateLimited { retry_after }) => {
            info!(user_id = %chat_id, retry_after_secs = retry_after.as_secs(), "Request rate limited");
            let seconds = retry_after.as_secs().max(1).to_string();
            bot.send_message(
                chat_id,
                t_args_lang("rate-limited", &[("seconds", seconds.as_str())], language_code),
            )
            .await?;
            return Ok(());
        }
    };

    let content = strip_request_prefix(text);
    let report = match state.parser.parse_report(&content) {
        Ok(report) => report,
        Err(e) => {
            info!(user_id = %chat_id, error = %e, "Message could not be parsed");
            let reply = format!(
                "{}\n\n{}",
                t_lang("parse-failed", language_code),
                t_lang("help-message", language_code)
            );
            bot.send_message(chat_id, reply).await?;
            return Ok(());
        }
    };

    info!(
        user_id = %chat_id,
        matches = report.total_matches(),
        blocks = report.blocks.len(),
        dialect = ?report.dialect,
        "Match request parsed"
    );

    bot.send_message(chat_id, t_lang("processing", language_code))
        .await?;
    if report.total_matches() >= report.ceiling {
        let count = report.ceiling.to_string();
        bot.send_message(
            chat_id,
            t_args_lang("ceiling-notice", &[("count", count.as_str())], language_code),
        )
        .await?;
    }
    if let Some(skipped) = format_skipped_lines(&report.skipped, language_code) {
        send_long(bot, chat_id, &skipped).await?;
    }

    let bot = bot.clone();
    let language_code = language_code.map(str::to_string);
    tokio::spawn(async move {
        if let Err(e) = deliver_outcomes(&bot, chat_id, report, &state, permit, language_code.as_deref()).await {
            error!(user_id = %chat_id, error = %e, "Failed to deliver predictions");
            let _ = bot
                .send_message(chat_id, t_lang("error-processing", language_code.as_deref()))
                .await;
        }
    });

    Ok(())
}

/// Stream outcomes to the chat as they complete
///
/// The permit is held until every outcome has been delivered.
async fn deliver_outcomes(
    bot: &Bot,
    chat_id: ChatId,
    report: ParseReport,
    state: &AppState,
    _permit: InFlightPermit,
    language_code: Option<&str>,
) -> Result<()> {
    let headers: Vec<String> = report
        .blocks
        .iter()
        .map(|block| format_block_header(block, language_code))
        .collect();
    let mut announced = HashSet::new();
    let mut delivered = 0usize;

    let mut outcomes = state.fulfiller.spawn(report.blocks);
    while let Some(outcome) = outcomes.recv().await {
        if announced.insert(outcome.block_index) {
            if let Some(header) = headers.get(outcome.block_index) {
                bot.send_message(chat_id, header).await?;
            }
        }
        send_long(bot, chat_id, &format_outcome(&outcome, language_code)).await?;
        delivered += 1;
    }

    if delivered == 0 {
        warn!(user_id = %chat_id, "Fulfillment produced no outcomes");
    }
    info!(user_id = %chat_id, delivered, "Predictions delivered");
    bot.send_message(chat_id, t_lang("processing-complete", language_code))
        .await?;
    Ok(())
}

/// Send text, split to fit Telegram's message limit
pub async fn send_long(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    for part in split_message(text, TELEGRAM_MESSAGE_LIMIT) {
        if part.trim().is_empty() {
            continue;
        }
        bot.send_message(chat_id, part).await?;
    }
    Ok(())
}
