//! UI Builder module for formatting chat replies

use crate::fulfillment::{MatchOutcome, OutcomeKind};
use crate::localization::{t_args_lang, t_lang};
use crate::match_model::DateBlock;
use crate::parse_errors::{LineError, SkippedLine};
use crate::sports_data::TeamReport;

/// Maximum characters in one Telegram text message
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Announcement line for a date block
pub fn format_block_header(block: &DateBlock, language_code: Option<&str>) -> String {
    if block.deadline.is_empty() {
        t_args_lang(
            "block-header-no-deadline",
            &[("date", block.display_date.as_str())],
            language_code,
        )
    } else {
        t_args_lang(
            "block-header",
            &[("date", block.display_date.as_str()), ("deadline", block.deadline.as_str())],
            language_code,
        )
    }
}

pub fn format_outcome(outcome: &MatchOutcome, language_code: Option<&str>) -> String {
    let number = outcome
        .sequence_number
        .map(|n| format!("{n}. "))
        .unwrap_or_default();

    match &outcome.kind {
        OutcomeKind::Prediction(text) => format!(
            "{}{}\n\n{}",
            number,
            t_args_lang(
                "prediction-title",
                &[("label", outcome.label.as_str()), ("tournament", outcome.tournament.as_str())],
                language_code,
            ),
            text
        ),
        OutcomeKind::PredictionFailed(reason) => format!(
            "{}{}",
            number,
            t_args_lang(
                "prediction-failed",
                &[("label", outcome.label.as_str()), ("reason", reason.as_str())],
                language_code,
            )
        ),
        OutcomeKind::NoFixtures => format!(
            "{}{}",
            number,
            t_args_lang(
                "no-fixtures",
                &[("tournament", outcome.tournament.as_str())],
                language_code,
            )
        ),
    }
}

fn line_error_key(reason: &LineError) -> &'static str {
    match reason {
        LineError::MissingColumnGap => "skipped-missing-column-gap",
        LineError::MissingTeamSeparator => "skipped-missing-team-separator",
        LineError::TeamNameTooShort(_) => "skipped-team-name-too-short",
    }
}

/// List of dropped lines, `None` when nothing was dropped
pub fn format_skipped_lines(skipped: &[SkippedLine], language_code: Option<&str>) -> Option<String> {
    if skipped.is_empty() {
        return None;
    }

    let mut text = t_lang("skipped-lines", language_code);
    for line in skipped {
        let line_number = (line.line_number + 1).to_string();
        let reason = t_lang(line_error_key(&line.reason), language_code);
        text.push('\n');
        text.push_str(&t_args_lang(
            "skipped-line",
            &[("line", line_number.as_str()), ("text", line.line.as_str()), ("reason", reason.as_str())],
            language_code,
        ));
    }
    Some(text)
}

pub fn format_team_report(report: &TeamReport) -> String {
    let overview = report.overview_text();
    let overview = if overview.is_empty() {
        overview
    } else {
        format!("{overview}\n")
    };
    format!(
        "{} ({})\n\n{}{}\n{}",
        report.team_name,
        report.matched_name,
        overview,
        report.recent_results_text(),
        report.roster_text()
    )
}

/// Split text into parts of at most `limit` characters
///
/// Parts end after a newline when one falls inside the window, otherwise
/// the text is cut at the character limit.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut parts = Vec::new();
    let mut rest = text;

    while rest.chars().count() > limit {
        let cut = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(index, _)| index);
        let split_at = match rest[..cut].rfind('\n') {
            Some(index) if index > 0 => index + 1,
            _ => cut,
        };
        parts.push(rest[..split_at].to_string());
        rest = &rest[split_at..];
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}
