//! # Parse Error Types Module
//!
//! Error types for the match-request parser. Only [`ParseError`] ever reaches
//! the caller; [`LineError`] describes a single dropped line and is reported
//! alongside a successful result.

use serde::{Deserialize, Serialize};

/// Failure to recover any match request from a message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Neither grammar nor the last-resort pairing found a team pair
    #[error("no match requests recognised in {lines} non-empty line(s)")]
    Unrecoverable { lines: usize },
}

/// Why a line that looked like a match was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum LineError {
    /// Numbered line without the column gap between teams and tournament
    #[error("no column gap between teams and tournament")]
    MissingColumnGap,

    /// Teams segment without a " - " separator
    #[error("no separator between team names")]
    MissingTeamSeparator,

    /// A team name failed the minimum-length guard
    #[error("team name '{0}' is too short")]
    TeamNameTooShort(String),
}

/// A line dropped during strict-grammar extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// Zero-based line index in the original message
    pub line_number: usize,
    pub line: String,
    pub reason: LineError,
}
