//! # Match Request Data Model
//!
//! This module defines the structures produced by the match-request parser
//! and handed to the data lookup and prediction collaborators.
//!
//! ## Core Concepts
//!
//! - **MatchRequest**: one line item to resolve and predict, either a named
//!   team pair or "all N matches" of a tournament
//! - **DateBlock**: a run of requests sharing one user-declared date and deadline
//!
//! ## Usage
//!
//! ```rust
//! use match_forecast::match_model::{DateBlock, MatchRequest};
//!
//! let mut block = DateBlock::new("20 марта", "15 марта");
//! block.push(MatchRequest::single("Спартак", "ЦСКА", "РПЛ", 1000));
//! assert_eq!(block.matches[0].date, "20 марта");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tournament name used when none can be recovered from the input
pub const UNKNOWN_TOURNAMENT: &str = "Неизвестный турнир";

/// Display date for shorthand requests that carry no date phrase
pub const NEAREST_DATE: &str = "ближайшее время";

/// Character floor for generated predictions when the input gives none
pub const DEFAULT_MIN_OUTPUT_LENGTH: u32 = 1000;

/// What a request asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// One named pair of teams
    Single { team1: String, team2: String },

    /// Every match of the tournament on the block's date, up to `count`
    Bulk { count: u32 },
}

/// One match request recovered from a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Position as typed by the user, display only
    pub sequence_number: Option<u32>,

    pub kind: MatchKind,

    /// Tournament name, or [`UNKNOWN_TOURNAMENT`]
    pub tournament: String,

    /// Minimum character count of the generated prediction
    pub min_output_length: u32,

    /// Copied from the governing [`DateBlock`] when the request is pushed
    pub date: String,
}

impl MatchRequest {
    /// Create a request for a single named pair
    pub fn single(
        team1: impl Into<String>,
        team2: impl Into<String>,
        tournament: impl Into<String>,
        min_output_length: u32,
    ) -> Self {
        Self {
            sequence_number: None,
            kind: MatchKind::Single {
                team1: team1.into(),
                team2: team2.into(),
            },
            tournament: tournament.into(),
            min_output_length,
            date: String::new(),
        }
    }

    /// Create a request for every match of a tournament
    ///
    /// A zero count is raised to 1 so the request always asks for something.
    pub fn bulk(count: u32, tournament: impl Into<String>, min_output_length: u32) -> Self {
        Self {
            sequence_number: None,
            kind: MatchKind::Bulk {
                count: count.max(1),
            },
            tournament: tournament.into(),
            min_output_length,
            date: String::new(),
        }
    }

    pub fn with_sequence_number(mut self, number: Option<u32>) -> Self {
        self.sequence_number = number;
        self
    }

    /// Team pair of a single request
    pub fn teams(&self) -> Option<(&str, &str)> {
        match &self.kind {
            MatchKind::Single { team1, team2 } => Some((team1, team2)),
            MatchKind::Bulk { .. } => None,
        }
    }

    pub fn is_bulk(&self) -> bool {
        matches!(self.kind, MatchKind::Bulk { .. })
    }

    /// Whether the tournament could not be recovered
    pub fn has_unknown_tournament(&self) -> bool {
        self.tournament == UNKNOWN_TOURNAMENT
    }
}

impl fmt::Display for MatchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(number) = self.sequence_number {
            write!(f, "{number}. ")?;
        }
        match &self.kind {
            MatchKind::Single { team1, team2 } => write!(f, "{team1} - {team2}")?,
            MatchKind::Bulk { count } => write!(f, "Все {count} матчей")?,
        }
        write!(f, " ({})", self.tournament)
    }
}

/// A group of requests sharing one date and deadline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateBlock {
    /// Date phrase as typed by the user
    pub display_date: String,

    /// Deadline phrase, empty when the input has none
    pub deadline: String,

    pub matches: Vec<MatchRequest>,
}

impl DateBlock {
    pub fn new(display_date: impl Into<String>, deadline: impl Into<String>) -> Self {
        Self {
            display_date: display_date.into(),
            deadline: deadline.into(),
            matches: Vec::new(),
        }
    }

    /// Append a request, stamping it with this block's date
    pub fn push(&mut self, mut request: MatchRequest) {
        request.date = self.display_date.clone();
        self.matches.push(request);
    }

    pub fn has_date(&self) -> bool {
        !self.display_date.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Total number of requests across all blocks
pub fn total_matches(blocks: &[DateBlock]) -> usize {
    blocks.iter().map(|block| block.matches.len()).sum()
}
