//! # Match Request Parser
//!
//! Turns a free-text chat message into ordered [`DateBlock`]s.
//!
//! Parsing starts in the strict grammar when the message carries a
//! `на … (не позднее …)` header, otherwise in the shorthand grammar. A strict
//! pass that yields nothing is retried in shorthand, and a shorthand pass
//! that yields nothing falls back to pairing `команда/клуб/ФК <name>` tokens.
//! Only when all three come back empty does parsing fail.
//!
//! ## Usage
//!
//! ```rust
//! use match_forecast::bot_config::ParserConfig;
//! use match_forecast::match_parser::MatchParser;
//!
//! let parser = MatchParser::new(ParserConfig::default()).unwrap();
//! let blocks = parser.parse("Спартак - Зенит").unwrap();
//! assert_eq!(blocks[0].display_date, "ближайшее время");
//! assert_eq!(blocks[0].matches[0].teams(), Some(("Спартак", "Зенит")));
//! ```

use crate::block_assembler::BlockAssembler;
use crate::bot_config::ParserConfig;
use crate::match_model::{total_matches, DateBlock, MatchRequest, NEAREST_DATE, UNKNOWN_TOURNAMENT};
use crate::parse_errors::{LineError, ParseError, SkippedLine};
use crate::text_processing::{
    detect_grammar, find_directive, find_prefixed_teams, is_team_like,
    strip_trailing_parenthetical, truncate_chars, Grammar, LineClass, LineClassifier,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Which layer of the fallback chain produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    Strict,
    Shorthand,
    /// `команда/клуб/ФК <name>` tokens paired in order of appearance
    TeamTokens,
}

impl From<Grammar> for Dialect {
    fn from(grammar: Grammar) -> Self {
        match grammar {
            Grammar::Strict => Dialect::Strict,
            Grammar::Shorthand => Dialect::Shorthand,
        }
    }
}

/// Successful parse with diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub blocks: Vec<DateBlock>,
    pub dialect: Dialect,
    /// Effective request ceiling after any in-text directive
    pub ceiling: usize,
    /// Lines dropped by the dialect that produced the result
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    pub fn total_matches(&self) -> usize {
        total_matches(&self.blocks)
    }
}

/// Free-text match request parser
///
/// Holds no mutable state; one instance is shared across handlers.
#[derive(Debug, Clone)]
pub struct MatchParser {
    config: ParserConfig,
    classifier: LineClassifier,
}

impl MatchParser {
    pub fn new(config: ParserConfig) -> Result<Self, regex::Error> {
        let classifier = LineClassifier::new(config.min_column_gap)?;
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a message into date blocks
    pub fn parse(&self, text: &str) -> Result<Vec<DateBlock>, ParseError> {
        self.parse_report(text).map(|report| report.blocks)
    }

    /// Parse a message and report how the result was obtained
    pub fn parse_report(&self, text: &str) -> Result<ParseReport, ParseError> {
        let text = truncate_chars(text, self.config.max_input_chars);
        let ceiling = self.ceiling_for(text);
        let grammar = detect_grammar(text);
        debug!("Parsing {} chars, grammar {:?}, ceiling {}", text.chars().count(), grammar, ceiling);

        if grammar == Grammar::Strict {
            let (blocks, skipped) = self.assemble_strict(text, ceiling);
            if total_matches(&blocks) > 0 {
                return Ok(self.report(blocks, Dialect::Strict, ceiling, skipped));
            }
            info!("Strict grammar found no matches, retrying as shorthand");
        }

        let blocks = self.assemble_shorthand(text, ceiling);
        if total_matches(&blocks) > 0 {
            return Ok(self.report(blocks, Dialect::Shorthand, ceiling, Vec::new()));
        }

        let blocks = self.pair_team_tokens(text, ceiling);
        if total_matches(&blocks) > 0 {
            info!("Recovered matches from team tokens");
            return Ok(self.report(blocks, Dialect::TeamTokens, ceiling, Vec::new()));
        }

        let lines = text.lines().filter(|line| !line.trim().is_empty()).count();
        warn!("No match requests recognised in {} line(s)", lines);
        Err(ParseError::Unrecoverable { lines })
    }

    /// Request ceiling for a message
    ///
    /// The first `N статей` / `N матчей` directive wins and is clamped to the
    /// hard ceiling. A zero count keeps the default, a count too large for
    /// `usize` is the hard ceiling.
    pub fn ceiling_for(&self, text: &str) -> usize {
        let hard = self.config.hard_ceiling.max(1);
        let default = self.config.default_ceiling.clamp(1, hard);

        match find_directive(text) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    debug!("Ignoring zero directive count");
                    default
                }
                Ok(count) => count.min(hard),
                Err(err) => {
                    debug!("Directive count '{}' out of range ({}), using hard ceiling", raw, err);
                    hard
                }
            },
            None => default,
        }
    }

    fn report(
        &self,
        blocks: Vec<DateBlock>,
        dialect: Dialect,
        ceiling: usize,
        skipped: Vec<SkippedLine>,
    ) -> ParseReport {
        let report = ParseReport {
            blocks,
            dialect,
            ceiling,
            skipped,
        };
        debug!(
            "Parsed {} match(es) in {} block(s) via {:?}",
            report.total_matches(),
            report.blocks.len(),
            dialect
        );
        report
    }

    fn assemble_strict(&self, text: &str, ceiling: usize) -> (Vec<DateBlock>, Vec<SkippedLine>) {
        let mut assembler = BlockAssembler::new(ceiling, "");
        let mut skipped = Vec::new();

        for line in self.classifier.classify(text, Grammar::Strict) {
            if assembler.is_full() {
                break;
            }
            match line.class {
                LineClass::DateHeader { date, deadline } => assembler.open_block(date, deadline),
                LineClass::Numbered {
                    number,
                    body,
                    min_length,
                } => match self.extract_numbered(&body) {
                    Ok((team1, team2, tournament)) => {
                        let request = MatchRequest::single(
                            team1,
                            team2,
                            tournament,
                            self.min_output_length(min_length.as_deref()),
                        )
                        .with_sequence_number(number.parse().ok());
                        assembler.push(request);
                    }
                    Err(reason) => {
                        warn!("Skipping line {}: {}", line.line_number, reason);
                        skipped.push(SkippedLine {
                            line_number: line.line_number,
                            line: line.text,
                            reason,
                        });
                    }
                },
                LineClass::Bulk {
                    number,
                    count,
                    tournament,
                    min_length,
                } => {
                    let request = MatchRequest::bulk(
                        self.bulk_count(&count, ceiling),
                        tournament_or_unknown(&tournament),
                        self.min_output_length(min_length.as_deref()),
                    )
                    .with_sequence_number(number.parse().ok());
                    assembler.push(request);
                }
                _ => {}
            }
        }

        (assembler.finish(), skipped)
    }

    fn extract_numbered(&self, body: &str) -> Result<(String, String, String), LineError> {
        let (teams, tournament) = self
            .classifier
            .split_columns(body)
            .ok_or(LineError::MissingColumnGap)?;
        let (team1, team2) = self
            .classifier
            .split_strict_teams(teams)
            .ok_or(LineError::MissingTeamSeparator)?;

        for team in [&team1, &team2] {
            if !is_team_like(team) {
                return Err(LineError::TeamNameTooShort(team.clone()));
            }
        }

        Ok((team1, team2, tournament_or_unknown(tournament)))
    }

    fn assemble_shorthand(&self, text: &str, ceiling: usize) -> Vec<DateBlock> {
        let mut assembler = BlockAssembler::new(ceiling, NEAREST_DATE);

        for line in self.classifier.classify(text, Grammar::Shorthand) {
            if assembler.is_full() {
                break;
            }
            match line.class {
                LineClass::DateHeader { date, deadline } => assembler.open_block(date, deadline),
                LineClass::Shorthand {
                    number,
                    date,
                    team1,
                    team2,
                    tail,
                } => {
                    if let Some(date) = date {
                        assembler.ensure_block(&date);
                    }
                    let request = MatchRequest::single(
                        team1,
                        team2,
                        tournament_from_tail(&tail),
                        self.config.default_min_output_length,
                    )
                    .with_sequence_number(number.and_then(|n| n.parse().ok()));
                    assembler.push(request);
                }
                _ => {}
            }
        }

        assembler.finish()
    }

    fn pair_team_tokens(&self, text: &str, ceiling: usize) -> Vec<DateBlock> {
        let teams = find_prefixed_teams(text);
        debug!("Found {} prefixed team token(s)", teams.len());

        let mut assembler = BlockAssembler::new(ceiling, NEAREST_DATE);
        for pair in teams.chunks_exact(2) {
            let request = MatchRequest::single(
                &pair[0],
                &pair[1],
                UNKNOWN_TOURNAMENT,
                self.config.default_min_output_length,
            );
            if !assembler.push(request) {
                break;
            }
        }
        assembler.finish()
    }

    fn min_output_length(&self, raw: Option<&str>) -> u32 {
        let Some(raw) = raw else {
            return self.config.default_min_output_length;
        };
        match raw.parse::<u32>() {
            Ok(length) if length > 0 => length,
            _ => {
                debug!("Defaulting min output length, got '{}'", raw);
                self.config.default_min_output_length
            }
        }
    }

    fn bulk_count(&self, raw: &str, ceiling: usize) -> u32 {
        let cap = u32::try_from(ceiling).unwrap_or(u32::MAX).max(1);
        match raw.parse::<u32>() {
            Ok(count) if count > 0 => count.min(cap),
            _ => {
                debug!("Defaulting bulk count, got '{}'", raw);
                1
            }
        }
    }
}

fn tournament_or_unknown(tournament: &str) -> String {
    let tournament = tournament.trim();
    if tournament.is_empty() {
        UNKNOWN_TOURNAMENT.to_string()
    } else {
        tournament.to_string()
    }
}

/// Tournament from the free text after team2 on a shorthand line
fn tournament_from_tail(tail: &str) -> String {
    let tournament = strip_trailing_parenthetical(tail);
    tournament_or_unknown(tournament.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-' | '|')
    }))
}
