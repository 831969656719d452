//! # Text Processing Module
//!
//! This module splits a chat message into logical lines and classifies each
//! line for the match-request parser.
//!
//! ## Features
//!
//! - Strict grammar: `на <дата> (не позднее <дедлайн>)` headers and numbered
//!   `1. Команда1 - Команда2     Турнир (1000)` lines, including the bulk
//!   form `Все N матчей Турнир`
//! - Shorthand grammar: free-form `Команда1 - Команда2` lines with optional
//!   leading date phrases and `N статей` directives
//! - Last-resort scan for `команда/клуб/ФК <name>` tokens
//!
//! Classification is first-match-wins over ordered tables: [`STRICT_RULES`]
//! for whole lines and [`SEPARATORS`] for team pairs. Nothing here fails;
//! unrecognised lines are classified as [`LineClass::Noise`].

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Input grammar a message is parsed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grammar {
    /// Date headers with numbered, column-aligned match lines
    Strict,
    /// Free-form `Team - Team` lines
    Shorthand,
}

/// Classification of one non-empty line
///
/// Numeric captures are kept as raw digit strings; converting them (and
/// falling back to defaults) is the extractor's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Starts a new date block
    DateHeader { date: String, deadline: String },

    /// `N. <body>` where body should hold teams and tournament
    Numbered {
        number: String,
        body: String,
        min_length: Option<String>,
    },

    /// `N. Все K матчей <tournament>`
    Bulk {
        number: String,
        count: String,
        tournament: String,
        min_length: Option<String>,
    },

    /// A team pair found by a separator
    Shorthand {
        number: Option<String>,
        date: Option<String>,
        team1: String,
        team2: String,
        /// Text following team2 on the same line
        tail: String,
    },

    /// `N статей` on a line of its own
    Directive { count: String },

    Noise,
}

/// A classified line with its position in the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Zero-based index among all lines of the message, blank ones included
    pub line_number: usize,
    pub text: String,
    pub class: LineClass,
}

/// One row of the strict-grammar rule table
pub struct LineRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub extract: fn(&Captures<'_>, &str) -> LineClass,
}

/// One row of the team separator table
pub struct Separator {
    pub name: &'static str,
    pub pattern: Regex,
}

const DATE_HEADER_PATTERN: &str = r"(?i)^на\s+(?P<date>.+?)\s*\(\s*не\s+позднее\s+(?P<deadline>[^)]*?)\s*\)[\s:.,!]*$";
const NUMBERED_PATTERN: &str = r"^(?P<num>\d{1,4})[.)]\s+(?P<body>.+?)\s*$";

const MONTHS_GENITIVE: &str =
    "января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря";

lazy_static! {
    /// Strict grammar, in priority order
    pub static ref STRICT_RULES: Vec<LineRule> = vec![
        LineRule {
            name: "date_header",
            pattern: Regex::new(DATE_HEADER_PATTERN).expect("Date header pattern should be valid"),
            extract: extract_date_header,
        },
        LineRule {
            name: "numbered",
            pattern: Regex::new(NUMBERED_PATTERN).expect("Numbered pattern should be valid"),
            extract: extract_numbered,
        },
    ];

    /// Team separators, in priority order
    pub static ref SEPARATORS: Vec<Separator> = vec![
        Separator { name: "spaced_dash", pattern: separator(r"\s+[-–—]+\s+") },
        Separator { name: "versus", pattern: separator(r"(?i)\s+(?:vs|versus|v)\.?\s+") },
        Separator { name: "against", pattern: separator(r"(?i)\s+против\s+") },
        Separator { name: "long_dash", pattern: separator(r"[–—]") },
        Separator { name: "and", pattern: separator(r"(?i)\s+и\s+") },
        Separator { name: "hyphen", pattern: separator(r"-") },
    ];

    static ref BULK_BODY_RE: Regex =
        Regex::new(r"(?i)^все\s+(?P<count>\d+)\s+матч\w*\s*(?P<tournament>.*)$")
            .expect("Bulk pattern should be valid");
    static ref MIN_LENGTH_RE: Regex =
        Regex::new(r"\(\s*(?P<len>\d+)\s*\)").expect("Length pattern should be valid");
    static ref TRAILING_PAREN_RE: Regex =
        Regex::new(r"\s*\([^()]*\)[\s.,;:!]*$").expect("Parenthetical pattern should be valid");
    static ref DIRECTIVE_RE: Regex = Regex::new(
        r"(?i)^(?P<count>\d+)\s+(?:стат(?:ей|ьи|ья)|матч(?:ей|а))\b[\s,.:;-]*"
    )
    .expect("Directive pattern should be valid");
    static ref DATE_PREFIX_RE: Regex = Regex::new(&format!(
        r"(?i)^(?:на\s+)?(?P<date>послезавтра|завтра|сегодня|\d{{1,2}}\.\d{{1,2}}(?:\.\d{{2,4}})?|\d{{1,2}}\s+(?:{MONTHS_GENITIVE}))\b(?:\s*\(\s*не\s+позднее\s+(?P<deadline>[^)]*?)\s*\))?[\s,:;.-]*"
    ))
    .expect("Date prefix pattern should be valid");
    static ref FREE_DATE_RE: Regex = Regex::new(
        r"(?i)^на\s+(?P<date>[^()]+?)\s*(?:\(\s*не\s+позднее\s+(?P<deadline>[^)]*?)\s*\))?[\s:.,!]*$"
    )
    .expect("Free date pattern should be valid");
    static ref LIST_MARKER_RE: Regex = Regex::new(r"^(?:(?P<num>\d{1,3})[.)]|[•*·▪-])\s+")
        .expect("List marker pattern should be valid");
    static ref PREFIXED_TEAM_RE: Regex = Regex::new(
        r#"(?i)(?:^|[^\p{L}])(?:команд[аыеу]|клуб[аеу]?|фк)\s+(?:«(?P<guillemet>[^»]+)»|"(?P<quoted>[^"]+)"|(?P<word>[\p{L}\p{N}][\p{L}\p{N}-]*))"#
    )
    .expect("Prefixed team pattern should be valid");
}

fn separator(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Separator pattern should be valid")
}

fn extract_date_header(caps: &Captures<'_>, _line: &str) -> LineClass {
    LineClass::DateHeader {
        date: caps["date"].trim().to_string(),
        deadline: caps["deadline"].trim().to_string(),
    }
}

fn extract_numbered(caps: &Captures<'_>, line: &str) -> LineClass {
    let number = caps["num"].to_string();
    let min_length = find_min_length(line);
    let body = strip_trailing_parenthetical(&caps["body"]);

    if let Some(bulk) = BULK_BODY_RE.captures(&body) {
        return LineClass::Bulk {
            number,
            count: bulk["count"].to_string(),
            tournament: bulk["tournament"].trim().to_string(),
            min_length,
        };
    }

    LineClass::Numbered {
        number,
        body,
        min_length,
    }
}

/// Last parenthesized integer anywhere in the line
pub fn find_min_length(line: &str) -> Option<String> {
    MIN_LENGTH_RE
        .captures_iter(line)
        .last()
        .map(|caps| caps["len"].to_string())
}

/// Remove one trailing `(…)` group and surrounding whitespace
pub fn strip_trailing_parenthetical(text: &str) -> String {
    TRAILING_PAREN_RE.replace(text, "").trim().to_string()
}

/// Pick the grammar a message starts in
///
/// Strict only when the message carries the header fingerprint
/// `на … (не позднее …`.
pub fn detect_grammar(text: &str) -> Grammar {
    let lowered = text.to_lowercase();
    if lowered.contains("на ") && lowered.contains(" (не позднее ") {
        Grammar::Strict
    } else {
        Grammar::Shorthand
    }
}

/// Cut the input to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            debug!("Input truncated to {} characters", max_chars);
            &text[..byte_index]
        }
        None => text,
    }
}

/// Count of the first `N статей` / `N матчей` directive in the message
pub fn find_directive(text: &str) -> Option<String> {
    text.lines()
        .filter_map(|line| DIRECTIVE_RE.captures(line.trim()))
        .map(|caps| caps["count"].to_string())
        .next()
}

/// Whether a team-name candidate is plausible
///
/// A name needs at least one letter or digit. One-character names are only
/// accepted when the character is a letter, so stray punctuation and lone
/// digits are rejected.
pub fn is_team_like(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(only), None) => only.is_alphabetic(),
        _ => name.chars().any(char::is_alphanumeric),
    }
}

fn between_letters(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_alphabetic() && a.is_alphabetic())
}

fn is_bare_number(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_digit())
}

/// `Спартак 2` / `1 Зенит`: the split landed inside a score
fn is_score(team1: &str, team2: &str) -> bool {
    let last = team1.split_whitespace().next_back().unwrap_or_default();
    let first = team2.split_whitespace().next().unwrap_or_default();
    is_bare_number(last) && is_bare_number(first)
}

/// Trim whitespace, quotes and trailing punctuation around a team name
pub fn clean_team_name(raw: &str) -> String {
    raw.trim_matches(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '"' | '«' | '»' | '\'' | ',' | ';' | ':' | '.' | '!' | '?' | '*' | '•'
            )
    })
    .to_string()
}

/// Splits lines and applies the grammar tables
#[derive(Debug, Clone)]
pub struct LineClassifier {
    /// Column delimiter between the teams and tournament segments
    column_gap: Regex,
}

impl LineClassifier {
    /// Create a classifier whose column delimiter is a tab or at least
    /// `min_column_gap` consecutive spaces
    pub fn new(min_column_gap: usize) -> Result<Self, regex::Error> {
        let gap = min_column_gap.max(2);
        let column_gap = Regex::new(&format!(r"\t+|[ \x{{a0}}]{{{gap},}}"))?;
        Ok(Self { column_gap })
    }

    /// Classify every non-empty line of the message under one grammar
    pub fn classify(&self, text: &str, grammar: Grammar) -> Vec<ClassifiedLine> {
        let lines: Vec<ClassifiedLine> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_number, line)| {
                let class = match grammar {
                    Grammar::Strict => self.classify_strict(line),
                    Grammar::Shorthand => self.classify_shorthand(line),
                };
                trace!("Line {} classified as {:?}: '{}'", line_number, class, line);
                ClassifiedLine {
                    line_number,
                    text: line.trim().to_string(),
                    class,
                }
            })
            .collect();

        debug!("Classified {} lines under {:?} grammar", lines.len(), grammar);
        lines
    }

    /// Apply [`STRICT_RULES`] to one line
    pub fn classify_strict(&self, line: &str) -> LineClass {
        let line = line.trim();
        STRICT_RULES
            .iter()
            .find_map(|rule| {
                rule.pattern.captures(line).map(|caps| {
                    trace!("Strict rule '{}' matched", rule.name);
                    (rule.extract)(&caps, line)
                })
            })
            .unwrap_or(LineClass::Noise)
    }

    /// Classify one line under the shorthand grammar
    ///
    /// Leading directive, date phrase and list marker are peeled off in that
    /// order before the remainder is searched for a team pair.
    pub fn classify_shorthand(&self, line: &str) -> LineClass {
        let mut rest = line.trim();

        let mut directive = None;
        if let Some(caps) = DIRECTIVE_RE.captures(rest) {
            directive = Some(caps["count"].to_string());
            rest = rest[caps.get(0).map_or(0, |m| m.end())..].trim();
        }

        let mut date = None;
        let mut deadline = None;
        if let Some(caps) = DATE_PREFIX_RE.captures(rest) {
            date = Some(caps["date"].to_string());
            deadline = caps.name("deadline").map(|m| m.as_str().trim().to_string());
            rest = rest[caps.get(0).map_or(0, |m| m.end())..].trim();
        }

        let mut number = None;
        if let Some(caps) = LIST_MARKER_RE.captures(rest) {
            number = caps.name("num").map(|m| m.as_str().to_string());
            rest = rest[caps.get(0).map_or(0, |m| m.end())..].trim();
        }

        if let Some((team1, team2, tail)) = self.find_team_pair(rest) {
            return LineClass::Shorthand {
                number,
                date,
                team1,
                team2,
                tail,
            };
        }

        if let Some(date) = date {
            return LineClass::DateHeader {
                date,
                deadline: deadline.unwrap_or_default(),
            };
        }

        if let Some(caps) = FREE_DATE_RE.captures(rest) {
            return LineClass::DateHeader {
                date: caps["date"].trim().to_string(),
                deadline: caps
                    .name("deadline")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            };
        }

        match directive {
            Some(count) => LineClass::Directive { count },
            None => LineClass::Noise,
        }
    }

    /// Find the first separator occurrence that yields two plausible teams
    ///
    /// Returns `(team1, team2, tail)` where tail is the free text after team2.
    /// A bare hyphen only separates when letters sit on both sides of it, so
    /// `ЧМ-2026` and `2-1` stay whole. Sides that are a bare number, or a
    /// score straddling the separator, never pair.
    pub fn find_team_pair(&self, text: &str) -> Option<(String, String, String)> {
        for separator in SEPARATORS.iter() {
            for found in separator.pattern.find_iter(text) {
                if separator.name == "hyphen" && !between_letters(text, found.start(), found.end()) {
                    continue;
                }

                let team1 = clean_team_name(&text[..found.start()]);
                let (team2, tail) = self.split_team_tail(&text[found.end()..]);

                if is_bare_number(&team1) || is_bare_number(&team2) || is_score(&team1, &team2) {
                    trace!("Rejecting numeric split '{}' / '{}'", team1, team2);
                    continue;
                }

                if is_team_like(&team1) && is_team_like(&team2) {
                    trace!(
                        "Separator '{}' split '{}' into '{}' / '{}'",
                        separator.name,
                        text,
                        team1,
                        team2
                    );
                    return Some((team1, team2, tail));
                }
            }
        }
        None
    }

    /// Split the right-hand side of a pair into team2 and trailing text
    ///
    /// The boundary is the column gap, else the first comma.
    fn split_team_tail(&self, right: &str) -> (String, String) {
        let right = right.trim();
        let split = self
            .column_gap
            .find(right)
            .map(|m| (&right[..m.start()], &right[m.end()..]))
            .or_else(|| right.split_once(','));

        match split {
            Some((team, tail)) => (
                clean_team_name(&strip_trailing_parenthetical(team)),
                tail.trim().to_string(),
            ),
            None => (
                clean_team_name(&strip_trailing_parenthetical(right)),
                String::new(),
            ),
        }
    }

    /// Split a numbered body into the teams and tournament columns
    pub fn split_columns<'a>(&self, body: &'a str) -> Option<(&'a str, &'a str)> {
        self.column_gap
            .find(body)
            .map(|m| (body[..m.start()].trim(), body[m.end()..].trim()))
    }

    /// Split a strict teams segment on a spaced dash
    pub fn split_strict_teams(&self, teams: &str) -> Option<(String, String)> {
        let separator = SEPARATORS.first()?;
        let found = separator.pattern.find(teams)?;
        Some((
            clean_team_name(&teams[..found.start()]),
            clean_team_name(&teams[found.end()..]),
        ))
    }
}

/// Team names introduced by `команда`, `клуб` or `ФК`, in order of appearance
pub fn find_prefixed_teams(text: &str) -> Vec<String> {
    PREFIXED_TEAM_RE
        .captures_iter(text)
        .filter_map(|caps| {
            caps.name("guillemet")
                .or_else(|| caps.name("quoted"))
                .or_else(|| caps.name("word"))
                .map(|m| clean_team_name(m.as_str()))
        })
        .filter(|name| is_team_like(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_classifier() -> LineClassifier {
        LineClassifier::new(3).unwrap()
    }

    #[test]
    fn test_date_header_classification() {
        let classifier = create_classifier();
        assert_eq!(
            classifier.classify_strict("на 20 марта (не позднее 15 марта)"),
            LineClass::DateHeader {
                date: "20 марта".to_string(),
                deadline: "15 марта".to_string(),
            }
        );
    }

    #[test]
    fn test_numbered_line_classification() {
        let classifier = create_classifier();
        let class = classifier.classify_strict("1. Спартак - ЦСКА                РПЛ (1500)");
        assert_eq!(
            class,
            LineClass::Numbered {
                number: "1".to_string(),
                body: "Спартак - ЦСКА                РПЛ".to_string(),
                min_length: Some("1500".to_string()),
            }
        );
    }

    #[test]
    fn test_bulk_line_classification() {
        let classifier = create_classifier();
        let class = classifier.classify_strict("2. Все 6 матчей                ЧМ-2026. Европа (2000)");
        assert_eq!(
            class,
            LineClass::Bulk {
                number: "2".to_string(),
                count: "6".to_string(),
                tournament: "ЧМ-2026. Европа".to_string(),
                min_length: Some("2000".to_string()),
            }
        );
    }

    #[test]
    fn test_strict_noise() {
        let classifier = create_classifier();
        assert_eq!(classifier.classify_strict("Спасибо!"), LineClass::Noise);
        assert_eq!(classifier.classify_strict("Спартак - Зенит"), LineClass::Noise);
    }

    #[test]
    fn test_min_length_uses_last_parenthesized_integer() {
        assert_eq!(find_min_length("1. A (2) - B   X (1200)"), Some("1200".to_string()));
        assert_eq!(find_min_length("1. A - B   X"), None);
        assert_eq!(find_min_length("1. A - B   X (abc)"), None);
    }

    #[test]
    fn test_shorthand_separators() {
        let classifier = create_classifier();
        let cases = vec![
            ("Спартак - Зенит", "Спартак", "Зенит"),
            ("Спартак – Зенит", "Спартак", "Зенит"),
            ("Спартак—Зенит", "Спартак", "Зенит"),
            ("Real Madrid vs Barcelona", "Real Madrid", "Barcelona"),
            ("Ливерпуль против Челси", "Ливерпуль", "Челси"),
            ("Бавария и Боруссия", "Бавария", "Боруссия"),
            ("Спартак-Зенит", "Спартак", "Зенит"),
            ("Пари Сен-Жермен - Марсель", "Пари Сен-Жермен", "Марсель"),
        ];

        for (line, team1, team2) in cases {
            match classifier.classify_shorthand(line) {
                LineClass::Shorthand {
                    team1: t1,
                    team2: t2,
                    ..
                } => {
                    assert_eq!(t1, team1, "team1 mismatch for '{}'", line);
                    assert_eq!(t2, team2, "team2 mismatch for '{}'", line);
                }
                other => panic!("'{}' classified as {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_shorthand_rejects_punctuation_and_scores() {
        let classifier = create_classifier();
        assert_eq!(classifier.classify_shorthand("- -"), LineClass::Noise);
        assert_eq!(classifier.classify_shorthand("2-1"), LineClass::Noise);
        assert_eq!(classifier.classify_shorthand("hello world"), LineClass::Noise);
        assert_eq!(classifier.classify_shorthand("Смотрю ЧМ-2026"), LineClass::Noise);
    }

    #[test]
    fn test_team_pair_ignores_numeric_hyphens() {
        let classifier = create_classifier();
        assert_eq!(classifier.find_team_pair("Спартак 2-1 Зенит"), None);
        assert_eq!(classifier.find_team_pair("Спартак 2 - 1 Зенит"), None);
        assert_eq!(classifier.find_team_pair("Смотрю ЧМ-2026"), None);
        assert_eq!(classifier.find_team_pair("2026 - 2027"), None);
        assert_eq!(
            classifier.find_team_pair("Спартак-Зенит"),
            Some(("Спартак".to_string(), "Зенит".to_string(), String::new()))
        );
        assert_eq!(
            classifier.find_team_pair("Бавария - 1860 Мюнхен"),
            Some(("Бавария".to_string(), "1860 Мюнхен".to_string(), String::new()))
        );
        assert_eq!(
            classifier.find_team_pair("Команда1 - Соперник1"),
            Some(("Команда1".to_string(), "Соперник1".to_string(), String::new()))
        );
    }

    #[test]
    fn test_shorthand_with_date_and_tail() {
        let classifier = create_classifier();
        let class = classifier.classify_shorthand("завтра Спартак - Зенит, РПЛ (2000)");
        assert_eq!(
            class,
            LineClass::Shorthand {
                number: None,
                date: Some("завтра".to_string()),
                team1: "Спартак".to_string(),
                team2: "Зенит".to_string(),
                tail: "РПЛ (2000)".to_string(),
            }
        );
    }

    #[test]
    fn test_shorthand_list_marker() {
        let classifier = create_classifier();
        match classifier.classify_shorthand("3) Арсенал vs Челси") {
            LineClass::Shorthand { number, team1, .. } => {
                assert_eq!(number, Some("3".to_string()));
                assert_eq!(team1, "Арсенал");
            }
            other => panic!("unexpected class {:?}", other),
        }
    }

    #[test]
    fn test_shorthand_date_lines() {
        let classifier = create_classifier();
        let cases = vec![
            ("на завтра", "завтра", ""),
            ("20.03.2025", "20.03.2025", ""),
            ("21 марта", "21 марта", ""),
            ("на 20 марта (не позднее 15 марта)", "20 марта", "15 марта"),
            ("на выходные", "выходные", ""),
        ];

        for (line, date, deadline) in cases {
            assert_eq!(
                classifier.classify_shorthand(line),
                LineClass::DateHeader {
                    date: date.to_string(),
                    deadline: deadline.to_string(),
                },
                "date line '{}'",
                line
            );
        }
    }

    #[test]
    fn test_directive_line() {
        let classifier = create_classifier();
        assert_eq!(
            classifier.classify_shorthand("7 статей"),
            LineClass::Directive {
                count: "7".to_string()
            }
        );
        assert_eq!(find_directive("привет\n3 статьи\nA - B"), Some("3".to_string()));
        assert_eq!(find_directive("1. Все 6 матчей   РПЛ"), None);
    }

    #[test]
    fn test_detect_grammar() {
        assert_eq!(
            detect_grammar("на 20 марта (не позднее 15 марта)\n1. A - B   X"),
            Grammar::Strict
        );
        assert_eq!(detect_grammar("Спартак - Зенит"), Grammar::Shorthand);
        assert_eq!(detect_grammar("на завтра\nСпартак - Зенит"), Grammar::Shorthand);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("Спартак", 3), "Спа");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_split_columns() {
        let classifier = create_classifier();
        assert_eq!(
            classifier.split_columns("Спартак - ЦСКА                РПЛ"),
            Some(("Спартак - ЦСКА", "РПЛ"))
        );
        assert_eq!(classifier.split_columns("Спартак - ЦСКА\tРПЛ"), Some(("Спартак - ЦСКА", "РПЛ")));
        assert_eq!(classifier.split_columns("Спартак - ЦСКА РПЛ"), None);
    }

    #[test]
    fn test_prefixed_teams() {
        let teams = find_prefixed_teams("Матч: команда Спартак, соперник клуб «Зенит» и ФК Ростов");
        assert_eq!(teams, vec!["Спартак", "Зенит", "Ростов"]);
        assert!(find_prefixed_teams("hello world").is_empty());
    }

    #[test]
    fn test_team_name_guard() {
        assert!(is_team_like("A"));
        assert!(is_team_like("ЦСКА"));
        assert!(is_team_like("05"));
        assert!(!is_team_like(""));
        assert!(!is_team_like("2"));
        assert!(!is_team_like("."));
        assert!(!is_team_like("--"));
    }
}
