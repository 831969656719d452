//! Property-based tests for the match-request parser
//!
//! These check laws that must hold for any input: parsing is a pure
//! function, the request ceiling is never exceeded, and plain
//! `A - B` lines are recovered one-to-one.

use match_forecast::bot_config::{ParserConfig, HARD_MATCH_CEILING};
use match_forecast::match_model::{total_matches, UNKNOWN_TOURNAMENT};
use match_forecast::match_parser::MatchParser;
use proptest::prelude::*;

fn create_parser() -> MatchParser {
    MatchParser::new(ParserConfig::default()).expect("Default parser config should be valid")
}

/// Capitalised Cyrillic word that cannot be read as a date phrase
fn team_name() -> impl Strategy<Value = String> {
    "[А-Я][а-я]{2,8}".prop_filter("date words are not team names", |name| {
        !matches!(
            name.to_lowercase().as_str(),
            "сегодня" | "завтра" | "послезавтра"
        )
    })
}

fn team_pairs(max: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((team_name(), team_name()), 1..=max)
}

fn render(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(team1, team2)| format!("{team1} - {team2}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod parser_law_tests {
    use super::*;

    proptest! {
        #[test]
        fn parse_is_idempotent(text in "\\PC{0,200}") {
            let parser = create_parser();
            prop_assert_eq!(parser.parse(&text), parser.parse(&text));
        }

        #[test]
        fn parse_never_exceeds_hard_ceiling(text in "(\\PC{0,40}\n){0,30}") {
            let parser = create_parser();
            if let Ok(blocks) = parser.parse(&text) {
                prop_assert!(total_matches(&blocks) <= HARD_MATCH_CEILING);
                prop_assert!(total_matches(&blocks) > 0);
                prop_assert!(blocks.iter().all(|block| !block.display_date.is_empty()));
            }
        }

        #[test]
        fn shorthand_lines_are_recovered_in_order(pairs in team_pairs(5)) {
            let parser = create_parser();
            let blocks = parser.parse(&render(&pairs)).unwrap();

            prop_assert_eq!(blocks.len(), 1);
            let recovered: Vec<(String, String)> = blocks[0]
                .matches
                .iter()
                .filter_map(|request| request.teams())
                .map(|(team1, team2)| (team1.to_string(), team2.to_string()))
                .collect();
            prop_assert_eq!(&recovered, &pairs);
            prop_assert!(blocks[0]
                .matches
                .iter()
                .all(|request| request.tournament == UNKNOWN_TOURNAMENT));
        }

        #[test]
        fn default_ceiling_holds(pairs in team_pairs(12)) {
            let parser = create_parser();
            let blocks = parser.parse(&render(&pairs)).unwrap();
            prop_assert_eq!(total_matches(&blocks), pairs.len().min(5));
        }

        #[test]
        fn directive_raises_ceiling_up_to_hard_cap(
            requested in 1usize..=20,
            pairs in team_pairs(15),
        ) {
            let parser = create_parser();
            let text = format!("{requested} статей\n{}", render(&pairs));
            let blocks = parser.parse(&text).unwrap();

            let ceiling = requested.min(HARD_MATCH_CEILING);
            prop_assert_eq!(total_matches(&blocks), pairs.len().min(ceiling));
        }
    }
}
