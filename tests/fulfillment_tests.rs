//! # Fulfillment Tests
//!
//! Fan-out of parsed requests to lookups and predictions, using in-memory
//! collaborators.

use async_trait::async_trait;
use match_forecast::bot_config::FulfillmentConfig;
use match_forecast::fulfillment::{Fulfiller, MatchOutcome, OutcomeKind};
use match_forecast::match_model::{DateBlock, MatchRequest};
use match_forecast::prediction::{MatchContext, Prediction, Predictor};
use match_forecast::sports_data::{
    FixtureSource, Lookup, Pairing, RecentResult, TeamDataSource, TeamReport,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Knows only the teams it was created with
struct FakeTeams {
    known: Vec<&'static str>,
}

#[async_trait]
impl TeamDataSource for FakeTeams {
    async fn team_report(&self, name: &str, _english_alias: Option<&str>) -> Lookup<TeamReport> {
        if !self.known.iter().any(|known| *known == name) {
            return Lookup::NotFound;
        }
        Lookup::Found(TeamReport {
            team_name: name.to_string(),
            matched_name: name.to_string(),
            manager: None,
            league: None,
            league_position: None,
            recent_results: vec![RecentResult {
                date: "2024-03-10".to_string(),
                home_team: name.to_string(),
                away_team: "Соперник".to_string(),
                home_score: "1".to_string(),
                away_score: "0".to_string(),
            }],
            roster: Vec::new(),
        })
    }
}

/// Serves fixed pairings for one tournament
struct FakeFixtures {
    tournament: &'static str,
    pairings: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl FixtureSource for FakeFixtures {
    async fn fixtures(
        &self,
        tournament: &str,
        _english_alias: Option<&str>,
        _date_phrase: &str,
        limit: usize,
    ) -> Vec<Pairing> {
        if tournament != self.tournament {
            return Vec::new();
        }
        self.pairings
            .iter()
            .take(limit)
            .map(|(home, away)| Pairing {
                home_team: home.to_string(),
                away_team: away.to_string(),
                tournament: format!("{tournament} (тур)"),
            })
            .collect()
    }
}

/// Records contexts and fails for any match involving `failing_team`
#[derive(Default)]
struct FakePredictor {
    failing_team: Option<&'static str>,
    delay: Duration,
    seen: Mutex<Vec<MatchContext>>,
    running: AtomicUsize,
    max_running: AtomicUsize,
}

#[async_trait]
impl Predictor for FakePredictor {
    async fn predict(&self, context: &MatchContext) -> Prediction {
        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(running, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        self.seen.lock().push(context.clone());
        match self.failing_team {
            Some(team) if context.team1 == team || context.team2 == team => {
                Prediction::Failed("service unavailable".to_string())
            }
            _ => Prediction::Generated(format!("Прогноз {}", context.team_label())),
        }
    }
}

fn create_fulfiller(predictor: Arc<FakePredictor>, max_concurrent_matches: usize) -> Fulfiller {
    let teams = Arc::new(FakeTeams {
        known: vec!["Спартак", "ЦСКА", "Arsenal"],
    });
    let fixtures = Arc::new(FakeFixtures {
        tournament: "АПЛ",
        pairings: vec![("Arsenal", "Chelsea"), ("Everton", "Fulham"), ("Brentford", "Wolves")],
    });
    Fulfiller::new(
        teams,
        fixtures,
        predictor,
        &FulfillmentConfig {
            max_concurrent_matches,
        },
    )
}

async fn collect(fulfiller: &Fulfiller, blocks: Vec<DateBlock>) -> Vec<MatchOutcome> {
    let mut receiver = fulfiller.spawn(blocks);
    let mut outcomes = Vec::new();
    while let Some(outcome) = receiver.recv().await {
        outcomes.push(outcome);
    }
    outcomes.sort_by(|a, b| (a.block_index, &a.label).cmp(&(b.block_index, &b.label)));
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_matches_across_blocks() {
        let predictor = Arc::new(FakePredictor::default());
        let fulfiller = create_fulfiller(predictor.clone(), 3);

        let mut first = DateBlock::new("20 марта", "15 марта");
        first.push(MatchRequest::single("Спартак", "ЦСКА", "РПЛ", 1000).with_sequence_number(Some(1)));
        let mut second = DateBlock::new("21 марта", "");
        second.push(MatchRequest::single("Зенит", "Ростов", "РПЛ", 1500));

        let outcomes = collect(&fulfiller, vec![first, second]).await;
        assert_eq!(outcomes.len(), 2);

        assert_eq!(outcomes[0].block_index, 0);
        assert_eq!(outcomes[0].sequence_number, Some(1));
        assert_eq!(outcomes[0].label, "Спартак - ЦСКА");
        assert_eq!(
            outcomes[0].kind,
            OutcomeKind::Prediction("Прогноз Спартак - ЦСКА".to_string())
        );
        assert_eq!(outcomes[1].block_index, 1);
        assert_eq!(outcomes[1].tournament, "РПЛ");

        let seen = predictor.seen.lock();
        let zenit = seen
            .iter()
            .find(|context| context.team1 == "Зенит")
            .expect("Zenit match should be predicted");
        assert_eq!(zenit.date, "21 марта");
        assert_eq!(zenit.min_output_length, 1500);
    }

    #[tokio::test]
    async fn test_missing_team_data_uses_placeholders() {
        let predictor = Arc::new(FakePredictor::default());
        let fulfiller = create_fulfiller(predictor.clone(), 3);

        let mut block = DateBlock::new("завтра", "");
        block.push(MatchRequest::single("Спартак", "Неизвестные", "РПЛ", 1000));
        collect(&fulfiller, vec![block]).await;

        let seen = predictor.seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].team1_form.contains("2024-03-10: Спартак 1:0 Соперник"));
        assert!(seen[0].team1_roster.contains("Информация о составе отсутствует"));
        assert_eq!(seen[0].team2_form, "Нет информации о последних матчах Неизвестные");
        assert_eq!(seen[0].team2_roster, "Нет информации о составе Неизвестные");
    }

    #[tokio::test]
    async fn test_failed_prediction_does_not_block_siblings() {
        let predictor = Arc::new(FakePredictor {
            failing_team: Some("ЦСКА"),
            ..FakePredictor::default()
        });
        let fulfiller = create_fulfiller(predictor, 3);

        let mut block = DateBlock::new("завтра", "");
        block.push(MatchRequest::single("Спартак", "ЦСКА", "РПЛ", 1000));
        block.push(MatchRequest::single("Зенит", "Ростов", "РПЛ", 1000));

        let outcomes = collect(&fulfiller, vec![block]).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0].kind,
            OutcomeKind::Prediction("Прогноз Зенит - Ростов".to_string())
        );
        assert_eq!(
            outcomes[1].kind,
            OutcomeKind::PredictionFailed("service unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn test_bulk_request_expands_to_fixtures() {
        let predictor = Arc::new(FakePredictor::default());
        let fulfiller = create_fulfiller(predictor, 3);

        let mut block = DateBlock::new("20 марта", "");
        block.push(MatchRequest::bulk(2, "АПЛ", 1000).with_sequence_number(Some(4)));

        let outcomes = collect(&fulfiller, vec![block]).await;
        let labels: Vec<&str> = outcomes.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Arsenal - Chelsea", "Everton - Fulham"]);
        assert!(outcomes.iter().all(|o| o.tournament == "АПЛ (тур)"));
        assert!(outcomes.iter().all(|o| o.sequence_number == Some(4)));
    }

    #[tokio::test]
    async fn test_bulk_request_without_fixtures() {
        let predictor = Arc::new(FakePredictor::default());
        let fulfiller = create_fulfiller(predictor.clone(), 3);

        let mut block = DateBlock::new("20 марта", "");
        block.push(MatchRequest::bulk(3, "Ла Лига", 1000));

        let outcomes = collect(&fulfiller, vec![block]).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::NoFixtures);
        assert_eq!(outcomes[0].label, "Ла Лига");
        assert!(predictor.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let predictor = Arc::new(FakePredictor {
            delay: Duration::from_millis(20),
            ..FakePredictor::default()
        });
        let fulfiller = create_fulfiller(predictor.clone(), 2);

        let mut block = DateBlock::new("завтра", "");
        for n in 0..6 {
            block.push(MatchRequest::single(
                format!("Хозяева{n}"),
                format!("Гости{n}"),
                "РПЛ",
                1000,
            ));
        }

        let outcomes = collect(&fulfiller, vec![block]).await;
        assert_eq!(outcomes.len(), 6);
        assert!(predictor.max_running.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_empty_input_closes_channel() {
        let fulfiller = create_fulfiller(Arc::new(FakePredictor::default()), 3);
        assert!(collect(&fulfiller, Vec::new()).await.is_empty());
    }
}
