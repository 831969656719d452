//! # Fulfillment Module
//!
//! Runs lookups and predictions for parsed match requests.
//!
//! Every request becomes its own tokio task; a semaphore bounds how many
//! run at once. Outcomes are sent over a channel as they complete, so the
//! chat receives fast predictions first and a failing match never holds up
//! its siblings.

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use crate::bot_config::FulfillmentConfig;
use crate::match_model::{DateBlock, MatchKind, MatchRequest};
use crate::prediction::{MatchContext, Prediction, Predictor};
use crate::sports_data::{
    missing_recent_results, missing_roster, FixtureSource, Lookup, TeamDataSource, TeamReport,
};
use crate::team_aliases::{team_alias, tournament_alias};

const OUTCOME_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Prediction(String),
    PredictionFailed(String),
    /// A bulk request found no scheduled matches
    NoFixtures,
}

/// Result of fulfilling one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Index of the date block the request came from
    pub block_index: usize,
    pub sequence_number: Option<u32>,
    /// `Team1 - Team2`, or the tournament for [`OutcomeKind::NoFixtures`]
    pub label: String,
    pub tournament: String,
    pub kind: OutcomeKind,
}

/// One pair of teams ready for lookup and prediction
#[derive(Debug, Clone)]
struct MatchJob {
    block_index: usize,
    sequence_number: Option<u32>,
    team1: String,
    team2: String,
    tournament: String,
    date: String,
    min_output_length: u32,
}

/// Shared handles of the fulfillment collaborators
#[derive(Clone)]
pub struct Fulfiller {
    teams: Arc<dyn TeamDataSource>,
    fixtures: Arc<dyn FixtureSource>,
    predictor: Arc<dyn Predictor>,
    semaphore: Arc<Semaphore>,
}

impl Fulfiller {
    pub fn new(
        teams: Arc<dyn TeamDataSource>,
        fixtures: Arc<dyn FixtureSource>,
        predictor: Arc<dyn Predictor>,
        config: &FulfillmentConfig,
    ) -> Self {
        Self {
            teams,
            fixtures,
            predictor,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_matches.max(1))),
        }
    }

    /// Start fulfilling all requests; outcomes arrive in completion order
    ///
    /// The receiver yields `None` once every request has produced its
    /// outcomes.
    pub fn spawn(&self, blocks: Vec<DateBlock>) -> mpsc::Receiver<MatchOutcome> {
        let (tx, rx) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);

        for (block_index, block) in blocks.into_iter().enumerate() {
            for request in block.matches {
                let fulfiller = self.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    fulfiller.fulfill_request(block_index, request, tx).await;
                });
            }
        }

        rx
    }

    async fn fulfill_request(
        &self,
        block_index: usize,
        request: MatchRequest,
        tx: mpsc::Sender<MatchOutcome>,
    ) {
        match request.kind {
            MatchKind::Single { team1, team2 } => {
                let job = MatchJob {
                    block_index,
                    sequence_number: request.sequence_number,
                    team1,
                    team2,
                    tournament: request.tournament,
                    date: request.date,
                    min_output_length: request.min_output_length,
                };
                let Ok(_permit) = self.semaphore.acquire().await else {
                    return;
                };
                let outcome = self.fulfill_match(job).await;
                send(&tx, outcome).await;
            }
            MatchKind::Bulk { count } => {
                let pairings = {
                    let Ok(_permit) = self.semaphore.acquire().await else {
                        return;
                    };
                    self.fixtures
                        .fixtures(
                            &request.tournament,
                            tournament_alias(&request.tournament),
                            &request.date,
                            usize::try_from(count).unwrap_or(usize::MAX),
                        )
                        .await
                };

                if pairings.is_empty() {
                    info!(tournament = %request.tournament, date = %request.date, "No fixtures for bulk request");
                    send(
                        &tx,
                        MatchOutcome {
                            block_index,
                            sequence_number: request.sequence_number,
                            label: request.tournament.clone(),
                            tournament: request.tournament,
                            kind: OutcomeKind::NoFixtures,
                        },
                    )
                    .await;
                    return;
                }

                debug!(count = pairings.len(), tournament = %request.tournament, "Expanding bulk request");
                for pairing in pairings {
                    let job = MatchJob {
                        block_index,
                        sequence_number: request.sequence_number,
                        team1: pairing.home_team,
                        team2: pairing.away_team,
                        tournament: pairing.tournament,
                        date: request.date.clone(),
                        min_output_length: request.min_output_length,
                    };
                    let fulfiller = self.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let Ok(_permit) = fulfiller.semaphore.acquire().await else {
                            return;
                        };
                        let outcome = fulfiller.fulfill_match(job).await;
                        send(&tx, outcome).await;
                    });
                }
            }
        }
    }

    async fn fulfill_match(&self, job: MatchJob) -> MatchOutcome {
        let (first, second) = tokio::join!(
            self.teams.team_report(&job.team1, team_alias(&job.team1)),
            self.teams.team_report(&job.team2, team_alias(&job.team2)),
        );

        let (team1_form, team1_roster) = report_texts(first, &job.team1);
        let (team2_form, team2_roster) = report_texts(second, &job.team2);

        let context = MatchContext {
            team1: job.team1,
            team2: job.team2,
            tournament: job.tournament,
            date: job.date,
            min_output_length: job.min_output_length,
            team1_form,
            team2_form,
            team1_roster,
            team2_roster,
        };

        let kind = match self.predictor.predict(&context).await {
            Prediction::Generated(text) => OutcomeKind::Prediction(text),
            Prediction::Failed(reason) => OutcomeKind::PredictionFailed(reason),
        };

        MatchOutcome {
            block_index: job.block_index,
            sequence_number: job.sequence_number,
            label: context.team_label(),
            tournament: context.tournament,
            kind,
        }
    }
}

fn report_texts(lookup: Lookup<TeamReport>, team: &str) -> (String, String) {
    match lookup {
        Lookup::Found(report) => (report.recent_results_text(), report.roster_text()),
        Lookup::NotFound => (missing_recent_results(team), missing_roster(team)),
    }
}

async fn send(tx: &mpsc::Sender<MatchOutcome>, outcome: MatchOutcome) {
    if tx.send(outcome).await.is_err() {
        warn!("Outcome receiver dropped, discarding result");
    }
}
