//! # Sports Data Module
//!
//! Team and fixture lookups used to enrich prediction prompts.
//!
//! The collaborator traits never return errors: I/O failures are logged and
//! reported as [`Lookup::NotFound`] or an empty fixture list, so one failed
//! lookup only degrades the prompt of one match.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::bot_config::SportsDbConfig;
use crate::event_dates;
use crate::service_errors::{Result, ServiceError};

/// Outcome of a lookup that may legitimately find nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentResult {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: String,
}

/// Recent form and roster of one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamReport {
    /// Name as the user typed it
    pub team_name: String,
    /// Name of the matched team in the data source
    pub matched_name: String,
    pub manager: Option<String>,
    pub league: Option<String>,
    /// Current rank in the league table
    pub league_position: Option<u32>,
    pub recent_results: Vec<RecentResult>,
    pub roster: Vec<Player>,
}

impl TeamReport {
    /// League, table position and head coach, empty when none is known
    pub fn overview_text(&self) -> String {
        let mut text = String::new();
        match (&self.league, self.league_position) {
            (Some(league), Some(position)) => {
                text.push_str(&format!("Лига: {league}, место в таблице: {position}\n"))
            }
            (Some(league), None) => text.push_str(&format!("Лига: {league}\n")),
            (None, Some(position)) => {
                text.push_str(&format!("Место в таблице: {position}\n"))
            }
            (None, None) => {}
        }
        if let Some(manager) = &self.manager {
            text.push_str(&format!("Главный тренер: {manager}\n"));
        }
        text
    }

    pub fn recent_results_text(&self) -> String {
        let mut text = format!("Последние матчи {}:\n", self.team_name);
        if self.recent_results.is_empty() {
            text.push_str("Информация о последних матчах отсутствует\n");
        }
        for result in &self.recent_results {
            text.push_str(&format!(
                "- {}: {} {}:{} {}\n",
                result.date, result.home_team, result.home_score, result.away_score, result.away_team
            ));
        }
        text
    }

    pub fn roster_text(&self) -> String {
        let mut text = format!("Состав {}:\n", self.team_name);
        if self.roster.is_empty() {
            text.push_str("Информация о составе отсутствует\n");
        }
        for player in &self.roster {
            text.push_str(&format!("- {} ({})\n", player.name, player.position));
        }
        text
    }
}

/// Placeholder recent-form text for a team that could not be looked up
pub fn missing_recent_results(team_name: &str) -> String {
    format!("Нет информации о последних матчах {team_name}")
}

/// Placeholder roster text for a team that could not be looked up
pub fn missing_roster(team_name: &str) -> String {
    format!("Нет информации о составе {team_name}")
}

/// One scheduled match of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub home_team: String,
    pub away_team: String,
    pub tournament: String,
}

#[async_trait]
pub trait TeamDataSource: Send + Sync {
    /// Look up a team, searching by `english_alias` when one is known
    async fn team_report(&self, name: &str, english_alias: Option<&str>) -> Lookup<TeamReport>;
}

#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Scheduled pairings of a tournament on the date the phrase resolves to
    ///
    /// Returns at most `limit` pairings, possibly none.
    async fn fixtures(
        &self,
        tournament: &str,
        english_alias: Option<&str>,
        date_phrase: &str,
        limit: usize,
    ) -> Vec<Pairing>;
}

// TheSportsDB v1 wire format. Missing collections come back as `null`.

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    teams: Option<Vec<ApiTeam>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeam {
    id_team: String,
    str_team: String,
    #[serde(default)]
    str_manager: Option<String>,
    #[serde(default)]
    id_league: Option<String>,
    #[serde(default)]
    str_league: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeagueDetailsResponse {
    leagues: Option<Vec<ApiLeagueDetails>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLeagueDetails {
    #[serde(default)]
    str_current_season: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TableResponse {
    table: Option<Vec<ApiTableRow>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTableRow {
    id_team: Option<String>,
    int_rank: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    results: Option<Vec<ApiEvent>>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Option<Vec<ApiEvent>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    date_event: Option<String>,
    str_home_team: Option<String>,
    str_away_team: Option<String>,
    int_home_score: Option<serde_json::Value>,
    int_away_score: Option<serde_json::Value>,
    str_league: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayersResponse {
    player: Option<Vec<ApiPlayer>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlayer {
    str_player: Option<String>,
    str_position: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeaguesResponse {
    leagues: Option<Vec<ApiLeague>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLeague {
    str_league: String,
}

fn score_text(score: &Option<serde_json::Value>) -> String {
    match score {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(serde_json::Value::Number(number)) => number.to_string(),
        _ => "?".to_string(),
    }
}

fn rank(value: &Option<serde_json::Value>) -> Option<u32> {
    match value {
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        Some(serde_json::Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn or_unknown(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or("Неизвестно")
        .to_string()
}

/// TheSportsDB v1 JSON API client
#[derive(Debug, Clone)]
pub struct TheSportsDb {
    http: reqwest::Client,
    config: SportsDbConfig,
}

impl TheSportsDb {
    pub fn new(config: SportsDbConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("match-forecast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key,
            endpoint
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(endpoint);
        debug!(url = %url, ?query, "Requesting sports data");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ServiceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ServiceError::Decode { url, source })
    }

    /// Search a team by name, retrying with the first word of the name
    ///
    /// Returns the team id and its name in the data source.
    #[instrument(skip(self))]
    pub async fn search_team(&self, name: &str) -> Result<Option<(String, String)>> {
        Ok(self
            .find_team(name)
            .await?
            .map(|team| (team.id_team, team.str_team)))
    }

    async fn find_team(&self, name: &str) -> Result<Option<ApiTeam>> {
        let response: TeamsResponse = self.get_json("searchteams.php", &[("t", name)]).await?;
        if let Some(team) = response.teams.and_then(|teams| teams.into_iter().next()) {
            return Ok(Some(team));
        }

        let first_word = match name.split_whitespace().next() {
            Some(word) if word != name => word,
            _ => return Ok(None),
        };
        warn!(name, first_word, "Team not found, retrying with first word");

        let response: TeamsResponse = self
            .get_json("searchteams.php", &[("t", first_word)])
            .await?;
        Ok(response.teams.and_then(|teams| teams.into_iter().next()))
    }

    /// Rank of a team in the current season table of its league
    #[instrument(skip(self))]
    pub async fn league_position(&self, league_id: &str, team_id: &str) -> Result<Option<u32>> {
        let response: LeagueDetailsResponse = self
            .get_json("lookupleague.php", &[("id", league_id)])
            .await?;
        let Some(season) = response
            .leagues
            .and_then(|leagues| leagues.into_iter().next())
            .and_then(|league| non_empty(league.str_current_season))
        else {
            debug!(league_id, "League has no current season");
            return Ok(None);
        };

        let response: TableResponse = self
            .get_json("lookuptable.php", &[("l", league_id), ("s", season.as_str())])
            .await?;
        Ok(response
            .table
            .unwrap_or_default()
            .iter()
            .find(|row| row.id_team.as_deref() == Some(team_id))
            .and_then(|row| rank(&row.int_rank)))
    }

    #[instrument(skip(self))]
    pub async fn recent_results(&self, team_id: &str) -> Result<Vec<RecentResult>> {
        let response: ResultsResponse = self.get_json("eventslast.php", &[("id", team_id)]).await?;
        Ok(response
            .results
            .unwrap_or_default()
            .iter()
            .take(self.config.recent_results_limit)
            .map(|event| RecentResult {
                date: event
                    .date_event
                    .clone()
                    .unwrap_or_else(|| "Неизвестная дата".to_string()),
                home_team: or_unknown(&event.str_home_team),
                away_team: or_unknown(&event.str_away_team),
                home_score: score_text(&event.int_home_score),
                away_score: score_text(&event.int_away_score),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn roster(&self, team_id: &str) -> Result<Vec<Player>> {
        let response: PlayersResponse = self
            .get_json("lookup_all_players.php", &[("id", team_id)])
            .await?;
        Ok(response
            .player
            .unwrap_or_default()
            .iter()
            .take(self.config.roster_limit)
            .map(|player| Player {
                name: or_unknown(&player.str_player),
                position: player
                    .str_position
                    .clone()
                    .filter(|position| !position.is_empty())
                    .unwrap_or_else(|| "Позиция неизвестна".to_string()),
            })
            .collect())
    }

    /// Name of the first league whose name contains `search`
    #[instrument(skip(self))]
    pub async fn find_league(&self, search: &str) -> Result<Option<String>> {
        let response: LeaguesResponse = self.get_json("all_leagues.php", &[]).await?;
        let search = search.to_lowercase();
        Ok(response
            .leagues
            .unwrap_or_default()
            .into_iter()
            .map(|league| league.str_league)
            .find(|league| league.to_lowercase().contains(&search)))
    }

    #[instrument(skip(self))]
    pub async fn events_on_day(&self, league: &str, date: NaiveDate) -> Result<Vec<Pairing>> {
        let day = date.format("%Y-%m-%d").to_string();
        let response: EventsResponse = self
            .get_json("eventsday.php", &[("d", day.as_str()), ("l", league)])
            .await?;
        Ok(response
            .events
            .unwrap_or_default()
            .iter()
            .filter(|event| event.str_home_team.is_some() && event.str_away_team.is_some())
            .map(|event| Pairing {
                home_team: or_unknown(&event.str_home_team),
                away_team: or_unknown(&event.str_away_team),
                tournament: event
                    .str_league
                    .clone()
                    .unwrap_or_else(|| league.to_string()),
            })
            .collect())
    }

    async fn load_report(&self, name: &str, search_name: &str) -> Result<Lookup<TeamReport>> {
        let Some(team) = self.find_team(search_name).await? else {
            return Ok(Lookup::NotFound);
        };
        let team_id = team.id_team;
        let matched_name = team.str_team;
        info!(team = name, matched = %matched_name, team_id = %team_id, "Team found");

        let recent_results = self.recent_results(&team_id).await.unwrap_or_else(|error| {
            warn!(team_id = %team_id, error = %error, "Recent results unavailable");
            Vec::new()
        });
        let roster = self.roster(&team_id).await.unwrap_or_else(|error| {
            warn!(team_id = %team_id, error = %error, "Roster unavailable");
            Vec::new()
        });
        let league_position = match non_empty(team.id_league) {
            Some(league_id) => self
                .league_position(&league_id, &team_id)
                .await
                .unwrap_or_else(|error| {
                    warn!(team_id = %team_id, error = %error, "League table unavailable");
                    None
                }),
            None => None,
        };

        Ok(Lookup::Found(TeamReport {
            team_name: name.to_string(),
            matched_name,
            manager: non_empty(team.str_manager),
            league: non_empty(team.str_league),
            league_position,
            recent_results,
            roster,
        }))
    }
}

#[async_trait]
impl TeamDataSource for TheSportsDb {
    async fn team_report(&self, name: &str, english_alias: Option<&str>) -> Lookup<TeamReport> {
        let search_name = english_alias.unwrap_or(name);
        match self.load_report(name, search_name).await {
            Ok(lookup) => {
                if !lookup.is_found() {
                    warn!(team = name, search = search_name, "Team not found");
                }
                lookup
            }
            Err(error) => {
                warn!(team = name, error = %error, "Team lookup failed");
                Lookup::NotFound
            }
        }
    }
}

#[async_trait]
impl FixtureSource for TheSportsDb {
    async fn fixtures(
        &self,
        tournament: &str,
        english_alias: Option<&str>,
        date_phrase: &str,
        limit: usize,
    ) -> Vec<Pairing> {
        let search_name = english_alias.unwrap_or(tournament);
        let date = event_dates::resolve_or_today(date_phrase, Local::now().date_naive());

        let league = match self.find_league(search_name).await {
            Ok(Some(league)) => league,
            Ok(None) => {
                warn!(tournament, search = search_name, "League not found");
                return Vec::new();
            }
            Err(error) => {
                warn!(tournament, error = %error, "League lookup failed");
                return Vec::new();
            }
        };

        match self.events_on_day(&league, date).await {
            Ok(mut pairings) => {
                pairings.truncate(limit);
                info!(league = %league, %date, count = pairings.len(), "Fixtures found");
                pairings
            }
            Err(error) => {
                warn!(league = %league, error = %error, "Fixture lookup failed");
                Vec::new()
            }
        }
    }
}
