//! Russian to English name tables for sports-data searches.

use lazy_static::lazy_static;
use std::collections::HashMap;

const TEAM_ALIASES: &[(&str, &str)] = &[
    ("Спартак", "Spartak Moscow"),
    ("ЦСКА", "CSKA Moscow"),
    ("Зенит", "Zenit Saint Petersburg"),
    ("Локомотив", "Lokomotiv Moscow"),
    ("Динамо", "Dynamo Moscow"),
    ("Краснодар", "FC Krasnodar"),
    ("Ростов", "FC Rostov"),
    ("Сочи", "PFC Sochi"),
    ("Реал Мадрид", "Real Madrid"),
    ("Барселона", "FC Barcelona"),
    ("Атлетико", "Atletico Madrid"),
    ("Бавария", "Bayern Munich"),
    ("Боруссия Д", "Borussia Dortmund"),
    ("Боруссия", "Borussia Dortmund"),
    ("ПСЖ", "Paris Saint-Germain"),
    ("Манчестер Юнайтед", "Manchester United"),
    ("Манчестер Сити", "Manchester City"),
    ("Ливерпуль", "Liverpool FC"),
    ("Челси", "Chelsea FC"),
    ("Арсенал", "Arsenal FC"),
    ("Тоттенхэм", "Tottenham Hotspur"),
    ("Ювентус", "Juventus FC"),
    ("Милан", "AC Milan"),
    ("Интер", "Inter Milan"),
    ("Наполи", "SSC Napoli"),
    ("Рома", "AS Roma"),
    ("Аякс", "Ajax Amsterdam"),
    ("Порту", "FC Porto"),
    ("Бенфика", "SL Benfica"),
    ("Люцерн", "FC Luzern"),
    ("Ксамакс", "Neuchatel Xamax"),
    ("Брюгге", "Club Brugge"),
    ("Бреда", "NAC Breda"),
    ("Кельн", "FC Koln"),
    ("Верль", "SC Verl"),
    ("Болгария", "Bulgaria"),
    ("Ирландия", "Ireland"),
    ("Косово", "Kosovo"),
    ("Исландия", "Iceland"),
];

const TOURNAMENT_ALIASES: &[(&str, &str)] = &[
    ("РПЛ", "Russian Premier League"),
    ("Российская премьер-лига", "Russian Premier League"),
    ("АПЛ", "English Premier League"),
    ("Премьер-лига", "English Premier League"),
    ("Ла Лига", "Spanish La Liga"),
    ("Бундеслига", "German Bundesliga"),
    ("Серия А", "Italian Serie A"),
    ("Лига 1", "French Ligue 1"),
    ("Лига чемпионов", "UEFA Champions League"),
    ("Лига Европы", "UEFA Europa League"),
    ("Лига конференций", "UEFA Europa Conference League"),
    ("Лига наций", "UEFA Nations League"),
    ("Товарищеский матч", "Club Friendlies"),
    ("Товарищеские матчи", "Club Friendlies"),
];

lazy_static! {
    static ref TEAMS: HashMap<String, &'static str> = index(TEAM_ALIASES);
    static ref TOURNAMENTS: HashMap<String, &'static str> = index(TOURNAMENT_ALIASES);
}

fn index(table: &[(&str, &'static str)]) -> HashMap<String, &'static str> {
    table
        .iter()
        .map(|(russian, english)| (russian.to_lowercase(), *english))
        .collect()
}

/// English search name for a team, if known
pub fn team_alias(name: &str) -> Option<&'static str> {
    TEAMS.get(&name.trim().to_lowercase()).copied()
}

/// English search name for a tournament
///
/// Falls back to the longest known name the tournament starts with, so
/// `РПЛ, 25 тур` resolves like `РПЛ`.
pub fn tournament_alias(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    if let Some(english) = TOURNAMENTS.get(&name) {
        return Some(*english);
    }
    TOURNAMENTS
        .iter()
        .filter(|(russian, _)| name.starts_with(russian.as_str()))
        .max_by_key(|(russian, _)| russian.len())
        .map(|(_, english)| *english)
}
