//! Page view model.

use serde::{Deserialize, Serialize};

use super::{AppId, EnrichedAchievement, Profile};

/// One game card on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub app_id: AppId,
    pub name: String,
    pub playtime_minutes: u64,
    #[serde(default)]
    pub achievements: Vec<EnrichedAchievement>,
}

/// Summary tiles above the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub total_playtime_minutes: u64,
    pub total_achievements: usize,
    pub games_shown: usize,
}

impl AggregateTotals {
    /// Totals over exactly the games given.
    pub fn from_games(games: &[GameSummary]) -> Self {
        Self {
            total_playtime_minutes: games.iter().map(|g| g.playtime_minutes).sum(),
            total_achievements: games.iter().map(|g| g.achievements.len()).sum(),
            games_shown: games.len(),
        }
    }
}

/// Where the games on the page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Live => write!(f, "live"),
            DataSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Everything the page needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showcase {
    pub profile: Profile,
    pub games: Vec<GameSummary>,
    pub totals: AggregateTotals,
    /// Live mode is enabled but the library came back empty
    pub configuration_notice: bool,
    pub source: DataSource,
}
