//! Achievement aggregation pipeline.
//!
//! Turns gateway output into the page view model:
//! - Ranks the library by playtime and keeps the top games
//! - Joins unlocked achievements with their schema entries
//! - Computes the summary totals
//! - Falls back to the bundled dataset when live data is unavailable
//!
//! Everything here except [`build_showcase`] is pure.

use std::collections::{HashMap, HashSet};

use futures_util::future::join_all;
use tracing::info;

use crate::fallback::FallbackDataset;
use crate::models::{
    AchievementSchemaEntry, AchievementUnlockRecord, AggregateTotals, DataSource,
    EnrichedAchievement, GameSummary, OwnedGame, Profile, Showcase,
};
use crate::steam::SteamGateway;

/// Number of games shown on the page.
pub const TOP_GAMES: usize = 6;

/// Upstream results for one selected game.
#[derive(Debug, Clone)]
pub struct GameFetch {
    pub game: OwnedGame,
    pub unlocked: Vec<AchievementUnlockRecord>,
    pub schema: Vec<AchievementSchemaEntry>,
}

/// Top [`TOP_GAMES`] by playtime, descending. Ties keep upstream order.
pub fn rank_games(games: &[OwnedGame]) -> Vec<OwnedGame> {
    let mut ranked = games.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| b.playtime_minutes.cmp(&a.playtime_minutes));
    ranked.truncate(TOP_GAMES);
    ranked
}

/// Join unlocked records against a game's schema by achievement key.
///
/// Locked records are dropped and repeated keys keep their first
/// occurrence. Records without a schema entry keep their raw key as name.
pub fn enrich_achievements(
    unlocked: &[AchievementUnlockRecord],
    schema: &[AchievementSchemaEntry],
) -> Vec<EnrichedAchievement> {
    let mut by_key: HashMap<&str, &AchievementSchemaEntry> = HashMap::with_capacity(schema.len());
    for entry in schema {
        by_key.entry(entry.api_name.as_str()).or_insert(entry);
    }

    let mut seen = HashSet::new();
    unlocked
        .iter()
        .filter(|record| record.achieved)
        .filter(|record| seen.insert(record.api_name.as_str()))
        .map(|record| {
            let entry = by_key.get(record.api_name.as_str()).copied();
            EnrichedAchievement::join(record, entry)
        })
        .collect()
}

pub fn summarize_game(fetch: GameFetch) -> GameSummary {
    let achievements = enrich_achievements(&fetch.unlocked, &fetch.schema);
    GameSummary {
        app_id: fetch.game.app_id,
        name: fetch.game.name,
        playtime_minutes: fetch.game.playtime_minutes,
        achievements,
    }
}

/// Live mode is on but the library came back empty.
///
/// A private or misconfigured profile and a genuinely empty library look
/// the same from here; both raise the notice.
pub fn configuration_notice(configured: bool, owned_games: usize) -> bool {
    configured && owned_games == 0
}

/// Combine fetched data into the view model.
///
/// `owned_games` is the full library as fetched and decides between live
/// and fallback mode; `fetched` holds the per-game results for the ranked
/// selection, in ranking order.
pub fn assemble(
    profile: Option<Profile>,
    owned_games: &[OwnedGame],
    fetched: Vec<GameFetch>,
    configured: bool,
    fallback: &FallbackDataset,
) -> Showcase {
    let configuration_notice = configuration_notice(configured, owned_games.len());

    if !configured || owned_games.is_empty() {
        let games = fallback.games.clone();
        return Showcase {
            profile: fallback.profile.clone(),
            totals: AggregateTotals::from_games(&games),
            games,
            configuration_notice,
            source: DataSource::Fallback,
        };
    }

    let games: Vec<GameSummary> = fetched.into_iter().map(summarize_game).collect();
    Showcase {
        profile: profile.unwrap_or_else(|| fallback.profile.clone()),
        totals: AggregateTotals::from_games(&games),
        games,
        configuration_notice,
        source: DataSource::Live,
    }
}

/// Run the whole pipeline for one page render. Never fails.
pub async fn build_showcase(
    gateway: &dyn SteamGateway,
    fallback: &FallbackDataset,
    configured: bool,
) -> Showcase {
    if !configured {
        info!("Steam integration not configured, serving fallback dataset");
        return assemble(None, &[], Vec::new(), false, fallback);
    }

    let (profile, owned_games) =
        tokio::join!(gateway.fetch_profile(), gateway.fetch_owned_games());

    let selected = rank_games(&owned_games);
    let fetched = join_all(selected.into_iter().map(|game| async move {
        let (unlocked, schema) = tokio::join!(
            gateway.fetch_unlocked_achievements(game.app_id),
            gateway.fetch_achievement_schema(game.app_id),
        );
        GameFetch {
            game,
            unlocked,
            schema,
        }
    }))
    .await;

    let showcase = assemble(profile, &owned_games, fetched, configured, fallback);
    info!(
        "Built showcase via {} from {} data: {} games, {} achievements",
        gateway.name(),
        showcase.source,
        showcase.totals.games_shown,
        showcase.totals.total_achievements
    );
    showcase
}
