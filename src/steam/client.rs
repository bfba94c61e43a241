//! reqwest-backed Steam Web API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{or_default, GatewayError, SteamGateway};
use crate::config::{SteamConfig, SteamCredentials};
use crate::models::{AchievementSchemaEntry, AchievementUnlockRecord, AppId, OwnedGame, Profile};

const PLAYER_SUMMARIES: &str = "ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES: &str = "IPlayerService/GetOwnedGames/v0001/";
const PLAYER_ACHIEVEMENTS: &str = "ISteamUserStats/GetPlayerAchievements/v0001/";
const GAME_SCHEMA: &str = "ISteamUserStats/GetSchemaForGame/v2/";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct PlayersPayload {
    #[serde(default)]
    players: Vec<Profile>,
}

// Private profiles come back as `{"response": {}}`.
#[derive(Debug, Deserialize)]
struct OwnedGamesPayload {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Debug, Deserialize)]
struct PlayerStatsEnvelope {
    playerstats: PlayerStats,
}

#[derive(Debug, Deserialize)]
struct PlayerStats {
    #[serde(default)]
    achievements: Vec<AchievementUnlockRecord>,
}

#[derive(Debug, Deserialize)]
struct SchemaEnvelope {
    #[serde(default)]
    game: SchemaGame,
}

#[derive(Debug, Default, Deserialize)]
struct SchemaGame {
    #[serde(default, rename = "availableGameStats")]
    available_game_stats: Option<GameStats>,
}

#[derive(Debug, Deserialize)]
struct GameStats {
    #[serde(default)]
    achievements: Vec<AchievementSchemaEntry>,
}

/// Steam Web API client authenticated by query string.
pub struct SteamClient {
    client: Client,
    base_url: Url,
    credentials: Option<SteamCredentials>,
}

impl SteamClient {
    /// Create a client. Without credentials every lookup is skipped.
    pub fn new(
        config: &SteamConfig,
        credentials: Option<SteamCredentials>,
    ) -> Result<Self, GatewayError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("steam-showcase/0.1.0")),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            credentials,
        })
    }

    /// Whether both the API key and Steam ID are present.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> Result<&SteamCredentials, GatewayError> {
        self.credentials.as_ref().ok_or(GatewayError::NotConfigured)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, GatewayError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", path, e)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        debug!("GET {}{}", url.origin().ascii_serialization(), url.path());

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn try_profile(&self) -> Result<Option<Profile>, GatewayError> {
        let creds = self.credentials()?;
        let url = self.endpoint(
            PLAYER_SUMMARIES,
            &[("key", creds.api_key.as_str()), ("steamids", creds.steam_id.as_str())],
        )?;

        let envelope: Envelope<PlayersPayload> = self.get_json(url).await?;
        Ok(envelope.response.players.into_iter().next())
    }

    pub async fn try_owned_games(&self) -> Result<Vec<OwnedGame>, GatewayError> {
        let creds = self.credentials()?;
        let url = self.endpoint(
            OWNED_GAMES,
            &[
                ("key", creds.api_key.as_str()),
                ("steamid", creds.steam_id.as_str()),
                ("include_appinfo", "true"),
                ("include_played_free_games", "true"),
                ("format", "json"),
            ],
        )?;

        let envelope: Envelope<OwnedGamesPayload> = self.get_json(url).await?;
        Ok(envelope.response.games)
    }

    pub async fn try_unlocked_achievements(
        &self,
        app_id: AppId,
    ) -> Result<Vec<AchievementUnlockRecord>, GatewayError> {
        let creds = self.credentials()?;
        let app_id = app_id.to_string();
        let url = self.endpoint(
            PLAYER_ACHIEVEMENTS,
            &[
                ("appid", app_id.as_str()),
                ("key", creds.api_key.as_str()),
                ("steamid", creds.steam_id.as_str()),
            ],
        )?;

        let envelope: PlayerStatsEnvelope = self.get_json(url).await?;
        Ok(envelope
            .playerstats
            .achievements
            .into_iter()
            .filter(|a| a.achieved)
            .collect())
    }

    pub async fn try_achievement_schema(
        &self,
        app_id: AppId,
    ) -> Result<Vec<AchievementSchemaEntry>, GatewayError> {
        let creds = self.credentials()?;
        let app_id = app_id.to_string();
        let url = self.endpoint(
            GAME_SCHEMA,
            &[("key", creds.api_key.as_str()), ("appid", app_id.as_str())],
        )?;

        let envelope: SchemaEnvelope = self.get_json(url).await?;
        Ok(envelope
            .game
            .available_game_stats
            .map(|stats| stats.achievements)
            .unwrap_or_default())
    }
}

#[async_trait]
impl SteamGateway for SteamClient {
    fn name(&self) -> &'static str {
        "steam"
    }

    async fn fetch_profile(&self) -> Option<Profile> {
        or_default("player summary", self.try_profile().await)
    }

    async fn fetch_owned_games(&self) -> Vec<OwnedGame> {
        or_default("owned games", self.try_owned_games().await)
    }

    async fn fetch_unlocked_achievements(&self, app_id: AppId) -> Vec<AchievementUnlockRecord> {
        or_default(
            &format!("achievements for app {}", app_id),
            self.try_unlocked_achievements(app_id).await,
        )
    }

    async fn fetch_achievement_schema(&self, app_id: AppId) -> Vec<AchievementSchemaEntry> {
        or_default(
            &format!("schema for app {}", app_id),
            self.try_achievement_schema(app_id).await,
        )
    }
}
