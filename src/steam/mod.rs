//! Steam Web API gateway.
//!
//! The gateway never fails outward: every lookup resolves to a value or
//! to an empty default, and the underlying [`GatewayError`] is logged.
//! The concrete [`SteamClient`] also exposes `try_*` variants that keep
//! the error for callers that want to inspect it.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AchievementSchemaEntry, AchievementUnlockRecord, AppId, OwnedGame, Profile};

pub use client::SteamClient;

/// Reasons an upstream lookup produced nothing.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Steam credentials are not configured")]
    NotConfigured,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl GatewayError {
    /// Log at a level matching how surprising the failure is.
    fn log(&self, what: &str) {
        match self {
            GatewayError::NotConfigured => tracing::debug!("Skipping {}: {}", what, self),
            _ => tracing::warn!("Failed to fetch {}: {}", what, self),
        }
    }
}

/// Collapse a lookup result to its default, logging the failure.
pub(crate) fn or_default<T: Default>(what: &str, result: Result<T, GatewayError>) -> T {
    result.unwrap_or_else(|e| {
        e.log(what);
        T::default()
    })
}

/// Read-only access to the four Steam endpoints the page uses.
#[async_trait]
pub trait SteamGateway: Send + Sync {
    /// Gateway name for logging.
    fn name(&self) -> &'static str;

    /// Player summary, or `None` when unavailable.
    async fn fetch_profile(&self) -> Option<Profile>;

    /// Owned games in upstream order; empty when unavailable.
    async fn fetch_owned_games(&self) -> Vec<OwnedGame>;

    /// Unlocked achievements only; empty when unavailable.
    async fn fetch_unlocked_achievements(&self, app_id: AppId) -> Vec<AchievementUnlockRecord>;

    /// Achievement metadata; empty when unavailable or the game has none.
    async fn fetch_achievement_schema(&self, app_id: AppId) -> Vec<AchievementSchemaEntry>;
}

/// Mock gateway for testing.
#[cfg(test)]
#[derive(Default)]
pub struct MockGateway {
    pub profile: Option<Profile>,
    pub games: Vec<OwnedGame>,
    pub achievements: std::collections::HashMap<AppId, Vec<AchievementUnlockRecord>>,
    pub schemas: std::collections::HashMap<AppId, Vec<AchievementSchemaEntry>>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_games(mut self, games: Vec<OwnedGame>) -> Self {
        self.games = games;
        self
    }

    pub fn with_achievements(mut self, app_id: u64, keys: &[&str]) -> Self {
        self.achievements.insert(
            AppId::new(app_id),
            keys.iter().map(|k| AchievementUnlockRecord::unlocked(*k)).collect(),
        );
        self
    }

    pub fn with_schema(mut self, app_id: u64, entries: Vec<AchievementSchemaEntry>) -> Self {
        self.schemas.insert(AppId::new(app_id), entries);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
#[async_trait]
impl SteamGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_profile(&self) -> Option<Profile> {
        self.record_call();
        self.profile.clone()
    }

    async fn fetch_owned_games(&self) -> Vec<OwnedGame> {
        self.record_call();
        self.games.clone()
    }

    async fn fetch_unlocked_achievements(&self, app_id: AppId) -> Vec<AchievementUnlockRecord> {
        self.record_call();
        self.achievements.get(&app_id).cloned().unwrap_or_default()
    }

    async fn fetch_achievement_schema(&self, app_id: AppId) -> Vec<AchievementSchemaEntry> {
        self.record_call();
        self.schemas.get(&app_id).cloned().unwrap_or_default()
    }
}
