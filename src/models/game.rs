//! Owned game model.

use serde::{Deserialize, Serialize};

use super::AppId;

/// A game in the player's library as reported by `GetOwnedGames`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGame {
    #[serde(alias = "appid")]
    pub app_id: AppId,

    /// Only populated when the request sets `include_appinfo`
    #[serde(default)]
    pub name: String,

    /// Lifetime playtime in minutes
    #[serde(default, alias = "playtime_forever")]
    pub playtime_minutes: u64,
}

impl OwnedGame {
    pub fn new(app_id: u64, name: impl Into<String>, playtime_minutes: u64) -> Self {
        Self {
            app_id: AppId::new(app_id),
            name: name.into(),
            playtime_minutes,
        }
    }
}
