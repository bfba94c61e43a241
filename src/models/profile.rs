//! Steam player profile.

use serde::{Deserialize, Serialize};

/// Public profile card shown in the page header.
///
/// Field aliases accept the raw `GetPlayerSummaries` names so a player
/// object can be deserialized straight off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    #[serde(alias = "personaname")]
    pub persona_name: String,

    /// Link to the community profile
    #[serde(alias = "profileurl")]
    pub profile_url: String,

    /// Full-size avatar
    #[serde(alias = "avatarfull")]
    pub avatar_url: String,

    /// Real name, only present when the profile is public
    #[serde(default, alias = "realname")]
    pub real_name: Option<String>,

    /// ISO country code
    #[serde(default, alias = "loccountrycode")]
    pub country_code: Option<String>,
}

impl Profile {
    /// Name shown in the bio panel: real name when set, persona name otherwise.
    pub fn display_name(&self) -> &str {
        match self.real_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.persona_name,
        }
    }

    pub fn location(&self) -> &str {
        match self.country_code.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            _ => "Unknown",
        }
    }
}
