//! Achievement records, schema entries and their joined form.

use serde::{Deserialize, Deserializer, Serialize};

/// Description used when the schema has nothing for an unlocked achievement.
pub const PLACEHOLDER_DESCRIPTION: &str = "Achievement telah diraih.";

/// One entry of `GetPlayerAchievements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlockRecord {
    #[serde(alias = "apiname")]
    pub api_name: String,

    /// Steam sends `1`/`0`; booleans are accepted too.
    #[serde(deserialize_with = "flag")]
    pub achieved: bool,
}

impl AchievementUnlockRecord {
    pub fn unlocked(api_name: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            achieved: true,
        }
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Int(n) => n == 1,
    })
}

/// Display metadata for one achievement, from `GetSchemaForGame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementSchemaEntry {
    /// Join key, matches [`AchievementUnlockRecord::api_name`]
    #[serde(alias = "name")]
    pub api_name: String,

    #[serde(default, alias = "displayName")]
    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,
}

/// An unlocked achievement with display metadata attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedAchievement {
    pub api_name: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl EnrichedAchievement {
    /// Join an unlock record with its schema entry, if one was found.
    pub fn join(record: &AchievementUnlockRecord, schema: Option<&AchievementSchemaEntry>) -> Self {
        let name = schema
            .map(|s| s.display_name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(record.api_name.as_str());
        let description = schema
            .and_then(|s| s.description.as_deref())
            .filter(|d| !d.is_empty())
            .unwrap_or(PLACEHOLDER_DESCRIPTION);
        let icon = schema
            .and_then(|s| s.icon.clone())
            .filter(|i| !i.is_empty());

        Self {
            api_name: record.api_name.clone(),
            name: name.to_string(),
            description: description.to_string(),
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(key: &str, display: &str) -> AchievementSchemaEntry {
        AchievementSchemaEntry {
            api_name: key.to_string(),
            display_name: display.to_string(),
            description: Some("Do the thing.".to_string()),
            icon: Some("https://cdn.example/icon.jpg".to_string()),
        }
    }

    #[test]
    fn test_unlock_record_integer_flag() {
        let json = r#"[
            {"apiname": "WAKE_UP", "achieved": 1, "unlocktime": 1300000000},
            {"apiname": "HIGH_FIVE", "achieved": 0, "unlocktime": 0}
        ]"#;

        let records: Vec<AchievementUnlockRecord> = serde_json::from_str(json).unwrap();
        assert!(records[0].achieved);
        assert!(!records[1].achieved);
    }

    #[test]
    fn test_unlock_record_bool_flag() {
        let record: AchievementUnlockRecord =
            serde_json::from_str(r#"{"api_name": "K", "achieved": true}"#).unwrap();
        assert_eq!(record, AchievementUnlockRecord::unlocked("K"));
    }

    #[test]
    fn test_schema_entry_from_wire() {
        let json = r#"{
            "name": "WAKE_UP",
            "defaultvalue": 0,
            "displayName": "Wake Up Call",
            "hidden": 0,
            "description": "Survive the manual override.",
            "icon": "https://cdn.example/620/a.jpg",
            "icongray": "https://cdn.example/620/b.jpg"
        }"#;

        let entry: AchievementSchemaEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.api_name, "WAKE_UP");
        assert_eq!(entry.display_name, "Wake Up Call");
        assert_eq!(entry.icon.as_deref(), Some("https://cdn.example/620/a.jpg"));
    }

    #[test]
    fn test_hidden_schema_entry_without_description() {
        let json = r#"{"name": "SECRET", "displayName": "???", "hidden": 1}"#;
        let entry: AchievementSchemaEntry = serde_json::from_str(json).unwrap();
        assert!(entry.description.is_none());
        assert!(entry.icon.is_none());
    }

    #[test]
    fn test_join_with_matching_schema() {
        let enriched = EnrichedAchievement::join(
            &AchievementUnlockRecord::unlocked("K"),
            Some(&schema("K", "Foo")),
        );

        assert_eq!(enriched.api_name, "K");
        assert_eq!(enriched.name, "Foo");
        assert_eq!(enriched.description, "Do the thing.");
        assert!(enriched.icon.is_some());
    }

    #[test]
    fn test_join_without_schema_uses_key_and_placeholder() {
        let enriched = EnrichedAchievement::join(&AchievementUnlockRecord::unlocked("K"), None);

        assert_eq!(enriched.name, "K");
        assert_eq!(enriched.description, PLACEHOLDER_DESCRIPTION);
        assert!(enriched.icon.is_none());
    }

    #[test]
    fn test_join_with_blank_schema_fields() {
        let mut entry = schema("K", "");
        entry.description = Some(String::new());
        entry.icon = Some(String::new());

        let record = AchievementUnlockRecord::unlocked("K");
        let enriched = EnrichedAchievement::join(&record, Some(&entry));
        assert_eq!(enriched.name, "K");
        assert_eq!(enriched.description, PLACEHOLDER_DESCRIPTION);
        assert!(enriched.icon.is_none());
    }
}
