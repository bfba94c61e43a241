//! Configuration loading and validation.
//!
//! Server, upstream and page settings come from an optional TOML file.
//! Steam credentials come from the environment only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Environment variable holding the Steam Web API key.
pub const API_KEY_VAR: &str = "STEAM_API_KEY";

/// Environment variable holding the 64-bit Steam ID to showcase.
pub const STEAM_ID_VAR: &str = "STEAM_ID";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Steam Web API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteamConfig {
    /// Base URL of the Web API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; unset leaves the client default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_user_agent() -> String {
    format!("steam-showcase/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Static copy shown on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_bio")]
    pub bio: String,

    #[serde(default = "default_languages")]
    pub languages: String,

    /// Replacement for the embedded fallback dataset
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,
}

fn default_bio() -> String {
    "Saya suka membangun hal baru sambil mempelajari API publik. Ketika tidak sedang menulis kode, \
     saya biasanya menyelesaikan misi-misi kecil dan berburu achievement untuk melengkapi koleksi."
        .to_string()
}

fn default_languages() -> String {
    "Indonesia, Inggris".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            bio: default_bio(),
            languages: default_languages(),
            fallback_path: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub steam: SteamConfig,

    #[serde(default)]
    pub page: PageConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.steam.timeout_seconds == Some(0) {
            return Err(ConfigError::ValidationError(
                "Steam timeout must be greater than 0".to_string(),
            ));
        }

        Url::parse(&self.steam.base_url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "Invalid Steam base URL {}: {}",
                self.steam.base_url, e
            ))
        })?;

        Ok(())
    }
}

/// Steam API credentials. Live mode needs both values.
#[derive(Clone, PartialEq, Eq)]
pub struct SteamCredentials {
    pub api_key: String,
    pub steam_id: String,
}

impl std::fmt::Debug for SteamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamCredentials")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .finish()
    }
}

impl SteamCredentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from any variable lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Some(Self {
            api_key: non_blank(API_KEY_VAR)?,
            steam_id: non_blank(STEAM_ID_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.steam.base_url, "https://api.steampowered.com");
        assert!(config.steam.timeout_seconds.is_none());
        assert!(config.page.fallback_path.is_none());
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.steam.timeout_seconds = Some(0);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = AppConfig::default();
        config.steam.base_url = "not a url".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [page]
            languages = "English"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.page.languages, "English");
        assert!(config.page.bio.starts_with("Saya suka"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[steam]\nbase_url = \"http://127.0.0.1:9999\"\ntimeout_seconds = 5"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.steam.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.steam.timeout_seconds, Some(5));
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.steam.base_url, parsed.steam.base_url);
    }

    #[test]
    fn test_credentials_both_present() {
        let creds =
            SteamCredentials::from_lookup(lookup(&[(API_KEY_VAR, "KEY"), (STEAM_ID_VAR, "7656")]))
                .unwrap();
        assert_eq!(creds.api_key, "KEY");
        assert_eq!(creds.steam_id, "7656");
    }

    #[test]
    fn test_credentials_missing_either() {
        assert!(SteamCredentials::from_lookup(lookup(&[(API_KEY_VAR, "KEY")])).is_none());
        assert!(SteamCredentials::from_lookup(lookup(&[(STEAM_ID_VAR, "7656")])).is_none());
        assert!(SteamCredentials::from_lookup(lookup(&[])).is_none());
    }

    #[test]
    fn test_credentials_blank_counts_as_missing() {
        let creds =
            SteamCredentials::from_lookup(lookup(&[(API_KEY_VAR, "  "), (STEAM_ID_VAR, "7656")]));
        assert!(creds.is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = SteamCredentials {
            api_key: "SECRET".to_string(),
            steam_id: "7656".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("7656"));
    }
}
