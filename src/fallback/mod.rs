//! Bundled fallback dataset.
//!
//! Shown whenever live mode is off or the library comes back empty. The
//! default copy is compiled into the binary; a different fixture can be
//! loaded from disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{GameSummary, Profile};

const EMBEDDED: &str = include_str!("../../assets/fallback.json");

/// Errors loading a fallback dataset.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("Failed to read fallback dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fallback dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pre-curated profile and games. Games are shown in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackDataset {
    pub profile: Profile,
    pub games: Vec<GameSummary>,
}

impl FallbackDataset {
    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self, FallbackError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self, FallbackError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, FallbackError> {
        let contents = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded fallback dataset from {} ({} games)",
            path.display(),
            dataset.games.len()
        );
        Ok(dataset)
    }

    /// Load from `path` when given, otherwise the embedded copy.
    pub fn load(path: Option<&Path>) -> Result<Self, FallbackError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }
}
