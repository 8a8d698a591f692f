//! Device-local game settings, persisted as JSON between sessions.

use crate::catalog::Catalog;
use crate::error::SettingsError;
use crate::filter::FilterSpec;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    pub players: u32,
    /// Empty means every difficulty
    pub difficulties: BTreeSet<Difficulty>,
    /// Empty means every category in the catalog
    pub categories: BTreeSet<CategoryKey>,
    pub banned_categories: BTreeSet<CategoryKey>,
    pub language: Language,
    #[serde(flatten)]
    pub options: RoundOptions,
    /// Secret of the most recent round, so the next one doesn't repeat it
    pub last_secret: Option<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            players: MIN_PLAYERS,
            difficulties: BTreeSet::new(),
            categories: BTreeSet::new(),
            banned_categories: BTreeSet::new(),
            language: Language::default(),
            options: RoundOptions::default(),
            last_secret: None,
        }
    }
}

impl GameSettings {
    /// Player count, never below the minimum
    pub fn player_count(&self) -> u32 {
        self.players.max(MIN_PLAYERS)
    }

    pub fn filter_spec(&self, catalog: &Catalog) -> FilterSpec {
        let mut spec = FilterSpec::everything(catalog);
        if !self.difficulties.is_empty() {
            spec = spec.with_difficulties(self.difficulties.iter().copied());
        }
        if !self.categories.is_empty() {
            spec = spec.with_categories(self.categories.iter().cloned());
        }
        spec.with_banned(self.banned_categories.iter().cloned())
    }
}

pub async fn try_load(path: impl AsRef<Path>) -> Result<GameSettings, SettingsError> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

/// Load settings, falling back to defaults when the file is missing or bad.
pub async fn load_or_default(path: impl AsRef<Path>) -> GameSettings {
    let path = path.as_ref();
    match try_load(path).await {
        Ok(settings) => settings,
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            GameSettings::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring settings from {}: {}", path.display(), e);
            GameSettings::default()
        }
    }
}

pub async fn save(path: impl AsRef<Path>, settings: &GameSettings) -> Result<(), SettingsError> {
    let json = serde_json::to_string_pretty(settings)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
