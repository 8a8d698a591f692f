//! Process configuration from environment variables.

use crate::timer::{EXIT_HOLD_MS, HOLD_REVEAL_MS, HOLD_STEP_MS};
use crate::types::Language;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub words_path: PathBuf,
    pub settings_path: PathBuf,
    pub hold_reveal_ms: u64,
    pub exit_hold_ms: u64,
    pub hold_step_ms: u64,
    /// Overrides the chance stored in the settings file when set
    pub multiple_chance: Option<f64>,
    /// Overrides the language stored in the settings file when set
    pub language: Option<Language>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("words.json"),
            settings_path: PathBuf::from("settings.json"),
            hold_reveal_ms: HOLD_REVEAL_MS,
            exit_hold_ms: EXIT_HOLD_MS,
            hold_step_ms: HOLD_STEP_MS,
            multiple_chance: None,
            language: None,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            words_path: non_empty("WORDS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.words_path),
            settings_path: non_empty("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.settings_path),
            hold_reveal_ms: non_empty("HOLD_REVEAL_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.hold_reveal_ms),
            exit_hold_ms: non_empty("EXIT_HOLD_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.exit_hold_ms),
            // A zero step would never advance a countdown
            hold_step_ms: non_empty("HOLD_STEP_MS")
                .and_then(|s| s.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.hold_step_ms),
            multiple_chance: non_empty("MULTIPLE_IMPOSTOR_CHANCE")
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|p| p.is_finite())
                .map(|p| p.clamp(0.0, 1.0)),
            language: non_empty("GAME_LANGUAGE").and_then(|code| Language::from_code(&code)),
        }
    }
}
