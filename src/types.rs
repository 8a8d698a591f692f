use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Opaque ID types for type safety
pub type RoundId = String;
pub type CategoryKey = String;
pub type Seat = u32;

/// Category assigned when the source data supplies none
pub const DEFAULT_CATEGORY: &str = "thing";

/// Canonical category order used for hints and chip rendering.
/// Keys outside this list still work, they just sort after these.
pub const CATEGORY_KEYS: &[&str] = &[
    "space", "food", "animal", "person", "vehicle", "place", "nature", "activity", "thing",
    "movies", "music", "kinojuha", "intti", "suomi",
];

/// Fewest players a round can be dealt to (at least two detectives and one impostor)
pub const MIN_PLAYERS: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Guess a difficulty from the display texts when the dataset has none.
    ///
    /// Long words are hard, multi-word or mid-length ones medium, the rest easy.
    pub fn infer(primary: &str, secondary: &str) -> Self {
        let a = primary.trim();
        let b = secondary.trim();
        let max_len = a.chars().count().max(b.chars().count());
        let has_space = a.contains(' ') || b.contains(' ');

        if max_len >= 13 {
            Self::Hard
        } else if has_space || max_len >= 8 {
            Self::Medium
        } else {
            Self::Easy
        }
    }
}

/// Which of a word's two texts a player reads
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[serde(rename = "en")]
    Primary,
    #[default]
    #[serde(rename = "fi")]
    Secondary,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Self::Primary),
            "fi" => Some(Self::Secondary),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Primary => "en",
            Self::Secondary => "fi",
        }
    }
}

/// A validated dataset word.
///
/// Only built through [`crate::catalog::normalize`], so both texts are non-empty
/// and the category set always has at least one key.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WordEntry {
    primary_text: String,
    secondary_text: String,
    categories: BTreeSet<CategoryKey>,
    difficulty: Difficulty,
}

impl WordEntry {
    pub(crate) fn from_parts(
        primary_text: String,
        secondary_text: String,
        categories: BTreeSet<CategoryKey>,
        difficulty: Difficulty,
    ) -> Self {
        debug_assert!(!primary_text.is_empty() && !secondary_text.is_empty());
        debug_assert!(!categories.is_empty());
        Self {
            primary_text,
            secondary_text,
            categories,
            difficulty,
        }
    }

    pub fn primary_text(&self) -> &str {
        &self.primary_text
    }

    pub fn secondary_text(&self) -> &str {
        &self.secondary_text
    }

    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Primary => &self.primary_text,
            Language::Secondary => &self.secondary_text,
        }
    }

    pub fn categories(&self) -> &BTreeSet<CategoryKey> {
        &self.categories
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn has_category(&self, key: &str) -> bool {
        self.categories.contains(key)
    }

    pub fn shares_category_with(&self, other: &WordEntry) -> bool {
        self.categories.iter().any(|c| other.categories.contains(c))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundPhase {
    Setup,
    Dealing { seat: Seat },
    Done,
}

/// Per-round toggles chosen on the setup screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoundOptions {
    /// Chance-based upgrade to two (or three) impostors
    pub allow_multiple_impostors: bool,
    /// Probability of the first upgrade, in [0, 1]
    pub multiple_chance: f64,
    /// Impostors get a decoy word instead of a marker card
    pub hidden_impostor: bool,
    /// When off, impostors get a neutral card that doesn't say they are the impostor
    pub impostor_knows: bool,
    /// Impostors see the secret's categories
    pub impostor_hint: bool,
    /// Detectives see the secret's categories
    pub detective_hint: bool,
    /// Impostors see how many impostors there are
    pub show_impostor_count: bool,
}

pub const DEFAULT_MULTIPLE_CHANCE: f64 = 0.20;

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            allow_multiple_impostors: true,
            multiple_chance: DEFAULT_MULTIPLE_CHANCE,
            hidden_impostor: false,
            impostor_knows: true,
            impostor_hint: true,
            detective_hint: false,
            show_impostor_count: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Impostor,
    Detective,
}

/// Everything decided when a round starts. Never changes afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSetup {
    pub id: RoundId,
    pub number: u32,
    pub started_at: String,
    pub total_players: u32,
    pub secret: Arc<WordEntry>,
    /// Only set in hidden-impostor rounds with more than one eligible word
    pub decoy: Option<Arc<WordEntry>>,
    pub impostor_seats: BTreeSet<Seat>,
    pub options: RoundOptions,
}

impl RoundSetup {
    pub fn is_impostor(&self, seat: Seat) -> bool {
        self.impostor_seats.contains(&seat)
    }

    pub fn role(&self, seat: Seat) -> Role {
        if self.is_impostor(seat) {
            Role::Impostor
        } else {
            Role::Detective
        }
    }

    pub fn detective_seats(&self) -> Vec<Seat> {
        (1..=self.total_players)
            .filter(|s| !self.is_impostor(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_difficulty_thresholds() {
        assert_eq!(Difficulty::infer("Cat", "Kissa"), Difficulty::Easy);
        assert_eq!(Difficulty::infer("Pineapple", "Ananas"), Difficulty::Medium);
        assert_eq!(Difficulty::infer("Ice cream", "Jäätelö"), Difficulty::Medium);
        assert_eq!(Difficulty::infer("Bus", "Linja-auto"), Difficulty::Medium);
        assert_eq!(
            Difficulty::infer("Lighthouse", "Majakanvartija"),
            Difficulty::Hard
        );
    }

    #[test]
    fn test_infer_counts_characters_not_bytes() {
        // 7 characters, 9 bytes
        assert_eq!(Difficulty::infer("Jäätelö", "Jäätelö"), Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse(" easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("all"), None);
        assert_eq!(Difficulty::parse("Hard"), None);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("EN"), Some(Language::Primary));
        assert_eq!(Language::from_code("fi"), Some(Language::Secondary));
        assert_eq!(Language::from_code("sv"), None);
        assert_eq!(Language::default().code(), "fi");
    }

    #[test]
    fn test_round_options_defaults() {
        let options = RoundOptions::default();
        assert!(options.allow_multiple_impostors);
        assert!(options.impostor_hint);
        assert!(options.impostor_knows);
        assert!(!options.hidden_impostor);
        assert!(!options.detective_hint);
        assert!(!options.show_impostor_count);
        assert_eq!(options.multiple_chance, 0.20);
    }

    #[test]
    fn test_round_phase_serialization() {
        let json = serde_json::to_string(&RoundPhase::Dealing { seat: 2 }).unwrap();
        assert_eq!(json, r#"{"DEALING":{"seat":2}}"#);
        let json = serde_json::to_string(&RoundPhase::Setup).unwrap();
        assert_eq!(json, r#""SETUP""#);
    }
}
