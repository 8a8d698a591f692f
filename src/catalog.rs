//! Word dataset loading and normalization.
//!
//! Raw records are validated once here; everything downstream works with
//! [`WordEntry`] values that are known to be well-formed.

use crate::error::DataLoadError;
use crate::types::{CategoryKey, Difficulty, WordEntry, CATEGORY_KEYS, DEFAULT_CATEGORY};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// A dataset record as it appears in the word file, before validation.
///
/// Accepts both the neutral field names and the `en`/`fi`/`cats`/`diff` names
/// used by the published word lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWord {
    #[serde(default, alias = "en")]
    pub primary: Option<String>,
    #[serde(default, alias = "fi")]
    pub secondary: Option<String>,
    #[serde(default, alias = "cats")]
    pub categories: Option<Vec<String>>,
    #[serde(default, alias = "diff")]
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordFile {
    Wrapped { words: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

/// Immutable, ordered word list for a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Arc<WordEntry>>,
}

impl Catalog {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn entries(&self) -> &[Arc<WordEntry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_primary(&self, text: &str) -> Option<&Arc<WordEntry>> {
        self.entries.iter().find(|e| e.primary_text() == text)
    }

    /// Every category key used by at least one entry, in display order
    pub fn categories(&self) -> Vec<CategoryKey> {
        let keys: BTreeSet<&CategoryKey> =
            self.entries.iter().flat_map(|e| e.categories()).collect();
        sort_categories(keys.into_iter().cloned())
    }
}

/// Validate a raw record. Returns `None` if either display text is missing.
pub fn normalize(raw: &RawWord) -> Option<WordEntry> {
    let primary = raw.primary.as_deref().unwrap_or("").trim();
    let secondary = raw.secondary.as_deref().unwrap_or("").trim();
    if primary.is_empty() || secondary.is_empty() {
        return None;
    }

    let mut categories: BTreeSet<CategoryKey> = raw
        .categories
        .iter()
        .flatten()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty() && !c.chars().any(char::is_control))
        .map(str::to_string)
        .collect();
    if categories.is_empty() {
        categories.insert(DEFAULT_CATEGORY.to_string());
    }

    let difficulty = raw
        .difficulty
        .as_deref()
        .and_then(Difficulty::parse)
        .unwrap_or_else(|| Difficulty::infer(primary, secondary));

    Some(WordEntry::from_parts(
        primary.to_string(),
        secondary.to_string(),
        categories,
        difficulty,
    ))
}

/// Normalize a whole list, dropping rejected records and keeping source order.
pub fn load_all(raw: &[RawWord]) -> Catalog {
    let entries: Vec<WordEntry> = raw.iter().filter_map(normalize).collect();
    let rejected = raw.len() - entries.len();
    if rejected > 0 {
        tracing::debug!("Skipped {} word records without both texts", rejected);
    }
    Catalog::new(entries)
}

/// Parse a word file body (`{"words": [...]}` or a bare array).
///
/// A record that isn't an object of the expected shape is skipped; only a body
/// that isn't a word list at all is an error.
pub fn parse_word_file(json: &str) -> Result<Catalog, DataLoadError> {
    let file: WordFile = serde_json::from_str(json)?;
    let values = match file {
        WordFile::Wrapped { words } => words,
        WordFile::Bare(words) => words,
    };

    let mut raw = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<RawWord>(value) {
            Ok(word) => raw.push(word),
            Err(e) => tracing::debug!("Skipping malformed word record: {}", e),
        }
    }

    Ok(load_all(&raw))
}

pub async fn try_load_from_path(path: impl AsRef<Path>) -> Result<Catalog, DataLoadError> {
    let body = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_word_file(&body)
}

/// Load the word file, degrading to an empty catalog on any failure.
///
/// An empty catalog makes every round start fail with an empty-pool error,
/// which is how "no words available" reaches the player.
pub async fn load_from_path(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    match try_load_from_path(path).await {
        Ok(catalog) => {
            tracing::info!(
                "Loaded {} words from {}",
                catalog.len(),
                path.display()
            );
            catalog
        }
        Err(e) => {
            tracing::warn!("Failed to load word bank from {}: {}", path.display(), e);
            Catalog::default()
        }
    }
}

/// Order category keys canonically; unknown keys go last, sorted lexically
pub fn sort_categories(keys: impl IntoIterator<Item = CategoryKey>) -> Vec<CategoryKey> {
    let unique: BTreeSet<CategoryKey> = keys.into_iter().collect();
    let mut sorted: Vec<CategoryKey> = unique.into_iter().collect();
    sorted.sort_by_key(|k| {
        let rank = CATEGORY_KEYS
            .iter()
            .position(|c| *c == k.as_str())
            .unwrap_or(CATEGORY_KEYS.len());
        (rank, k.clone())
    });
    sorted
}
