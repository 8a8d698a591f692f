//! Eligible-word selection.

use crate::catalog::Catalog;
use crate::types::{CategoryKey, Difficulty, WordEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Separates items within a group of the filter key
const ITEM_SEP: char = '\u{1f}';
/// Separates the difficulty, included and banned groups
const GROUP_SEP: char = '\u{1e}';

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSpec {
    pub selected_difficulties: BTreeSet<Difficulty>,
    pub included_categories: BTreeSet<CategoryKey>,
    pub banned_categories: BTreeSet<CategoryKey>,
}

impl FilterSpec {
    /// Every difficulty and every category the catalog knows, nothing banned
    pub fn everything(catalog: &Catalog) -> Self {
        Self {
            selected_difficulties: Difficulty::ALL.into_iter().collect(),
            included_categories: catalog.categories().into_iter().collect(),
            banned_categories: BTreeSet::new(),
        }
    }

    pub fn with_difficulties(mut self, difficulties: impl IntoIterator<Item = Difficulty>) -> Self {
        self.selected_difficulties = difficulties.into_iter().collect();
        self
    }

    pub fn with_categories<S: Into<CategoryKey>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.included_categories = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Ban categories. A key can't be both included and banned, so banned keys
    /// are also dropped from the included set.
    pub fn with_banned<S: Into<CategoryKey>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.banned_categories = keys.into_iter().map(Into::into).collect();
        let banned = &self.banned_categories;
        self.included_categories.retain(|k| !banned.contains(k));
        self
    }

    /// Whether a single entry passes difficulty, inclusion and exclusion
    pub fn accepts(&self, entry: &WordEntry) -> bool {
        self.selected_difficulties.contains(&entry.difficulty())
            && entry
                .categories()
                .iter()
                .any(|c| self.included_categories.contains(c))
            && !entry
                .categories()
                .iter()
                .any(|c| self.banned_categories.contains(c))
    }

    /// Deterministic identity of this selection, used to detect deck rebuilds.
    pub fn key(&self) -> String {
        let difficulties: Vec<&str> = self
            .selected_difficulties
            .iter()
            .map(Difficulty::as_str)
            .collect();
        let included: Vec<&str> = self.included_categories.iter().map(String::as_str).collect();
        let banned: Vec<&str> = self.banned_categories.iter().map(String::as_str).collect();

        let sep = ITEM_SEP.to_string();
        [difficulties.join(&sep), included.join(&sep), banned.join(&sep)].join(&GROUP_SEP.to_string())
    }
}

/// Eligible entries for `spec`, in catalog order.
///
/// An empty difficulty or category selection yields an empty pool right away;
/// that is the "nothing eligible" signal, not an error.
pub fn build_pool(catalog: &Catalog, spec: &FilterSpec) -> Vec<Arc<WordEntry>> {
    if spec.selected_difficulties.is_empty() || spec.included_categories.is_empty() {
        return Vec::new();
    }

    catalog
        .entries()
        .iter()
        .filter(|e| spec.accepts(e))
        .cloned()
        .collect()
}

pub fn filter_key(spec: &FilterSpec) -> String {
    spec.key()
}
