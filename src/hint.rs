//! Category hints shown on revealed cards.

use crate::catalog::sort_categories;
use crate::types::{CategoryKey, Language, WordEntry};
use serde::Serialize;

/// Display labels for the built-in categories: (key, primary, secondary)
const CATEGORY_LABELS: &[(&str, &str, &str)] = &[
    ("space", "Space", "Avaruus"),
    ("food", "Food", "Ruoka"),
    ("animal", "Animal", "Eläin"),
    ("person", "Person", "Henkilö"),
    ("vehicle", "Vehicle", "Ajoneuvo"),
    ("place", "Place", "Paikka"),
    ("nature", "Nature", "Luonto"),
    ("activity", "Activity", "Toiminta"),
    ("thing", "Thing", "Esine"),
    ("movies", "Movies", "Elokuvat"),
    ("music", "Music", "Musiikki"),
    ("kinojuha", "Kinojuha", "Kinojuha"),
    ("intti", "Military service", "Intti"),
    ("suomi", "Finland", "Suomi"),
];

/// Label for a category key, or the key itself when it has no label.
pub fn category_label(key: &str, language: Language) -> &str {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, primary, secondary)| match language {
            Language::Primary => *primary,
            Language::Secondary => *secondary,
        })
        .unwrap_or(key)
}

/// The secret's categories, deduplicated and in display order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryHint {
    categories: Vec<CategoryKey>,
}

impl CategoryHint {
    pub fn for_word(entry: &WordEntry) -> Self {
        Self::from_keys(entry.categories().iter().cloned())
    }

    pub fn from_keys(keys: impl IntoIterator<Item = CategoryKey>) -> Self {
        Self {
            categories: sort_categories(keys),
        }
    }

    pub fn categories(&self) -> &[CategoryKey] {
        &self.categories
    }

    /// More than one category, so the card should say "categories"
    pub fn is_plural(&self) -> bool {
        self.categories.len() > 1
    }

    /// "Food / Nature"
    pub fn label(&self, language: Language) -> String {
        self.categories
            .iter()
            .map(|k| category_label(k, language))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
