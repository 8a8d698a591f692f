//! Shuffled no-repeat deck of eligible words.

use crate::filter::{filter_key, FilterSpec};
use crate::rng::RandomSource;
use crate::types::WordEntry;
use std::sync::Arc;

/// Draws every eligible word once, in shuffled order, before any repeats.
///
/// The deck is tied to the filter it was built for and is rebuilt when the
/// filter changes or the deck runs dry. It also remembers the last secret
/// drawn (across filters) so a reshuffle doesn't hand out the same word twice
/// in a row.
#[derive(Debug, Clone, Default)]
pub struct ShuffleDeck {
    filter_key: Option<String>,
    remaining: Vec<Arc<WordEntry>>,
    last_drawn: Option<String>,
}

impl ShuffleDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repeat guard, e.g. with the last secret of a previous session.
    pub fn with_last_drawn(mut self, text: impl Into<String>) -> Self {
        self.last_drawn = Some(text.into());
        self
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn last_drawn(&self) -> Option<&str> {
        self.last_drawn.as_deref()
    }

    pub fn filter_key(&self) -> Option<&str> {
        self.filter_key.as_deref()
    }

    /// Rebuild from `pool` if the filter changed or the deck is empty.
    pub fn ensure_deck(
        &mut self,
        pool: &[Arc<WordEntry>],
        spec: &FilterSpec,
        rng: &mut dyn RandomSource,
    ) {
        let key = filter_key(spec);
        if self.filter_key.as_deref() == Some(key.as_str()) && !self.remaining.is_empty() {
            return;
        }

        tracing::debug!(
            "Rebuilding deck with {} words (filter changed: {})",
            pool.len(),
            self.filter_key.as_deref() != Some(key.as_str())
        );
        self.remaining = pool.to_vec();
        shuffle_in_place(&mut self.remaining, rng);
        self.filter_key = Some(key);
    }

    /// Pop the next word. `None` only if the deck was built from an empty pool.
    pub fn draw(&mut self) -> Option<Arc<WordEntry>> {
        let mut pick = self.remaining.pop()?;

        let repeats_last = self.last_drawn.as_deref() == Some(pick.primary_text());
        if repeats_last && !self.remaining.is_empty() {
            self.remaining.insert(0, pick);
            // The deck had at least two entries, so this pop can't miss
            pick = self.remaining.pop()?;
        }

        self.last_drawn = Some(pick.primary_text().to_string());
        Some(pick)
    }
}

/// Unbiased Fisher–Yates shuffle.
pub fn shuffle_in_place<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.random_int(0, i as u32) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{load_all, RawWord};
    use crate::rng::{ScriptedRandom, SecureRandom};
    use crate::types::Difficulty;
    use std::collections::HashSet;

    fn pool_of(texts: &[&str]) -> Vec<Arc<WordEntry>> {
        let raw: Vec<RawWord> = texts
            .iter()
            .map(|t| RawWord {
                primary: Some(t.to_string()),
                secondary: Some(t.to_string()),
                categories: Some(vec!["thing".to_string()]),
                difficulty: Some("easy".to_string()),
            })
            .collect();
        load_all(&raw).entries().to_vec()
    }

    fn any_filter() -> FilterSpec {
        FilterSpec::default()
            .with_difficulties(Difficulty::ALL)
            .with_categories(["thing"])
    }

    #[test]
    fn test_draws_cover_pool_exactly_once() {
        let pool = pool_of(&["A", "B", "C", "D", "E", "F", "G"]);
        let spec = any_filter();
        let mut rng = SecureRandom::new();
        let mut deck = ShuffleDeck::new();

        let mut seen = Vec::new();
        for _ in 0..pool.len() {
            deck.ensure_deck(&pool, &spec, &mut rng);
            seen.push(deck.draw().unwrap());
        }

        for entry in &pool {
            assert_eq!(seen.iter().filter(|s| Arc::ptr_eq(s, entry)).count(), 1);
        }
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_identical_texts_are_distinct_entries() {
        let pool = pool_of(&["Same", "Same"]);
        let spec = any_filter();
        let mut rng = SecureRandom::new();
        let mut deck = ShuffleDeck::new();

        deck.ensure_deck(&pool, &spec, &mut rng);
        let first = deck.draw().unwrap();
        deck.ensure_deck(&pool, &spec, &mut rng);
        let second = deck.draw().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_filter_change_forces_rebuild() {
        let pool = pool_of(&["A", "B", "C", "D"]);
        let mut rng = SecureRandom::new();
        let mut deck = ShuffleDeck::new();

        let spec = any_filter();
        deck.ensure_deck(&pool, &spec, &mut rng);
        deck.draw();
        assert_eq!(deck.remaining(), 3);

        let other = any_filter().with_difficulties([Difficulty::Easy]);
        deck.ensure_deck(&pool, &other, &mut rng);
        assert_eq!(deck.remaining(), 4);
        assert_eq!(deck.filter_key(), Some(other.key().as_str()));
    }

    #[test]
    fn test_stable_filter_keeps_deck() {
        let pool = pool_of(&["A", "B", "C"]);
        let spec = any_filter();
        let mut rng = SecureRandom::new();
        let mut deck = ShuffleDeck::new();

        deck.ensure_deck(&pool, &spec, &mut rng);
        deck.draw();
        deck.ensure_deck(&pool, &spec, &mut rng);
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn test_empty_pool_draws_nothing() {
        let mut deck = ShuffleDeck::new();
        let mut rng = SecureRandom::new();
        deck.ensure_deck(&[], &any_filter(), &mut rng);
        assert!(deck.draw().is_none());
    }

    #[test]
    fn test_immediate_repeat_is_requeued() {
        let pool = pool_of(&["A", "B", "C"]);
        let spec = any_filter();
        // swap(2, 1) then swap(1, 1): [A, B, C] -> [A, C, B], "B" on top
        let mut rng = ScriptedRandom::new(vec![1, 1]);
        let mut deck = ShuffleDeck::new().with_last_drawn("B");

        deck.ensure_deck(&pool, &spec, &mut rng);
        let pick = deck.draw().unwrap();
        assert_eq!(pick.primary_text(), "C");
        assert_eq!(deck.last_drawn(), Some("C"));
        assert_eq!(deck.remaining(), 2);

        // "B" went to the bottom of the deck
        assert_eq!(deck.draw().unwrap().primary_text(), "A");
        assert_eq!(deck.draw().unwrap().primary_text(), "B");
    }

    #[test]
    fn test_single_word_pool_may_repeat() {
        let pool = pool_of(&["Only"]);
        let spec = any_filter();
        let mut rng = SecureRandom::new();
        let mut deck = ShuffleDeck::new().with_last_drawn("Only");

        deck.ensure_deck(&pool, &spec, &mut rng);
        assert_eq!(deck.draw().unwrap().primary_text(), "Only");
    }

    #[test]
    fn test_no_back_to_back_repeat_across_reshuffles() {
        let pool = pool_of(&["A", "B", "C"]);
        let spec = any_filter();
        let mut rng = SecureRandom::new();
        let mut deck = ShuffleDeck::new();

        let mut previous: Option<String> = None;
        for _ in 0..60 {
            deck.ensure_deck(&pool, &spec, &mut rng);
            let pick = deck.draw().unwrap().primary_text().to_string();
            assert_ne!(previous.as_deref(), Some(pick.as_str()));
            previous = Some(pick);
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        let mut rng = SecureRandom::new();
        shuffle_in_place(&mut items, &mut rng);
        let unique: HashSet<u32> = items.iter().copied().collect();
        assert_eq!(unique.len(), 50);
    }
}
