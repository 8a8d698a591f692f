//! Decoy word selection for hidden-impostor rounds.

use crate::rng::RandomSource;
use crate::types::WordEntry;
use std::sync::Arc;

/// Pick a decoy that is easy to confuse with `secret`.
///
/// Prefers words with the same difficulty and a shared category, then any
/// shared category, then anything else in the pool. Only an empty or
/// single-word pool yields `None`.
pub fn choose_decoy(
    secret: &Arc<WordEntry>,
    pool: &[Arc<WordEntry>],
    rng: &mut dyn RandomSource,
) -> Option<Arc<WordEntry>> {
    let others: Vec<&Arc<WordEntry>> = pool.iter().filter(|w| !Arc::ptr_eq(w, secret)).collect();

    let related: Vec<&Arc<WordEntry>> = others
        .iter()
        .copied()
        .filter(|w| w.shares_category_with(secret))
        .collect();
    let strong: Vec<&Arc<WordEntry>> = related
        .iter()
        .copied()
        .filter(|w| w.difficulty() == secret.difficulty())
        .collect();

    let candidates = if !strong.is_empty() {
        strong
    } else if !related.is_empty() {
        related
    } else {
        others
    };

    if candidates.is_empty() {
        return None;
    }
    let idx = rng.random_int(0, (candidates.len() - 1) as u32) as usize;
    candidates.get(idx).map(|&w| Arc::clone(w))
}
