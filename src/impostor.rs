//! Impostor count and seat selection.

use crate::rng::RandomSource;
use crate::types::{Seat, DEFAULT_MULTIPLE_CHANCE};
use std::collections::BTreeSet;

/// Never more impostors than this, whatever the table size
pub const MAX_IMPOSTORS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpostorPolicy {
    pub allow_multiple: bool,
    /// Chance of upgrading from one impostor to two, in [0, 1]
    pub multiple_chance: f64,
}

impl Default for ImpostorPolicy {
    fn default() -> Self {
        Self {
            allow_multiple: false,
            multiple_chance: DEFAULT_MULTIPLE_CHANCE,
        }
    }
}

/// How many impostors this round gets.
///
/// One by default. With `allow_multiple`, a `multiple_chance` roll on 1..=100
/// upgrades to two, and a fair coin after that upgrades to three. The result
/// always leaves at least one detective.
pub fn impostor_count(total_players: u32, policy: &ImpostorPolicy, rng: &mut dyn RandomSource) -> u32 {
    let max_impostors = total_players.saturating_sub(1).max(1);
    let mut count = 1;

    if policy.allow_multiple && max_impostors >= 2 {
        let threshold = (policy.multiple_chance.clamp(0.0, 1.0) * 100.0).round() as u32;
        if rng.random_int(1, 100) <= threshold {
            count = 2;
        }
    }

    if count == 2 && max_impostors >= 3 && rng.random_int(0, 1) == 1 {
        count = 3;
    }

    count.min(max_impostors).min(MAX_IMPOSTORS)
}

/// Pick impostor seats (1-based), returned in ascending order.
pub fn choose_impostors(
    total_players: u32,
    policy: &ImpostorPolicy,
    rng: &mut dyn RandomSource,
) -> BTreeSet<Seat> {
    let count = impostor_count(total_players, policy, rng) as usize;

    let mut seats = BTreeSet::new();
    while seats.len() < count {
        seats.insert(rng.random_int(1, total_players));
    }

    debug_assert!(seats.len() < total_players as usize || total_players <= 1);
    seats
}
