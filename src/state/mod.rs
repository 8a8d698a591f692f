//! Round orchestration.
//!
//! [`RoundSession`] owns the catalog, the deck, the random source and the
//! current round. Presentation code drives it and reads from it, but never
//! mutates round data directly.

mod card;
mod reveal;
mod round;

pub use card::TickOutcome;
pub use reveal::{CardFace, RoundSummary, SeatReveal};

use crate::catalog::Catalog;
use crate::deck::ShuffleDeck;
use crate::filter::{self, FilterSpec};
use crate::rng::{RandomSource, SecureRandom};
use crate::timer::{CardState, Countdown, RevealState};
use crate::types::*;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct RoundSession {
    catalog: Catalog,
    deck: ShuffleDeck,
    rng: Box<dyn RandomSource + Send>,
    phase: RoundPhase,
    setup: Option<RoundSetup>,
    round_no: u32,
    card: CardState,
    exit_hold: Countdown,
}

impl RoundSession {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, SecureRandom::new())
    }

    pub fn with_rng(catalog: Catalog, rng: impl RandomSource + Send + 'static) -> Self {
        Self {
            catalog,
            deck: ShuffleDeck::new(),
            rng: Box::new(rng),
            phase: RoundPhase::Setup,
            setup: None,
            round_no: 0,
            card: CardState::new(),
            exit_hold: Countdown::new(),
        }
    }

    /// Carry the last secret over from a previous session so the first round
    /// doesn't repeat it.
    pub fn with_last_secret(mut self, text: impl Into<String>) -> Self {
        self.deck = self.deck.with_last_drawn(text);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Eligible words for `spec`, in catalog order.
    pub fn build_pool(&self, spec: &FilterSpec) -> Vec<Arc<WordEntry>> {
        filter::build_pool(&self.catalog, spec)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn current_seat(&self) -> Option<Seat> {
        match self.phase {
            RoundPhase::Dealing { seat } => Some(seat),
            _ => None,
        }
    }

    pub fn total_players(&self) -> Option<u32> {
        self.setup.as_ref().map(|s| s.total_players)
    }

    pub fn impostor_seats(&self) -> Option<&BTreeSet<Seat>> {
        self.setup.as_ref().map(|s| &s.impostor_seats)
    }

    pub fn setup(&self) -> Option<&RoundSetup> {
        self.setup.as_ref()
    }

    /// Rounds started since the session was created
    pub fn round_no(&self) -> u32 {
        self.round_no
    }

    pub fn last_secret(&self) -> Option<&str> {
        self.deck.last_drawn()
    }

    pub fn card_state(&self) -> RevealState {
        self.card.state()
    }

    pub fn exit_hold_remaining(&self) -> Option<u64> {
        self.exit_hold.remaining_ms()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::{load_all, Catalog, RawWord};

    pub fn word(text: &str, cats: &[&str], diff: &str) -> RawWord {
        RawWord {
            primary: Some(text.to_string()),
            secondary: Some(format!("{text}-fi")),
            categories: Some(cats.iter().map(|c| c.to_string()).collect()),
            difficulty: Some(diff.to_string()),
        }
    }

    pub fn catalog() -> Catalog {
        load_all(&[
            word("Banana", &["food"], "easy"),
            word("Rocket", &["space", "vehicle"], "hard"),
            word("Sauna", &["suomi", "place"], "medium"),
        ])
    }
}
