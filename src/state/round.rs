use super::RoundSession;
use crate::decoy::choose_decoy;
use crate::error::RoundError;
use crate::filter::{build_pool, FilterSpec};
use crate::impostor::{choose_impostors, ImpostorPolicy};
use crate::rng::RandomSource;
use crate::types::*;

impl RoundSession {
    /// Deal a new round to `total_players` seats.
    ///
    /// Nothing changes when this fails.
    pub fn start(
        &mut self,
        total_players: u32,
        filter: &FilterSpec,
        options: RoundOptions,
    ) -> Result<&RoundSetup, RoundError> {
        if self.phase != RoundPhase::Setup {
            return Err(RoundError::RoundInProgress);
        }
        if total_players < MIN_PLAYERS {
            return Err(RoundError::TooFewPlayers(total_players));
        }

        let pool = build_pool(&self.catalog, filter);
        if pool.is_empty() {
            tracing::info!("No eligible words for the current filter");
            return Err(RoundError::EmptyPool);
        }

        let rng: &mut dyn RandomSource = &mut *self.rng;
        self.deck.ensure_deck(&pool, filter, rng);
        let secret = self.deck.draw().ok_or(RoundError::EmptyPool)?;

        let policy = ImpostorPolicy {
            allow_multiple: options.allow_multiple_impostors,
            multiple_chance: options.multiple_chance,
        };
        let impostor_seats = choose_impostors(total_players, &policy, rng);

        let decoy = if options.hidden_impostor {
            choose_decoy(&secret, &pool, rng)
        } else {
            None
        };

        self.round_no += 1;
        let setup = RoundSetup {
            id: ulid::Ulid::new().to_string(),
            number: self.round_no,
            started_at: chrono::Utc::now().to_rfc3339(),
            total_players,
            secret,
            decoy,
            impostor_seats,
            options,
        };

        tracing::info!(
            "Round {} started: {} players, {} impostor(s), pool of {}",
            setup.number,
            total_players,
            setup.impostor_seats.len(),
            pool.len()
        );

        self.phase = RoundPhase::Dealing { seat: 1 };
        self.card.hide();
        self.exit_hold.cancel();
        Ok(self.setup.insert(setup))
    }

    /// Move on to the next seat, or to Done after the last one.
    pub fn advance(&mut self) -> Result<RoundPhase, RoundError> {
        let (seat, total) = match (self.phase, self.setup.as_ref()) {
            (RoundPhase::Dealing { seat }, Some(setup)) => (seat, setup.total_players),
            _ => return Err(RoundError::NotDealing),
        };

        self.card.hide();
        self.phase = if seat >= total {
            RoundPhase::Done
        } else {
            RoundPhase::Dealing { seat: seat + 1 }
        };
        Ok(self.phase)
    }

    /// Drop the current round and go back to setup. The deck survives.
    pub fn reset(&mut self) {
        if self.setup.take().is_some() {
            tracing::debug!("Round {} discarded", self.round_no);
        }
        self.phase = RoundPhase::Setup;
        self.card.hide();
        self.exit_hold.cancel();
    }
}
