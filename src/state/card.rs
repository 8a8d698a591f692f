use super::RoundSession;
use crate::error::RoundError;
use crate::types::*;

/// What happened on one `tick`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The current card turned face up
    pub revealed: bool,
    /// The exit hold elapsed and the session went back to setup
    pub exited: bool,
}

impl RoundSession {
    /// Player starts holding the face-down card.
    pub fn begin_reveal_hold(&mut self, duration_ms: u64) -> Result<(), RoundError> {
        if self.current_seat().is_none() {
            return Err(RoundError::NotDealing);
        }
        self.card.begin_hold(duration_ms);
        Ok(())
    }

    pub fn release_reveal_hold(&mut self) {
        self.card.release();
    }

    /// Hide the face-up card and pass the device to the next seat.
    pub fn close_card(&mut self) -> Result<RoundPhase, RoundError> {
        let seat = self.current_seat().ok_or(RoundError::NotDealing)?;
        if !self.card.is_face_up() {
            return Err(RoundError::CardNotFaceUp(seat));
        }
        self.advance()
    }

    /// Start the hold-to-exit countdown. Nothing to exit from in setup.
    pub fn begin_exit_hold(&mut self, duration_ms: u64) {
        if self.phase == RoundPhase::Setup {
            return;
        }
        if duration_ms == 0 {
            self.reset();
            return;
        }
        self.exit_hold.start(duration_ms);
    }

    pub fn release_exit_hold(&mut self) {
        self.exit_hold.cancel();
    }

    /// Advance both countdowns by `step_ms`.
    pub fn tick(&mut self, step_ms: u64) -> TickOutcome {
        if self.exit_hold.tick(step_ms) {
            tracing::info!("Exit hold elapsed, back to setup");
            self.reset();
            return TickOutcome {
                revealed: false,
                exited: true,
            };
        }

        TickOutcome {
            revealed: self.card.tick(step_ms),
            exited: false,
        }
    }
}
