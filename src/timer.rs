//! Hold-to-confirm countdowns.
//!
//! The engine never owns a timer. A driver calls `tick` on a fixed step while
//! the player keeps holding, and `cancel`/`release` when they let go.

use crate::types::Language;
use serde::{Deserialize, Serialize};

pub const HOLD_REVEAL_MS: u64 = 1000;
pub const EXIT_HOLD_MS: u64 = 3000;
pub const HOLD_STEP_MS: u64 = 100;

/// A countdown that is either idle or running with some time left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: Option<u64>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) from `duration_ms`.
    pub fn start(&mut self, duration_ms: u64) {
        self.remaining_ms = Some(duration_ms);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    /// Advance by `step_ms`. Returns true exactly once, on the tick that
    /// expires the countdown; the countdown is idle afterwards.
    pub fn tick(&mut self, step_ms: u64) -> bool {
        match self.remaining_ms {
            Some(remaining) if remaining <= step_ms => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - step_ms);
                false
            }
            None => false,
        }
    }
}

/// Seconds with one decimal, as shown on a hold button ("0.7", or "0,7" in Finnish)
pub fn format_tenths(ms: u64, language: Language) -> String {
    let tenths = (ms + 50) / 100;
    let sep = match language {
        Language::Primary => '.',
        Language::Secondary => ',',
    };
    format!("{}{}{}", tenths / 10, sep, tenths % 10)
}

/// What the current seat's card shows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RevealState {
    #[default]
    FaceDown,
    Revealing {
        remaining_ms: u64,
    },
    FaceUp,
}

/// Card state machine for one seat.
///
/// FaceDown -> Revealing while held -> FaceUp once the hold elapses.
/// Letting go early drops back to FaceDown.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardState {
    state: RevealState,
    hold: Countdown,
}

impl CardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_face_up(&self) -> bool {
        self.state == RevealState::FaceUp
    }

    /// Start holding. Ignored unless the card is face down.
    pub fn begin_hold(&mut self, duration_ms: u64) {
        if self.state != RevealState::FaceDown {
            return;
        }
        if duration_ms == 0 {
            self.state = RevealState::FaceUp;
            return;
        }
        self.hold.start(duration_ms);
        self.state = RevealState::Revealing {
            remaining_ms: duration_ms,
        };
    }

    /// Let go before the hold elapsed. A face-up card stays face up.
    pub fn release(&mut self) {
        if let RevealState::Revealing { .. } = self.state {
            self.hold.cancel();
            self.state = RevealState::FaceDown;
        }
    }

    /// Returns true on the tick that turns the card face up.
    pub fn tick(&mut self, step_ms: u64) -> bool {
        if !matches!(self.state, RevealState::Revealing { .. }) {
            return false;
        }
        if self.hold.tick(step_ms) {
            self.state = RevealState::FaceUp;
            return true;
        }
        if let Some(remaining_ms) = self.hold.remaining_ms() {
            self.state = RevealState::Revealing { remaining_ms };
        }
        false
    }

    /// Turn the card back over, e.g. when passing the device on.
    pub fn hide(&mut self) {
        self.hold.cancel();
        self.state = RevealState::FaceDown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_once() {
        let mut c = Countdown::new();
        c.start(300);
        assert!(!c.tick(100));
        assert!(!c.tick(100));
        assert!(c.tick(100));
        assert!(!c.is_running());
        assert!(!c.tick(100));
    }

    #[test]
    fn test_countdown_cancel() {
        let mut c = Countdown::new();
        c.start(200);
        c.tick(100);
        assert_eq!(c.remaining_ms(), Some(100));
        c.cancel();
        assert!(!c.tick(100));
        assert_eq!(c.remaining_ms(), None);
    }

    #[test]
    fn test_countdown_uneven_step() {
        let mut c = Countdown::new();
        c.start(250);
        assert!(!c.tick(100));
        assert!(!c.tick(100));
        assert!(c.tick(100));
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(1000, Language::Primary), "1.0");
        assert_eq!(format_tenths(700, Language::Primary), "0.7");
        assert_eq!(format_tenths(2900, Language::Secondary), "2,9");
        assert_eq!(format_tenths(0, Language::Secondary), "0,0");
    }

    #[test]
    fn test_card_reveals_after_full_hold() {
        let mut card = CardState::new();
        card.begin_hold(HOLD_REVEAL_MS);
        for _ in 0..9 {
            assert!(!card.tick(HOLD_STEP_MS));
        }
        assert_eq!(card.state(), RevealState::Revealing { remaining_ms: 100 });
        assert!(card.tick(HOLD_STEP_MS));
        assert!(card.is_face_up());
    }

    #[test]
    fn test_card_release_before_expiry_stays_face_down() {
        let mut card = CardState::new();
        card.begin_hold(HOLD_REVEAL_MS);
        card.tick(HOLD_STEP_MS);
        card.release();
        assert_eq!(card.state(), RevealState::FaceDown);

        // Ticks after letting go do nothing
        for _ in 0..20 {
            assert!(!card.tick(HOLD_STEP_MS));
        }
        assert_eq!(card.state(), RevealState::FaceDown);
    }

    #[test]
    fn test_card_release_after_reveal_keeps_face_up() {
        let mut card = CardState::new();
        card.begin_hold(200);
        card.tick(100);
        card.tick(100);
        card.release();
        assert!(card.is_face_up());

        card.hide();
        assert_eq!(card.state(), RevealState::FaceDown);
    }

    #[test]
    fn test_begin_hold_while_face_up_is_ignored() {
        let mut card = CardState::new();
        card.begin_hold(0);
        assert!(card.is_face_up());
        card.begin_hold(HOLD_REVEAL_MS);
        assert!(card.is_face_up());
    }
}
