use super::RoundSession;
use crate::hint::CategoryHint;
use crate::types::*;
use serde::Serialize;
use std::sync::Arc;

/// What is printed on a card
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "word")]
pub enum CardFace {
    Word(Arc<WordEntry>),
    /// "You are the impostor"
    ImpostorSignal,
    /// Shown to impostors who don't get told. Carries no information.
    StealthSignal,
}

/// One seat's card, derived from the round setup on demand
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeatReveal {
    pub seat: Seat,
    pub role: Role,
    pub face: CardFace,
    pub hint: Option<CategoryHint>,
    /// Only for impostors, and only when the round shows it
    pub impostor_count: Option<usize>,
}

impl SeatReveal {
    pub fn word(&self) -> Option<&Arc<WordEntry>> {
        match &self.face {
            CardFace::Word(word) => Some(word),
            _ => None,
        }
    }
}

/// End-of-round disclosure
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub secret: Arc<WordEntry>,
    pub decoy: Option<Arc<WordEntry>>,
    pub impostor_seats: Vec<Seat>,
    pub detective_seats: Vec<Seat>,
}

fn reveal_for(setup: &RoundSetup, seat: Seat) -> SeatReveal {
    let options = &setup.options;
    let role = setup.role(seat);

    let face = match role {
        Role::Detective => CardFace::Word(Arc::clone(&setup.secret)),
        Role::Impostor => match (&setup.decoy, options.hidden_impostor) {
            (Some(decoy), true) => CardFace::Word(Arc::clone(decoy)),
            _ if options.impostor_knows => CardFace::ImpostorSignal,
            _ => CardFace::StealthSignal,
        },
    };

    // Hints always describe the secret, even on a decoy card
    let show_hint = match role {
        Role::Impostor => options.impostor_hint,
        Role::Detective => options.detective_hint,
    };
    let hint = show_hint.then(|| CategoryHint::for_word(&setup.secret));

    let impostor_count = (role == Role::Impostor && options.show_impostor_count)
        .then(|| setup.impostor_seats.len());

    SeatReveal {
        seat,
        role,
        face,
        hint,
        impostor_count,
    }
}

impl RoundSession {
    /// The card for whoever holds the device right now
    pub fn current_reveal(&self) -> Option<SeatReveal> {
        self.reveal_for_seat(self.current_seat()?)
    }

    /// The card a given seat gets this round, or `None` outside a round
    pub fn reveal_for_seat(&self, seat: Seat) -> Option<SeatReveal> {
        let setup = self.setup.as_ref()?;
        if seat == 0 || seat > setup.total_players {
            return None;
        }
        Some(reveal_for(setup, seat))
    }

    pub fn summary(&self) -> Option<RoundSummary> {
        let setup = self.setup.as_ref()?;
        Some(RoundSummary {
            round_id: setup.id.clone(),
            secret: Arc::clone(&setup.secret),
            decoy: setup.decoy.clone(),
            impostor_seats: setup.impostor_seats.iter().copied().collect(),
            detective_seats: setup.detective_seats(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::catalog::load_all;
    use crate::filter::FilterSpec;
    use crate::rng::ScriptedRandom;

    // Two words sharing "space" so hidden rounds always get a decoy.
    // Script: one shuffle swap (0), gate fails (100), impostor at seat 2,
    // then decoy index 0.
    fn dealt(options: RoundOptions) -> RoundSession {
        let catalog = load_all(&[
            word("Rocket", &["vehicle", "space"], "hard"),
            word("Comet", &["space"], "hard"),
        ]);
        let mut session = RoundSession::with_rng(catalog, ScriptedRandom::new(vec![0, 100, 2, 0]));
        let spec = FilterSpec::everything(session.catalog());
        session.start(3, &spec, options).unwrap();
        session
    }

    fn at(session: &RoundSession, seat: Seat) -> SeatReveal {
        session.reveal_for_seat(seat).unwrap()
    }

    #[test]
    fn test_detectives_see_secret_impostor_sees_signal() {
        let session = dealt(RoundOptions::default());
        let secret = Arc::clone(&session.setup().unwrap().secret);

        let first = session.current_reveal().unwrap();
        assert_eq!(first.seat, 1);
        assert_eq!(first.role, Role::Detective);
        assert!(Arc::ptr_eq(first.word().unwrap(), &secret));
        assert!(first.hint.is_none());

        let impostor = at(&session, 2);
        assert_eq!(impostor.role, Role::Impostor);
        assert_eq!(impostor.face, CardFace::ImpostorSignal);
        assert!(impostor.word().is_none());
        assert_eq!(impostor.impostor_count, None);
    }

    #[test]
    fn test_impostor_hint_lists_secret_categories() {
        let session = dealt(RoundOptions::default());
        let secret = Arc::clone(&session.setup().unwrap().secret);

        let hint = at(&session, 2).hint.unwrap();
        assert_eq!(hint, CategoryHint::for_word(&secret));

        let no_hint = RoundOptions {
            impostor_hint: false,
            ..RoundOptions::default()
        };
        assert!(at(&dealt(no_hint), 2).hint.is_none());
    }

    #[test]
    fn test_detective_hint_toggle() {
        let options = RoundOptions {
            detective_hint: true,
            ..RoundOptions::default()
        };
        let session = dealt(options);
        assert!(at(&session, 1).hint.is_some());
        assert!(at(&session, 3).hint.is_some());
    }

    #[test]
    fn test_stealth_signal_when_impostor_not_told() {
        let options = RoundOptions {
            impostor_knows: false,
            ..RoundOptions::default()
        };
        let session = dealt(options);
        assert_eq!(at(&session, 2).face, CardFace::StealthSignal);
        assert_eq!(at(&session, 2).role, Role::Impostor);
    }

    #[test]
    fn test_hidden_impostor_gets_decoy_with_secret_hint() {
        let options = RoundOptions {
            hidden_impostor: true,
            ..RoundOptions::default()
        };
        let session = dealt(options);
        let setup = session.setup().unwrap();
        let decoy = setup.decoy.clone().unwrap();

        let impostor = at(&session, 2);
        assert!(Arc::ptr_eq(impostor.word().unwrap(), &decoy));
        assert!(!Arc::ptr_eq(impostor.word().unwrap(), &setup.secret));
        assert_eq!(impostor.hint, Some(CategoryHint::for_word(&setup.secret)));
    }

    #[test]
    fn test_impostor_count_only_for_impostors() {
        let options = RoundOptions {
            show_impostor_count: true,
            ..RoundOptions::default()
        };
        let session = dealt(options);
        assert_eq!(at(&session, 2).impostor_count, Some(1));
        assert_eq!(at(&session, 1).impostor_count, None);
    }

    #[test]
    fn test_reveal_is_recomputed_not_stored() {
        let mut session = dealt(RoundOptions::default());
        assert_eq!(session.current_reveal().unwrap().seat, 1);
        session.advance().unwrap();
        assert_eq!(session.current_reveal().unwrap().seat, 2);
        assert_eq!(session.current_reveal(), session.reveal_for_seat(2));
    }

    #[test]
    fn test_no_reveal_outside_dealing() {
        let mut session = dealt(RoundOptions::default());
        assert!(session.reveal_for_seat(0).is_none());
        assert!(session.reveal_for_seat(4).is_none());

        for _ in 0..3 {
            session.advance().unwrap();
        }
        assert!(session.current_reveal().is_none());
        assert!(session.reveal_for_seat(1).is_some());

        session.reset();
        assert!(session.reveal_for_seat(1).is_none());
    }

    #[test]
    fn test_summary_discloses_roles() {
        let session = dealt(RoundOptions::default());
        let summary = session.summary().unwrap();
        assert_eq!(summary.impostor_seats, vec![2]);
        assert_eq!(summary.detective_seats, vec![1, 3]);
        assert!(summary.decoy.is_none());
        assert_eq!(summary.round_id, session.setup().unwrap().id);
    }

    #[test]
    fn test_card_face_serialization() {
        let json = serde_json::to_value(CardFace::StealthSignal).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "stealth_signal"}));
    }
}
