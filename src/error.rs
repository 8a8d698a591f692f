use crate::types::{Seat, MIN_PLAYERS};

/// Errors from round orchestration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("No eligible words for the selected difficulty and categories")]
    EmptyPool,

    #[error("A round needs at least {min} players, got {0}", min = MIN_PLAYERS)]
    TooFewPlayers(u32),

    #[error("A round is already in progress; reset it first")]
    RoundInProgress,

    #[error("No cards are being dealt")]
    NotDealing,

    #[error("Card for seat {0} is not face up")]
    CardNotFaceUp(Seat),
}

/// Errors reading or parsing the word dataset
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("Failed to read word file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse word file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reading or writing the device-local settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}
