// Public API for the terminal driver and integration tests

pub mod catalog;
pub mod config;
pub mod deck;
pub mod decoy;
pub mod error;
pub mod filter;
pub mod hint;
pub mod impostor;
pub mod rng;
pub mod settings;
pub mod state;
pub mod timer;
pub mod types;

pub use error::{DataLoadError, RoundError, SettingsError};
pub use state::RoundSession;
