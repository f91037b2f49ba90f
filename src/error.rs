//! Centralized error types for the rules simulation.
//!
//! Programming errors (illegal phase transitions, resuming without history) are not represented
//! here: they panic. These types cover conditions a caller can observe and react to.

/// Main error type for the simulation.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("No game level is loaded")]
    NoLevel,
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),
    #[error("Board is missing the start position of {0}")]
    MissingStart(&'static str),
}

/// Rejected writes to the coin mechanism. Callers of the controller only see whether the write was accepted.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CreditError {
    #[error("Credit {requested} is outside of the allowed range 0..={max}")]
    OutOfRange { requested: i64, max: u8 },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
