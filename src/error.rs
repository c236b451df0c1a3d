//! Centralized error types for the simulation core.
//!
//! All conditions here indicate caller defects (illegal arguments, illegal
//! transitions) or bad board data; gameplay absences such as "no bonus
//! active" are represented with `Option` instead.

/// Main error type for the simulation core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Board parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Hunting phase error: {0}")]
    Phase(#[from] PhaseError),

    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Bonus error: {0}")]
    Bonus(#[from] BonusError),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),

    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),

    #[error("Board row {row} has {found} columns, expected {expected}")]
    InvalidRowLength { row: usize, found: usize, expected: usize },

    #[error("Board has no Pac-Man start position")]
    MissingPacStart,
}

/// Errors related to the hunting phase state machine.
#[derive(thiserror::Error, Debug)]
pub enum PhaseError {
    #[error("Illegal hunting phase index: {0} (must be 0..=7)")]
    IllegalPhaseIndex(u8),
}

/// Errors related to level-wide operations.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("Illegal cruise elroy value: {0} (must be one of -2, -1, 0, 1, 2)")]
    IllegalCruiseElroyValue(i8),

    #[error("Illegal bonus index: {0} (must be 0 or 1)")]
    IllegalBonusIndex(usize),

    #[error("Illegal level number: {0} (must be at least 1)")]
    IllegalLevelNumber(u32),

    #[error("Unknown bonus symbol: {0}")]
    IllegalBonusSymbol(u8),
}

/// Errors related to bonus state transitions.
#[derive(thiserror::Error, Debug)]
pub enum BonusError {
    #[error("Bonus tick count must be positive")]
    NonPositiveTicks,

    #[error("Illegal bonus transition from state {from}")]
    IllegalTransition { from: &'static str },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
