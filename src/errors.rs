use crate::player::Side;
use schema::{Ball, Move, Species, TypeChartShapeError};
use thiserror::Error;

/// Main error type for the battle core.
///
/// Only malformed requests and misconfigured rule tables are errors; every
/// in-battle outcome (misses, failed captures, immunities) is reported as an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    #[error("Move data error: {0}")]
    MoveData(#[from] MoveDataError),
    #[error("Species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    #[error("Rule data error: {0}")]
    RuleData(#[from] RuleDataError),
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

/// Errors related to move data lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveDataError {
    #[error("Move not found: {0:?}")]
    MoveNotFound(Move),
}

/// Errors related to species data lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesDataError {
    #[error("Species not found: {0:?}")]
    SpeciesNotFound(Species),
}

/// Configuration errors raised while building or consulting the rule book
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleDataError {
    #[error("Failed to parse {table} table: {message}")]
    Parse { table: &'static str, message: String },
    #[error("Invalid type chart: {0}")]
    InvalidTypeChart(#[from] TypeChartShapeError),
    #[error("Capture device not found: {0:?}")]
    CaptureDeviceNotFound(Ball),
    #[error("{owner} references unknown move {move_:?}")]
    DanglingMove { owner: String, move_: Move },
    #[error("No last-resort move is configured")]
    NoLastResort,
}

/// Precondition violations in a turn or calculator request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{species:?} does not know {move_:?}")]
    MoveNotKnown { species: Species, move_: Move },
    #[error("{move_:?} has no PP remaining")]
    NoPpRemaining { move_: Move },
    #[error("{species:?} has fainted and cannot act")]
    CreatureFainted { species: Species },
    #[error("{0:?} has no active creature")]
    NoActiveCreature(Side),
    #[error("{0:?} is controlled by a human and must supply a move")]
    MissingChoice(Side),
    #[error("Unknown statistic: {0}")]
    UnknownStatistic(String),
    #[error("Invalid level: {0}")]
    InvalidLevel(u8),
    #[error("Cannot run from a trainer battle")]
    EscapeNotAllowed,
    #[error("The battle is already over")]
    BattleOver,
}

/// Convenience type alias for Results that can fail with BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Convenience type alias for Results that can fail with MoveDataError
pub type MoveDataResult<T> = Result<T, MoveDataError>;

/// Convenience type alias for Results that can fail with SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;
