//! Pokemon Battle Core
//!
//! The decision and resolution engine behind a Generation 1 style battle:
//! turn order, accuracy, damage, status effects, capture, escape, AI move
//! choice and experience growth, all driven by declarative rule tables and an
//! injected random source.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod errors;
pub mod player;
pub mod pokemon;
pub mod progression;
pub mod rules;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    // Supporting Types & Enums
    Ball,
    BaseStats,
    BattleModification,
    CaptureDevice,
    GrowthRate,
    Learnset,
    Matchup,
    // Core Enums
    Move,
    MoveCategory,
    MoveEffect,
    // Core Data Structs
    MoveData,
    PokemonType,
    Preference,
    Species,
    SpeciesData,
    Stat,
    StatusKind,
    StatusTable,
    TypeChart,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::ai::{choose_opponent_move, MoveSelection};
pub use battle::calculators::{critical_hit, damage, type_effectiveness, DamageRoll};
pub use battle::catch::{
    attempt_capture, can_attempt_catch, can_catch, capture_chance, shake_count, CaptureOutcome,
    CatchError,
};
pub use battle::engine::{player_moves_first, resolve_turn, TurnRequest, TurnResult};
pub use battle::escape::{attempt_escape, can_escape};
pub use battle::rng::{RandomSource, SeededRng, TurnRng};
pub use battle::state::{BattleEvent, BattleState, MoveOutcome, TurnPhase};

// Core runtime types for a battle.
pub use player::{Battler, BattlerKind, CreatureRef, Side, TrainerProfile};
pub use pokemon::{PokemonInst, StatusCondition};

// Rule tables.
pub use rules::{RuleBook, RuleTables};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, MoveDataError, MoveDataResult, RuleDataError,
    SpeciesDataError, SpeciesDataResult,
};
