use crate::{Move, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Persistent status conditions as they appear in the rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum StatusKind {
    Poison,
    Sleep,
    Paralysis,
    Burn,
    Freeze,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Capture-related modifiers contributed by a status condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusModifiers {
    /// A first capture draw strictly below this value succeeds immediately.
    pub quick_catch_threshold: u16,
    /// Subtracted from the first capture draw before comparing it against the catch rate.
    pub catch_bonus: u16,
    /// Added to the shake score of a failed capture.
    pub shake_bonus: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    pub poison: StatusModifiers,
    pub sleep: StatusModifiers,
    pub paralysis: StatusModifiers,
    pub burn: StatusModifiers,
    pub freeze: StatusModifiers,
    /// Percent chance that a paralysed creature loses its action.
    pub full_paralysis_chance: u8,
    pub sleep_min_turns: u8,
    pub sleep_max_turns: u8,
    /// Poison and burn deal `max_hp / residual_damage_divisor` at end of turn.
    pub residual_damage_divisor: u16,
}

impl StatusTable {
    pub fn gen1() -> Self {
        let deep = StatusModifiers {
            quick_catch_threshold: 25,
            catch_bonus: 25,
            shake_bonus: 10,
        };
        let light = StatusModifiers {
            quick_catch_threshold: 12,
            catch_bonus: 12,
            shake_bonus: 5,
        };
        Self {
            poison: light,
            sleep: deep,
            paralysis: light,
            burn: light,
            freeze: deep,
            full_paralysis_chance: 25,
            sleep_min_turns: 1,
            sleep_max_turns: 7,
            residual_damage_divisor: 16,
        }
    }

    pub fn modifiers(&self, status: StatusKind) -> StatusModifiers {
        match status {
            StatusKind::Poison => self.poison,
            StatusKind::Sleep => self.sleep,
            StatusKind::Paralysis => self.paralysis,
            StatusKind::Burn => self.burn,
            StatusKind::Freeze => self.freeze,
        }
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::gen1()
    }
}

/// One rule of a battle modification. `delta` is added to a move's selection
/// weight when the rule matches; positive values make the move more likely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    /// Matches one specific move.
    Move { move_: Move, delta: i16 },
    /// Matches moves that raise the given statistic of the user.
    Raise { stat: Stat, delta: i16 },
    /// Matches moves that lower the given statistic of the target.
    Lower { stat: Stat, delta: i16 },
    /// Matches moves that only inflict a status condition.
    Status { delta: i16 },
    /// Matches damaging moves that are super effective against the target.
    SuperEffective { delta: i16 },
    /// Matches damaging moves that are not very effective against the target.
    NotVeryEffective { delta: i16 },
}

impl Preference {
    pub fn delta(&self) -> i16 {
        match self {
            Preference::Move { delta, .. }
            | Preference::Raise { delta, .. }
            | Preference::Lower { delta, .. }
            | Preference::Status { delta }
            | Preference::SuperEffective { delta }
            | Preference::NotVeryEffective { delta } => *delta,
        }
    }
}

/// A named bundle of move preferences applied to certain trainer archetypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleModification {
    pub name: String,
    /// Trainer archetypes (e.g. "Lass", "Hiker") this modification applies to.
    pub opponent_types: Vec<String>,
    /// Ordered; only the first rule matching a move applies.
    pub preferences: Vec<Preference>,
}

impl BattleModification {
    pub fn applies_to(&self, archetype: &str) -> bool {
        self.opponent_types.iter().any(|t| t == archetype)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Ball {
    PokeBall,
    GreatBall,
    UltraBall,
    SafariBall,
    MasterBall,
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ball::PokeBall => "Poke Ball",
            Ball::GreatBall => "Great Ball",
            Ball::UltraBall => "Ultra Ball",
            Ball::SafariBall => "Safari Ball",
            Ball::MasterBall => "Master Ball",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureDevice {
    pub ball: Ball,
    pub name: String,
    /// Multiplier applied to the HP factor of a capture attempt; higher is better.
    pub rate: u16,
    /// Inclusive upper bound of the first capture draw; lower is better.
    pub probability_max: u16,
    #[serde(default)]
    pub guaranteed: bool,
}
