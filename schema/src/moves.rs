use crate::{PokemonType, Stat, StatusKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumString,
)]
pub enum Move {
    // Normal
    Pound,
    Scratch,
    Tackle,
    QuickAttack,
    Gust,
    Bite,
    Headbutt,
    HyperFang,
    Slash,
    Slam,
    Strength,
    MegaPunch,
    BodySlam,
    Swift,
    Growl,
    TailWhip,
    Leer,
    Screech,
    Harden,
    DefenseCurl,
    SwordsDance,
    Growth,
    Sing,
    LovelyKiss,
    Glare,
    Splash,
    Struggle,
    // Fighting
    KarateChop,
    LowKick,
    // Flying
    Peck,
    WingAttack,
    DrillPeck,
    // Poison
    PoisonSting,
    Acid,
    Sludge,
    PoisonPowder,
    PoisonGas,
    // Ground
    Earthquake,
    // Rock
    RockThrow,
    RockSlide,
    // Bug
    StringShot,
    // Ghost
    Lick,
    // Fire
    Ember,
    FirePunch,
    Flamethrower,
    // Water
    Bubble,
    WaterGun,
    BubbleBeam,
    Surf,
    HydroPump,
    Withdraw,
    // Grass
    VineWhip,
    RazorLeaf,
    SleepPowder,
    StunSpore,
    // Electric
    ThunderShock,
    Thunderbolt,
    Thunder,
    ThunderWave,
    // Psychic
    Confusion,
    Psychic,
    Hypnosis,
    Agility,
    Amnesia,
    // Ice
    IcePunch,
    IceBeam,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    NonDamaging,
}

/// Secondary effect of a move. `Raise` targets the user, `Lower` and `Status` target the opponent.
///
/// `chance` is a percentage; 100 or more always applies without a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    Status { status: StatusKind, chance: u8 },
    Raise { stat: Stat, stages: i8, chance: u8 },
    Lower { stat: Stat, stages: i8, chance: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: Move,
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// `None` for moves without a base power ("-").
    #[serde(default)]
    pub power: Option<u16>,
    /// `None` means the move always hits.
    #[serde(default)]
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub high_critical: bool,
    #[serde(default)]
    pub effect: Option<MoveEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::NonDamaging && self.power.is_some_and(|p| p > 0)
    }

    /// True for moves whose only purpose is inflicting a status condition.
    pub fn only_statuses(&self) -> bool {
        !self.is_damaging() && matches!(self.effect, Some(MoveEffect::Status { .. }))
    }
}
