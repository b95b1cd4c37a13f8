use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

pub const MAX_PARTY_SIZE: usize = 6;

/// Which side of a battle a battler is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Identifies one party member on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureRef {
    pub side: Side,
    pub index: usize,
}

/// Data only trainer battlers carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerProfile {
    /// Archetype name used to look up battle modifications (e.g. "Lass").
    pub archetype: String,
    /// Money awarded when the player wins.
    pub reward: u32,
    /// Picks moves uniformly, ignoring modifications and status redundancy.
    pub dumb: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlerKind {
    /// Human-controlled; must always supply a move.
    Player,
    Wild,
    Trainer(TrainerProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    pub name: String,
    pub party: Vec<PokemonInst>,
    pub active_index: usize,
    pub kind: BattlerKind,
}

impl Battler {
    pub fn new(name: impl Into<String>, party: Vec<PokemonInst>, kind: BattlerKind) -> Self {
        Self {
            name: name.into(),
            party,
            active_index: 0,
            kind,
        }
    }

    pub fn player(name: impl Into<String>, party: Vec<PokemonInst>) -> Self {
        Self::new(name, party, BattlerKind::Player)
    }

    pub fn wild(creature: PokemonInst) -> Self {
        let name = format!("Wild {}", creature.nickname);
        Self::new(name, vec![creature], BattlerKind::Wild)
    }

    pub fn trainer(
        name: impl Into<String>,
        party: Vec<PokemonInst>,
        archetype: impl Into<String>,
        reward: u32,
    ) -> Self {
        Self::new(
            name,
            party,
            BattlerKind::Trainer(TrainerProfile {
                archetype: archetype.into(),
                reward,
                dumb: false,
            }),
        )
    }

    pub fn active(&self) -> Option<&PokemonInst> {
        self.party.get(self.active_index)
    }

    pub fn active_mut(&mut self) -> Option<&mut PokemonInst> {
        self.party.get_mut(self.active_index)
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, BattlerKind::Player)
    }

    pub fn is_dumb(&self) -> bool {
        match &self.kind {
            BattlerKind::Wild => true,
            BattlerKind::Trainer(profile) => profile.dumb,
            BattlerKind::Player => false,
        }
    }

    pub fn trainer_profile(&self) -> Option<&TrainerProfile> {
        match &self.kind {
            BattlerKind::Trainer(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn has_usable_creature(&self) -> bool {
        self.party.iter().any(|creature| !creature.is_fainted())
    }

    /// Index of the first standing creature after the active one fainted.
    pub fn next_usable_index(&self) -> Option<usize> {
        self.party.iter().position(|creature| !creature.is_fainted())
    }

    pub fn party_is_full(&self) -> bool {
        self.party.len() >= MAX_PARTY_SIZE
    }
}
