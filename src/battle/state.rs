use crate::errors::{ActionError, BattleResult};
use crate::player::{Battler, BattlerKind, CreatureRef, Side};
use crate::pokemon::{PokemonInst, StatusCondition};
use crate::progression::BattleParticipationTracker;
use schema::{Move, Stat, StatusKind};
use serde::{Deserialize, Serialize};

/// Phases a single turn moves through.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    ChoosingMoves,
    OrderDetermined,
    ExecutingFirstMove,
    ExecutingSecondMove,
    EndOfTurn,
    TurnComplete,
}

/// Terminal outcome of one move execution.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Hit,
    Miss,
    /// The defender is immune (0x type effectiveness).
    NoEffect,
    /// The target had already fainted. `resolve_turn` never produces this: a
    /// turn stops at the first faint and no move knocks out its own user.
    FailedNoTarget,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    Asleep,
    Frozen,
    Paralyzed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatDirection {
    Raised,
    Lowered,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Creature Actions
    MoveUsed {
        battler: Side,
        creature: CreatureRef,
        move_used: Move,
    },
    ActionPrevented {
        creature: CreatureRef,
        reason: ActionFailureReason,
    },
    MoveMissed {
        attacker: CreatureRef,
        move_used: Move,
    },
    MoveNoEffect {
        target: CreatureRef,
        move_used: Move,
    },
    DamageDealt {
        target: CreatureRef,
        amount: u16,
        critical: bool,
        effectiveness: f32,
        remaining_hp: u16,
    },
    CreatureFainted {
        target: CreatureRef,
    },
    /// An AI-controlled battler replaced its fainted creature.
    CreatureSentOut {
        creature: CreatureRef,
    },

    // Status Effects
    StatusApplied {
        target: CreatureRef,
        status: StatusCondition,
    },
    StatusCured {
        target: CreatureRef,
        status: StatusKind,
    },
    StatusDamage {
        target: CreatureRef,
        status: StatusKind,
        amount: u16,
        remaining_hp: u16,
    },
    StatChanged {
        target: CreatureRef,
        stat: Stat,
        direction: StatDirection,
        stage: i8,
    },

    // Progression
    ExperienceAwarded {
        creature: CreatureRef,
        amount: u32,
    },
    LevelUp {
        creature: CreatureRef,
        new_level: u8,
    },
    MoveLearned {
        creature: CreatureRef,
        move_learned: Move,
    },
    MoveLearnPending {
        creature: CreatureRef,
        move_pending: Move,
    },

    BattleEnded {
        winner: Side,
        reward: u32,
    },
}

/// Collects one turn's events in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}

/// The session view a turn is computed against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub player: Battler,
    pub opponent: Battler,
    pub turn_number: u32,
    pub escape_attempts: u8,
    pub participation: BattleParticipationTracker,
    /// Set once one side has no usable creatures left.
    pub winner: Option<Side>,
}

impl BattleState {
    pub fn new(player: Battler, opponent: Battler) -> Self {
        let mut participation = BattleParticipationTracker::new();
        participation.record_participation(player.active_index, opponent.active_index);
        Self {
            player,
            opponent,
            turn_number: 1,
            escape_attempts: 0,
            participation,
            winner: None,
        }
    }

    pub fn battler(&self, side: Side) -> &Battler {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn battler_mut(&mut self, side: Side) -> &mut Battler {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn active_ref(&self, side: Side) -> CreatureRef {
        CreatureRef {
            side,
            index: self.battler(side).active_index,
        }
    }

    pub fn active(&self, side: Side) -> BattleResult<&PokemonInst> {
        self.battler(side)
            .active()
            .ok_or_else(|| ActionError::NoActiveCreature(side).into())
    }

    pub fn active_mut(&mut self, side: Side) -> BattleResult<&mut PokemonInst> {
        self.battler_mut(side)
            .active_mut()
            .ok_or_else(|| ActionError::NoActiveCreature(side).into())
    }

    pub fn creature(&self, creature: CreatureRef) -> Option<&PokemonInst> {
        self.battler(creature.side).party.get(creature.index)
    }

    pub fn creature_mut(&mut self, creature: CreatureRef) -> Option<&mut PokemonInst> {
        self.battler_mut(creature.side).party.get_mut(creature.index)
    }

    pub fn is_wild_battle(&self) -> bool {
        matches!(self.opponent.kind, BattlerKind::Wild)
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Switch a side's active creature and record the new pairing.
    pub fn set_active(&mut self, side: Side, index: usize) {
        self.battler_mut(side).active_index = index;
        self.participation
            .record_participation(self.player.active_index, self.opponent.active_index);
    }
}
