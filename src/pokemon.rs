use crate::battle::rng::RandomSource;
use crate::battle::stats::apply_stat_stage_multiplier;
use crate::errors::{ActionError, BattleResult};
use crate::progression::growth::{compute_statistic, starting_experience, MAX_LEVEL};
use crate::rules::RuleBook;
use schema::{Learnset, Move, MoveData, PokemonType, Species, SpeciesData, Stat, StatusKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

pub const MAX_IV: u8 = 31;
pub const MAX_EV: u8 = 255;
pub const MAX_MOVES: usize = 4;
pub const MAX_STAGE: i8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    /// Remaining turns asleep.
    Sleep(u8),
    Poison,
    Burn,
    Freeze,
    Paralysis,
}

impl StatusCondition {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusCondition::Sleep(_) => StatusKind::Sleep,
            StatusCondition::Poison => StatusKind::Poison,
            StatusCondition::Burn => StatusKind::Burn,
            StatusCondition::Freeze => StatusKind::Freeze,
            StatusCondition::Paralysis => StatusKind::Paralysis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
    pub max_pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: &MoveData) -> Self {
        Self {
            move_: data.id,
            pp: data.max_pp,
            max_pp: data.max_pp,
        }
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    pub fn restore_pp(&mut self, amount: u8) {
        self.pp = self.pp.saturating_add(amount).min(self.max_pp);
    }
}

/// Individual or effort values, one per statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthValues {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special: u8,
    pub speed: u8,
}

impl GrowthValues {
    pub fn uniform(value: u8) -> Self {
        Self {
            hp: value,
            attack: value,
            defense: value,
            special: value,
            speed: value,
        }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Special => self.special,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u8) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::Special => self.special = value,
            Stat::Speed => self.speed = value,
        }
    }

    /// Every component clamped to `cap`.
    pub fn capped(mut self, cap: u8) -> Self {
        for stat in Stat::iter() {
            self.set(stat, self.get(stat).min(cap));
        }
        self
    }
}

/// Normal (out-of-battle) statistics. `hp` is the maximum HP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special: u16,
    pub speed: u16,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Special => self.special,
            Stat::Speed => self.speed,
        }
    }

    fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::Special => self.special = value,
            Stat::Speed => self.speed = value,
        }
    }
}

/// In-battle values that stat stages act on. HP has no battle value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    pub attack: u16,
    pub defense: u16,
    pub special: u16,
    pub speed: u16,
}

impl BattleStats {
    fn from_stats(stats: &Stats) -> Self {
        Self {
            attack: stats.attack,
            defense: stats.defense,
            special: stats.special,
            speed: stats.speed,
        }
    }

    pub fn get(&self, stat: Stat) -> Option<u16> {
        match stat {
            Stat::Hp => None,
            Stat::Attack => Some(self.attack),
            Stat::Defense => Some(self.defense),
            Stat::Special => Some(self.special),
            Stat::Speed => Some(self.speed),
        }
    }

    fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::Hp => {}
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::Special => self.special = value,
            Stat::Speed => self.speed = value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub attack: i8,
    pub defense: i8,
    pub special: i8,
    pub speed: i8,
}

impl StatStages {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Hp => 0,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Special => self.special,
            Stat::Speed => self.speed,
        }
    }

    fn set(&mut self, stat: Stat, value: i8) {
        match stat {
            Stat::Hp => {}
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::Special => self.special = value,
            Stat::Speed => self.speed = value,
        }
    }
}

/// Result of trying to add a move to a creature's move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    Learned,
    AlreadyKnown,
    NoFreeSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub species: Species,
    pub nickname: String,
    pub level: u8,
    pub experience: u32,
    pub types: Vec<PokemonType>,
    pub ivs: GrowthValues,
    pub evs: GrowthValues,
    pub stats: Stats,
    pub current: BattleStats,
    pub stages: StatStages,
    hp: u16,
    pub status: Option<StatusCondition>,
    pub moves: [Option<MoveInstance>; MAX_MOVES],
    /// Doubles the critical-hit threshold of every move this creature uses.
    pub critical_boost: bool,
}

impl PokemonInst {
    /// Create a freshly leveled creature.
    ///
    /// Omitted moves are derived from the level-up learnset (the four most
    /// recent unlocked at or below `level`). Omitted IVs are drawn uniformly in
    /// `0..=31` in the order HP, Attack, Defense, Special, Speed. EVs default to zero.
    pub fn generate(
        rules: &RuleBook,
        species: Species,
        level: u8,
        moves: Option<Vec<Move>>,
        ivs: Option<GrowthValues>,
        evs: Option<GrowthValues>,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<Self> {
        if level == 0 || level > MAX_LEVEL {
            return Err(ActionError::InvalidLevel(level).into());
        }
        let species_data = rules.species(species)?;

        let moves = moves.unwrap_or_else(|| derive_moves_from_learnset(&species_data.learnset, level));
        let mut move_slots: [Option<MoveInstance>; MAX_MOVES] = Default::default();
        for (slot, move_) in move_slots.iter_mut().zip(moves) {
            *slot = Some(MoveInstance::new(rules.move_data(move_)?));
        }

        let ivs = match ivs {
            Some(ivs) => ivs.capped(MAX_IV),
            None => {
                let mut drawn = GrowthValues::default();
                for stat in Stat::iter() {
                    drawn.set(stat, rng.draw(MAX_IV as u32 + 1, "individual value") as u8);
                }
                drawn
            }
        };
        let evs = evs.unwrap_or_default();

        let stats = calculate_stats(species_data, level, &ivs, &evs);

        Ok(Self {
            species,
            nickname: species_data.name.clone(),
            level,
            experience: starting_experience(species_data.growth_rate, level),
            types: species_data.types.clone(),
            ivs,
            evs,
            stats,
            current: BattleStats::from_stats(&stats),
            stages: StatStages::default(),
            hp: stats.hp,
            status: None,
            moves: move_slots,
            critical_boost: false,
        })
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn current_hp(&self) -> u16 {
        self.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Set HP directly, clamped to the maximum.
    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp());
    }

    /// Apply damage, clamping at zero. Returns true if this caused fainting.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        let was_standing = self.hp > 0;
        self.hp = self.hp.saturating_sub(amount);
        was_standing && self.hp == 0
    }

    pub fn heal(&mut self, amount: u16) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp());
    }

    /// Recompute one statistic from species data, level and growth values.
    /// Never mutates the creature.
    pub fn statistic(&self, rules: &RuleBook, stat: Stat) -> BattleResult<u16> {
        let species_data = rules.species(self.species)?;
        Ok(compute_statistic(
            species_data.base_stats.get(stat),
            stat,
            self.level,
            self.ivs.get(stat),
            self.evs.get(stat),
        ))
    }

    /// Like `statistic`, but takes the statistic by name ("HP", "Attack", ...).
    pub fn compute_statistic(&self, rules: &RuleBook, name: &str) -> BattleResult<u16> {
        let stat = Stat::from_str(name)
            .map_err(|_| ActionError::UnknownStatistic(name.to_string()))?;
        self.statistic(rules, stat)
    }

    /// Recalculate normal stats after a level or EV change. Damage already taken is kept,
    /// and stage modifiers are re-applied to the new values.
    pub fn recalculate_stats(&mut self, rules: &RuleBook) -> BattleResult<()> {
        let species_data = rules.species(self.species)?;
        let damage_taken = self.max_hp() - self.hp;
        let was_fainted = self.is_fainted();

        self.stats = calculate_stats(species_data, self.level, &self.ivs, &self.evs);
        self.hp = if was_fainted {
            0
        } else {
            self.stats.hp.saturating_sub(damage_taken).max(1)
        };
        for stat in Stat::iter().filter(|s| *s != Stat::Hp) {
            self.refresh_current(stat);
        }
        Ok(())
    }

    /// Restore current stats to their normal values and clear every stage.
    pub fn reset_battle_stats(&mut self) {
        self.stages = StatStages::default();
        self.current = BattleStats::from_stats(&self.stats);
    }

    pub fn stat_stage(&self, stat: Stat) -> i8 {
        self.stages.get(stat)
    }

    /// Move a stat stage by `delta`, clamped to -6..=6. Returns the new stage,
    /// or `None` if the stage could not move (already at a limit, or HP).
    pub fn apply_stage(&mut self, stat: Stat, delta: i8) -> Option<i8> {
        if stat == Stat::Hp {
            return None;
        }
        let old = self.stages.get(stat);
        let new = old.saturating_add(delta).clamp(-MAX_STAGE, MAX_STAGE);
        if new == old {
            return None;
        }
        self.stages.set(stat, new);
        self.refresh_current(stat);
        Some(new)
    }

    fn refresh_current(&mut self, stat: Stat) {
        let value = apply_stat_stage_multiplier(self.stats.get(stat), self.stages.get(stat));
        self.current.set(stat, value);
    }

    pub fn known_moves(&self) -> impl Iterator<Item = &MoveInstance> {
        self.moves.iter().flatten()
    }

    pub fn usable_moves(&self) -> impl Iterator<Item = &MoveInstance> {
        self.known_moves().filter(|instance| instance.pp > 0)
    }

    pub fn find_move(&self, move_: Move) -> Option<&MoveInstance> {
        self.known_moves().find(|instance| instance.move_ == move_)
    }

    pub fn find_move_mut(&mut self, move_: Move) -> Option<&mut MoveInstance> {
        self.moves
            .iter_mut()
            .flatten()
            .find(|instance| instance.move_ == move_)
    }

    /// Put a move into the first free slot.
    pub fn learn_move(&mut self, rules: &RuleBook, move_: Move) -> BattleResult<LearnOutcome> {
        if self.find_move(move_).is_some() {
            return Ok(LearnOutcome::AlreadyKnown);
        }
        let data = rules.move_data(move_)?;
        match self.moves.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(MoveInstance::new(data));
                Ok(LearnOutcome::Learned)
            }
            None => Ok(LearnOutcome::NoFreeSlot),
        }
    }

    /// True if any of this creature's types is in `types`.
    pub fn matches_types(&self, types: &[PokemonType]) -> bool {
        self.types.iter().any(|t| types.contains(t))
    }

    pub fn status_kind(&self) -> Option<StatusKind> {
        self.status.map(|status| status.kind())
    }
}

/// Calculate normal stats based on base stats, level, IVs, and EVs
fn calculate_stats(
    species_data: &SpeciesData,
    level: u8,
    ivs: &GrowthValues,
    evs: &GrowthValues,
) -> Stats {
    let mut stats = Stats::default();
    for stat in Stat::iter() {
        stats.set(
            stat,
            compute_statistic(
                species_data.base_stats.get(stat),
                stat,
                level,
                ivs.get(stat),
                evs.get(stat),
            ),
        );
    }
    stats
}

/// The 4 most recent level-up moves unlocked at or below `level`.
fn derive_moves_from_learnset(learnset: &Learnset, level: u8) -> Vec<Move> {
    let mut learned_moves: Vec<Move> = Vec::new();
    for move_ in learnset.unlocked_by(level) {
        learned_moves.retain(|known| *known != move_);
        learned_moves.push(move_);
    }
    let skip = learned_moves.len().saturating_sub(MAX_MOVES);
    learned_moves.split_off(skip)
}
