//! Move selection for AI-controlled battlers.

use crate::battle::calculators::type_effectiveness;
use crate::battle::rng::RandomSource;
use crate::battle::state::BattleState;
use crate::errors::BattleResult;
use crate::player::Side;
use crate::pokemon::PokemonInst;
use crate::rules::RuleBook;
use log::debug;
use schema::{BattleModification, Move, MoveData, MoveEffect, Preference};

/// Starting selection weight of every usable move.
pub const BASE_WEIGHT: i32 = 16;
/// Applied to status-only moves when the target already has a status.
pub const REDUNDANT_STATUS_PENALTY: i32 = -16;

/// What an AI battler decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelection {
    Move(Move),
    /// No known move has PP left; the rule book's last-resort move must be used.
    LastResort,
}

/// A trait for any system that can decide on a move for a battler.
pub trait Behavior {
    fn choose_move(
        &self,
        rules: &RuleBook,
        state: &BattleState,
        side: Side,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<MoveSelection>;
}

/// Picks uniformly among usable moves. Used for wild and "dumb" battlers.
pub struct UniformBehavior;

impl Behavior for UniformBehavior {
    fn choose_move(
        &self,
        _rules: &RuleBook,
        state: &BattleState,
        side: Side,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<MoveSelection> {
        let usable: Vec<Move> = state.active(side)?.usable_moves().map(|m| m.move_).collect();
        if usable.is_empty() {
            return Ok(MoveSelection::LastResort);
        }
        let pick = rng.draw(usable.len() as u32, "opponent move") as usize;
        Ok(MoveSelection::Move(usable[pick]))
    }
}

/// Weighted selection shaped by the battler's archetype modifications.
pub struct WeightedBehavior;

impl WeightedBehavior {
    /// Selection weight of every usable move, in move-slot order.
    pub fn weights(
        &self,
        rules: &RuleBook,
        state: &BattleState,
        side: Side,
    ) -> BattleResult<Vec<(Move, i32)>> {
        let user = state.active(side)?;
        let target = state.active(side.opposite())?;
        let modifications: Vec<&BattleModification> = match state.battler(side).trainer_profile() {
            Some(profile) => rules.modifications_for(&profile.archetype).collect(),
            None => Vec::new(),
        };

        let mut weights = Vec::new();
        for instance in user.usable_moves() {
            let data = rules.move_data(instance.move_)?;
            let mut weight = BASE_WEIGHT;

            if target.status.is_some() && data.only_statuses() {
                weight += REDUNDANT_STATUS_PENALTY;
            }
            for modification in &modifications {
                let matched = modification
                    .preferences
                    .iter()
                    .find(|preference| preference_matches(rules, preference, data, target));
                if let Some(preference) = matched {
                    weight += preference.delta() as i32;
                }
            }
            weights.push((instance.move_, weight.max(0)));
        }
        Ok(weights)
    }
}

impl Behavior for WeightedBehavior {
    fn choose_move(
        &self,
        rules: &RuleBook,
        state: &BattleState,
        side: Side,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<MoveSelection> {
        let weights = self.weights(rules, state, side)?;
        if weights.is_empty() {
            return Ok(MoveSelection::LastResort);
        }

        let total: u32 = weights.iter().map(|(_, w)| *w as u32).sum();
        if total == 0 {
            // Every move was penalised away; fall back to a uniform pick.
            let pick = rng.draw(weights.len() as u32, "opponent move") as usize;
            return Ok(MoveSelection::Move(weights[pick].0));
        }

        let roll = rng.draw(total, "opponent move");
        let mut cumulative = 0;
        let mut picked = weights[weights.len() - 1].0;
        for (move_, weight) in &weights {
            cumulative += *weight as u32;
            if roll < cumulative {
                picked = *move_;
                break;
            }
        }
        debug!("{:?} AI picked {:?} from {:?}", side, picked, weights);
        Ok(MoveSelection::Move(picked))
    }
}

/// Whether a preference rule applies to a move used against `target`.
fn preference_matches(
    rules: &RuleBook,
    preference: &Preference,
    data: &MoveData,
    target: &PokemonInst,
) -> bool {
    match preference {
        Preference::Move { move_, .. } => data.id == *move_,
        Preference::Raise { stat, .. } => {
            matches!(data.effect, Some(MoveEffect::Raise { stat: s, .. }) if s == *stat)
        }
        Preference::Lower { stat, .. } => {
            matches!(data.effect, Some(MoveEffect::Lower { stat: s, .. }) if s == *stat)
        }
        Preference::Status { .. } => data.only_statuses(),
        Preference::SuperEffective { .. } => {
            data.is_damaging()
                && type_effectiveness(rules.type_chart(), data.move_type, &target.types) > 1.0
        }
        Preference::NotVeryEffective { .. } => {
            data.is_damaging()
                && type_effectiveness(rules.type_chart(), data.move_type, &target.types) < 1.0
        }
    }
}

/// Choose the move an AI-controlled battler uses this turn.
pub fn choose_opponent_move(
    rules: &RuleBook,
    state: &BattleState,
    side: Side,
    rng: &mut dyn RandomSource,
) -> BattleResult<MoveSelection> {
    if state.battler(side).is_dumb() {
        UniformBehavior.choose_move(rules, state, side, rng)
    } else {
        WeightedBehavior.choose_move(rules, state, side, rng)
    }
}
