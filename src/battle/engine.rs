use crate::battle::ai::{choose_opponent_move, MoveSelection};
use crate::battle::calculators::{damage, type_effectiveness};
use crate::battle::rng::{roll_percent, RandomSource};
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleState, EventBus, MoveOutcome, StatDirection, TurnPhase,
};
use crate::battle::stats::{effective_speed, move_hits};
use crate::errors::{ActionError, BattleResult};
use crate::player::{CreatureRef, Side};
use crate::pokemon::{PokemonInst, StatusCondition};
use crate::progression::{apply_ev_yield, apply_experience, experience_gained, EvYield, GrowthStep};
use crate::rules::RuleBook;
use log::debug;
use schema::{Move, MoveData, MoveEffect, PokemonType, Stat, StatusKind};

/// One turn's input: a view of the session, the chosen moves and the draw source.
///
/// A `None` choice asks the AI to pick for that side; human battlers must
/// always supply one.
pub struct TurnRequest<'a> {
    pub state: &'a BattleState,
    pub player_choice: Option<Move>,
    pub opponent_choice: Option<Move>,
    pub rng: &'a mut dyn RandomSource,
}

/// The complete outcome of one turn. The input state is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub state: BattleState,
    pub events: Vec<BattleEvent>,
    /// Terminal outcome of every move that was executed, in execution order.
    /// Actions prevented by a status condition have no entry.
    pub resolutions: Vec<(Side, MoveOutcome)>,
    pub phase: TurnPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChosenMove {
    side: Side,
    move_: Move,
    /// Last-resort moves are not in the move list and spend nothing.
    spends_pp: bool,
}

/// Whether the player's creature acts first.
///
/// Higher move priority always wins. Equal priority falls back to effective
/// speed, and an exact speed tie is a uniform coin flip (a draw of 0 means
/// the player goes first).
pub fn player_moves_first(
    rules: &RuleBook,
    player: &PokemonInst,
    player_move: Move,
    opponent: &PokemonInst,
    opponent_move: Move,
    rng: &mut dyn RandomSource,
) -> BattleResult<bool> {
    let player_priority = rules.move_data(player_move)?.priority;
    let opponent_priority = rules.move_data(opponent_move)?.priority;
    if player_priority != opponent_priority {
        return Ok(player_priority > opponent_priority);
    }

    let player_speed = effective_speed(player);
    let opponent_speed = effective_speed(opponent);
    if player_speed != opponent_speed {
        return Ok(player_speed > opponent_speed);
    }
    Ok(rng.draw(2, "speed tie") == 0)
}

/// Resolve one full turn.
///
/// Draws happen in this order: AI move choice, speed-tie coin, then per actor
/// the paralysis check, accuracy, critical hit, secondary-effect chance and
/// sleep duration.
pub fn resolve_turn(rules: &RuleBook, request: TurnRequest<'_>) -> BattleResult<TurnResult> {
    let TurnRequest {
        state,
        player_choice,
        opponent_choice,
        rng,
    } = request;
    if state.is_over() {
        return Err(ActionError::BattleOver.into());
    }

    let mut state = state.clone();
    let mut bus = EventBus::new();
    let mut phase = TurnPhase::ChoosingMoves;
    debug!("Turn {}: {:?}", state.turn_number, phase);
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn_number,
    });

    let player = choose_action(rules, &state, Side::Player, player_choice, rng)?;
    let opponent = choose_action(rules, &state, Side::Opponent, opponent_choice, rng)?;

    let player_first = player_moves_first(
        rules,
        state.active(Side::Player)?,
        player.move_,
        state.active(Side::Opponent)?,
        opponent.move_,
        rng,
    )?;
    let order = if player_first {
        [player, opponent]
    } else {
        [opponent, player]
    };
    phase = TurnPhase::OrderDetermined;
    debug!("{:?}: {:?} acts first", phase, order[0].side);

    let mut resolutions = Vec::new();
    for (slot, action) in order.into_iter().enumerate() {
        phase = if slot == 0 {
            TurnPhase::ExecutingFirstMove
        } else {
            TurnPhase::ExecutingSecondMove
        };
        if state.active(action.side)?.is_fainted() {
            debug!("{:?}: {:?} fainted before acting", phase, action.side);
            break;
        }

        debug!("{:?}: {:?} uses {:?}", phase, action.side, action.move_);
        if let Some(outcome) = execute_move(rules, &mut state, action, &mut bus, rng)? {
            resolutions.push((action.side, outcome));
        }

        // The second action never runs against a fainted defender.
        if state.active(Side::Player)?.is_fainted() || state.active(Side::Opponent)?.is_fainted() {
            break;
        }
    }

    phase = TurnPhase::EndOfTurn;
    debug!("{:?}", phase);
    apply_residual_damage(rules, &mut state, &mut bus)?;
    send_out_replacements(&mut state, &mut bus);
    check_battle_end(&mut state, &mut bus);

    bus.push(BattleEvent::TurnEnded);
    state.turn_number += 1;
    phase = TurnPhase::TurnComplete;
    debug!("{:?} with {} events", phase, bus.len());

    Ok(TurnResult {
        state,
        events: bus.into_events(),
        resolutions,
        phase,
    })
}

/// Validate a supplied choice, or ask the AI for one.
fn choose_action(
    rules: &RuleBook,
    state: &BattleState,
    side: Side,
    choice: Option<Move>,
    rng: &mut dyn RandomSource,
) -> BattleResult<ChosenMove> {
    let creature = state.active(side)?;
    if creature.is_fainted() {
        return Err(ActionError::CreatureFainted {
            species: creature.species,
        }
        .into());
    }

    let Some(move_) = choice else {
        if state.battler(side).is_human() {
            return Err(ActionError::MissingChoice(side).into());
        }
        return match choose_opponent_move(rules, state, side, rng)? {
            MoveSelection::Move(move_) => Ok(ChosenMove {
                side,
                move_,
                spends_pp: true,
            }),
            MoveSelection::LastResort => Ok(ChosenMove {
                side,
                move_: rules.last_resort()?,
                spends_pp: false,
            }),
        };
    };

    match creature.find_move(move_) {
        Some(instance) if instance.pp == 0 => Err(ActionError::NoPpRemaining { move_ }.into()),
        Some(_) => Ok(ChosenMove {
            side,
            move_,
            spends_pp: true,
        }),
        None if creature.usable_moves().next().is_none() && rules.last_resort().ok() == Some(move_) => {
            Ok(ChosenMove {
                side,
                move_,
                spends_pp: false,
            })
        }
        None => Err(ActionError::MoveNotKnown {
            species: creature.species,
            move_,
        }
        .into()),
    }
}

fn creature_at(state: &BattleState, target: CreatureRef) -> BattleResult<&PokemonInst> {
    state
        .creature(target)
        .ok_or_else(|| ActionError::NoActiveCreature(target.side).into())
}

fn creature_at_mut(state: &mut BattleState, target: CreatureRef) -> BattleResult<&mut PokemonInst> {
    state
        .creature_mut(target)
        .ok_or_else(|| ActionError::NoActiveCreature(target.side).into())
}

/// Run one actor's move. Returns `None` when a status condition prevented it.
fn execute_move(
    rules: &RuleBook,
    state: &mut BattleState,
    action: ChosenMove,
    bus: &mut EventBus,
    rng: &mut dyn RandomSource,
) -> BattleResult<Option<MoveOutcome>> {
    let attacker_ref = state.active_ref(action.side);
    let defender_ref = state.active_ref(action.side.opposite());

    if let Some(reason) = check_action_prevented(rules, state, attacker_ref, bus, rng)? {
        debug!("{:?} could not act: {:?}", attacker_ref, reason);
        bus.push(BattleEvent::ActionPrevented {
            creature: attacker_ref,
            reason,
        });
        return Ok(None);
    }

    let move_data = rules.move_data(action.move_)?;
    if action.spends_pp {
        if let Some(instance) = creature_at_mut(state, attacker_ref)?.find_move_mut(action.move_) {
            instance.use_move();
        }
    }
    bus.push(BattleEvent::MoveUsed {
        battler: action.side,
        creature: attacker_ref,
        move_used: action.move_,
    });

    if !move_hits(move_data, rng) {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker_ref,
            move_used: action.move_,
        });
        return Ok(Some(MoveOutcome::Miss));
    }

    let defender_types = creature_at(state, defender_ref)?.types.clone();
    let immune = type_effectiveness(rules.type_chart(), move_data.move_type, &defender_types) == 0.0;
    if immune && (move_data.is_damaging() || move_data.only_statuses()) {
        bus.push(BattleEvent::MoveNoEffect {
            target: defender_ref,
            move_used: action.move_,
        });
        return Ok(Some(MoveOutcome::NoEffect));
    }

    if move_data.is_damaging() {
        let roll = damage(
            rules,
            move_data,
            creature_at(state, attacker_ref)?,
            creature_at(state, defender_ref)?,
            rng,
        )?;
        let defender = creature_at_mut(state, defender_ref)?;
        let fainted = defender.take_damage(roll.amount);
        bus.push(BattleEvent::DamageDealt {
            target: defender_ref,
            amount: roll.amount,
            critical: roll.critical,
            effectiveness: roll.effectiveness,
            remaining_hp: defender.current_hp(),
        });
        if fainted {
            handle_faint(rules, state, defender_ref, bus)?;
        } else if move_data.move_type == PokemonType::Fire
            && matches!(defender.status, Some(StatusCondition::Freeze))
        {
            defender.status = None;
            bus.push(BattleEvent::StatusCured {
                target: defender_ref,
                status: StatusKind::Freeze,
            });
        }
    }

    apply_secondary_effect(rules, state, move_data, attacker_ref, defender_ref, bus, rng)?;
    Ok(Some(MoveOutcome::Hit))
}

/// Status gate before acting. Sleep ticks down here; waking still costs the turn.
fn check_action_prevented(
    rules: &RuleBook,
    state: &mut BattleState,
    actor: CreatureRef,
    bus: &mut EventBus,
    rng: &mut dyn RandomSource,
) -> BattleResult<Option<ActionFailureReason>> {
    let creature = creature_at_mut(state, actor)?;
    match creature.status {
        Some(StatusCondition::Sleep(turns)) => {
            let remaining = turns.saturating_sub(1);
            if remaining == 0 {
                creature.status = None;
                bus.push(BattleEvent::StatusCured {
                    target: actor,
                    status: StatusKind::Sleep,
                });
            } else {
                creature.status = Some(StatusCondition::Sleep(remaining));
            }
            Ok(Some(ActionFailureReason::Asleep))
        }
        Some(StatusCondition::Freeze) => Ok(Some(ActionFailureReason::Frozen)),
        Some(StatusCondition::Paralysis)
            if roll_percent(rng, rules.status_table().full_paralysis_chance, "full paralysis") =>
        {
            Ok(Some(ActionFailureReason::Paralyzed))
        }
        _ => Ok(None),
    }
}

fn apply_secondary_effect(
    rules: &RuleBook,
    state: &mut BattleState,
    move_data: &MoveData,
    attacker: CreatureRef,
    defender: CreatureRef,
    bus: &mut EventBus,
    rng: &mut dyn RandomSource,
) -> BattleResult<()> {
    let Some(effect) = move_data.effect else {
        return Ok(());
    };

    match effect {
        MoveEffect::Raise {
            stat,
            stages,
            chance,
        } => {
            if roll_percent(rng, chance, "secondary effect") {
                change_stage(state, attacker, stat, stages, bus)?;
            }
        }
        MoveEffect::Lower {
            stat,
            stages,
            chance,
        } => {
            if creature_at(state, defender)?.is_fainted() {
                return Ok(());
            }
            if roll_percent(rng, chance, "secondary effect") {
                change_stage(state, defender, stat, -stages, bus)?;
            }
        }
        MoveEffect::Status { status, chance } => {
            let target = creature_at(state, defender)?;
            // A second status never replaces the first. Damaging moves cannot
            // inflict their status on a creature sharing the move's type.
            if target.is_fainted()
                || target.status.is_some()
                || (move_data.is_damaging() && target.matches_types(&[move_data.move_type]))
            {
                return Ok(());
            }
            if !roll_percent(rng, chance, "secondary effect") {
                return Ok(());
            }
            let condition = match status {
                StatusKind::Sleep => {
                    let table = rules.status_table();
                    let span = table.sleep_max_turns.saturating_sub(table.sleep_min_turns) as u32 + 1;
                    StatusCondition::Sleep(rng.draw(span, "sleep duration") as u8 + table.sleep_min_turns)
                }
                StatusKind::Poison => StatusCondition::Poison,
                StatusKind::Burn => StatusCondition::Burn,
                StatusKind::Freeze => StatusCondition::Freeze,
                StatusKind::Paralysis => StatusCondition::Paralysis,
            };
            creature_at_mut(state, defender)?.status = Some(condition);
            debug!("{:?} is now {:?}", defender, condition);
            bus.push(BattleEvent::StatusApplied {
                target: defender,
                status: condition,
            });
        }
    }
    Ok(())
}

fn change_stage(
    state: &mut BattleState,
    target: CreatureRef,
    stat: Stat,
    delta: i8,
    bus: &mut EventBus,
) -> BattleResult<()> {
    if let Some(stage) = creature_at_mut(state, target)?.apply_stage(stat, delta) {
        let direction = if delta > 0 {
            StatDirection::Raised
        } else {
            StatDirection::Lowered
        };
        bus.push(BattleEvent::StatChanged {
            target,
            stat,
            direction,
            stage,
        });
    }
    Ok(())
}

fn handle_faint(
    rules: &RuleBook,
    state: &mut BattleState,
    target: CreatureRef,
    bus: &mut EventBus,
) -> BattleResult<()> {
    debug!("{:?} fainted", target);
    bus.push(BattleEvent::CreatureFainted { target });
    if target.side == Side::Opponent {
        award_experience(rules, state, target.index, bus)?;
    }
    Ok(())
}

/// Split experience between every standing player creature that faced the
/// defeated one, and grant each the defeated species' effort values.
fn award_experience(
    rules: &RuleBook,
    state: &mut BattleState,
    defeated_index: usize,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let defeated = creature_at(
        state,
        CreatureRef {
            side: Side::Opponent,
            index: defeated_index,
        },
    )?;
    let species = rules.species(defeated.species)?;
    let defeated_level = defeated.level;
    let trainer_owned = state.opponent.trainer_profile().is_some();

    let participants: Vec<usize> = state
        .participation
        .participants_against(defeated_index)
        .into_iter()
        .filter(|index| state.player.party.get(*index).is_some_and(|c| !c.is_fainted()))
        .collect();
    if participants.is_empty() {
        return Ok(());
    }

    let amount = experience_gained(species, defeated_level, participants.len(), trainer_owned);
    let ev_yield = EvYield::for_base_stats(&species.base_stats);
    for index in participants {
        let creature_ref = CreatureRef {
            side: Side::Player,
            index,
        };
        let creature = creature_at_mut(state, creature_ref)?;
        bus.push(BattleEvent::ExperienceAwarded {
            creature: creature_ref,
            amount,
        });
        apply_ev_yield(rules, creature, &ev_yield)?;
        for step in apply_experience(rules, creature, amount)? {
            bus.push(match step {
                GrowthStep::LevelUp(new_level) => BattleEvent::LevelUp {
                    creature: creature_ref,
                    new_level,
                },
                GrowthStep::Learned(move_learned) => BattleEvent::MoveLearned {
                    creature: creature_ref,
                    move_learned,
                },
                GrowthStep::LearnPending(move_pending) => BattleEvent::MoveLearnPending {
                    creature: creature_ref,
                    move_pending,
                },
            });
        }
    }
    Ok(())
}

/// Poison and burn deal `max(1, max_hp / divisor)` to standing creatures.
fn apply_residual_damage(
    rules: &RuleBook,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let divisor = rules.status_table().residual_damage_divisor.max(1);
    for side in [Side::Player, Side::Opponent] {
        let target = state.active_ref(side);
        let creature = creature_at_mut(state, target)?;
        if creature.is_fainted() {
            continue;
        }
        let status = match creature.status {
            Some(StatusCondition::Poison) => StatusKind::Poison,
            Some(StatusCondition::Burn) => StatusKind::Burn,
            _ => continue,
        };

        let amount = (creature.max_hp() / divisor).max(1);
        let fainted = creature.take_damage(amount);
        bus.push(BattleEvent::StatusDamage {
            target,
            status,
            amount,
            remaining_hp: creature.current_hp(),
        });
        if fainted {
            handle_faint(rules, state, target, bus)?;
        }
    }
    Ok(())
}

/// AI-controlled battlers bring in their next standing creature. The human
/// side's replacement is chosen outside the engine.
fn send_out_replacements(state: &mut BattleState, bus: &mut EventBus) {
    for side in [Side::Player, Side::Opponent] {
        let battler = state.battler(side);
        if battler.is_human() || battler.active().is_some_and(|c| !c.is_fainted()) {
            continue;
        }
        if let Some(index) = battler.next_usable_index() {
            state.set_active(side, index);
            debug!("{:?} sends out party member {}", side, index);
            bus.push(BattleEvent::CreatureSentOut {
                creature: CreatureRef { side, index },
            });
        }
    }
}

/// A side with nothing left standing loses. If both are out, the player wins.
fn check_battle_end(state: &mut BattleState, bus: &mut EventBus) {
    let winner = if !state.opponent.has_usable_creature() {
        Side::Player
    } else if !state.player.has_usable_creature() {
        Side::Opponent
    } else {
        return;
    };

    let reward = match (winner, state.opponent.trainer_profile()) {
        (Side::Player, Some(profile)) => profile.reward,
        _ => 0,
    };
    debug!("Battle over: {:?} wins, reward {}", winner, reward);
    state.winner = Some(winner);
    bus.push(BattleEvent::BattleEnded { winner, reward });
}
