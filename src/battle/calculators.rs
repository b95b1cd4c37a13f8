use crate::battle::rng::RandomSource;
use crate::errors::BattleResult;
use crate::pokemon::PokemonInst;
use crate::rules::RuleBook;
use log::debug;
use schema::{MoveCategory, MoveData, PokemonType, TypeChart};

const STAB_MULTIPLIER: f32 = 1.5;
const CRITICAL_MULTIPLIER: f32 = 2.0;
const MAX_CRITICAL_THRESHOLD: u32 = 255;

/// Outcome of one damage calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub amount: u16,
    pub critical: bool,
    pub effectiveness: f32,
}

/// Product of the chart lookups across every defending type:
/// one of 0, 0.25, 0.5, 1, 2 or 4 for one- or two-typed defenders.
pub fn type_effectiveness(
    chart: &TypeChart,
    move_type: PokemonType,
    defender_types: &[PokemonType],
) -> f32 {
    defender_types
        .iter()
        .map(|defending| chart.multiplier(move_type, *defending))
        .product()
}

/// Critical-hit gate. The threshold is half the attacker's species base Speed,
/// doubled for high-critical moves or a boosted attacker (the two do not stack),
/// capped at 255; a draw in `[0, 256)` below the threshold is a critical hit.
pub fn critical_hit(
    rules: &RuleBook,
    move_data: &MoveData,
    attacker: &PokemonInst,
    rng: &mut dyn RandomSource,
) -> BattleResult<bool> {
    let base_speed = rules.species(attacker.species)?.base_stats.speed as u32;
    let mut threshold = base_speed / 2;
    if move_data.high_critical || attacker.critical_boost {
        threshold *= 2;
    }
    threshold = threshold.min(MAX_CRITICAL_THRESHOLD);
    Ok(rng.draw(256, "critical hit") < threshold)
}

/// Same-type bonus, critical bonus and type effectiveness combined.
pub fn damage_modifier(
    move_data: &MoveData,
    attacker: &PokemonInst,
    effectiveness: f32,
    critical: bool,
) -> f32 {
    let mut modifier = effectiveness;
    if attacker.types.contains(&move_data.move_type) {
        modifier *= STAB_MULTIPLIER;
    }
    if critical {
        modifier *= CRITICAL_MULTIPLIER;
    }
    modifier
}

/// Full damage calculation for one move.
///
/// Non-damaging moves and 0x matchups deal 0 and skip the critical-hit draw.
/// Damaging moves with nonzero effectiveness deal at least 1.
pub fn damage(
    rules: &RuleBook,
    move_data: &MoveData,
    attacker: &PokemonInst,
    defender: &PokemonInst,
    rng: &mut dyn RandomSource,
) -> BattleResult<DamageRoll> {
    let effectiveness = type_effectiveness(rules.type_chart(), move_data.move_type, &defender.types);
    let power = match move_data.power {
        Some(power) if move_data.is_damaging() && effectiveness > 0.0 => power as u32,
        _ => {
            return Ok(DamageRoll {
                amount: 0,
                critical: false,
                effectiveness,
            })
        }
    };

    let (attack, defense) = match move_data.category {
        MoveCategory::Physical => (attacker.current.attack, defender.current.defense),
        _ => (attacker.current.special, defender.current.special),
    };
    let attack = attack.max(1) as u32;
    let defense = defense.max(1) as u32;

    let critical = critical_hit(rules, move_data, attacker, rng)?;
    let level_factor = 2 * attacker.level as u32 / 5 + 2;
    let base = level_factor * power * attack / defense / 50 + 2;
    let modifier = damage_modifier(move_data, attacker, effectiveness, critical);
    let amount = ((base as f32 * modifier).floor() as u32).clamp(1, u16::MAX as u32) as u16;

    debug!(
        "{} used {}: base {} x{} = {} (critical: {})",
        attacker.nickname, move_data.name, base, modifier, amount, critical
    );

    Ok(DamageRoll {
        amount,
        critical,
        effectiveness,
    })
}
