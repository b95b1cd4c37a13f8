use crate::battle::rng::RandomSource;
use crate::pokemon::{PokemonInst, StatusCondition, MAX_STAGE};
use schema::MoveData;

/// Effective speed for turn ordering: current speed, quartered while paralysed.
pub fn effective_speed(pokemon: &PokemonInst) -> u16 {
    let speed = pokemon.current.speed;
    if matches!(pokemon.status, Some(StatusCondition::Paralysis)) {
        speed / 4
    } else {
        speed
    }
}

/// Accuracy check. Moves without an accuracy value never miss; otherwise the
/// move hits when a draw in `[0, 100)` is below its accuracy.
pub fn move_hits(move_data: &MoveData, rng: &mut dyn RandomSource) -> bool {
    let Some(accuracy) = move_data.accuracy else {
        return true;
    };
    rng.draw(100, "accuracy") < accuracy as u32
}

/// Apply stat stage multipliers according to Pokemon formula
/// Stages range from -6 to +6
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let clamped_stage = stage.clamp(-MAX_STAGE, MAX_STAGE);

    if clamped_stage == 0 {
        return base_stat;
    }

    let multiplier = if clamped_stage < 0 {
        2.0 / (2.0 + (-clamped_stage) as f64)
    } else {
        (2.0 + clamped_stage as f64) / 2.0
    };

    ((base_stat as f64) * multiplier).round().max(1.0) as u16
}
