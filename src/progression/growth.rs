use schema::{GrowthRate, SpeciesData, Stat};

pub const MAX_LEVEL: u8 = 100;

/// Effective statistic from the standard growth formula:
/// `floor((2 * base + IV + floor(EV / 4)) * level / 100) + 5`,
/// with `level + 10` in place of the `+ 5` for HP.
pub fn compute_statistic(base: u8, stat: Stat, level: u8, iv: u8, ev: u8) -> u16 {
    let scaled = (2 * base as u32 + iv as u32 + ev as u32 / 4) * level as u32 / 100;
    let value = match stat {
        Stat::Hp => scaled + level as u32 + 10,
        _ => scaled + 5,
    };
    value.min(u16::MAX as u32) as u16
}

/// Total experience needed to reach `level` on the given curve.
pub fn experience_for_level(growth: GrowthRate, level: u8) -> u32 {
    let n = level as i64;
    let total = match growth {
        GrowthRate::Fast => 4 * n * n * n / 5,
        GrowthRate::MediumFast => n * n * n,
        GrowthRate::MediumSlow => 6 * n * n * n / 5 - 15 * n * n + 100 * n - 140,
        GrowthRate::Slow => 5 * n * n * n / 4,
    };
    total.max(0) as u32
}

/// Experience a creature of this curve starts with when generated at `level`.
///
/// Low levels on the medium-slow curve dip below the level-1 value; the result
/// is floored to the previous level's amount so the curve never decreases.
pub fn starting_experience(growth: GrowthRate, level: u8) -> u32 {
    (1..=level.max(1))
        .map(|l| experience_for_level(growth, l))
        .max()
        .unwrap_or(0)
}

/// Highest level whose threshold `experience` has reached, capped at 100.
pub fn level_for_experience(growth: GrowthRate, experience: u32) -> u8 {
    let mut level = 1;
    while level < MAX_LEVEL && starting_experience(growth, level + 1) <= experience {
        level += 1;
    }
    level
}

/// Experience awarded to each of `participants` for defeating a creature:
/// `floor(base_exp * level / 7)` split evenly, at least 1 per participant.
///
/// `trainer_owned` applies the x3/2 bonus for trainer battles before splitting.
pub fn experience_gained(
    defeated: &SpeciesData,
    defeated_level: u8,
    participants: usize,
    trainer_owned: bool,
) -> u32 {
    let mut total = defeated.base_exp as u32 * defeated_level as u32 / 7;
    if trainer_owned {
        total = total * 3 / 2;
    }
    let share = total / participants.max(1) as u32;
    share.max(1)
}
