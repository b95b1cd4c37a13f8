use crate::battle::rng::RandomSource;
use crate::errors::BattleResult;
use crate::pokemon::PokemonInst;
use crate::rules::RuleBook;
use log::debug;
use schema::{Ball, CaptureDevice, StatusModifiers};

/// Divisor that turns a device `rate` into the HP-factor multiplier.
const RATE_SCALE: u32 = 96;
const MAX_SHAKES: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub caught: bool,
    /// Presentation-only feedback; always 3 on success.
    pub shakes: u8,
}

fn status_modifiers(rules: &RuleBook, wild: &PokemonInst) -> Option<StatusModifiers> {
    wild.status_kind()
        .map(|kind| rules.status_table().modifiers(kind))
}

/// HP factor `f`: `max_hp * 255 * rate / 96 / max(hp / 4, 1)`, clamped to 1..=255.
/// Lower current HP and a better device both raise it.
pub fn hp_factor(wild: &PokemonInst, device: &CaptureDevice) -> u32 {
    let scaled = wild.max_hp() as u32 * 255 * device.rate as u32 / RATE_SCALE;
    let divisor = (wild.current_hp() as u32 / 4).max(1);
    (scaled / divisor).clamp(1, 255)
}

/// Decide whether a capture attempt succeeds.
///
/// Draw order: first draw in `[0, probability_max]`, then (only if the
/// attempt was not already decided) an HP-check draw in `[0, 256)`.
pub fn can_catch(
    rules: &RuleBook,
    wild: &PokemonInst,
    device: &CaptureDevice,
    rng: &mut dyn RandomSource,
) -> BattleResult<bool> {
    if device.guaranteed {
        return Ok(true);
    }
    let catch_rate = rules.species(wild.species)?.catch_rate as u32;
    let modifiers = status_modifiers(rules, wild);

    let n = rng.draw(device.probability_max as u32 + 1, "capture draw");
    if let Some(modifiers) = modifiers {
        if n < modifiers.quick_catch_threshold as u32 {
            return Ok(true);
        }
    }
    let bonus = modifiers.map_or(0, |m| m.catch_bonus as u32);
    if n.saturating_sub(bonus) > catch_rate {
        return Ok(false);
    }

    let m = rng.draw(256, "capture hp check");
    Ok(m <= hp_factor(wild, device))
}

/// Exact probability that `can_catch` succeeds, for the same inputs.
pub fn capture_chance(
    rules: &RuleBook,
    wild: &PokemonInst,
    device: &CaptureDevice,
) -> BattleResult<f64> {
    if device.guaranteed {
        return Ok(1.0);
    }
    let catch_rate = rules.species(wild.species)?.catch_rate as u32;
    let modifiers = status_modifiers(rules, wild);
    let hp_pass = (hp_factor(wild, device) + 1) as f64 / 256.0;

    let outcomes = device.probability_max as u32 + 1;
    let mut total = 0.0;
    for n in 0..outcomes {
        let quick = modifiers.is_some_and(|m| n < m.quick_catch_threshold as u32);
        let bonus = modifiers.map_or(0, |m| m.catch_bonus as u32);
        total += if quick {
            1.0
        } else if n.saturating_sub(bonus) > catch_rate {
            0.0
        } else {
            hp_pass
        };
    }
    Ok(total / outcomes as f64)
}

/// Shakes to show for a failed capture: 0 on an immediate break-out up to 3
/// for a near miss. Depends only on the creature and device, never on draws.
pub fn shake_count(
    rules: &RuleBook,
    wild: &PokemonInst,
    device: &CaptureDevice,
) -> BattleResult<u8> {
    let catch_rate = rules.species(wild.species)?.catch_rate as u32;
    let d = catch_rate * 100 / (device.probability_max as u32).max(1);
    if d >= 256 {
        return Ok(MAX_SHAKES);
    }
    let shake_bonus = status_modifiers(rules, wild).map_or(0, |m| m.shake_bonus as u32);
    let x = d * hp_factor(wild, device) / 255 + shake_bonus;
    Ok(match x {
        0..10 => 0,
        10..30 => 1,
        30..70 => 2,
        _ => MAX_SHAKES,
    })
}

/// Throw a capture device. The outcome is decided before shakes are computed.
pub fn attempt_capture(
    rules: &RuleBook,
    wild: &PokemonInst,
    ball: Ball,
    rng: &mut dyn RandomSource,
) -> BattleResult<CaptureOutcome> {
    let device = rules.capture_device(ball)?;
    let caught = can_catch(rules, wild, device, rng)?;
    let shakes = if caught {
        MAX_SHAKES
    } else {
        shake_count(rules, wild, device)?
    };
    debug!(
        "{} thrown at {}: caught={} shakes={}",
        device.name, wild.nickname, caught, shakes
    );
    Ok(CaptureOutcome { caught, shakes })
}
