use crate::battle::rng::RandomSource;
use crate::battle::state::BattleState;
use crate::errors::{ActionError, BattleResult};
use crate::player::Side;
use crate::pokemon::PokemonInst;
use log::debug;

const ATTEMPT_BONUS: u32 = 30;

/// Flee check against a wild creature.
///
/// `F = player_speed * 32 / ((wild_speed / 4) % 256) + 30 * attempts`.
/// Escape is certain when the divisor is 0 or `F > 255`; otherwise it
/// succeeds when a draw in `[0, 256)` is below `F`.
pub fn can_escape(
    player: &PokemonInst,
    wild: &PokemonInst,
    attempts: u8,
    rng: &mut dyn RandomSource,
) -> bool {
    let divisor = (wild.current.speed as u32 / 4) % 256;
    if divisor == 0 {
        return true;
    }
    let odds = player.current.speed as u32 * 32 / divisor + ATTEMPT_BONUS * attempts as u32;
    if odds > 255 {
        return true;
    }
    rng.draw(256, "escape") < odds
}

/// Count one escape attempt on the session and run the flee check.
/// Earlier failed attempts make each new attempt easier.
pub fn attempt_escape(state: &mut BattleState, rng: &mut dyn RandomSource) -> BattleResult<bool> {
    if !state.is_wild_battle() {
        return Err(ActionError::EscapeNotAllowed.into());
    }
    let attempts = state.escape_attempts;
    state.escape_attempts = state.escape_attempts.saturating_add(1);

    let escaped = can_escape(
        state.active(Side::Player)?,
        state.active(Side::Opponent)?,
        attempts,
        rng,
    );
    debug!("Escape attempt {}: {}", state.escape_attempts, escaped);
    Ok(escaped)
}
