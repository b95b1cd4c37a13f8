use crate::battle::state::BattleState;
use schema::Species;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatchError {
    #[error("Capture devices can only be used in wild battles")]
    NotWildBattle,
    #[error("There is no creature to capture")]
    NoTargetCreature,
    #[error("The party is already full")]
    PartyFull,
    #[error("{species:?} has already fainted")]
    TargetFainted { species: Species },
}

/// Validate that a capture attempt can be made and return the target species.
pub fn can_attempt_catch(state: &BattleState) -> Result<Species, CatchError> {
    if !state.is_wild_battle() {
        return Err(CatchError::NotWildBattle);
    }
    if state.player.party_is_full() {
        return Err(CatchError::PartyFull);
    }

    match state.opponent.active() {
        Some(target) if target.is_fainted() => Err(CatchError::TargetFainted {
            species: target.species,
        }),
        Some(target) => Ok(target.species),
        None => Err(CatchError::NoTargetCreature),
    }
}
