use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState};
use crate::errors::BattleResult;
use crate::player::{Battler, CreatureRef, Side};
use crate::pokemon::{GrowthValues, PokemonInst, StatusCondition};
use crate::rules::RuleBook;
use schema::{Move, Species};
use std::sync::LazyLock;

/// The bundled rule book, loaded once for every test.
pub static RULES: LazyLock<RuleBook> = LazyLock::new(|| match RuleBook::gen1() {
    Ok(rules) => rules,
    Err(err) => panic!("Failed to load bundled rule tables: {}", err),
});

/// The first party member on each side, active in every 1v1 fixture.
pub const PLAYER_LEAD: CreatureRef = CreatureRef {
    side: Side::Player,
    index: 0,
};
pub const OPPONENT_LEAD: CreatureRef = CreatureRef {
    side: Side::Opponent,
    index: 0,
};

/// A builder for creating test creatures with common defaults.
///
/// IVs default to 15 in every stat so stats are deterministic.
///
/// # Example
/// ```ignore
/// let pikachu = TestPokemonBuilder::new(Species::Pikachu, 25)
///     .with_moves(vec![Move::ThunderShock])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: Species,
    level: u8,
    moves: Option<Vec<Move>>,
    ivs: GrowthValues,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: Species, level: u8) -> Self {
        Self {
            species,
            level,
            moves: None,
            ivs: GrowthValues::uniform(15),
            status: None,
            current_hp: None,
        }
    }

    /// Sets the moves. If not set, moves come from the learnset.
    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_ivs(mut self, ivs: GrowthValues) -> Self {
        self.ivs = ivs;
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonInst {
        // IVs are supplied, so generation never draws.
        let mut rng = TurnRng::new_for_test(vec![]);
        let mut pokemon = match PokemonInst::generate(
            &RULES,
            self.species,
            self.level,
            self.moves,
            Some(self.ivs),
            None,
            &mut rng,
        ) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build {:?}: {}", self.species, err),
        };

        pokemon.status = self.status;
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        pokemon
    }
}

/// Creates a 1v1 battle against a wild creature.
pub fn create_wild_battle(player: PokemonInst, wild: PokemonInst) -> BattleState {
    BattleState::new(Battler::player("Red", vec![player]), Battler::wild(wild))
}

/// Creates a 1v1 battle against a trainer of the given archetype, reward 500.
pub fn create_trainer_battle(player: PokemonInst, opponent: PokemonInst, archetype: &str) -> BattleState {
    BattleState::new(
        Battler::player("Red", vec![player]),
        Battler::trainer("Rival", vec![opponent], archetype, 500),
    )
}

/// Creates a `TurnRng` with a long list of mid-range values (50).
/// Useful when the specific outcome does not matter, preventing panics from exhaustion.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// Whether any event matches the predicate.
pub fn has_event(events: &[BattleEvent], predicate: impl Fn(&BattleEvent) -> bool) -> bool {
    events.iter().any(predicate)
}
