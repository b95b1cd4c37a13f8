use log::info;
use pokemon_battle_core::{
    attempt_capture, choose_opponent_move, resolve_turn, Ball, BattleEngineError, BattleEvent,
    BattleResult, BattleState, Battler, MoveSelection, PokemonInst, RuleBook, SeededRng, Side,
    Species, TurnRequest,
};

const DEMO_SEED: u64 = 151;
const MAX_DEMO_TURNS: u32 = 100;

fn main() -> Result<(), BattleEngineError> {
    env_logger::init();

    let rules = RuleBook::gen1()?;
    let mut rng = SeededRng::new(DEMO_SEED);

    println!("=== Trainer Battle Demo ===");
    let red = Battler::player(
        "Red",
        vec![
            creature(&rules, Species::Charmander, 14, &mut rng)?,
            creature(&rules, Species::Pikachu, 12, &mut rng)?,
        ],
    );
    let brock = Battler::trainer(
        "Brock",
        vec![
            creature(&rules, Species::Geodude, 12, &mut rng)?,
            creature(&rules, Species::Onix, 14, &mut rng)?,
        ],
        "GymLeader",
        1386,
    );
    let state = run_battle(&rules, BattleState::new(red, brock), &mut rng)?;
    for pokemon in &state.player.party {
        println!(
            "  {} L{} ({} exp, {}/{} HP)",
            pokemon.nickname,
            pokemon.level,
            pokemon.experience,
            pokemon.current_hp(),
            pokemon.max_hp()
        );
    }

    println!();
    println!("=== Wild Encounter Demo ===");
    let red = Battler::player("Red", vec![creature(&rules, Species::Squirtle, 10, &mut rng)?]);
    let wild = Battler::wild(creature(&rules, Species::Pidgey, 6, &mut rng)?);
    let state = BattleState::new(red, wild);
    let target = state.active(Side::Opponent)?;
    for ball in [Ball::PokeBall, Ball::GreatBall, Ball::UltraBall] {
        let outcome = attempt_capture(&rules, target, ball, &mut rng)?;
        println!(
            "  {:?} at {}: caught={} after {} shakes",
            ball, target.nickname, outcome.caught, outcome.shakes
        );
        if outcome.caught {
            break;
        }
    }

    Ok(())
}

fn creature(
    rules: &RuleBook,
    species: Species,
    level: u8,
    rng: &mut SeededRng,
) -> BattleResult<PokemonInst> {
    PokemonInst::generate(rules, species, level, None, None, None, rng)
}

/// Resolve turns until one side runs out of creatures. The human side is
/// driven by the same weighted selector the AI uses.
fn run_battle(
    rules: &RuleBook,
    mut state: BattleState,
    rng: &mut SeededRng,
) -> BattleResult<BattleState> {
    while !state.is_over() && state.turn_number <= MAX_DEMO_TURNS {
        if state.active(Side::Player)?.is_fainted() {
            match state.player.next_usable_index() {
                Some(index) => {
                    state.set_active(Side::Player, index);
                    println!("Red sends out {}!", state.active(Side::Player)?.nickname);
                }
                None => break,
            }
        }

        let player_choice = match choose_opponent_move(rules, &state, Side::Player, &mut *rng)? {
            MoveSelection::Move(move_) => move_,
            MoveSelection::LastResort => rules.last_resort()?,
        };
        let result = resolve_turn(
            rules,
            TurnRequest {
                state: &state,
                player_choice: Some(player_choice),
                opponent_choice: None,
                rng: &mut *rng,
            },
        )?;

        println!("--- Turn {} ---", state.turn_number);
        for event in &result.events {
            if !matches!(event, BattleEvent::TurnStarted { .. } | BattleEvent::TurnEnded) {
                println!("  {:?}", event);
            }
        }
        state = result.state;
    }

    match state.winner {
        Some(winner) => info!("Battle over after {} turns, winner {:?}", state.turn_number - 1, winner),
        None => info!("Battle stopped after {} turns", MAX_DEMO_TURNS),
    }
    Ok(state)
}
