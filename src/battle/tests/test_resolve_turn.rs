#[cfg(test)]
mod tests {
    use crate::battle::engine::{resolve_turn, TurnRequest, TurnResult};
    use crate::battle::rng::{RandomSource, TurnRng};
    use crate::battle::state::{BattleEvent, BattleState, MoveOutcome, TurnPhase};
    use crate::battle::tests::common::{
        create_trainer_battle, create_wild_battle, predictable_rng, TestPokemonBuilder,
        OPPONENT_LEAD, PLAYER_LEAD, RULES,
    };
    use crate::errors::{ActionError, BattleEngineError, BattleResult, RuleDataError};
    use crate::player::Side;
    use crate::pokemon::GrowthValues;
    use crate::rules::{RuleBook, RuleTables};
    use pretty_assertions::assert_eq;
    use schema::{Move, Species};

    fn run(
        rules: &RuleBook,
        state: &BattleState,
        player_choice: Option<Move>,
        opponent_choice: Option<Move>,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<TurnResult> {
        resolve_turn(
            rules,
            TurnRequest {
                state,
                player_choice,
                opponent_choice,
                rng,
            },
        )
    }

    fn move_order(events: &[BattleEvent]) -> Vec<Side> {
        events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MoveUsed { battler, .. } => Some(*battler),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_super_effective_turn_is_reproducible() {
        let bulbasaur = TestPokemonBuilder::new(Species::Bulbasaur, 5)
            .with_ivs(GrowthValues::uniform(10))
            .with_moves(vec![Move::Acid])
            .build();
        let caterpie = TestPokemonBuilder::new(Species::Caterpie, 5)
            .with_ivs(GrowthValues::uniform(10))
            .with_moves(vec![Move::Tackle])
            .build();
        // Both have Speed 10.
        assert_eq!(bulbasaur.current.speed, caterpie.current.speed);
        let state = create_wild_battle(bulbasaur, caterpie);

        let mut rng = TurnRng::new_for_test(vec![
            0,   // wild move pick
            0,   // speed tie: player first
            0,   // Acid accuracy
            255, // no critical hit
            99,  // Acid's defense drop misses its 33% chance
            0,   // Tackle accuracy
            255, // no critical hit
        ]);
        let result = run(&RULES, &state, Some(Move::Acid), None, &mut rng).unwrap();

        assert_eq!(
            result.events,
            vec![
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::MoveUsed {
                    battler: Side::Player,
                    creature: PLAYER_LEAD,
                    move_used: Move::Acid,
                },
                BattleEvent::DamageDealt {
                    target: OPPONENT_LEAD,
                    amount: 15,
                    critical: false,
                    effectiveness: 2.0,
                    remaining_hp: 5,
                },
                BattleEvent::MoveUsed {
                    battler: Side::Opponent,
                    creature: OPPONENT_LEAD,
                    move_used: Move::Tackle,
                },
                BattleEvent::DamageDealt {
                    target: PLAYER_LEAD,
                    amount: 4,
                    critical: false,
                    effectiveness: 1.0,
                    remaining_hp: 16,
                },
                BattleEvent::TurnEnded,
            ]
        );
        assert_eq!(
            result.resolutions,
            vec![(Side::Player, MoveOutcome::Hit), (Side::Opponent, MoveOutcome::Hit)]
        );
        assert_eq!(result.phase, TurnPhase::TurnComplete);
        assert_eq!(result.state.turn_number, 2);
        assert_eq!(rng.remaining(), 0);

        let acid = result.state.player.party[0].find_move(Move::Acid).unwrap();
        assert_eq!(acid.pp, acid.max_pp - 1);
    }

    #[test]
    fn test_input_state_is_left_untouched() {
        let state = create_wild_battle(
            TestPokemonBuilder::new(Species::Rattata, 10).build(),
            TestPokemonBuilder::new(Species::Pidgey, 10).build(),
        );
        let before = state.clone();
        let result = run(&RULES, &state, Some(Move::Tackle), None, &mut predictable_rng()).unwrap();
        assert_eq!(state, before);
        assert_ne!(result.state, before);
    }

    #[test]
    fn test_priority_move_beats_faster_opponent() {
        let rattata = TestPokemonBuilder::new(Species::Rattata, 10)
            .with_moves(vec![Move::QuickAttack])
            .build();
        let mut pidgey = TestPokemonBuilder::new(Species::Pidgey, 10)
            .with_moves(vec![Move::Gust])
            .build();
        pidgey.current.speed = 999;
        let state = create_wild_battle(rattata, pidgey);

        let result = run(
            &RULES,
            &state,
            Some(Move::QuickAttack),
            Some(Move::Gust),
            &mut predictable_rng(),
        )
        .unwrap();
        assert_eq!(move_order(&result.events), vec![Side::Player, Side::Opponent]);
    }

    #[test]
    fn test_speed_tie_coin_decides_order() {
        let state = create_trainer_battle(
            TestPokemonBuilder::new(Species::Rattata, 10).build(),
            TestPokemonBuilder::new(Species::Rattata, 10).build(),
            "Youngster",
        );

        // Coin, then accuracy and critical hit for each Tackle.
        let mut rng = TurnRng::new_for_test(vec![0, 50, 255, 50, 255]);
        let result = run(&RULES, &state, Some(Move::Tackle), Some(Move::Tackle), &mut rng).unwrap();
        assert_eq!(move_order(&result.events), vec![Side::Player, Side::Opponent]);

        let mut rng = TurnRng::new_for_test(vec![1, 50, 255, 50, 255]);
        let result = run(&RULES, &state, Some(Move::Tackle), Some(Move::Tackle), &mut rng).unwrap();
        assert_eq!(move_order(&result.events), vec![Side::Opponent, Side::Player]);
    }

    #[test]
    fn test_fainted_target_short_circuits_second_move() {
        let pikachu = TestPokemonBuilder::new(Species::Pikachu, 30)
            .with_moves(vec![Move::ThunderShock])
            .build();
        let pidgey = TestPokemonBuilder::new(Species::Pidgey, 5).with_hp(1).build();
        let state = create_wild_battle(pikachu, pidgey);

        let result = run(&RULES, &state, Some(Move::ThunderShock), None, &mut predictable_rng()).unwrap();

        assert_eq!(move_order(&result.events), vec![Side::Player]);
        assert_eq!(result.resolutions, vec![(Side::Player, MoveOutcome::Hit)]);
        assert!(result
            .events
            .contains(&BattleEvent::CreatureFainted { target: OPPONENT_LEAD }));
        assert!(result.state.opponent.party[0].is_fainted());
        // A fainted target never receives the secondary status.
        assert_eq!(result.state.opponent.party[0].status, None);
    }

    #[test]
    fn test_missed_move_still_spends_pp() {
        let state = create_wild_battle(
            TestPokemonBuilder::new(Species::Rattata, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
            TestPokemonBuilder::new(Species::Magikarp, 10)
                .with_moves(vec![Move::Splash])
                .build(),
        );
        // Wild pick, Tackle accuracy 95 misses on 95. Splash never draws.
        let mut rng = TurnRng::new_for_test(vec![0, 95]);
        let result = run(&RULES, &state, Some(Move::Tackle), None, &mut rng).unwrap();

        assert!(result.events.contains(&BattleEvent::MoveMissed {
            attacker: PLAYER_LEAD,
            move_used: Move::Tackle,
        }));
        assert!(result.resolutions.contains(&(Side::Player, MoveOutcome::Miss)));
        let tackle = result.state.player.party[0].find_move(Move::Tackle).unwrap();
        assert_eq!(tackle.pp, tackle.max_pp - 1);
    }

    #[test]
    fn test_human_battler_must_choose() {
        let state = create_wild_battle(
            TestPokemonBuilder::new(Species::Rattata, 10).build(),
            TestPokemonBuilder::new(Species::Pidgey, 10).build(),
        );
        let err = run(&RULES, &state, None, None, &mut predictable_rng()).unwrap_err();
        assert_eq!(err, BattleEngineError::Action(ActionError::MissingChoice(Side::Player)));
    }

    #[test]
    fn test_unknown_move_is_rejected() {
        let state = create_wild_battle(
            TestPokemonBuilder::new(Species::Bulbasaur, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
            TestPokemonBuilder::new(Species::Pidgey, 10).build(),
        );
        let err = run(&RULES, &state, Some(Move::Ember), None, &mut predictable_rng()).unwrap_err();
        assert_eq!(
            err,
            BattleEngineError::Action(ActionError::MoveNotKnown {
                species: Species::Bulbasaur,
                move_: Move::Ember,
            })
        );
    }

    #[test]
    fn test_move_without_pp_is_rejected() {
        let mut state = create_wild_battle(
            TestPokemonBuilder::new(Species::Bulbasaur, 10)
                .with_moves(vec![Move::Tackle, Move::Growl])
                .build(),
            TestPokemonBuilder::new(Species::Pidgey, 10).build(),
        );
        state.player.party[0].find_move_mut(Move::Tackle).unwrap().pp = 0;
        let err = run(&RULES, &state, Some(Move::Tackle), None, &mut predictable_rng()).unwrap_err();
        assert_eq!(
            err,
            BattleEngineError::Action(ActionError::NoPpRemaining { move_: Move::Tackle })
        );
    }

    #[test]
    fn test_fainted_actor_is_rejected() {
        let state = create_wild_battle(
            TestPokemonBuilder::new(Species::Bulbasaur, 10).with_hp(0).build(),
            TestPokemonBuilder::new(Species::Pidgey, 10).build(),
        );
        let err = run(&RULES, &state, Some(Move::Tackle), None, &mut predictable_rng()).unwrap_err();
        assert_eq!(
            err,
            BattleEngineError::Action(ActionError::CreatureFainted {
                species: Species::Bulbasaur
            })
        );
    }

    #[test]
    fn test_finished_battle_is_rejected() {
        let mut state = create_wild_battle(
            TestPokemonBuilder::new(Species::Bulbasaur, 10).build(),
            TestPokemonBuilder::new(Species::Pidgey, 10).build(),
        );
        state.winner = Some(Side::Player);
        let err = run(&RULES, &state, Some(Move::Tackle), None, &mut predictable_rng()).unwrap_err();
        assert_eq!(err, BattleEngineError::Action(ActionError::BattleOver));
    }

    #[test]
    fn test_ai_without_pp_uses_last_resort() {
        let mut state = create_trainer_battle(
            TestPokemonBuilder::new(Species::Magikarp, 10)
                .with_moves(vec![Move::Splash])
                .build(),
            TestPokemonBuilder::new(Species::Rattata, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
            "Youngster",
        );
        state.opponent.party[0].find_move_mut(Move::Tackle).unwrap().pp = 0;

        let result = run(&RULES, &state, Some(Move::Splash), None, &mut predictable_rng()).unwrap();
        assert!(result.events.iter().any(|event| matches!(
            event,
            BattleEvent::MoveUsed {
                battler: Side::Opponent,
                move_used: Move::Struggle,
                ..
            }
        )));
        assert_eq!(result.state.opponent.party[0].find_move(Move::Tackle).unwrap().pp, 0);
    }

    #[test]
    fn test_player_without_pp_may_choose_last_resort() {
        let mut state = create_wild_battle(
            TestPokemonBuilder::new(Species::Rattata, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
            TestPokemonBuilder::new(Species::Magikarp, 10)
                .with_moves(vec![Move::Splash])
                .build(),
        );
        state.player.party[0].find_move_mut(Move::Tackle).unwrap().pp = 0;

        let result = run(&RULES, &state, Some(Move::Struggle), None, &mut predictable_rng()).unwrap();
        assert_eq!(move_order(&result.events).len(), 2);
        assert!(result.events.contains(&BattleEvent::MoveUsed {
            battler: Side::Player,
            creature: PLAYER_LEAD,
            move_used: Move::Struggle,
        }));
    }

    #[test]
    fn test_missing_last_resort_is_a_configuration_error() {
        let rules = RuleBook::new(RuleTables::gen1().unwrap()).unwrap();
        let mut state = create_trainer_battle(
            TestPokemonBuilder::new(Species::Magikarp, 10)
                .with_moves(vec![Move::Splash])
                .build(),
            TestPokemonBuilder::new(Species::Rattata, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
            "Youngster",
        );
        state.opponent.party[0].find_move_mut(Move::Tackle).unwrap().pp = 0;

        let err = run(&rules, &state, Some(Move::Splash), None, &mut predictable_rng()).unwrap_err();
        assert_eq!(err, BattleEngineError::RuleData(RuleDataError::NoLastResort));
    }

    #[test]
    fn test_trainer_ai_choice_is_drawn_first() {
        let state = create_trainer_battle(
            TestPokemonBuilder::new(Species::Squirtle, 12)
                .with_moves(vec![Move::Tackle])
                .build(),
            TestPokemonBuilder::new(Species::Pikachu, 12)
                .with_moves(vec![Move::ThunderShock, Move::Growl])
                .build(),
            "GymLeader",
        );
        // GymLeader weights: Thunder Shock 24 (super effective), Growl 16.
        // A roll of 30 lands on Growl.
        let mut rng = TurnRng::new_for_test(vec![30, 50, 50, 255]);
        let result = run(&RULES, &state, Some(Move::Tackle), None, &mut rng).unwrap();
        assert!(result.events.iter().any(|event| matches!(
            event,
            BattleEvent::MoveUsed {
                battler: Side::Opponent,
                move_used: Move::Growl,
                ..
            }
        )));
    }
}
