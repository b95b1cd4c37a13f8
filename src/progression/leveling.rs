use crate::errors::BattleResult;
use crate::pokemon::{LearnOutcome, PokemonInst};
use crate::progression::growth::{level_for_experience, MAX_LEVEL};
use crate::progression::rewards::EvYield;
use crate::rules::RuleBook;
use log::debug;
use schema::Move;

/// What happened to a creature while it absorbed experience, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthStep {
    LevelUp(u8),
    Learned(Move),
    /// The move was unlocked but every slot is taken.
    LearnPending(Move),
}

/// Add experience, level up as far as it reaches, and learn unlocked moves.
/// Stats are recalculated once per level gained, keeping damage taken.
pub fn apply_experience(
    rules: &RuleBook,
    creature: &mut PokemonInst,
    amount: u32,
) -> BattleResult<Vec<GrowthStep>> {
    let growth_rate = rules.species(creature.species)?.growth_rate;
    creature.experience = creature.experience.saturating_add(amount);

    let target_level = level_for_experience(growth_rate, creature.experience).min(MAX_LEVEL);
    let mut steps = Vec::new();
    while creature.level < target_level {
        creature.level += 1;
        creature.recalculate_stats(rules)?;
        steps.push(GrowthStep::LevelUp(creature.level));
        debug!("{} grew to level {}", creature.nickname, creature.level);

        let unlocked = rules
            .species(creature.species)?
            .learnset
            .learns_at_level(creature.level)
            .to_vec();
        for move_ in unlocked {
            match creature.learn_move(rules, move_)? {
                LearnOutcome::Learned => steps.push(GrowthStep::Learned(move_)),
                LearnOutcome::NoFreeSlot => steps.push(GrowthStep::LearnPending(move_)),
                LearnOutcome::AlreadyKnown => {}
            }
        }
    }
    Ok(steps)
}

/// Grant effort values and recalculate stats so they take effect immediately.
pub fn apply_ev_yield(
    rules: &RuleBook,
    creature: &mut PokemonInst,
    ev_yield: &EvYield,
) -> BattleResult<()> {
    ev_yield.apply_to(&mut creature.evs);
    creature.recalculate_stats(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::TurnRng;
    use crate::pokemon::GrowthValues;
    use crate::progression::growth::experience_for_level;
    use pretty_assertions::assert_eq;
    use schema::{GrowthRate, Species};

    fn pikachu(rules: &RuleBook, level: u8) -> PokemonInst {
        PokemonInst::generate(
            rules,
            Species::Pikachu,
            level,
            None,
            Some(GrowthValues::uniform(15)),
            None,
            &mut TurnRng::new_for_test(vec![]),
        )
        .unwrap()
    }

    #[test]
    fn test_experience_below_threshold_does_not_level() {
        let rules = RuleBook::gen1().unwrap();
        let mut creature = pikachu(&rules, 5);
        let steps = apply_experience(&rules, &mut creature, 10).unwrap();
        assert!(steps.is_empty());
        assert_eq!(creature.level, 5);
        assert_eq!(creature.experience, 135);
    }

    #[test]
    fn test_multi_level_gain_learns_moves_in_order() {
        let rules = RuleBook::gen1().unwrap();
        let mut creature = pikachu(&rules, 8);
        let needed = experience_for_level(GrowthRate::MediumFast, 10) - creature.experience;

        let steps = apply_experience(&rules, &mut creature, needed).unwrap();
        assert_eq!(
            steps,
            vec![
                GrowthStep::LevelUp(9),
                GrowthStep::Learned(Move::ThunderWave),
                GrowthStep::LevelUp(10),
            ]
        );
        assert_eq!(creature.level, 10);
        assert_eq!(creature.max_hp(), creature.current_hp());
    }

    #[test]
    fn test_full_move_list_reports_pending_move() {
        let rules = RuleBook::gen1().unwrap();
        let mut creature = pikachu(&rules, 25);
        assert_eq!(creature.known_moves().count(), 4);

        let needed = experience_for_level(GrowthRate::MediumFast, 26) - creature.experience;
        let steps = apply_experience(&rules, &mut creature, needed).unwrap();
        assert_eq!(
            steps,
            vec![GrowthStep::LevelUp(26), GrowthStep::LearnPending(Move::Swift)]
        );
    }

    #[test]
    fn test_ev_yield_raises_stats() {
        let rules = RuleBook::gen1().unwrap();
        let mut creature = pikachu(&rules, 100);
        let before = creature.stats.speed;
        let ev_yield = EvYield(GrowthValues {
            speed: 200,
            ..GrowthValues::default()
        });
        apply_ev_yield(&rules, &mut creature, &ev_yield).unwrap();
        assert_eq!(creature.evs.speed, 200);
        assert_eq!(creature.stats.speed, before + 50);
    }
}
