use crate::{Move, PokemonType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::{EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumString,
)]
pub enum Species {
    Bulbasaur,
    Ivysaur,
    Charmander,
    Squirtle,
    Caterpie,
    Weedle,
    Pidgey,
    Rattata,
    Spearow,
    Ekans,
    Pikachu,
    Sandshrew,
    Vulpix,
    Jigglypuff,
    Diglett,
    Psyduck,
    Mankey,
    Machop,
    Geodude,
    Gastly,
    Onix,
    Jynx,
    Magikarp,
    Dratini,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The five Generation 1 statistics. Parses from its display name or its
/// variant name, ignoring case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Stat {
    #[strum(serialize = "HP", serialize = "Hp")]
    Hp,
    Attack,
    Defense,
    Special,
    Speed,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::Special => "Special",
            Stat::Speed => "Speed",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Special => self.special,
            Stat::Speed => self.speed,
        }
    }

    pub fn total(&self) -> u16 {
        self.hp as u16
            + self.attack as u16
            + self.defense as u16
            + self.special as u16
            + self.speed as u16
    }
}

/// Experience curve tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GrowthRate {
    Fast,
    MediumFast,
    MediumSlow,
    Slow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Learnset {
    /// level -> moves learned at that level
    pub level_up: BTreeMap<u8, Vec<Move>>,
    /// Technical machines.
    #[serde(default)]
    pub tm: Vec<Move>,
    /// Hidden machines.
    #[serde(default)]
    pub hm: Vec<Move>,
}

impl Learnset {
    pub fn learns_at_level(&self, level: u8) -> &[Move] {
        self.level_up
            .get(&level)
            .map(|moves| moves.as_slice())
            .unwrap_or(&[])
    }

    /// Level-up moves unlocked at or below `level`, oldest first.
    pub fn unlocked_by(&self, level: u8) -> impl Iterator<Item = Move> + '_ {
        self.level_up
            .range(..=level)
            .flat_map(|(_, moves)| moves.iter().copied())
    }

    pub fn can_learn_move(&self, move_: Move) -> bool {
        self.level_up.values().any(|moves| moves.contains(&move_))
            || self.tm.contains(&move_)
            || self.hm.contains(&move_)
    }

    /// Every move referenced by this learnset, in no particular order.
    pub fn all_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.level_up
            .values()
            .flatten()
            .chain(self.tm.iter())
            .chain(self.hm.iter())
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub species: Species,
    pub name: String,
    pub pokedex_number: u16,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub catch_rate: u8,
    pub base_exp: u16,
    pub growth_rate: GrowthRate,
    pub learnset: Learnset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn sample_learnset() -> Learnset {
        let mut level_up = BTreeMap::new();
        level_up.insert(1, vec![Move::Tackle, Move::Growl]);
        level_up.insert(13, vec![Move::VineWhip]);
        level_up.insert(20, vec![Move::PoisonPowder]);
        Learnset {
            level_up,
            tm: vec![Move::SwordsDance],
            hm: vec![Move::Strength],
        }
    }

    #[test]
    fn test_unlocked_by_is_ordered_and_inclusive() {
        let learnset = sample_learnset();
        let unlocked: Vec<Move> = learnset.unlocked_by(13).collect();
        assert_eq!(unlocked, vec![Move::Tackle, Move::Growl, Move::VineWhip]);
    }

    #[test]
    fn test_can_learn_move_checks_every_method() {
        let learnset = sample_learnset();
        assert!(learnset.can_learn_move(Move::PoisonPowder));
        assert!(learnset.can_learn_move(Move::SwordsDance));
        assert!(learnset.can_learn_move(Move::Strength));
        assert!(!learnset.can_learn_move(Move::Surf));
    }

    #[test]
    fn test_stat_parses_from_name() {
        assert_eq!(Stat::from_str("Special"), Ok(Stat::Special));
        assert_eq!(Stat::from_str("HP"), Ok(Stat::Hp));
        assert_eq!(Stat::from_str("hp"), Ok(Stat::Hp));
        assert_eq!(Stat::from_str("speed"), Ok(Stat::Speed));
        assert!(Stat::from_str("SpecialAttack").is_err());
    }

    #[test]
    fn test_stat_display_name_parses_back() {
        for stat in Stat::iter() {
            assert_eq!(Stat::from_str(&stat.to_string()), Ok(stat));
        }
    }
}
