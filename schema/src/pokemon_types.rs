use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumCount,
)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl PokemonType {
    /// Row/column of this type in a `TypeChart`.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single cell of the type-effectiveness matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Matchup {
    NoEffect,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl Matchup {
    pub fn multiplier(self) -> f32 {
        match self {
            Matchup::NoEffect => 0.0,
            Matchup::NotVeryEffective => 0.5,
            Matchup::Normal => 1.0,
            Matchup::SuperEffective => 2.0,
        }
    }
}

/// Returned when externally supplied rows do not form a square matrix over every type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeChartShapeError {
    #[error("type chart has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
    #[error("type chart row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Square attacking-type x defending-type matrix of matchups.
///
/// Serialized as a list of rows, one per attacking type in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Matchup>>", into = "Vec<Vec<Matchup>>")]
pub struct TypeChart {
    cells: Vec<Matchup>,
}

impl TypeChart {
    const SIZE: usize = PokemonType::COUNT;

    /// The Generation 1 chart, including its well-known quirks
    /// (Ghost cannot touch Psychic, Bug and Poison are mutually super effective,
    /// Ice is neutral against Fire).
    pub fn gen1() -> Self {
        let mut cells = Vec::with_capacity(Self::SIZE * Self::SIZE);
        for attacking in PokemonType::iter() {
            for defending in PokemonType::iter() {
                cells.push(gen1_matchup(attacking, defending));
            }
        }
        Self { cells }
    }

    pub fn from_rows(rows: Vec<Vec<Matchup>>) -> Result<Self, TypeChartShapeError> {
        if rows.len() != Self::SIZE {
            return Err(TypeChartShapeError::RowCount {
                expected: Self::SIZE,
                found: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(Self::SIZE * Self::SIZE);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != Self::SIZE {
                return Err(TypeChartShapeError::RowLength {
                    row: i,
                    expected: Self::SIZE,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { cells })
    }

    pub fn matchup(&self, attacking: PokemonType, defending: PokemonType) -> Matchup {
        self.cells[attacking.index() * Self::SIZE + defending.index()]
    }

    pub fn multiplier(&self, attacking: PokemonType, defending: PokemonType) -> f32 {
        self.matchup(attacking, defending).multiplier()
    }

    /// Overwrite one cell. Only meaningful before the chart is frozen into a rule book.
    pub fn set(&mut self, attacking: PokemonType, defending: PokemonType, matchup: Matchup) {
        self.cells[attacking.index() * Self::SIZE + defending.index()] = matchup;
    }

    pub fn is_immune(&self, attacking: PokemonType, defending: PokemonType) -> bool {
        self.matchup(attacking, defending) == Matchup::NoEffect
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::gen1()
    }
}

impl TryFrom<Vec<Vec<Matchup>>> for TypeChart {
    type Error = TypeChartShapeError;

    fn try_from(rows: Vec<Vec<Matchup>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<TypeChart> for Vec<Vec<Matchup>> {
    fn from(chart: TypeChart) -> Self {
        chart
            .cells
            .chunks(TypeChart::SIZE)
            .map(|row| row.to_vec())
            .collect()
    }
}

fn gen1_matchup(attacking: PokemonType, defending: PokemonType) -> Matchup {
    use Matchup::{NoEffect as Zero, NotVeryEffective as Half, Normal as One, SuperEffective as Two};
    use PokemonType::*;

    match (attacking, defending) {
        // Normal
        (Normal, Ghost) => Zero,
        (Normal, Rock) => Half,
        (Normal, _) => One,

        // Fire
        (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => Half,
        (Fire, Grass) | (Fire, Ice) | (Fire, Bug) => Two,
        (Fire, _) => One,

        // Water
        (Water, Water) | (Water, Grass) | (Water, Dragon) => Half,
        (Water, Fire) | (Water, Ground) | (Water, Rock) => Two,
        (Water, _) => One,

        // Electric
        (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => Half,
        (Electric, Ground) => Zero,
        (Electric, Water) | (Electric, Flying) => Two,
        (Electric, _) => One,

        // Grass
        (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Poison)
        | (Grass, Flying)
        | (Grass, Bug)
        | (Grass, Dragon) => Half,
        (Grass, Water) | (Grass, Ground) | (Grass, Rock) => Two,
        (Grass, _) => One,

        // Ice
        (Ice, Water) | (Ice, Ice) => Half,
        (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => Two,
        (Ice, _) => One,

        // Fighting
        (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => Half,
        (Fighting, Ghost) => Zero,
        (Fighting, Normal) | (Fighting, Ice) | (Fighting, Rock) => Two,
        (Fighting, _) => One,

        // Poison
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => Half,
        (Poison, Grass) | (Poison, Bug) => Two,
        (Poison, _) => One,

        // Ground
        (Ground, Grass) | (Ground, Bug) => Half,
        (Ground, Flying) => Zero,
        (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock) => Two,
        (Ground, _) => One,

        // Flying
        (Flying, Electric) | (Flying, Rock) => Half,
        (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => Two,
        (Flying, _) => One,

        // Psychic
        (Psychic, Psychic) => Half,
        (Psychic, Fighting) | (Psychic, Poison) => Two,
        (Psychic, _) => One,

        // Bug
        (Bug, Fire) | (Bug, Fighting) | (Bug, Flying) | (Bug, Ghost) => Half,
        (Bug, Grass) | (Bug, Psychic) | (Bug, Poison) => Two,
        (Bug, _) => One,

        // Rock
        (Rock, Fighting) | (Rock, Ground) => Half,
        (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => Two,
        (Rock, _) => One,

        // Ghost
        (Ghost, Normal) | (Ghost, Psychic) => Zero,
        (Ghost, Ghost) => Two,
        (Ghost, _) => One,

        // Dragon
        (Dragon, Dragon) => Two,
        (Dragon, _) => One,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen1_chart_quirks() {
        let chart = TypeChart::gen1();
        assert_eq!(chart.matchup(PokemonType::Ghost, PokemonType::Psychic), Matchup::NoEffect);
        assert_eq!(chart.matchup(PokemonType::Bug, PokemonType::Poison), Matchup::SuperEffective);
        assert_eq!(chart.matchup(PokemonType::Poison, PokemonType::Bug), Matchup::SuperEffective);
        assert_eq!(chart.matchup(PokemonType::Ice, PokemonType::Fire), Matchup::Normal);
        assert!(chart.is_immune(PokemonType::Electric, PokemonType::Ground));
    }

    #[test]
    fn test_from_rows_rejects_non_square_input() {
        let short = vec![vec![Matchup::Normal; PokemonType::COUNT]; 3];
        assert_eq!(
            TypeChart::from_rows(short).unwrap_err(),
            TypeChartShapeError::RowCount {
                expected: PokemonType::COUNT,
                found: 3,
            }
        );

        let mut ragged = vec![vec![Matchup::Normal; PokemonType::COUNT]; PokemonType::COUNT];
        ragged[4].pop();
        let err = TypeChart::from_rows(ragged).unwrap_err();
        assert!(matches!(err, TypeChartShapeError::RowLength { row: 4, .. }));
        assert_eq!(
            err.to_string(),
            format!("type chart row 4 has {} cells, expected {}", PokemonType::COUNT - 1, PokemonType::COUNT)
        );
    }

    #[test]
    fn test_rows_round_trip_through_conversion() {
        let chart = TypeChart::gen1();
        let rows: Vec<Vec<Matchup>> = chart.clone().into();
        assert_eq!(TypeChart::from_rows(rows).unwrap(), chart);
    }

    #[test]
    fn test_set_overrides_single_cell() {
        let mut chart = TypeChart::gen1();
        chart.set(PokemonType::Ice, PokemonType::Fire, Matchup::NotVeryEffective);
        assert_eq!(chart.multiplier(PokemonType::Ice, PokemonType::Fire), 0.5);
        assert_eq!(chart.multiplier(PokemonType::Fire, PokemonType::Ice), 2.0);
    }
}
