//! The rule book: every immutable table the battle core reads.
//!
//! A `RuleBook` is built once from `RuleTables` (usually parsed from RON),
//! validated, and then only ever shared by reference or `Arc`. Nothing in the
//! engine mutates it after construction.

use crate::errors::{
    BattleEngineError, BattleResult, MoveDataError, MoveDataResult, RuleDataError,
    SpeciesDataError, SpeciesDataResult,
};
use log::debug;
use schema::{
    Ball, BattleModification, CaptureDevice, Matchup, Move, MoveData, Preference, Species,
    SpeciesData, StatusTable, TypeChart,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

const GEN1_SPECIES: &str = include_str!("../data/species.ron");
const GEN1_MOVES: &str = include_str!("../data/moves.ron");
const GEN1_MODIFICATIONS: &str = include_str!("../data/battle_modifications.ron");
const GEN1_CAPTURE_DEVICES: &str = include_str!("../data/capture_devices.ron");

/// Raw, still-editable rule tables. Freeze them with `RuleBook::new`.
#[derive(Debug, Clone)]
pub struct RuleTables {
    pub species: Vec<SpeciesData>,
    pub moves: Vec<MoveData>,
    pub type_chart: TypeChart,
    pub status_table: StatusTable,
    pub modifications: Vec<BattleModification>,
    pub capture_devices: Vec<CaptureDevice>,
    /// Move used by an AI battler with no PP left anywhere.
    pub last_resort: Option<Move>,
}

impl RuleTables {
    /// Parse the four record tables from RON text. The type chart and status
    /// table start at their Generation 1 values (see `with_type_chart_ron` and
    /// `with_status_table_ron`); no last-resort move is set.
    pub fn from_ron(
        species: &str,
        moves: &str,
        modifications: &str,
        capture_devices: &str,
    ) -> BattleResult<Self> {
        Ok(Self {
            species: parse_table("species", species)?,
            moves: parse_table("moves", moves)?,
            type_chart: TypeChart::gen1(),
            status_table: StatusTable::gen1(),
            modifications: parse_table("battle modifications", modifications)?,
            capture_devices: parse_table("capture devices", capture_devices)?,
            last_resort: None,
        })
    }

    /// The bundled Generation 1 tables.
    pub fn gen1() -> BattleResult<Self> {
        Self::from_ron(
            GEN1_SPECIES,
            GEN1_MOVES,
            GEN1_MODIFICATIONS,
            GEN1_CAPTURE_DEVICES,
        )
    }

    /// Replace the type chart with RON rows, one per attacking type in
    /// declaration order. Anything but a square matrix is rejected.
    pub fn with_type_chart_ron(mut self, source: &str) -> BattleResult<Self> {
        let rows: Vec<Vec<Matchup>> = parse_table("type chart", source)?;
        self.type_chart = TypeChart::from_rows(rows).map_err(RuleDataError::from)?;
        Ok(self)
    }

    pub fn with_status_table_ron(mut self, source: &str) -> BattleResult<Self> {
        self.status_table = parse_record("status table", source)?;
        Ok(self)
    }

    pub fn with_last_resort(mut self, move_: Move) -> Self {
        self.last_resort = Some(move_);
        self
    }
}

fn parse_table<T: DeserializeOwned>(table: &'static str, source: &str) -> BattleResult<Vec<T>> {
    parse_record(table, source)
}

fn parse_record<T: DeserializeOwned>(table: &'static str, source: &str) -> BattleResult<T> {
    ron::from_str(source).map_err(|err| {
        BattleEngineError::from(RuleDataError::Parse {
            table,
            message: err.to_string(),
        })
    })
}

#[derive(Debug)]
pub struct RuleBook {
    species: HashMap<Species, SpeciesData>,
    moves: HashMap<Move, MoveData>,
    type_chart: TypeChart,
    status_table: StatusTable,
    modifications: Vec<BattleModification>,
    capture_devices: HashMap<Ball, CaptureDevice>,
    last_resort: Option<Move>,
}

impl RuleBook {
    /// Freeze and validate a set of tables.
    pub fn new(tables: RuleTables) -> BattleResult<Self> {
        let book = Self {
            species: tables
                .species
                .into_iter()
                .map(|data| (data.species, data))
                .collect(),
            moves: tables.moves.into_iter().map(|data| (data.id, data)).collect(),
            type_chart: tables.type_chart,
            status_table: tables.status_table,
            modifications: tables.modifications,
            capture_devices: tables
                .capture_devices
                .into_iter()
                .map(|device| (device.ball, device))
                .collect(),
            last_resort: tables.last_resort,
        };
        book.validate()?;
        debug!(
            "Rule book loaded: {} species, {} moves, {} modifications, {} capture devices",
            book.species.len(),
            book.moves.len(),
            book.modifications.len(),
            book.capture_devices.len()
        );
        Ok(book)
    }

    /// The bundled Generation 1 rules, with Struggle as the last-resort move.
    pub fn gen1() -> BattleResult<Self> {
        Self::new(RuleTables::gen1()?.with_last_resort(Move::Struggle))
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Every move referenced anywhere in the tables must exist in the move table.
    fn validate(&self) -> Result<(), RuleDataError> {
        let mut species: Vec<&SpeciesData> = self.species.values().collect();
        species.sort_by_key(|data| data.species);
        for data in species {
            for move_ in data.learnset.all_moves() {
                self.require_move(&data.name, move_)?;
            }
        }
        for modification in &self.modifications {
            for preference in &modification.preferences {
                if let Preference::Move { move_, .. } = preference {
                    self.require_move(&modification.name, *move_)?;
                }
            }
        }
        if let Some(move_) = self.last_resort {
            self.require_move("last-resort slot", move_)?;
        }
        Ok(())
    }

    fn require_move(&self, owner: &str, move_: Move) -> Result<(), RuleDataError> {
        if self.moves.contains_key(&move_) {
            Ok(())
        } else {
            Err(RuleDataError::DanglingMove {
                owner: owner.to_string(),
                move_,
            })
        }
    }

    pub fn species(&self, species: Species) -> SpeciesDataResult<&SpeciesData> {
        self.species
            .get(&species)
            .ok_or(SpeciesDataError::SpeciesNotFound(species))
    }

    pub fn move_data(&self, move_: Move) -> MoveDataResult<&MoveData> {
        self.moves
            .get(&move_)
            .ok_or(MoveDataError::MoveNotFound(move_))
    }

    pub fn capture_device(&self, ball: Ball) -> Result<&CaptureDevice, RuleDataError> {
        self.capture_devices
            .get(&ball)
            .ok_or(RuleDataError::CaptureDeviceNotFound(ball))
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    pub fn status_table(&self) -> &StatusTable {
        &self.status_table
    }

    /// Modifications that apply to a trainer archetype, in table order.
    pub fn modifications_for<'a>(
        &'a self,
        archetype: &'a str,
    ) -> impl Iterator<Item = &'a BattleModification> + 'a {
        self.modifications
            .iter()
            .filter(move |modification| modification.applies_to(archetype))
    }

    pub fn last_resort(&self) -> Result<Move, RuleDataError> {
        self.last_resort.ok_or(RuleDataError::NoLastResort)
    }
}
