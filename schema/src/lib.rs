// Pokemon Battle Core Schema - static rule-table definitions
// This crate holds the data shapes of every immutable table the battle core
// consumes: elemental types and their matchups, moves, species, status
// modifiers, trainer move preferences and capture devices.

pub use battle_data::*;
pub use moves::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod moves;
pub mod pokemon_types;
pub mod species_data;
