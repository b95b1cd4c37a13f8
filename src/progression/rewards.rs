use crate::pokemon::{GrowthValues, MAX_EV};
use schema::{BaseStats, Stat};
use strum::IntoEnumIterator;

// BST thresholds for EV yield
const BST_LOW_THRESHOLD: u16 = 300;
const BST_HIGH_THRESHOLD: u16 = 500;
const EV_YIELD_LOW: u8 = 1;
const EV_YIELD_MEDIUM: u8 = 2;
const EV_YIELD_HIGH: u8 = 3;

/// Effort values awarded to each participant when a creature faints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvYield(pub GrowthValues);

impl EvYield {
    /// Total EVs: 1 if BST < 300, 2 if 300 <= BST < 500, 3 if BST >= 500,
    /// awarded in the highest base stat(s).
    pub fn for_base_stats(base_stats: &BaseStats) -> Self {
        let total_evs = match base_stats.total() {
            0..BST_LOW_THRESHOLD => EV_YIELD_LOW,
            BST_LOW_THRESHOLD..BST_HIGH_THRESHOLD => EV_YIELD_MEDIUM,
            _ => EV_YIELD_HIGH,
        };
        let highest_stats = find_highest_base_stats(base_stats);
        distribute_evs(total_evs, &highest_stats)
    }

    pub fn total(&self) -> u16 {
        Stat::iter().map(|stat| self.0.get(stat) as u16).sum()
    }

    /// Add this yield to `evs`, capping each component.
    pub fn apply_to(&self, evs: &mut GrowthValues) {
        for stat in Stat::iter() {
            let gained = evs.get(stat).saturating_add(self.0.get(stat)).min(MAX_EV);
            evs.set(stat, gained);
        }
    }
}

/// Which base stats are tied for the highest value, in declaration order.
fn find_highest_base_stats(base_stats: &BaseStats) -> Vec<Stat> {
    let max_value = Stat::iter().map(|stat| base_stats.get(stat)).max().unwrap_or(0);
    Stat::iter()
        .filter(|stat| base_stats.get(*stat) == max_value)
        .collect()
}

/// Distribute total EVs among the highest stats.
/// Ties share evenly, with the remainder going to the first stats.
fn distribute_evs(total_evs: u8, highest_stats: &[Stat]) -> EvYield {
    let mut ev_yield = EvYield::default();
    if highest_stats.is_empty() {
        return ev_yield;
    }

    let evs_per_stat = total_evs as usize / highest_stats.len();
    let remainder = total_evs as usize % highest_stats.len();

    for (i, stat) in highest_stats.iter().enumerate() {
        let evs = evs_per_stat + if i < remainder { 1 } else { 0 };
        ev_yield.0.set(*stat, evs as u8);
    }
    ev_yield
}
