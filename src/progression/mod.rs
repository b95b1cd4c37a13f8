pub mod growth;
pub mod leveling;
pub mod participation;
pub mod rewards;

pub use growth::{
    compute_statistic, experience_for_level, experience_gained, level_for_experience,
    starting_experience,
};
pub use leveling::{apply_ev_yield, apply_experience, GrowthStep};
pub use participation::BattleParticipationTracker;
pub use rewards::EvYield;
