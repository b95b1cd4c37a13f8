use serde::{Deserialize, Serialize};

const PARTY_SLOTS: usize = 6;

/// Tracks which of the player's creatures faced each opposing creature.
/// `faced[player_index][opponent_index]` is true once they were active together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleParticipationTracker {
    faced: [[bool; PARTY_SLOTS]; PARTY_SLOTS],
}

impl BattleParticipationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the two active creatures faced each other
    pub fn record_participation(&mut self, player_active: usize, opponent_active: usize) {
        if player_active < PARTY_SLOTS && opponent_active < PARTY_SLOTS {
            self.faced[player_active][opponent_active] = true;
        }
    }

    /// Party indices of the player's creatures that faced the given opposing creature
    pub fn participants_against(&self, opponent_index: usize) -> Vec<usize> {
        if opponent_index >= PARTY_SLOTS {
            return Vec::new();
        }
        (0..PARTY_SLOTS)
            .filter(|&player_index| self.faced[player_index][opponent_index])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_tracking() {
        let mut tracker = BattleParticipationTracker::new();

        tracker.record_participation(0, 1);
        tracker.record_participation(2, 1);
        tracker.record_participation(2, 0);

        assert_eq!(tracker.participants_against(1), vec![0, 2]);
        assert_eq!(tracker.participants_against(0), vec![2]);
        assert!(tracker.participants_against(5).is_empty());
        assert!(tracker.participants_against(9).is_empty());
    }
}
