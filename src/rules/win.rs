//! Terminal conditions.
//!
//! Checked in a fixed priority, first match wins:
//! 1. region count (`win.states`)
//! 2. truth extremes (high favors the truth faction, low the government)
//! 3. IP (`win.ip`)
//!
//! Within a tier P1 is checked before P2.

use serde::{Deserialize, Serialize};

use crate::core::{Faction, GameState, PlayerId, WinThresholds};

/// Which condition ended the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinReason {
    States,
    Truth,
    Ip,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub winner: PlayerId,
    pub faction: Faction,
    pub reason: WinReason,
}

impl WinResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Evaluate the win conditions against a state.
#[must_use]
pub fn check(state: &GameState, win: &WinThresholds) -> Option<WinResult> {
    let result = |winner: PlayerId, reason| WinResult {
        winner,
        faction: state.players[winner].faction,
        reason,
    };

    if let Some(p) = PlayerId::all().find(|&p| state.players[p].states.len() >= win.states) {
        return Some(result(p, WinReason::States));
    }

    if state.truth >= win.truth_high {
        return Some(result(state.seat_of(Faction::Truth), WinReason::Truth));
    }
    if state.truth <= win.truth_low {
        return Some(result(state.seat_of(Faction::Government), WinReason::Truth));
    }

    PlayerId::all()
        .find(|&p| state.players[p].ip >= win.ip)
        .map(|p| result(p, WinReason::Ip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;
    use crate::regions::RegionId;

    fn state() -> GameState {
        GameState::new(&RulesConfig::default(), vec![], vec![], 1)
    }

    fn give_regions(state: &mut GameState, player: PlayerId, count: usize) {
        let ids: Vec<RegionId> = state.regions.regions().take(count).cloned().collect();
        state.players[player].states.extend(ids);
    }

    #[test]
    fn test_no_winner_at_start() {
        assert_eq!(check(&state(), &WinThresholds::default()), None);
    }

    #[test]
    fn test_states_beat_truth() {
        let mut state = state();
        give_regions(&mut state, PlayerId::P2, 10);
        state.truth = 95;

        let result = check(&state, &WinThresholds::default()).unwrap();
        assert_eq!(result.reason, WinReason::States);
        assert!(result.is_winner(PlayerId::P2));
        assert_eq!(result.faction, Faction::Government);
    }

    #[test]
    fn test_truth_extremes() {
        let mut state = state();
        state.truth = 95;
        let high = check(&state, &WinThresholds::default()).unwrap();
        assert_eq!((high.faction, high.reason), (Faction::Truth, WinReason::Truth));

        state.truth = 5;
        let low = check(&state, &WinThresholds::default()).unwrap();
        assert_eq!((low.faction, low.reason), (Faction::Government, WinReason::Truth));

        state.truth = 94;
        assert_eq!(check(&state, &WinThresholds::default()), None);
    }

    #[test]
    fn test_truth_beats_ip_and_p1_first() {
        let mut state = state();
        state.players[PlayerId::P1].ip = 300;
        state.players[PlayerId::P2].ip = 400;
        assert_eq!(
            check(&state, &WinThresholds::default()).map(|r| (r.winner, r.reason)),
            Some((PlayerId::P1, WinReason::Ip))
        );

        state.truth = 3;
        assert_eq!(
            check(&state, &WinThresholds::default()).map(|r| (r.winner, r.reason)),
            Some((PlayerId::P2, WinReason::Truth))
        );
    }
}
