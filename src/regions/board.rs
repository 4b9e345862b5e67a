//! Pressure board and atomic capture.
//!
//! Pressure only rises through ZONE plays. The moment a player's pressure on
//! a region meets the effective defense (base defense plus the current
//! owner's zone-defense bonus), both players' pressure on that region drops
//! to zero and ownership moves to that player in a single step.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::{RegionConfig, RegionId};
use crate::core::{GameState, PlayerId, PlayerMap};

/// Minimum capture threshold after defense adjustments.
pub const MIN_DEFENSE: i32 = 1;

/// Captures from a single resolution; rarely more than one.
pub type Captures = SmallVec<[Capture; 2]>;

/// An ownership transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub region: RegionId,
    pub by: PlayerId,
    /// Previous owner, if any.
    pub from: Option<PlayerId>,
}

/// Pressure per region per player, and each region's live defense.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureBoard {
    pressure: OrdMap<RegionId, PlayerMap<i32>>,
    defense: OrdMap<RegionId, i32>,
}

impl PressureBoard {
    /// Every region at zero pressure with its base defense.
    #[must_use]
    pub fn new(regions: &[RegionConfig]) -> Self {
        let mut board = Self::default();
        for region in regions {
            board
                .pressure
                .insert(region.id.clone(), PlayerMap::with_value(0));
            board
                .defense
                .insert(region.id.clone(), region.defense.max(MIN_DEFENSE));
        }
        board
    }

    #[must_use]
    pub fn contains(&self, region: &RegionId) -> bool {
        self.defense.contains_key(region)
    }

    /// All region ids in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionId> {
        self.defense.keys()
    }

    /// Current pressure, 0 for unknown regions.
    #[must_use]
    pub fn pressure(&self, region: &RegionId, player: PlayerId) -> i32 {
        self.pressure
            .get(region)
            .map_or(0, |per_player| per_player[player])
    }

    /// Both players' pressure on a region.
    #[must_use]
    pub fn pressure_pair(&self, region: &RegionId) -> Option<&PlayerMap<i32>> {
        self.pressure.get(region)
    }

    /// Base capture threshold (without owner bonus).
    #[must_use]
    pub fn defense(&self, region: &RegionId) -> Option<i32> {
        self.defense.get(region).copied()
    }

    /// Iterate `(region, pressure)` pairs.
    pub fn iter_pressure(&self) -> impl Iterator<Item = (&RegionId, &PlayerMap<i32>)> {
        self.pressure.iter()
    }

    /// Add pressure (result floored at 0). Returns `Some(true)` when the new
    /// value reaches `threshold`, in which case both pressures are reset.
    /// Returns `None` for unknown regions.
    pub fn add(
        &mut self,
        region: &RegionId,
        player: PlayerId,
        v: i32,
        threshold: i32,
    ) -> Option<bool> {
        let per_player = self.pressure.get_mut(region)?;
        let next = per_player[player].saturating_add(v).max(0);
        per_player[player] = next;

        if v > 0 && next >= threshold {
            *per_player = PlayerMap::with_value(0);
            Some(true)
        } else {
            Some(false)
        }
    }

    /// Move a region's defense by `v`, floored at [`MIN_DEFENSE`].
    pub fn adjust_defense(&mut self, region: &RegionId, v: i32) -> Option<i32> {
        let defense = self.defense.get_mut(region)?;
        *defense = defense.saturating_add(v).max(MIN_DEFENSE);
        Some(*defense)
    }
}

impl GameState {
    /// Current owner of a region.
    #[must_use]
    pub fn region_owner(&self, region: &RegionId) -> Option<PlayerId> {
        PlayerId::all().find(|&p| self.players[p].states.contains(region))
    }

    /// Capture threshold including the owner's zone-defense bonus.
    #[must_use]
    pub fn effective_defense(&self, region: &RegionId) -> Option<i32> {
        let base = self.regions.defense(region)?;
        let bonus = self
            .region_owner(region)
            .map_or(0, |owner| self.players[owner].zone_defense_bonus);
        Some(base.saturating_add(bonus).max(MIN_DEFENSE))
    }

    /// Add pressure for `player` and capture atomically when the threshold
    /// is met.
    pub fn add_pressure(&mut self, region: &RegionId, player: PlayerId, v: i32) -> Option<Capture> {
        let Some(threshold) = self.effective_defense(region) else {
            warn!(%region, "pressure on unknown region ignored");
            return None;
        };

        let previous = self.region_owner(region);
        if !self.regions.add(region, player, v, threshold)? {
            return None;
        }
        if previous == Some(player) {
            debug!(%region, owner = %player, "pressure reset on owned region");
            return None;
        }

        if let Some(loser) = previous {
            self.players[loser].states.remove(region);
        }
        self.players[player].states.insert(region.clone());
        self.captured_this_turn.push_back(region.clone());
        info!(%region, by = %player, ?previous, "region captured");

        Some(Capture {
            region: region.clone(),
            by: player,
            from: previous,
        })
    }
}
