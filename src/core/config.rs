//! Rules configuration.
//!
//! Everything numeric about the rules lives here so content tooling and the
//! live engine share one definition:
//! - `CardTables`: cost and effect-magnitude lookup keyed by (type, rarity)
//! - `WinThresholds`: terminal conditions
//! - `RulesConfig`: turn structure, reaction window, region map
//!
//! Configs deserialize from camelCase JSON with every field optional:
//!
//! ```
//! use shadowgov_engine::core::RulesConfig;
//!
//! let config = RulesConfig::from_json(r#"{ "handLimit": 6 }"#).unwrap();
//! assert_eq!(config.hand_limit, 6);
//! assert_eq!(config.base_income, 5);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Faction;
use crate::cards::{CardType, Rarity};
use crate::error::ConfigError;
use crate::regions::{default_regions, RegionConfig};

/// One value per rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityRow {
    pub common: i32,
    pub uncommon: i32,
    pub rare: i32,
    pub legendary: i32,
}

impl RarityRow {
    #[must_use]
    pub const fn new(common: i32, uncommon: i32, rare: i32, legendary: i32) -> Self {
        Self {
            common,
            uncommon,
            rare,
            legendary,
        }
    }

    #[must_use]
    pub fn get(&self, rarity: Rarity) -> i32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn set(&mut self, rarity: Rarity, value: i32) {
        match rarity {
            Rarity::Common => self.common = value,
            Rarity::Uncommon => self.uncommon = value,
            Rarity::Rare => self.rare = value,
            Rarity::Legendary => self.legendary = value,
        }
    }
}

/// Cost and magnitude lookup tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardTables {
    pub attack_cost: RarityRow,
    pub media_cost: RarityRow,
    pub zone_cost: RarityRow,
    pub defensive_cost: RarityRow,
    /// IP the opponent loses to an ATTACK.
    pub attack_damage: RarityRow,
    /// Absolute truth movement of a MEDIA card.
    pub media_truth: RarityRow,
    /// Pressure a ZONE card adds.
    pub zone_pressure: RarityRow,
}

impl Default for CardTables {
    fn default() -> Self {
        Self {
            attack_cost: RarityRow::new(2, 3, 4, 5),
            media_cost: RarityRow::new(3, 4, 5, 6),
            zone_cost: RarityRow::new(4, 5, 6, 7),
            defensive_cost: RarityRow::new(2, 3, 4, 5),
            attack_damage: RarityRow::new(1, 2, 3, 4),
            media_truth: RarityRow::new(1, 2, 3, 4),
            zone_pressure: RarityRow::new(1, 2, 3, 4),
        }
    }
}

impl CardTables {
    /// Table cost for a card type and rarity.
    #[must_use]
    pub fn cost(&self, card_type: CardType, rarity: Rarity) -> i32 {
        match card_type {
            CardType::Attack => self.attack_cost.get(rarity),
            CardType::Media => self.media_cost.get(rarity),
            CardType::Zone => self.zone_cost.get(rarity),
            CardType::Defensive => self.defensive_cost.get(rarity),
        }
    }

    /// Required effect magnitude. DEFENSIVE cards have none.
    #[must_use]
    pub fn magnitude(&self, card_type: CardType, rarity: Rarity) -> Option<i32> {
        match card_type {
            CardType::Attack => Some(self.attack_damage.get(rarity)),
            CardType::Media => Some(self.media_truth.get(rarity)),
            CardType::Zone => Some(self.zone_pressure.get(rarity)),
            CardType::Defensive => None,
        }
    }

    /// Override one cost entry.
    #[must_use]
    pub fn with_cost(mut self, card_type: CardType, rarity: Rarity, cost: i32) -> Self {
        let row = match card_type {
            CardType::Attack => &mut self.attack_cost,
            CardType::Media => &mut self.media_cost,
            CardType::Zone => &mut self.zone_cost,
            CardType::Defensive => &mut self.defensive_cost,
        };
        row.set(rarity, cost);
        self
    }

    /// Override one magnitude entry. Ignored for DEFENSIVE.
    #[must_use]
    pub fn with_magnitude(mut self, card_type: CardType, rarity: Rarity, magnitude: i32) -> Self {
        let row = match card_type {
            CardType::Attack => &mut self.attack_damage,
            CardType::Media => &mut self.media_truth,
            CardType::Zone => &mut self.zone_pressure,
            CardType::Defensive => return self,
        };
        row.set(rarity, magnitude);
        self
    }
}

/// Terminal conditions, checked in order: states, truth, IP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WinThresholds {
    /// Regions a player must own.
    pub states: usize,
    /// Truth at or above this wins for the truth faction.
    pub truth_high: i32,
    /// Truth at or below this wins for the government faction.
    pub truth_low: i32,
    /// IP a player must hold.
    pub ip: i32,
}

impl Default for WinThresholds {
    fn default() -> Self {
        Self {
            states: 10,
            truth_high: 95,
            truth_low: 5,
            ip: 300,
        }
    }
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    /// Cards drawn up to at turn start.
    pub hand_limit: usize,

    /// Hard cap for effect draws; overflow goes to the discard pile.
    pub effect_draw_cap: usize,

    /// IP gained every turn before region and passive income.
    pub base_income: i32,

    /// Plays allowed per turn.
    pub max_plays_per_turn: u32,

    /// IP cost of every end-of-turn discard after the first.
    pub extra_discard_cost: i32,

    /// Truth meter at game start.
    pub starting_truth: i32,

    /// IP each player starts with.
    pub starting_ip: i32,

    /// Faction seated as P1.
    pub first_faction: Faction,

    /// Nominal reaction window length in milliseconds.
    pub reaction_window_ms: u64,

    /// Reduction factor used when a partial block names none.
    pub default_reduce_factor: f64,

    pub win: WinThresholds,

    pub tables: CardTables,

    pub regions: Vec<RegionConfig>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_limit: 5,
            effect_draw_cap: 7,
            base_income: 5,
            max_plays_per_turn: 3,
            extra_discard_cost: 1,
            starting_truth: 50,
            starting_ip: 0,
            first_faction: Faction::Truth,
            reaction_window_ms: 4000,
            default_reduce_factor: 0.5,
            win: WinThresholds::default(),
            tables: CardTables::default(),
            regions: default_regions(),
        }
    }
}

impl RulesConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (partial) camelCase JSON config and check it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reject configs the engine cannot run with.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::Invalid("region table is empty".into()));
        }
        if !(0..=100).contains(&self.starting_truth) {
            return Err(ConfigError::Invalid(format!(
                "starting truth {} outside 0..=100",
                self.starting_truth
            )));
        }
        if !(0.0..=1.0).contains(&self.default_reduce_factor) {
            return Err(ConfigError::Invalid(format!(
                "default reduce factor {} outside [0, 1]",
                self.default_reduce_factor
            )));
        }
        if self.starting_ip < 0 {
            return Err(ConfigError::Invalid("starting IP is negative".into()));
        }
        Ok(())
    }

    /// Reaction window as a duration.
    #[must_use]
    pub fn reaction_window(&self) -> Duration {
        Duration::from_millis(self.reaction_window_ms)
    }

    // === Builders ===

    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    #[must_use]
    pub fn with_base_income(mut self, income: i32) -> Self {
        self.base_income = income;
        self
    }

    #[must_use]
    pub fn with_max_plays(mut self, plays: u32) -> Self {
        self.max_plays_per_turn = plays;
        self
    }

    #[must_use]
    pub fn with_extra_discard_cost(mut self, cost: i32) -> Self {
        self.extra_discard_cost = cost;
        self
    }

    #[must_use]
    pub fn with_starting_ip(mut self, ip: i32) -> Self {
        self.starting_ip = ip;
        self
    }

    #[must_use]
    pub fn with_starting_truth(mut self, truth: i32) -> Self {
        self.starting_truth = truth;
        self
    }

    #[must_use]
    pub fn with_first_faction(mut self, faction: Faction) -> Self {
        self.first_faction = faction;
        self
    }

    #[must_use]
    pub fn with_reaction_window(mut self, window: Duration) -> Self {
        self.reaction_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_tables(mut self, tables: CardTables) -> Self {
        self.tables = tables;
        self
    }

    #[must_use]
    pub fn with_win(mut self, win: WinThresholds) -> Self {
        self.win = win;
        self
    }

    #[must_use]
    pub fn with_regions(mut self, regions: Vec<RegionConfig>) -> Self {
        self.regions = regions;
        self
    }
}
