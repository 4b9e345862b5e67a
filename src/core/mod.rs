//! Core engine types: players, state, actions, RNG, configuration.
//!
//! Everything here is plain data. Transitions live in `rules` and
//! `reaction`; effect application lives in `effects`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Faction, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{CardTables, RarityRow, RulesConfig, WinThresholds};
pub use action::{Action, PlayKind, PlayRecord};
pub use state::{CostMods, GameState, PlayerState, TurnFlags, TRUTH_MAX, TRUTH_MIN};
