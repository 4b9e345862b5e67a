//! # shadowgov-engine
//!
//! Deterministic rules engine for a two-faction (truth vs. government)
//! card game.
//!
//! ## Design Principles
//!
//! 1. **One canonical effect form**: flat objects, mini-op arrays, JSON
//!    strings and nested conditionals all normalize into `Vec<Op>`. Nothing
//!    past the content boundary reads legacy encodings.
//!
//! 2. **Clone-then-mutate**: every transition takes `&GameState` and returns
//!    a new state. `im` persistent collections keep that cheap, and every
//!    earlier state stays a valid snapshot.
//!
//! 3. **Graduated strictness**: content validation fails hard with the card
//!    id, play legality is a recoverable `PlayCheck`, and the normalizer
//!    degrades to an empty op list with a warning.
//!
//! 4. **Reproducible**: a seeded `GameRng` drives every shuffle and random
//!    discard, so the same seed and the same actions give the same
//!    `GameState::fingerprint`.
//!
//! ## Modules
//!
//! - `core`: players, factions, RNG, configuration, actions, state
//! - `cards`: card model, registry, bundled core pool
//! - `effects`: canonical ops, normalizer, resolver
//! - `schema`: card validation and whole-state checks
//! - `regions`: region table, pressure and capture
//! - `rules`: the turn/action engine and win evaluation
//! - `reaction`: the attack/defense window and defense policies
//! - `error`: error types per layer

pub mod core;
pub mod cards;
pub mod effects;
pub mod error;
pub mod reaction;
pub mod regions;
pub mod rules;
pub mod schema;

// Re-export commonly used types
pub use crate::core::{
    Action, CardTables, Faction, GameRng, GameState, PlayKind, PlayRecord, PlayerId, PlayerMap,
    PlayerState, RulesConfig,
};

pub use crate::cards::{core_pool, Card, CardId, CardRegistry, CardType, RawCard, Rarity};

pub use crate::effects::{normalize, ApplyContext, DiscardChooser, EffectResolver, Op, SpecialRegistry, Who};

pub use crate::error::{ConfigError, ContentError, EngineError, PlayRejection, ValidationError};

pub use crate::reaction::{
    DefensePolicy, GreedyDefense, ReactionOutcome, ReactionRequest, ReactionResponse, ReactionState,
};

pub use crate::regions::{Capture, Captures, PressureBoard, RegionConfig, RegionId};

pub use crate::rules::{Engine, PlayCheck, PlayResult, PlayStatus, WinReason, WinResult};

pub use crate::schema::{assert_state, validate};
