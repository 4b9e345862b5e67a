//! Error types, one per layer.
//!
//! - [`ValidationError`]: strict content checks, always qualified by card id.
//! - [`PlayRejection`]: recoverable legality failures, returned inside
//!   `PlayCheck` rather than raised.
//! - [`EngineError`]: failures of engine transitions (bad input, invariant
//!   breaches, wrong reaction phase).
//! - [`ContentError`] / [`ConfigError`]: JSON loading.

use thiserror::Error;

use crate::cards::{CardId, CardType, Rarity};
use crate::core::PlayerId;
use crate::regions::RegionId;

/// What was wrong with a card.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("id is empty")]
    EmptyId,

    #[error("name is empty")]
    EmptyName,

    #[error("id must start with {expected}")]
    BadPrefix { expected: &'static str },

    #[error("cost {actual} does not match table cost {expected} for {card_type} {rarity}")]
    CostMismatch {
        card_type: CardType,
        rarity: Rarity,
        expected: i32,
        actual: i32,
    },

    #[error("{card_type} cards may not carry a {op} effect")]
    ForbiddenOp { card_type: CardType, op: &'static str },

    #[error("{card_type} cards need exactly one {op} effect, found {found}")]
    OpCount {
        card_type: CardType,
        op: &'static str,
        found: usize,
    },

    #[error("magnitude {actual} does not match table magnitude {expected}")]
    MagnitudeMismatch { expected: i32, actual: i32 },

    #[error("ATTACK damage must target the opponent as an IP loss")]
    AttackShape,

    #[error("ZONE pressure must be positive, owned by the player and aimed at the target")]
    ZoneShape,

    #[error("opponent discard {n} is outside 0..=2")]
    DiscardRange { n: i32 },

    #[error("{rarity} ATTACK cards may not discard {n}")]
    DiscardRarity { rarity: Rarity, n: i32 },

    #[error("reduce factor {0} is outside [0, 1]")]
    ReduceFactor(f64),
}

/// Strict validation failure, qualified by the offending card's id.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("card {card_id}: {issue}")]
pub struct ValidationError {
    pub card_id: CardId,
    pub issue: ValidationIssue,
}

impl ValidationError {
    pub fn new(card_id: impl Into<CardId>, issue: ValidationIssue) -> Self {
        Self {
            card_id: card_id.into(),
            issue,
        }
    }
}

/// Why a play is not legal right now.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayRejection {
    #[error("card failed validation: {0}")]
    InvalidCard(ValidationError),

    #[error("card {0} is not in hand")]
    NotInHand(CardId),

    #[error("play limit of {limit} reached")]
    PlayLimit { limit: u32 },

    #[error("needs {cost} IP, has {available}")]
    InsufficientIp { cost: i32, available: i32 },

    #[error("card belongs to the other faction")]
    WrongFaction,

    #[error("ZONE cards need a target region")]
    MissingTarget,

    #[error("unknown target region {0}")]
    UnknownTarget(RegionId),

    #[error("a reaction window is open")]
    ReactionPending,

    #[error("DEFENSIVE cards can only be played as a reaction")]
    ReactionOnly,
}

/// Errors raised by engine transitions.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("play rejected: {0}")]
    Rejected(PlayRejection),

    #[error("card {card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: CardId },

    #[error("a reaction window is open and must be answered first")]
    ReactionPending,

    #[error("no reaction window is open")]
    NoReactionOpen,

    #[error("state invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<PlayRejection> for EngineError {
    fn from(rejection: PlayRejection) -> Self {
        EngineError::Rejected(rejection)
    }
}

/// Card content could not be loaded.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("card content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("duplicate card id {0}")]
    Duplicate(CardId),
}

/// Rules configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rules config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rules config: {0}")]
    Invalid(String),
}
