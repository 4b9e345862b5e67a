//! Canonical effect operations.
//!
//! Every card effect, whatever encoding it was authored in, ends up as an
//! ordered list of [`Op`]s. The serialized form of an `Op` is the tagged
//! mini-op object (`{"k":"ip","who":"opponent","v":-2}`), so a canonical list
//! written back to JSON is itself a valid legacy input.
//!
//! ## Players
//!
//! [`Who`] is either relative (`self`, `opponent`) or absolute (`P1`, `P2`).
//! Relative references are resolved against the acting player when the op is
//! applied, never during normalization.
//!
//! ## Regions
//!
//! [`RegionRef::Target`] stands for the region the play was aimed at.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;
use crate::regions::RegionId;

/// Which player an op affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Who {
    /// The acting player.
    #[serde(rename = "self")]
    Actor,
    /// The acting player's opponent.
    #[serde(rename = "opponent")]
    Opponent,
    P1,
    P2,
}

impl Who {
    /// Resolve against the acting player.
    #[must_use]
    pub fn resolve(self, actor: PlayerId) -> PlayerId {
        match self {
            Who::Actor => actor,
            Who::Opponent => actor.opponent(),
            Who::P1 => PlayerId::P1,
            Who::P2 => PlayerId::P2,
        }
    }

    /// Parse a canonical or legacy player reference.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "self" | "player" | "you" | "owner" => Some(Who::Actor),
            "opponent" | "ai" | "enemy" | "other" => Some(Who::Opponent),
            "p1" => Some(Who::P1),
            "p2" => Some(Who::P2),
            _ => None,
        }
    }
}

/// Region an op touches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionRef {
    /// The play's target region.
    Target,
    Id(RegionId),
}

impl RegionRef {
    /// Resolve against the play's target.
    #[must_use]
    pub fn resolve<'a>(&'a self, target: Option<&'a RegionId>) -> Option<&'a RegionId> {
        match self {
            RegionRef::Target => target,
            RegionRef::Id(id) => Some(id),
        }
    }
}

impl From<String> for RegionRef {
    fn from(raw: String) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case("target") {
            RegionRef::Target
        } else {
            RegionRef::Id(RegionId(raw))
        }
    }
}

impl From<RegionRef> for String {
    fn from(region: RegionRef) -> Self {
        match region {
            RegionRef::Target => "target".to_string(),
            RegionRef::Id(id) => id.0,
        }
    }
}

/// Game statistic a conditional reads, from the acting player's view.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stat {
    Truth,
    IpSelf,
    IpOpponent,
    ZonesControlled,
    Round,
    /// Unrecognized name; always reads as 0.
    Other(String),
}

impl From<String> for Stat {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "truth" => Stat::Truth,
            "ipSelf" => Stat::IpSelf,
            "ipOpponent" => Stat::IpOpponent,
            "zonesControlled" => Stat::ZonesControlled,
            "round" => Stat::Round,
            _ => Stat::Other(raw),
        }
    }
}

impl From<Stat> for String {
    fn from(stat: Stat) -> Self {
        match stat {
            Stat::Truth => "truth".to_string(),
            Stat::IpSelf => "ipSelf".to_string(),
            Stat::IpOpponent => "ipOpponent".to_string(),
            Stat::ZonesControlled => "zonesControlled".to_string(),
            Stat::Round => "round".to_string(),
            Stat::Other(name) => name,
        }
    }
}

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cmp {
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl Cmp {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            ">=" => Some(Cmp::Ge),
            "<=" => Some(Cmp::Le),
            ">" => Some(Cmp::Gt),
            "<" => Some(Cmp::Lt),
            "==" | "===" | "=" => Some(Cmp::Eq),
            "!=" | "!==" => Some(Cmp::Ne),
            _ => None,
        }
    }

    #[must_use]
    pub fn eval(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Cmp::Ge => lhs >= rhs,
            Cmp::Le => lhs <= rhs,
            Cmp::Gt => lhs > rhs,
            Cmp::Lt => lhs < rhs,
            Cmp::Eq => lhs == rhs,
            Cmp::Ne => lhs != rhs,
        }
    }
}

/// `stat op value`, e.g. `truth >= 60`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub stat: Stat,
    pub op: Cmp,
    pub value: i32,
}

/// Persistent player modifier touched by a `modifier` op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModStat {
    /// Passive income per turn.
    Income,
    /// Added to MEDIA card costs.
    MediaCost,
    /// Added to ZONE card costs.
    ZoneCost,
    /// Added to the defense of regions the player owns.
    ZoneDefense,
}

/// A canonical effect operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "k", rename_all = "camelCase")]
pub enum Op {
    /// Move the global truth meter (clamped to 0..=100).
    Truth { v: i32 },
    /// Change a player's IP (floored at 0).
    Ip { who: Who, v: i32 },
    /// Draw cards.
    Draw { who: Who, n: i32 },
    /// Discard cards chosen uniformly at random.
    DiscardRandom { who: Who, n: i32 },
    /// Discard cards chosen by the affected player.
    DiscardChoice { who: Who, n: i32 },
    /// Add pressure to a region.
    Pressure { who: Who, state: RegionRef, v: i32 },
    /// Move a region's capture threshold (floored at 1).
    Defense { state: RegionRef, v: i32 },
    /// Put a registered card into a player's hand.
    AddCard {
        who: Who,
        #[serde(rename = "cardId")]
        card_id: CardId,
    },
    /// Set a named flag. `immune` and `blockAttack` are turn-scoped player
    /// flags; anything else is a game-wide flag.
    Flag { name: String, on: bool },
    /// Adjust a persistent player modifier.
    Modifier { who: Who, stat: ModStat, v: i32 },
    /// Branch on a game statistic.
    Conditional {
        #[serde(rename = "if")]
        predicate: Predicate,
        then: Vec<Op>,
        #[serde(rename = "else", default, skip_serializing_if = "Vec::is_empty")]
        otherwise: Vec<Op>,
    },
    /// Named hook resolved through the special registry.
    Special {
        #[serde(rename = "fn")]
        name: String,
    },
}

impl Op {
    /// Tag name as written in the `k` field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Truth { .. } => "truth",
            Op::Ip { .. } => "ip",
            Op::Draw { .. } => "draw",
            Op::DiscardRandom { .. } => "discardRandom",
            Op::DiscardChoice { .. } => "discardChoice",
            Op::Pressure { .. } => "pressure",
            Op::Defense { .. } => "defense",
            Op::AddCard { .. } => "addCard",
            Op::Flag { .. } => "flag",
            Op::Modifier { .. } => "modifier",
            Op::Conditional { .. } => "conditional",
            Op::Special { .. } => "special",
        }
    }

    /// Copy with every numeric magnitude multiplied by `factor` and rounded
    /// half up. Conditional branches are scaled too.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Op {
        let s = |x: i32| round_half_up(f64::from(x) * factor);
        match self {
            Op::Truth { v } => Op::Truth { v: s(*v) },
            Op::Ip { who, v } => Op::Ip { who: *who, v: s(*v) },
            Op::Draw { who, n } => Op::Draw { who: *who, n: s(*n) },
            Op::DiscardRandom { who, n } => Op::DiscardRandom { who: *who, n: s(*n) },
            Op::DiscardChoice { who, n } => Op::DiscardChoice { who: *who, n: s(*n) },
            Op::Pressure { who, state, v } => Op::Pressure {
                who: *who,
                state: state.clone(),
                v: s(*v),
            },
            Op::Defense { state, v } => Op::Defense {
                state: state.clone(),
                v: s(*v),
            },
            Op::Modifier { who, stat, v } => Op::Modifier {
                who: *who,
                stat: *stat,
                v: s(*v),
            },
            Op::Conditional {
                predicate,
                then,
                otherwise,
            } => Op::Conditional {
                predicate: predicate.clone(),
                then: then.iter().map(|op| op.scaled(factor)).collect(),
                otherwise: otherwise.iter().map(|op| op.scaled(factor)).collect(),
            },
            Op::AddCard { .. } | Op::Flag { .. } | Op::Special { .. } => self.clone(),
        }
    }
}

/// Round to nearest, ties toward positive infinity.
#[must_use]
pub fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}
