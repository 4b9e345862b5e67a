//! Reaction subsystem: the attack/defense window.
//!
//! When the active player plays a harmful card (any ATTACK, or a MEDIA card
//! pushing truth toward its owner's goal) and the defender holds an
//! affordable DEFENSIVE card, the engine parks the play in
//! [`ReactionState::WindowOpen`] and hands a [`ReactionRequest`] back to the
//! caller. Nothing else can happen until the defender answers through
//! `Engine::respond` (or `respond_within` / `await_reaction`).
//!
//! ## Phases
//!
//! `Idle → WindowOpen → Resolving → Idle`
//!
//! ## Outcomes
//!
//! - no defense: [`ReactionOutcome::FullHit`]
//! - defense without the `partialBlock` tag: [`ReactionOutcome::BlockAll`]
//! - defense with it: [`ReactionOutcome::Reduce`], every numeric magnitude
//!   of the attack scaled by the factor (a factor of 0 blocks everything)
//!
//! A missed window counts as a declined defense.
//!
//! ## Example Usage
//!
//! ```
//! use shadowgov_engine::cards::{Card, CardType, Rarity};
//! use shadowgov_engine::core::Faction;
//! use shadowgov_engine::reaction::{compute_outcome, ReactionOutcome};
//!
//! let shield = Card::new("GV-D1", "Stonewall", CardType::Defensive, Faction::Government, Rarity::Common, 2);
//! assert_eq!(compute_outcome(Some(&shield), 0.5), ReactionOutcome::BlockAll);
//! assert_eq!(compute_outcome(None, 0.5), ReactionOutcome::FullHit);
//! ```

mod policy;
mod window;

pub use policy::{DefensePolicy, GreedyDefense, NeverDefend, PolicyResponder, ReactionResponder};
pub use window::ReactionResult;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardType};
use crate::core::{Faction, GameState, PlayerId};
use crate::effects::Op;
use crate::regions::RegionId;

/// A harmful play waiting for the defender's answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionRequest {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    /// The attack card, already paid for and out of the attacker's hand.
    pub card: Card,
    pub target: Option<RegionId>,
    /// Nominal answer window in milliseconds.
    pub window_ms: u64,
}

/// Reaction window phase.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ReactionState {
    #[default]
    Idle,
    WindowOpen(ReactionRequest),
    Resolving,
}

impl ReactionState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, ReactionState::WindowOpen(_))
    }

    /// The pending request, if a window is open.
    #[must_use]
    pub fn request(&self) -> Option<&ReactionRequest> {
        match self {
            ReactionState::WindowOpen(request) => Some(request),
            _ => None,
        }
    }
}

/// The defender's answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionResponse {
    /// Take the hit.
    Decline,
    /// Play this DEFENSIVE card from hand.
    Defend(CardId),
    /// No answer arrived within the window.
    TimedOut,
}

/// How much of the attack lands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReactionOutcome {
    FullHit,
    BlockAll,
    /// Attack magnitudes scaled by this factor, in (0, 1].
    Reduce(f64),
}

/// Outcome for an (already accepted) defensive card.
#[must_use]
pub fn compute_outcome(defense: Option<&Card>, default_factor: f64) -> ReactionOutcome {
    let Some(card) = defense else {
        return ReactionOutcome::FullHit;
    };
    if !card.is_partial_block() {
        return ReactionOutcome::BlockAll;
    }
    let factor = card.reduce_factor.unwrap_or(default_factor).clamp(0.0, 1.0);
    if factor <= 0.0 {
        ReactionOutcome::BlockAll
    } else {
        ReactionOutcome::Reduce(factor)
    }
}

/// Whether a card played by `owner` opens a reaction window.
#[must_use]
pub fn is_reactive(card: &Card, owner: Faction) -> bool {
    match card.card_type {
        CardType::Attack => true,
        CardType::Media => {
            let push: i32 = card
                .effects
                .iter()
                .map(|op| match op {
                    Op::Truth { v } => *v,
                    _ => 0,
                })
                .sum();
            push * owner.truth_direction() > 0
        }
        CardType::Zone | CardType::Defensive => false,
    }
}

/// DEFENSIVE cards in the defender's hand they can pay for.
#[must_use]
pub fn defense_options(state: &GameState, defender: PlayerId) -> Vec<&Card> {
    let seat = &state.players[defender];
    seat.hand
        .iter()
        .filter(|card| card.card_type == CardType::Defensive && seat.can_afford(card))
        .collect()
}
