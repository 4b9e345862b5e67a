//! Choosing a defense.
//!
//! The automated defender's choice is a replaceable [`DefensePolicy`]; the
//! window itself only ever sees a [`ReactionResponder`].

use std::time::Duration;

use super::{defense_options, ReactionRequest, ReactionResponse};
use crate::cards::{Card, CardId};
use crate::core::GameState;
use crate::effects::{Op, Who};

/// Picks a defensive card (or none) for an open request.
pub trait DefensePolicy: Send + Sync {
    fn choose(&self, state: &GameState, request: &ReactionRequest) -> Option<CardId>;
}

/// Scores every affordable DEFENSIVE card and plays the best.
///
/// Flags (`immune`, `blockAttack`) dominate, then disruption of the
/// attacker (discards, IP loss), then the defender's own IP gain. Ties go
/// to the cheaper card, then to hand order.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyDefense;

impl GreedyDefense {
    fn score(card: &Card) -> i32 {
        // Without the partialBlock tag a defense stops the whole attack.
        let mut blocks = i32::from(!card.is_partial_block());
        let mut disruption: i32 = 0;
        let mut gain: i32 = 0;
        for op in &card.effects {
            match op {
                Op::Flag { name, on: true } if name == "immune" || name == "blockAttack" => blocks += 1,
                Op::DiscardRandom { who: Who::Opponent, n } | Op::DiscardChoice { who: Who::Opponent, n } => {
                    disruption = disruption.saturating_add(*n);
                }
                Op::Ip { who: Who::Opponent, v } if *v < 0 => disruption = disruption.saturating_sub(*v),
                Op::Ip { who: Who::Actor, v } => gain = gain.saturating_add(*v),
                _ => {}
            }
        }
        blocks
            .saturating_mul(100)
            .saturating_add(disruption.saturating_mul(10))
            .saturating_add(gain)
    }
}

impl DefensePolicy for GreedyDefense {
    fn choose(&self, state: &GameState, request: &ReactionRequest) -> Option<CardId> {
        let mut best: Option<(&Card, i32)> = None;
        for card in defense_options(state, request.defender) {
            let score = Self::score(card);
            let better = match best {
                None => true,
                Some((held, held_score)) => score > held_score || (score == held_score && card.cost < held.cost),
            };
            if better {
                best = Some((card, score));
            }
        }
        best.map(|(card, _)| card.id.clone())
    }
}

/// Never plays a defense.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverDefend;

impl DefensePolicy for NeverDefend {
    fn choose(&self, _state: &GameState, _request: &ReactionRequest) -> Option<CardId> {
        None
    }
}

/// Whoever answers a reaction window: a UI prompt, a network peer, a bot.
///
/// Returning `None` means no answer arrived within `window`.
pub trait ReactionResponder {
    fn respond(&mut self, state: &GameState, request: &ReactionRequest, window: Duration)
        -> Option<ReactionResponse>;
}

impl<F> ReactionResponder for F
where
    F: FnMut(&GameState, &ReactionRequest, Duration) -> Option<ReactionResponse>,
{
    fn respond(&mut self, state: &GameState, request: &ReactionRequest, window: Duration) -> Option<ReactionResponse> {
        self(state, request, window)
    }
}

/// Answers immediately with a policy's choice.
#[derive(Clone, Debug, Default)]
pub struct PolicyResponder<P> {
    policy: P,
}

impl<P: DefensePolicy> PolicyResponder<P> {
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self { policy }
    }
}

impl<P: DefensePolicy> ReactionResponder for PolicyResponder<P> {
    fn respond(&mut self, state: &GameState, request: &ReactionRequest, _window: Duration) -> Option<ReactionResponse> {
        Some(match self.policy.choose(state, request) {
            Some(card) => ReactionResponse::Defend(card),
            None => ReactionResponse::Decline,
        })
    }
}
