//! Answering an open reaction window.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::{compute_outcome, ReactionOutcome, ReactionRequest, ReactionResponder, ReactionResponse, ReactionState};
use crate::cards::{Card, CardId, CardType};
use crate::core::{GameState, PlayKind, PlayerId};
use crate::effects::Op;
use crate::error::EngineError;
use crate::regions::Captures;
use crate::rules::Engine;
use crate::schema::assert_state;

/// State after a reaction window closes.
#[derive(Clone, Debug)]
pub struct ReactionResult {
    pub state: GameState,
    pub outcome: ReactionOutcome,
    /// The defensive card that was played, if one was accepted.
    pub defense: Option<CardId>,
    pub captures: Captures,
}

impl Engine {
    /// Close the open window with the defender's answer.
    ///
    /// A `Defend` naming a card that is missing, not DEFENSIVE or
    /// unaffordable is ignored and the attack lands in full.
    pub fn respond(&self, state: &GameState, response: ReactionResponse) -> Result<ReactionResult, EngineError> {
        let request = state.reaction.request().cloned().ok_or(EngineError::NoReactionOpen)?;

        let mut next = state.clone();
        next.reaction = ReactionState::Resolving;
        let defender = request.defender;

        let defense = match &response {
            ReactionResponse::Defend(id) => take_defense(&mut next, defender, id),
            ReactionResponse::Decline | ReactionResponse::TimedOut => None,
        };

        let mut outcome = compute_outcome(defense.as_ref(), self.config().default_reduce_factor);
        if let Some(card) = &defense {
            self.resolve_in_place(&mut next, defender, &card.effects, None);
            next.players[defender].discard.push_back(card.clone());
        }
        if outcome != ReactionOutcome::BlockAll && next.turn_flags[defender].blocks(request.card.card_type) {
            outcome = ReactionOutcome::BlockAll;
        }

        let ReactionRequest {
            attacker,
            card: attack,
            target,
            ..
        } = request;
        let captures = match outcome {
            ReactionOutcome::FullHit => self.resolve_in_place(&mut next, attacker, &attack.effects, target.as_ref()),
            ReactionOutcome::Reduce(factor) => {
                let scaled: Vec<Op> = attack.effects.iter().map(|op| op.scaled(factor)).collect();
                self.resolve_in_place(&mut next, attacker, &scaled, target.as_ref())
            }
            ReactionOutcome::BlockAll => Captures::new(),
        };
        info!(
            attack = %attack.id,
            defense = ?defense.as_ref().map(|c| &c.id),
            ?outcome,
            "reaction resolved"
        );
        next.players[attacker].discard.push_back(attack);
        next.reaction = ReactionState::Idle;

        assert_state(&next, &self.config().tables)?;
        Ok(ReactionResult {
            state: next,
            outcome,
            defense: defense.map(|card| card.id),
            captures,
        })
    }

    /// Like [`respond`](Self::respond), but an answer that arrives after the
    /// window has closed counts as [`ReactionResponse::TimedOut`].
    pub fn respond_within(
        &self,
        state: &GameState,
        response: ReactionResponse,
        elapsed: Duration,
    ) -> Result<ReactionResult, EngineError> {
        let window = state
            .reaction
            .request()
            .map_or_else(|| self.config().reaction_window(), |r| Duration::from_millis(r.window_ms));
        if elapsed > window {
            debug!(?elapsed, ?window, "reaction window missed");
            return self.respond(state, ReactionResponse::TimedOut);
        }
        self.respond(state, response)
    }

    /// Ask `responder` for an answer and close the window with it.
    ///
    /// `None` from the responder, or an answer that took longer than the
    /// window, is a timeout.
    pub fn await_reaction(
        &self,
        state: &GameState,
        responder: &mut dyn ReactionResponder,
    ) -> Result<ReactionResult, EngineError> {
        let request = state.reaction.request().ok_or(EngineError::NoReactionOpen)?;
        let window = Duration::from_millis(request.window_ms);

        let started = Instant::now();
        let answer = responder.respond(state, request, window);
        let elapsed = started.elapsed();

        match answer {
            Some(response) => self.respond_within(state, response, elapsed),
            None => self.respond(state, ReactionResponse::TimedOut),
        }
    }
}

/// Pull an acceptable defensive card from hand and pay for it.
fn take_defense(state: &mut GameState, defender: PlayerId, id: &CardId) -> Option<Card> {
    let seat = &state.players[defender];
    let Some(card) = seat.find_in_hand(id) else {
        warn!(%defender, card = %id, "defense card not in hand, ignored");
        return None;
    };
    if card.card_type != CardType::Defensive {
        warn!(%defender, card = %id, "non-defensive card offered as defense, ignored");
        return None;
    }
    if !seat.can_afford(card) {
        warn!(%defender, card = %id, ip = seat.ip, "defense card unaffordable, ignored");
        return None;
    }

    let seat = &mut state.players[defender];
    let card = seat.take_from_hand(id)?;
    let cost = seat.effective_cost(&card);
    seat.add_ip(-cost);

    state.record_play(defender, &card.id, None, PlayKind::Defense);
    Some(card)
}
