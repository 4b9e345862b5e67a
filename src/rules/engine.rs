//! The turn/action engine.
//!
//! Every operation takes the current `GameState` by reference and returns a
//! new one; the input is never touched. Illegal plays are reported through
//! [`PlayCheck`] by [`Engine::can_play`], and surface as
//! [`EngineError::Rejected`] only when a caller plays anyway.
//!
//! ## Turn structure
//!
//! 1. [`Engine::start_turn`]: income, draw to the hand limit, reset plays
//! 2. [`Engine::play_card`] up to `max_plays_per_turn` times, answering any
//!    reaction window it opens with [`Engine::respond`]
//! 3. [`Engine::end_turn`]: paid discards, flags expire, seat hand-off
//!
//! [`Engine::apply`] drives the same steps from [`Action`] values.

use tracing::{debug, info, warn};

use super::win::{self, WinResult};
use crate::cards::{Card, CardId, CardRegistry, CardType};
use crate::core::{Action, Faction, GameState, PlayKind, PlayerId, RulesConfig};
use crate::effects::{draw_capped, ApplyContext, CheapestFirst, DiscardChooser, EffectResolver, Op, SpecialRegistry};
use crate::error::{EngineError, PlayRejection};
use crate::reaction::{defense_options, is_reactive, ReactionRequest, ReactionResponse, ReactionState};
use crate::regions::{Captures, RegionId};
use crate::schema::{assert_state, validate};

/// Answer of [`Engine::can_play`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlayCheck {
    pub ok: bool,
    pub reason: Option<PlayRejection>,
}

impl PlayCheck {
    #[must_use]
    pub fn allowed() -> Self {
        Self { ok: true, reason: None }
    }

    #[must_use]
    pub fn rejected(reason: PlayRejection) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
        }
    }

    /// `Ok(())` when allowed, the rejection otherwise.
    pub fn into_result(self) -> Result<(), PlayRejection> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }
}

/// What happened to a played card.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayStatus {
    /// Effects applied, card in the discard pile.
    Resolved,
    /// Parked until the defender answers.
    ReactionPending(ReactionRequest),
    /// Stopped by the defender's `immune` / `blockAttack` flag.
    Blocked,
}

/// Result of [`Engine::play_card`].
#[derive(Clone, Debug)]
pub struct PlayResult {
    pub state: GameState,
    pub status: PlayStatus,
    pub captures: Captures,
}

/// What [`Engine::end_turn`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct EndTurnSummary {
    /// The player whose turn ended.
    pub player: PlayerId,
    /// The turn that ended.
    pub turn: u32,
    pub discarded: Vec<CardId>,
    /// IP charged for discards beyond the first.
    pub extra_cost: i32,
    /// Regions captured during the turn.
    pub captured: Vec<RegionId>,
    pub win: Option<WinResult>,
}

/// Result of [`Engine::end_turn`].
#[derive(Clone, Debug)]
pub struct EndTurnResult {
    pub state: GameState,
    pub summary: EndTurnSummary,
}

/// The rules engine: configuration plus the registries effects consult.
///
/// ## Example
///
/// ```
/// use shadowgov_engine::cards::core_pool;
/// use shadowgov_engine::core::{Faction, RulesConfig};
/// use shadowgov_engine::rules::Engine;
///
/// let config = RulesConfig::default();
/// let cards = core_pool(&config.tables).unwrap();
/// let truth_deck = cards.deck_for(Faction::Truth, 2);
/// let gov_deck = cards.deck_for(Faction::Government, 2);
///
/// let engine = Engine::new(config).with_cards(cards);
/// let state = engine.start_turn(&engine.new_game(truth_deck, gov_deck, 7));
///
/// assert_eq!(state.current().hand.len(), 5);
/// assert_eq!(state.current().ip, 5);
/// ```
pub struct Engine {
    config: RulesConfig,
    cards: CardRegistry,
    specials: SpecialRegistry,
    chooser: Box<dyn DiscardChooser>,
}

impl Engine {
    /// Engine with empty registries and the cheapest-first discard chooser.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            config,
            cards: CardRegistry::new(),
            specials: SpecialRegistry::new(),
            chooser: Box::new(CheapestFirst),
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: CardRegistry) -> Self {
        self.cards = cards;
        self
    }

    #[must_use]
    pub fn with_specials(mut self, specials: SpecialRegistry) -> Self {
        self.specials = specials;
        self
    }

    #[must_use]
    pub fn with_discard_chooser(mut self, chooser: impl DiscardChooser + 'static) -> Self {
        self.chooser = Box::new(chooser);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn specials(&self) -> &SpecialRegistry {
        &self.specials
    }

    /// Opening state. Decks are dealt by faction, so the seat playing
    /// `first_faction` gets its deck whichever faction that is.
    #[must_use]
    pub fn new_game(&self, truth_deck: Vec<Card>, government_deck: Vec<Card>, seed: u64) -> GameState {
        let (p1_deck, p2_deck) = match self.config.first_faction {
            Faction::Truth => (truth_deck, government_deck),
            Faction::Government => (government_deck, truth_deck),
        };
        GameState::new(&self.config, p1_deck, p2_deck, seed)
    }

    /// Income and draw for the current player.
    ///
    /// Income is `base_income + regions owned + passive income`. The hand is
    /// filled to `hand_limit`, reshuffling the discard pile when the deck
    /// runs out and stopping early when both are empty.
    #[must_use]
    pub fn start_turn(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        let player = next.current_player;

        let seat = &mut next.players[player];
        let owned = i32::try_from(seat.states.len()).unwrap_or(i32::MAX);
        let income = self.config.base_income.saturating_add(owned).saturating_add(seat.passive_income);
        seat.add_ip(income);
        let missing = self.config.hand_limit.saturating_sub(seat.hand.len());

        let drawn = draw_capped(&mut next, player, missing, self.config.hand_limit);
        next.plays_this_turn = 0;
        next.captured_this_turn.clear();

        debug!(%player, turn = next.turn, income, drawn, "turn started");
        next
    }

    /// Whether the current player may play `card` from hand now.
    #[must_use]
    pub fn can_play(&self, state: &GameState, card: &CardId, target: Option<&RegionId>) -> PlayCheck {
        match self.check_play(state, card, target) {
            Ok(()) => PlayCheck::allowed(),
            Err(reason) => PlayCheck::rejected(reason),
        }
    }

    fn check_play(&self, state: &GameState, id: &CardId, target: Option<&RegionId>) -> Result<(), PlayRejection> {
        if state.reaction_pending() {
            return Err(PlayRejection::ReactionPending);
        }
        let seat = state.current();
        let card = seat
            .find_in_hand(id)
            .ok_or_else(|| PlayRejection::NotInHand(id.clone()))?;
        validate(card, &self.config.tables).map_err(PlayRejection::InvalidCard)?;

        if state.plays_this_turn >= self.config.max_plays_per_turn {
            return Err(PlayRejection::PlayLimit {
                limit: self.config.max_plays_per_turn,
            });
        }
        let cost = seat.effective_cost(card);
        if cost > seat.ip {
            return Err(PlayRejection::InsufficientIp {
                cost,
                available: seat.ip,
            });
        }
        if card.faction != seat.faction {
            return Err(PlayRejection::WrongFaction);
        }
        if card.card_type == CardType::Defensive {
            return Err(PlayRejection::ReactionOnly);
        }

        match (card.card_type, target) {
            (CardType::Zone, None) => Err(PlayRejection::MissingTarget),
            (_, Some(region)) if !state.regions.contains(region) => {
                Err(PlayRejection::UnknownTarget(region.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Apply a card's effects for `owner` without touching hands, IP or
    /// play counts.
    #[must_use]
    pub fn resolve(&self, state: &GameState, owner: PlayerId, card: &Card, target: Option<&RegionId>) -> GameState {
        let mut next = state.clone();
        self.resolve_in_place(&mut next, owner, &card.effects, target);
        next
    }

    pub(crate) fn resolve_in_place(
        &self,
        state: &mut GameState,
        actor: PlayerId,
        ops: &[Op],
        target: Option<&RegionId>,
    ) -> Captures {
        let ctx = ApplyContext {
            actor,
            target,
            config: &self.config,
            cards: &self.cards,
            specials: &self.specials,
            chooser: self.chooser.as_ref(),
        };
        EffectResolver::apply(state, ops, &ctx).captures
    }

    /// Play a card from the current player's hand.
    ///
    /// The card is paid for and counted immediately. Harmful cards open a
    /// reaction window when the defender could answer; the caller must
    /// then [`respond`](Self::respond) before anything else happens.
    pub fn play_card(
        &self,
        state: &GameState,
        card: &CardId,
        target: Option<&RegionId>,
    ) -> Result<PlayResult, EngineError> {
        self.can_play(state, card, target).into_result()?;

        let mut next = state.clone();
        let player = next.current_player;
        let seat = &mut next.players[player];
        let played = seat.take_from_hand(card).ok_or_else(|| EngineError::CardNotInHand {
            player,
            card: card.clone(),
        })?;
        let cost = seat.effective_cost(&played);
        seat.add_ip(-cost);
        let faction = seat.faction;
        next.plays_this_turn += 1;
        next.record_play(player, &played.id, target, PlayKind::Play);
        debug!(%player, card = %played.id, cost, "card played");

        let defender = player.opponent();
        let reactive = is_reactive(&played, faction);
        let mut captures = Captures::new();
        let status = if reactive && next.turn_flags[defender].blocks(played.card_type) {
            info!(card = %played.id, %defender, "play blocked by defender's flag");
            next.players[player].discard.push_back(played);
            PlayStatus::Blocked
        } else if reactive && !defense_options(&next, defender).is_empty() {
            let request = ReactionRequest {
                attacker: player,
                defender,
                card: played,
                target: target.cloned(),
                window_ms: self.config.reaction_window_ms,
            };
            debug!(card = %request.card.id, %defender, "reaction window opened");
            next.reaction = ReactionState::WindowOpen(request.clone());
            PlayStatus::ReactionPending(request)
        } else {
            captures = self.resolve_in_place(&mut next, player, &played.effects, target);
            next.players[player].discard.push_back(played);
            PlayStatus::Resolved
        };

        assert_state(&next, &self.config.tables)?;
        Ok(PlayResult {
            state: next,
            status,
            captures,
        })
    }

    /// Discard the named cards and hand the turn over.
    ///
    /// The first discard is free; each further one costs
    /// `extra_discard_cost` IP (floored at 0). Ids not in hand are skipped
    /// and not charged. Turn flags expire.
    pub fn end_turn(&self, state: &GameState, discards: &[CardId]) -> Result<EndTurnResult, EngineError> {
        if state.reaction_pending() {
            return Err(EngineError::ReactionPending);
        }

        let mut next = state.clone();
        let player = next.current_player;
        let seat = &mut next.players[player];
        let mut discarded = Vec::with_capacity(discards.len());
        for id in discards {
            match seat.take_from_hand(id) {
                Some(card) => {
                    seat.discard.push_back(card);
                    discarded.push(id.clone());
                }
                None => warn!(%player, card = %id, "discard not in hand, skipped"),
            }
        }
        let paid = i32::try_from(discarded.len().saturating_sub(1)).unwrap_or(i32::MAX);
        let extra_cost = paid.saturating_mul(self.config.extra_discard_cost);
        seat.add_ip(-extra_cost);

        let win = self.win_check(&next);
        let summary = EndTurnSummary {
            player,
            turn: next.turn,
            discarded,
            extra_cost,
            captured: next.captured_this_turn.iter().cloned().collect(),
            win,
        };

        next.turn_flags = Default::default();
        next.current_player = player.opponent();
        next.turn += 1;
        next.plays_this_turn = 0;
        next.captured_this_turn.clear();

        if let Some(win) = &summary.win {
            info!(winner = %win.winner, reason = ?win.reason, "game won");
        }
        debug!(%player, discarded = summary.discarded.len(), extra_cost, "turn ended");

        assert_state(&next, &self.config.tables)?;
        Ok(EndTurnResult { state: next, summary })
    }

    /// First satisfied win condition, if any.
    #[must_use]
    pub fn win_check(&self, state: &GameState) -> Option<WinResult> {
        win::check(state, &self.config.win)
    }

    /// Every action the acting seat may take now.
    ///
    /// With a reaction window open, only the defender's answers. Otherwise
    /// each distinct legal play (ZONE cards once per region) and ending the
    /// turn without discards. Empty once the game is won.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        if self.win_check(state).is_some() {
            return Vec::new();
        }

        if let Some(request) = state.reaction.request() {
            let mut actions = vec![Action::Respond {
                response: ReactionResponse::Decline,
            }];
            let mut seen: Vec<&CardId> = Vec::new();
            for card in defense_options(state, request.defender) {
                if !seen.contains(&&card.id) {
                    seen.push(&card.id);
                    actions.push(Action::Respond {
                        response: ReactionResponse::Defend(card.id.clone()),
                    });
                }
            }
            return actions;
        }

        let mut actions = Vec::new();
        let mut seen: Vec<&CardId> = Vec::new();
        for card in &state.current().hand {
            if seen.contains(&&card.id) {
                continue;
            }
            seen.push(&card.id);
            if card.card_type == CardType::Zone {
                for region in state.regions.regions() {
                    if self.can_play(state, &card.id, Some(region)).ok {
                        actions.push(Action::PlayCard {
                            card: card.id.clone(),
                            target: Some(region.clone()),
                        });
                    }
                }
            } else if self.can_play(state, &card.id, None).ok {
                actions.push(Action::PlayCard {
                    card: card.id.clone(),
                    target: None,
                });
            }
        }
        actions.push(Action::EndTurn { discards: Vec::new() });
        actions
    }

    /// Apply an action. Ending the turn also starts the next one.
    pub fn apply(&self, state: &GameState, action: &Action) -> Result<GameState, EngineError> {
        match action {
            Action::PlayCard { card, target } => Ok(self.play_card(state, card, target.as_ref())?.state),
            Action::EndTurn { discards } => {
                let ended = self.end_turn(state, discards)?;
                Ok(self.start_turn(&ended.state))
            }
            Action::Respond { response } => Ok(self.respond(state, response.clone())?.state),
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("cards", &self.cards.len())
            .field("specials", &self.specials)
            .finish_non_exhaustive()
    }
}
