//! Game state.
//!
//! ## PlayerState
//!
//! One seat: faction, deck/hand/discard, IP, owned regions and the
//! persistent modifiers cards can grant (cost mods, passive income, zone
//! defense bonus).
//!
//! ## GameState
//!
//! Complete game state:
//! - turn counter, current player, plays this turn
//! - global truth meter
//! - both `PlayerState`s
//! - the pressure board
//! - turn-scoped reaction flags and game-wide named flags
//! - reaction window phase
//! - play history and the RNG
//!
//! All collections are `im` persistent structures, so the engine's
//! clone-then-mutate transitions are cheap and every earlier state stays a
//! valid snapshot.

use std::hash::Hasher;

use im::{OrdMap, OrdSet, Vector};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::action::{PlayKind, PlayRecord};
use super::config::RulesConfig;
use super::player::{Faction, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CardId, CardType};
use crate::reaction::ReactionState;
use crate::regions::{PressureBoard, RegionId};

/// Truth meter bounds.
pub const TRUTH_MIN: i32 = 0;
pub const TRUTH_MAX: i32 = 100;

/// Additive cost modifiers by card type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostMods {
    pub zone: i32,
    pub media: i32,
}

/// Reaction flags that expire when the turn ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnFlags {
    /// Blocks every harmful card aimed at this player.
    pub immune: bool,
    /// Blocks ATTACK cards aimed at this player.
    pub block_attack: bool,
}

impl TurnFlags {
    /// Whether these flags stop a card of the given type.
    #[must_use]
    pub fn blocks(&self, card_type: CardType) -> bool {
        self.immune || (self.block_attack && card_type == CardType::Attack)
    }
}

/// One player's side of the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub faction: Faction,
    pub deck: Vector<Card>,
    pub hand: Vector<Card>,
    pub discard: Vector<Card>,
    /// Spendable influence, never negative.
    pub ip: i32,
    /// Owned regions.
    pub states: OrdSet<RegionId>,
    pub cost_mods: CostMods,
    pub passive_income: i32,
    pub zone_defense_bonus: i32,
}

impl PlayerState {
    /// Create an empty seat.
    #[must_use]
    pub fn new(id: PlayerId, faction: Faction) -> Self {
        Self {
            id,
            faction,
            deck: Vector::new(),
            hand: Vector::new(),
            discard: Vector::new(),
            ip: 0,
            states: OrdSet::new(),
            cost_mods: CostMods::default(),
            passive_income: 0,
            zone_defense_bonus: 0,
        }
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn hand_position(&self, card: &CardId) -> Option<usize> {
        self.hand.iter().position(|c| &c.id == card)
    }

    #[must_use]
    pub fn holds(&self, card: &CardId) -> bool {
        self.hand_position(card).is_some()
    }

    /// Look up a card in hand.
    #[must_use]
    pub fn find_in_hand(&self, card: &CardId) -> Option<&Card> {
        self.hand.iter().find(|c| &c.id == card)
    }

    /// Remove the first copy of a card from hand.
    pub fn take_from_hand(&mut self, card: &CardId) -> Option<Card> {
        let index = self.hand_position(card)?;
        Some(self.hand.remove(index))
    }

    /// Add to IP, flooring the result at 0.
    pub fn add_ip(&mut self, delta: i32) {
        self.ip = self.ip.saturating_add(delta).max(0);
    }

    /// Cost after this player's modifiers, floored at 0.
    #[must_use]
    pub fn effective_cost(&self, card: &Card) -> i32 {
        let modifier = match card.card_type {
            CardType::Zone => self.cost_mods.zone,
            CardType::Media => self.cost_mods.media,
            CardType::Attack | CardType::Defensive => 0,
        };
        card.cost.saturating_add(modifier).max(0)
    }

    #[must_use]
    pub fn can_afford(&self, card: &Card) -> bool {
        self.ip >= self.effective_cost(card)
    }

    /// Move the top deck card to the caller, reshuffling the discard pile
    /// into the deck first when the deck is empty. `None` when both are
    /// exhausted.
    pub fn pop_deck(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.deck.is_empty() && !self.discard.is_empty() {
            let mut cards: Vec<Card> = std::mem::take(&mut self.discard).into_iter().collect();
            rng.shuffle(&mut cards);
            self.deck = cards.into_iter().collect();
        }
        self.deck.pop_front()
    }

    /// Every card this player owns, wherever it is.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn number (starts at 1, increments on every hand-off).
    pub turn: u32,

    /// Global truth meter, 0..=100.
    pub truth: i32,

    pub current_player: PlayerId,

    pub players: PlayerMap<PlayerState>,

    /// Pressure and live defense per region.
    pub regions: PressureBoard,

    pub plays_this_turn: u32,

    pub turn_flags: PlayerMap<TurnFlags>,

    /// Game-wide named flags set by effects.
    pub flags: OrdMap<String, bool>,

    pub reaction: ReactionState,

    pub plays: Vector<PlayRecord>,

    /// Regions captured since the turn began.
    pub captured_this_turn: Vector<RegionId>,

    pub rng: GameRng,
}

impl GameState {
    /// Build the opening state: shuffled decks, empty hands, every region
    /// at zero pressure. P1 plays `config.first_faction`.
    #[must_use]
    pub fn new(config: &RulesConfig, p1_deck: Vec<Card>, p2_deck: Vec<Card>, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let first = config.first_faction;

        let mut decks = [p1_deck, p2_deck];
        for deck in &mut decks {
            rng.shuffle(deck);
        }
        let [p1_deck, p2_deck] = decks;

        let players = PlayerMap::new(|id| {
            let faction = if id == PlayerId::P1 { first } else { first.rival() };
            let mut player = PlayerState::new(id, faction);
            player.ip = config.starting_ip;
            player
        });

        let mut state = Self {
            turn: 1,
            truth: config.starting_truth.clamp(TRUTH_MIN, TRUTH_MAX),
            current_player: PlayerId::P1,
            players,
            regions: PressureBoard::new(&config.regions),
            plays_this_turn: 0,
            turn_flags: PlayerMap::default(),
            flags: OrdMap::new(),
            reaction: ReactionState::Idle,
            plays: Vector::new(),
            captured_this_turn: Vector::new(),
            rng,
        };
        state.players[PlayerId::P1].deck = p1_deck.into_iter().collect();
        state.players[PlayerId::P2].deck = p2_deck.into_iter().collect();
        state
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn waiting(&self) -> &PlayerState {
        &self.players[self.current_player.opponent()]
    }

    /// Seat playing the given faction.
    #[must_use]
    pub fn seat_of(&self, faction: Faction) -> PlayerId {
        PlayerId::all()
            .find(|&p| self.players[p].faction == faction)
            .unwrap_or(PlayerId::P1)
    }

    /// Move truth by `delta`, clamped to 0..=100.
    pub fn add_truth(&mut self, delta: i32) {
        self.truth = self.truth.saturating_add(delta).clamp(TRUTH_MIN, TRUTH_MAX);
    }

    /// Full rounds played: turns 1-2 are round 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.turn.div_ceil(2)
    }

    /// Whether a reaction window is waiting for an answer.
    #[must_use]
    pub fn reaction_pending(&self) -> bool {
        self.reaction.is_open()
    }

    /// Append to the play history. Sequence numbers restart every turn.
    pub fn record_play(&mut self, player: PlayerId, card: &CardId, target: Option<&RegionId>, kind: PlayKind) {
        let sequence = self.plays.iter().filter(|p| p.turn == self.turn).count();
        self.plays.push_back(PlayRecord {
            player,
            card: card.clone(),
            target: target.cloned(),
            kind,
            turn: self.turn,
            sequence: u32::try_from(sequence).unwrap_or(u32::MAX),
        });
    }

    /// Hash of the complete state.
    ///
    /// Equal fingerprints mean equal states, so two runs from the same seed
    /// with the same inputs can be compared cheaply.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        match bincode::serialize(self) {
            Ok(bytes) => hasher.write(&bytes),
            Err(_) => hasher.write(format!("{self:?}").as_bytes()),
        }
        hasher.finish()
    }
}
