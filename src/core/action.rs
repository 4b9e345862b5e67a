//! Player actions and play history.
//!
//! An [`Action`] is everything a seat can submit to the engine:
//! - play a card from hand, optionally aimed at a region
//! - end the turn, naming cards to discard
//! - answer an open reaction window
//!
//! Every card that leaves a hand through a play or a defense is logged as a
//! [`PlayRecord`] in the game state.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;
use crate::reaction::ReactionResponse;
use crate::regions::RegionId;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use shadowgov_engine::core::Action;
///
/// let play = Action::play("TR-003", Some("NV"));
/// let end = Action::end_turn(["TR-010", "TR-011"]);
///
/// assert!(play.is_play());
/// assert!(!end.is_play());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// Play a card from the current player's hand.
    PlayCard {
        card: CardId,
        target: Option<RegionId>,
    },
    /// Discard the named cards and pass the turn.
    EndTurn { discards: Vec<CardId> },
    /// Answer the open reaction window as the defender.
    Respond { response: ReactionResponse },
}

impl Action {
    /// Build a play action.
    #[must_use]
    pub fn play(card: impl Into<CardId>, target: Option<&str>) -> Self {
        Action::PlayCard {
            card: card.into(),
            target: target.map(RegionId::from),
        }
    }

    /// Build an end-turn action.
    #[must_use]
    pub fn end_turn<I, C>(discards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CardId>,
    {
        Action::EndTurn {
            discards: discards.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_play(&self) -> bool {
        matches!(self, Action::PlayCard { .. })
    }
}

/// How a card left its owner's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayKind {
    /// Played on the owner's turn.
    Play,
    /// Played in answer to an attack.
    Defense,
}

/// A recorded play for history tracking and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// The player who played the card.
    pub player: PlayerId,

    pub card: CardId,

    pub target: Option<RegionId>,

    pub kind: PlayKind,

    /// Turn number when the card was played.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}
