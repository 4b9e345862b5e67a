//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the explicit catalogue of every card the engine
//! may materialize (`addCard` effects, deck building). It is passed by
//! reference through the engine rather than read from any global.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{Card, CardId, RawCard};
use crate::core::{CardTables, Faction};
use crate::error::ContentError;
use crate::schema::validate;

/// Registry of canonical cards.
///
/// ## Example
///
/// ```
/// use shadowgov_engine::cards::{CardRegistry, CardId};
/// use shadowgov_engine::core::CardTables;
///
/// let json = r#"[{
///     "id": "TR-001", "name": "Leaked Memo", "type": "MEDIA",
///     "faction": "truth", "rarity": "common", "cost": 3,
///     "effects": { "truthDelta": 1 }
/// }]"#;
///
/// let registry = CardRegistry::load_json(json, &CardTables::default()).unwrap();
/// assert_eq!(registry.get(&CardId::from("TR-001")).unwrap().name, "Leaked Memo");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
    order: Vec<CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of raw cards, normalize and validate each one.
    pub fn load_json(json: &str, tables: &CardTables) -> Result<Self, ContentError> {
        let raw: Vec<RawCard> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for card in raw {
            registry.register(card.into_card(), tables)?;
        }
        debug!(cards = registry.len(), "card content loaded");
        Ok(registry)
    }

    /// Validate and add a card. Duplicate ids are rejected.
    pub fn register(&mut self, card: Card, tables: &CardTables) -> Result<(), ContentError> {
        validate(&card, tables)?;
        if self.cards.contains_key(&card.id) {
            return Err(ContentError::Duplicate(card.id));
        }
        self.insert(card);
        Ok(())
    }

    /// Add or replace a card without validation.
    pub fn insert(&mut self, card: Card) -> Option<Card> {
        let id = card.id.clone();
        let previous = self.cards.insert(id.clone(), card);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// One copy of every card of a faction, in registration order.
    #[must_use]
    pub fn faction_cards(&self, faction: Faction) -> Vec<Card> {
        self.iter()
            .filter(|card| card.faction == faction)
            .cloned()
            .collect()
    }

    /// A deck of `copies` copies of every card of a faction.
    #[must_use]
    pub fn deck_for(&self, faction: Faction, copies: usize) -> Vec<Card> {
        let cards = self.faction_cards(faction);
        (0..copies).flat_map(|_| cards.iter().cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardType, Rarity};
    use crate::error::ValidationIssue;

    fn media(id: &str, faction: Faction) -> Card {
        let v = faction.truth_direction();
        Card::new(id, "Broadcast", CardType::Media, faction, Rarity::Common, 3)
            .with_effects(vec![crate::effects::Op::Truth { v }])
    }

    #[test]
    fn test_register_and_lookup() {
        let tables = CardTables::default();
        let mut registry = CardRegistry::new();
        registry.register(media("TR-001", Faction::Truth), &tables).unwrap();
        registry.register(media("GV-001", Faction::Government), &tables).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&CardId::from("GV-001")));
        assert_eq!(registry.faction_cards(Faction::Truth).len(), 1);
        assert_eq!(registry.deck_for(Faction::Government, 3).len(), 3);
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let tables = CardTables::default();
        let mut registry = CardRegistry::new();
        registry.register(media("TR-001", Faction::Truth), &tables).unwrap();

        let err = registry.register(media("TR-001", Faction::Truth), &tables).unwrap_err();
        assert!(matches!(err, ContentError::Duplicate(id) if id.as_str() == "TR-001"));
    }

    #[test]
    fn test_register_rejects_invalid() {
        let tables = CardTables::default();
        let mut registry = CardRegistry::new();

        let err = registry.register(media("GV-009", Faction::Truth), &tables).unwrap_err();
        match err {
            ContentError::Validation(e) => {
                assert_eq!(e.card_id.as_str(), "GV-009");
                assert!(matches!(e.issue, ValidationIssue::BadPrefix { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_json_bad_input() {
        let tables = CardTables::default();
        assert!(matches!(
            CardRegistry::load_json("{ not json", &tables),
            Err(ContentError::Json(_))
        ));
    }

    #[test]
    fn test_iteration_order_is_registration_order() {
        let mut registry = CardRegistry::new();
        registry.insert(media("TR-003", Faction::Truth));
        registry.insert(media("TR-001", Faction::Truth));
        registry.insert(media("TR-003", Faction::Truth));

        let ids: Vec<&str> = registry.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["TR-003", "TR-001"]);
    }
}
