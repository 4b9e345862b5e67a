//! Card definitions - canonical card data.
//!
//! A `Card` always carries its effects in canonical form (`Vec<Op>`).
//! Authored content arrives as [`RawCard`], whose `effects` field may use any
//! legacy encoding; [`RawCard::into_card`] runs it through the normalizer.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::Faction;
use crate::effects::{normalize, Op};

/// Tag marking a DEFENSIVE card as a partial block.
pub const PARTIAL_BLOCK_TAG: &str = "partialBlock";

/// Card identifier, e.g. `"TR-014"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
    /// Drains the opponent's IP, optionally forcing discards.
    Attack,
    /// Moves the global truth meter.
    Media,
    /// Adds pressure to a region.
    Zone,
    /// Played only in answer to an attack.
    Defensive,
}

impl CardType {
    pub const ALL: [CardType; 4] = [
        CardType::Attack,
        CardType::Media,
        CardType::Zone,
        CardType::Defensive,
    ];
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Attack => "ATTACK",
            CardType::Media => "MEDIA",
            CardType::Zone => "ZONE",
            CardType::Defensive => "DEFENSIVE",
        };
        f.write_str(name)
    }
}

/// Card rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        };
        f.write_str(name)
    }
}

/// A canonical card.
///
/// ## Example
///
/// ```
/// use shadowgov_engine::cards::{Card, CardType, Rarity};
/// use shadowgov_engine::core::Faction;
/// use shadowgov_engine::effects::{Op, Who};
///
/// let leak = Card::new("TR-100", "Leaked Memo", CardType::Attack, Faction::Truth, Rarity::Common, 2)
///     .with_effects(vec![Op::Ip { who: Who::Opponent, v: -1 }]);
///
/// assert_eq!(leak.effects.len(), 1);
/// assert!(!leak.is_partial_block());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub faction: Faction,
    pub rarity: Rarity,
    pub cost: i32,
    pub effects: Vec<Op>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
}

impl Card {
    /// Create a card with no effects.
    #[must_use]
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        card_type: CardType,
        faction: Faction,
        rarity: Rarity,
        cost: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_type,
            faction,
            rarity,
            cost,
            effects: Vec::new(),
            tags: Vec::new(),
            reduce_factor: None,
            flavor: None,
        }
    }

    /// Set the canonical effect list.
    #[must_use]
    pub fn with_effects(mut self, effects: Vec<Op>) -> Self {
        self.effects = effects;
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Mark as a partial block with the given reduction factor.
    #[must_use]
    pub fn partial_block(mut self, factor: f64) -> Self {
        if !self.is_partial_block() {
            self.tags.push(PARTIAL_BLOCK_TAG.to_string());
        }
        self.reduce_factor = Some(factor);
        self
    }

    /// Whether the card carries the partial-block tag.
    #[must_use]
    pub fn is_partial_block(&self) -> bool {
        self.tags.iter().any(|t| t == PARTIAL_BLOCK_TAG)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Authored card record with effects in any legacy encoding.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub faction: Faction,
    pub rarity: Rarity,
    pub cost: i32,
    #[serde(default)]
    pub effects: serde_json::Value,
    /// Either a list of tags or an object of `tag: bool`.
    #[serde(default, deserialize_with = "tag_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reduce_factor: Option<f64>,
    #[serde(default)]
    pub flavor: Option<String>,
}

fn tag_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Set(BTreeMap<String, bool>),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(tags)) => tags,
        Some(Tags::Set(tags)) => tags.into_iter().filter(|(_, on)| *on).map(|(tag, _)| tag).collect(),
        None => Vec::new(),
    })
}

impl RawCard {
    /// Normalize the effects and build a canonical card.
    ///
    /// A `reduceFactor` written inside a flat effect object is lifted onto
    /// the card when the record itself has none.
    #[must_use]
    pub fn into_card(self) -> Card {
        let embedded_factor = self
            .effects
            .get("reduceFactor")
            .and_then(serde_json::Value::as_f64);
        let effects = normalize(&self.effects);

        Card {
            id: CardId(self.id),
            name: self.name,
            card_type: self.card_type,
            faction: self.faction,
            rarity: self.rarity,
            cost: self.cost,
            effects,
            tags: self.tags,
            reduce_factor: self.reduce_factor.or(embedded_factor),
            flavor: self.flavor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Who;

    #[test]
    fn test_card_id_display() {
        let id = CardId::from("GV-007");
        assert_eq!(id.as_str(), "GV-007");
        assert_eq!(format!("{}", id), "GV-007");
    }

    #[test]
    fn test_card_type_serde_uppercase() {
        let json = serde_json::to_string(&CardType::Defensive).unwrap();
        assert_eq!(json, "\"DEFENSIVE\"");
        let back: Rarity = serde_json::from_str("\"legendary\"").unwrap();
        assert_eq!(back, Rarity::Legendary);
    }

    #[test]
    fn test_partial_block_builder() {
        let card = Card::new("TR-D1", "Spin Doctor", CardType::Defensive, Faction::Truth, Rarity::Common, 2)
            .partial_block(0.25)
            .partial_block(0.5);

        assert!(card.is_partial_block());
        assert_eq!(card.tags.len(), 1);
        assert_eq!(card.reduce_factor, Some(0.5));
    }

    #[test]
    fn test_raw_card_normalizes_flat_effects() {
        let raw: RawCard = serde_json::from_value(serde_json::json!({
            "id": "TR-001",
            "name": "Leak",
            "type": "ATTACK",
            "faction": "truth",
            "rarity": "uncommon",
            "cost": 3,
            "effects": { "ipDelta": { "opponent": 2 } }
        }))
        .unwrap();

        let card = raw.into_card();
        assert_eq!(card.effects, vec![Op::Ip { who: Who::Opponent, v: -2 }]);
        assert!(card.tags.is_empty());
    }

    #[test]
    fn test_raw_card_lifts_embedded_reduce_factor() {
        let raw: RawCard = serde_json::from_value(serde_json::json!({
            "id": "GV-D2",
            "name": "Damage Control",
            "type": "DEFENSIVE",
            "faction": "government",
            "rarity": "uncommon",
            "cost": 3,
            "tags": ["partialBlock"],
            "effects": { "reduceFactor": 0.25, "draw": 1 }
        }))
        .unwrap();

        let card = raw.into_card();
        assert_eq!(card.reduce_factor, Some(0.25));
        assert_eq!(card.effects, vec![Op::Draw { who: Who::Actor, n: 1 }]);
    }

    #[test]
    fn test_raw_card_tags_as_object() {
        let raw: RawCard = serde_json::from_value(serde_json::json!({
            "id": "TR-D3",
            "name": "Counter-Narrative",
            "type": "DEFENSIVE",
            "faction": "truth",
            "rarity": "uncommon",
            "cost": 3,
            "tags": { "partialBlock": true, "legacy": false }
        }))
        .unwrap();

        let card = raw.into_card();
        assert!(card.is_partial_block());
        assert!(!card.has_tag("legacy"));
        assert!(card.effects.is_empty());
    }
}
