//! Card validation and whole-state consistency checks.

use tracing::warn;

use crate::cards::{Card, CardType, Rarity};
use crate::core::{CardTables, GameState, TRUTH_MAX, TRUTH_MIN};
use crate::effects::{Op, RegionRef, Who};
use crate::error::{EngineError, ValidationError, ValidationIssue};
use crate::reaction::ReactionState;

/// Validate a canonical card against the tables.
///
/// Returns the card unchanged, or an error naming it.
///
/// ```
/// use shadowgov_engine::cards::{Card, CardType, Rarity};
/// use shadowgov_engine::core::{CardTables, Faction};
/// use shadowgov_engine::effects::Op;
/// use shadowgov_engine::schema::validate;
///
/// let card = Card::new("GV-010", "Talking Points", CardType::Media, Faction::Government, Rarity::Uncommon, 4)
///     .with_effects(vec![Op::Truth { v: -2 }]);
/// assert!(validate(&card, &CardTables::default()).is_ok());
/// ```
pub fn validate<'a>(card: &'a Card, tables: &CardTables) -> Result<&'a Card, ValidationError> {
    check(card, tables).map_err(|issue| ValidationError::new(card.id.clone(), issue))?;
    Ok(card)
}

/// Validate every card; the first failure wins.
pub fn validate_pool<'a>(
    cards: impl IntoIterator<Item = &'a Card>,
    tables: &CardTables,
) -> Result<(), ValidationError> {
    for card in cards {
        validate(card, tables)?;
    }
    Ok(())
}

fn check(card: &Card, tables: &CardTables) -> Result<(), ValidationIssue> {
    if card.id.as_str().is_empty() {
        return Err(ValidationIssue::EmptyId);
    }
    if card.name.trim().is_empty() {
        return Err(ValidationIssue::EmptyName);
    }
    let prefix = card.faction.id_prefix();
    if !card.id.as_str().starts_with(prefix) {
        return Err(ValidationIssue::BadPrefix { expected: prefix });
    }

    let expected = tables.cost(card.card_type, card.rarity);
    if card.cost != expected {
        return Err(ValidationIssue::CostMismatch {
            card_type: card.card_type,
            rarity: card.rarity,
            expected,
            actual: card.cost,
        });
    }

    if let Some(factor) = card.reduce_factor {
        if !(0.0..=1.0).contains(&factor) {
            return Err(ValidationIssue::ReduceFactor(factor));
        }
    }

    let magnitude = tables.magnitude(card.card_type, card.rarity);
    match (card.card_type, magnitude) {
        (CardType::Attack, Some(m)) => check_attack(card, m),
        (CardType::Media, Some(m)) => check_media(card, m),
        (CardType::Zone, Some(m)) => check_zone(card, m),
        _ => check_defensive(card),
    }
}

fn forbid(card: &Card, allowed: &[&str]) -> Result<(), ValidationIssue> {
    match card.effects.iter().find(|op| !allowed.contains(&op.kind())) {
        Some(op) => Err(ValidationIssue::ForbiddenOp {
            card_type: card.card_type,
            op: op.kind(),
        }),
        None => Ok(()),
    }
}

fn exactly_one<'a>(card: &'a Card, kind: &'static str) -> Result<&'a Op, ValidationIssue> {
    let mut found = card.effects.iter().filter(|op| op.kind() == kind);
    match (found.next(), found.count()) {
        (Some(op), 0) => Ok(op),
        (first, rest) => Err(ValidationIssue::OpCount {
            card_type: card.card_type,
            op: kind,
            found: usize::from(first.is_some()) + rest,
        }),
    }
}

fn check_attack(card: &Card, magnitude: i32) -> Result<(), ValidationIssue> {
    forbid(card, &["ip", "discardRandom"])?;

    match exactly_one(card, "ip")? {
        Op::Ip { who: Who::Opponent, v } if *v < 0 => {
            if -v != magnitude {
                return Err(ValidationIssue::MagnitudeMismatch {
                    expected: magnitude,
                    actual: -v,
                });
            }
        }
        _ => return Err(ValidationIssue::AttackShape),
    }

    let discards: Vec<&Op> = card
        .effects
        .iter()
        .filter(|op| op.kind() == "discardRandom")
        .collect();
    match discards.as_slice() {
        [] => Ok(()),
        [Op::DiscardRandom { who: Who::Opponent, n }] => check_discard(card.rarity, *n),
        [_] => Err(ValidationIssue::AttackShape),
        more => Err(ValidationIssue::OpCount {
            card_type: card.card_type,
            op: "discardRandom",
            found: more.len(),
        }),
    }
}

fn check_discard(rarity: Rarity, n: i32) -> Result<(), ValidationIssue> {
    if !(0..=2).contains(&n) {
        return Err(ValidationIssue::DiscardRange { n });
    }
    let allowed = match rarity {
        Rarity::Common | Rarity::Uncommon => n == 0,
        Rarity::Rare => n <= 1,
        Rarity::Legendary => true,
    };
    if allowed {
        Ok(())
    } else {
        Err(ValidationIssue::DiscardRarity { rarity, n })
    }
}

fn check_media(card: &Card, magnitude: i32) -> Result<(), ValidationIssue> {
    forbid(card, &["truth"])?;
    match exactly_one(card, "truth")? {
        Op::Truth { v } if v.abs() == magnitude => Ok(()),
        Op::Truth { v } => Err(ValidationIssue::MagnitudeMismatch {
            expected: magnitude,
            actual: v.abs(),
        }),
        _ => Ok(()),
    }
}

fn check_zone(card: &Card, magnitude: i32) -> Result<(), ValidationIssue> {
    forbid(card, &["pressure"])?;
    match exactly_one(card, "pressure")? {
        Op::Pressure {
            who: Who::Actor,
            state: RegionRef::Target,
            v,
        } if *v > 0 => {
            if *v == magnitude {
                Ok(())
            } else {
                Err(ValidationIssue::MagnitudeMismatch {
                    expected: magnitude,
                    actual: *v,
                })
            }
        }
        _ => Err(ValidationIssue::ZoneShape),
    }
}

fn check_defensive(card: &Card) -> Result<(), ValidationIssue> {
    forbid(card, &["flag", "ip", "draw", "discardRandom", "discardChoice"])?;
    for op in &card.effects {
        if let Op::Flag { name, .. } = op {
            if name != "immune" && name != "blockAttack" {
                return Err(ValidationIssue::ForbiddenOp {
                    card_type: CardType::Defensive,
                    op: "flag",
                });
            }
        }
    }
    Ok(())
}

/// Re-validate every card in play and check numeric invariants.
///
/// Run after every engine transition as a consistency checkpoint.
pub fn assert_state(state: &GameState, tables: &CardTables) -> Result<(), EngineError> {
    for player in state.players.values() {
        validate_pool(player.all_cards(), tables)?;
        if player.ip < 0 {
            return Err(invariant(format!("{} has negative IP {}", player.id, player.ip)));
        }
    }
    if let ReactionState::WindowOpen(request) = &state.reaction {
        validate(&request.card, tables)?;
    }

    if !(TRUTH_MIN..=TRUTH_MAX).contains(&state.truth) {
        return Err(invariant(format!("truth {} outside 0..=100", state.truth)));
    }

    for (region, pressure) in state.regions.iter_pressure() {
        if pressure.values().any(|&p| p < 0) {
            return Err(invariant(format!("negative pressure on {region}")));
        }
        let owners = state
            .players
            .values()
            .filter(|p| p.states.contains(region))
            .count();
        if owners > 1 {
            return Err(invariant(format!("{region} owned by both players")));
        }
    }
    for player in state.players.values() {
        if let Some(region) = player.states.iter().find(|r| !state.regions.contains(r)) {
            return Err(invariant(format!("{} owns unknown region {region}", player.id)));
        }
    }
    Ok(())
}

fn invariant(message: String) -> EngineError {
    warn!(%message, "state invariant violated");
    EngineError::Invariant(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Faction, PlayerId, RulesConfig};
    use crate::regions::RegionId;

    fn attack(rarity: Rarity, damage: i32, discard: Option<i32>) -> Card {
        let mut effects = vec![Op::Ip { who: Who::Opponent, v: -damage }];
        if let Some(n) = discard {
            effects.push(Op::DiscardRandom { who: Who::Opponent, n });
        }
        let cost = CardTables::default().cost(CardType::Attack, rarity);
        Card::new("TR-A", "Exposé", CardType::Attack, Faction::Truth, rarity, cost).with_effects(effects)
    }

    fn issue(card: &Card) -> ValidationIssue {
        validate(card, &CardTables::default()).unwrap_err().issue
    }

    #[test]
    fn test_attack_valid() {
        let tables = CardTables::default();
        assert!(validate(&attack(Rarity::Common, 1, None), &tables).is_ok());
        assert!(validate(&attack(Rarity::Rare, 3, Some(1)), &tables).is_ok());
        assert!(validate(&attack(Rarity::Legendary, 4, Some(2)), &tables).is_ok());
    }

    #[test]
    fn test_attack_discard_gating() {
        assert_eq!(
            issue(&attack(Rarity::Uncommon, 2, Some(1))),
            ValidationIssue::DiscardRarity { rarity: Rarity::Uncommon, n: 1 }
        );
        assert_eq!(
            issue(&attack(Rarity::Rare, 3, Some(2))),
            ValidationIssue::DiscardRarity { rarity: Rarity::Rare, n: 2 }
        );
        assert_eq!(
            issue(&attack(Rarity::Legendary, 4, Some(3))),
            ValidationIssue::DiscardRange { n: 3 }
        );
    }

    #[test]
    fn test_attack_magnitude_and_shape() {
        assert_eq!(
            issue(&attack(Rarity::Common, 2, None)),
            ValidationIssue::MagnitudeMismatch { expected: 1, actual: 2 }
        );

        let self_gain = attack(Rarity::Common, 1, None)
            .with_effects(vec![Op::Ip { who: Who::Actor, v: 1 }]);
        assert_eq!(issue(&self_gain), ValidationIssue::AttackShape);

        let extra = attack(Rarity::Common, 1, None).with_effects(vec![
            Op::Ip { who: Who::Opponent, v: -1 },
            Op::Truth { v: 1 },
        ]);
        assert!(matches!(issue(&extra), ValidationIssue::ForbiddenOp { op: "truth", .. }));
    }

    #[test]
    fn test_cost_and_prefix() {
        let mut card = attack(Rarity::Common, 1, None);
        card.cost = 3;
        assert!(matches!(issue(&card), ValidationIssue::CostMismatch { expected: 2, actual: 3, .. }));

        let mut card = attack(Rarity::Common, 1, None);
        card.faction = Faction::Government;
        assert_eq!(issue(&card), ValidationIssue::BadPrefix { expected: "GV-" });

        let mut card = attack(Rarity::Common, 1, None);
        card.name = " ".into();
        assert_eq!(issue(&card), ValidationIssue::EmptyName);
    }

    #[test]
    fn test_media_rules() {
        let tables = CardTables::default();
        let card = Card::new("GV-M", "Spin", CardType::Media, Faction::Government, Rarity::Rare, 5)
            .with_effects(vec![Op::Truth { v: -3 }]);
        assert!(validate(&card, &tables).is_ok());

        let wrong = card.clone().with_effects(vec![Op::Truth { v: -2 }]);
        assert!(matches!(issue(&wrong), ValidationIssue::MagnitudeMismatch { .. }));

        let empty = card.with_effects(vec![]);
        assert!(matches!(issue(&empty), ValidationIssue::OpCount { found: 0, .. }));
    }

    #[test]
    fn test_zone_rules() {
        let tables = CardTables::default();
        let card = Card::new("TR-Z", "Rally", CardType::Zone, Faction::Truth, Rarity::Common, 4)
            .with_effects(vec![Op::Pressure { who: Who::Actor, state: RegionRef::Target, v: 1 }]);
        assert!(validate(&card, &tables).is_ok());

        let fixed_region = card.clone().with_effects(vec![Op::Pressure {
            who: Who::Actor,
            state: RegionRef::Id(RegionId::from("CA")),
            v: 1,
        }]);
        assert_eq!(issue(&fixed_region), ValidationIssue::ZoneShape);

        let negative = card.with_effects(vec![Op::Pressure { who: Who::Actor, state: RegionRef::Target, v: -1 }]);
        assert_eq!(issue(&negative), ValidationIssue::ZoneShape);
    }

    #[test]
    fn test_defensive_rules() {
        let tables = CardTables::default();
        let card = Card::new("GV-D", "Cover-Up", CardType::Defensive, Faction::Government, Rarity::Common, 2)
            .with_effects(vec![
                Op::Flag { name: "immune".into(), on: true },
                Op::Draw { who: Who::Actor, n: 1 },
            ]);
        assert!(validate(&card, &tables).is_ok());

        let bad_flag = card.clone().with_effects(vec![Op::Flag { name: "doubleTurn".into(), on: true }]);
        assert!(matches!(issue(&bad_flag), ValidationIssue::ForbiddenOp { op: "flag", .. }));

        let bad_factor = card.partial_block(1.5);
        assert_eq!(issue(&bad_factor), ValidationIssue::ReduceFactor(1.5));
    }

    #[test]
    fn test_validate_pool_first_error() {
        let tables = CardTables::default();
        let good = attack(Rarity::Common, 1, None);
        let mut bad = attack(Rarity::Common, 1, None);
        bad.id = "TR-BAD".into();
        bad.cost = 9;

        let err = validate_pool([&good, &bad, &good], &tables).unwrap_err();
        assert_eq!(err.card_id.as_str(), "TR-BAD");
    }

    #[test]
    fn test_assert_state_invariants() {
        let config = RulesConfig::default();
        let mut state = GameState::new(&config, vec![attack(Rarity::Common, 1, None)], vec![], 1);
        assert!(assert_state(&state, &config.tables).is_ok());

        let ca = RegionId::from("CA");
        state.players[PlayerId::P1].states.insert(ca.clone());
        state.players[PlayerId::P2].states.insert(ca);
        assert!(matches!(assert_state(&state, &config.tables), Err(EngineError::Invariant(_))));
    }

    #[test]
    fn test_assert_state_revalidates_cards() {
        let config = RulesConfig::default();
        let mut broken = attack(Rarity::Common, 1, None);
        broken.cost = 7;
        let state = GameState::new(&config, vec![], vec![broken], 1);

        assert!(matches!(assert_state(&state, &config.tables), Err(EngineError::Validation(_))));
    }
}
