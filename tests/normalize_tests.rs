//! Effect normalizer tests.
//!
//! These tests feed the normalizer the encodings found in card content:
//! - flat legacy objects and their aliases
//! - mini-op arrays, raw or JSON-encoded
//! - legacy conditionals
//! - malformed input degrading to nothing
//! - idempotence on canonical output

use proptest::prelude::*;
use serde_json::json;

use shadowgov_engine::cards::{CardId, RawCard};
use shadowgov_engine::effects::{merge, normalize, normalize_str, Cmp, ModStat, Op, Predicate, RegionRef, Stat, Who};
use shadowgov_engine::regions::RegionId;

// === Legacy shapes ===

/// Every flat key used by the old card files lands on a canonical op.
#[test]
fn test_flat_object_full_coverage() {
    let ops = normalize(&json!({
        "truthDelta": 2,
        "ipDelta": { "self": 1, "opponent": 3 },
        "drawOpponent": 1,
        "discardOpponent": 2,
        "pressureDelta": { "state": "OH", "v": 1 },
        "defenseDelta": -1,
        "addCardId": "GV-099"
    }));

    assert_eq!(
        ops,
        vec![
            Op::Truth { v: 2 },
            Op::Ip { who: Who::Actor, v: 1 },
            Op::Ip { who: Who::Opponent, v: -3 },
            Op::Draw { who: Who::Opponent, n: 1 },
            Op::DiscardRandom { who: Who::Opponent, n: 2 },
            Op::Pressure { who: Who::Actor, state: RegionRef::Id(RegionId::from("OH")), v: 1 },
            Op::Defense { state: RegionRef::Target, v: -1 },
            Op::AddCard { who: Who::Actor, card_id: CardId::from("GV-099") },
        ]
    );
}

/// Numbers written as strings or floats are accepted and rounded half up.
#[test]
fn test_loose_numbers() {
    assert_eq!(normalize(&json!({ "truthDelta": "3" })), vec![Op::Truth { v: 3 }]);
    assert_eq!(normalize(&json!({ "truthDelta": 1.5 })), vec![Op::Truth { v: 2 }]);
    assert_eq!(normalize(&json!({ "truthDelta": -1.5 })), vec![Op::Truth { v: -1 }]);
}

/// The same effect written three ways gives one answer.
#[test]
fn test_encodings_agree() {
    let flat = normalize(&json!({ "ipDelta": { "opponent": 2 }, "discardOpponent": 1 }));
    let array = normalize(&json!([
        { "k": "ip", "who": "opponent", "v": -2 },
        { "k": "discardRandom", "who": "opponent", "n": 1 }
    ]));
    let string = normalize_str(r#"[{"k":"ip","who":"ai","v":-2},{"k":"discardOpponent","value":1}]"#);

    assert_eq!(flat, array);
    assert_eq!(array, string);
}

/// A JSON string holding a flat object is decoded first.
#[test]
fn test_string_wrapped_flat_object() {
    let ops = normalize(&json!("{\"truthDelta\": -3}"));
    assert_eq!(ops, vec![Op::Truth { v: -3 }]);
}

/// Conditionals nest their branches through the same normalizer.
#[test]
fn test_conditional_branches_normalized() {
    let ops = normalize(&json!({
        "if": { "stat": "zonesControlled", "op": ">", "value": 2 },
        "then": "[{\"k\":\"truth\",\"v\":1},{\"k\":\"truth\",\"v\":1}]"
    }));

    assert_eq!(
        ops,
        vec![Op::Conditional {
            predicate: Predicate { stat: Stat::ZonesControlled, op: Cmp::Gt, value: 2 },
            then: vec![Op::Truth { v: 2 }],
            otherwise: vec![],
        }]
    );
}

/// A conditional with an unreadable predicate is dropped whole.
#[test]
fn test_conditional_bad_predicate_dropped() {
    let ops = normalize(&json!({
        "truthDelta": 1,
        "if": { "stat": "truth", "op": "~", "value": 1 },
        "then": { "truthDelta": 5 }
    }));
    assert_eq!(ops, vec![Op::Truth { v: 1 }]);
}

// === Malformed input ===

/// Broken input never panics and never produces ops.
#[test]
fn test_malformed_inputs_are_empty() {
    assert!(normalize_str("{not json").is_empty());
    assert!(normalize_str("").is_empty());
    assert!(normalize(&json!(null)).is_empty());
    assert!(normalize(&json!(12)).is_empty());
    assert!(normalize(&json!("\"double encoded\"")).is_empty());
    assert!(normalize(&json!([{ "k": "ip", "who": "nobody", "v": 1 }])).is_empty());
}

/// Unknown keys are dropped while known keys still apply.
#[test]
fn test_unknown_keys_ignored() {
    let ops = normalize(&json!({ "truthDelta": 1, "sparkle": 9, "reduceFactor": 0.5 }));
    assert_eq!(ops, vec![Op::Truth { v: 1 }]);
}

// === Accumulation ===

/// Repeated ops on the same key collapse into one.
#[test]
fn test_accumulation_across_encodings() {
    let ops = normalize(&json!([
        { "k": "pressure", "v": 1 },
        { "k": "modifier", "stat": "income", "v": 1 },
        { "k": "pressure", "state": "target", "v": 2 },
        { "k": "development", "type": "income", "value": 2 },
        { "k": "pressure", "state": "TX", "v": 1 }
    ]));

    assert_eq!(
        ops,
        vec![
            Op::Pressure { who: Who::Actor, state: RegionRef::Target, v: 3 },
            Op::Modifier { who: Who::Actor, stat: ModStat::Income, v: 3 },
            Op::Pressure { who: Who::Actor, state: RegionRef::Id(RegionId::from("TX")), v: 1 },
        ]
    );
}

// === Flags ===

/// Numeric draw and cost-reduction flags become ops; booleans stay flags.
#[test]
fn test_alias_flags_by_value() {
    let ops = normalize(&json!({ "flags": { "bonusDraw": 2, "curfew": true, "zoneCostReduction": "1" } }));
    assert_eq!(
        ops,
        vec![
            Op::Draw { who: Who::Actor, n: 2 },
            Op::Flag { name: "curfew".to_string(), on: true },
            Op::Modifier { who: Who::Actor, stat: ModStat::ZoneCost, v: -1 },
        ]
    );

    let ops = normalize(&json!([
        { "k": "flag", "name": "bonusDraw", "on": true },
        { "k": "flag", "name": "zoneCostReduction", "on": false }
    ]));
    assert_eq!(
        ops,
        vec![
            Op::Flag { name: "bonusDraw".to_string(), on: true },
            Op::Flag { name: "zoneCostReduction".to_string(), on: false },
        ]
    );
}

/// A mini-op flag without a value is switched on and reads back the same.
#[test]
fn test_valueless_flag_round_trips() {
    for name in ["bonusDraw", "zoneCostReduction", "immune"] {
        let once = normalize(&json!([{ "k": "flag", "name": name }]));
        assert_eq!(once, vec![Op::Flag { name: name.to_string(), on: true }]);

        let twice = normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(twice, once);
    }
}

/// Extreme loss and reduction figures saturate instead of overflowing.
#[test]
fn test_extreme_negations_saturate() {
    let ops = normalize(&json!({
        "ipDelta": { "opponent": i32::MIN },
        "flags": { "zoneCostReduction": i32::MIN }
    }));
    assert_eq!(
        ops,
        vec![
            Op::Ip { who: Who::Opponent, v: i32::MAX },
            Op::Modifier { who: Who::Actor, stat: ModStat::ZoneCost, v: i32::MAX },
        ]
    );
}

// === Cards ===

/// Raw card records run their effects through the normalizer.
#[test]
fn test_raw_card_normalizes_effects() {
    let raw: RawCard = serde_json::from_value(json!({
        "id": "TR-031",
        "name": "Counter-Narrative",
        "type": "DEFENSIVE",
        "faction": "truth",
        "rarity": "uncommon",
        "cost": 3,
        "tags": { "partialBlock": true, "promo": false },
        "effects": { "reduceFactor": 0.25, "ipDelta": { "self": 1 } }
    }))
    .unwrap();

    let card = raw.into_card();

    assert_eq!(card.effects, vec![Op::Ip { who: Who::Actor, v: 1 }]);
    assert_eq!(card.tags, vec!["partialBlock".to_string()]);
    assert_eq!(card.reduce_factor, Some(0.25));
    assert!(card.is_partial_block());
}

// === Idempotence ===

fn who() -> impl Strategy<Value = Who> {
    prop_oneof![Just(Who::Actor), Just(Who::Opponent), Just(Who::P1), Just(Who::P2)]
}

fn region() -> impl Strategy<Value = RegionRef> {
    prop_oneof![
        Just(RegionRef::Target),
        Just(RegionRef::Id(RegionId::from("CA"))),
        Just(RegionRef::Id(RegionId::from("NV"))),
    ]
}

fn mod_stat() -> impl Strategy<Value = ModStat> {
    prop_oneof![
        Just(ModStat::Income),
        Just(ModStat::MediaCost),
        Just(ModStat::ZoneCost),
        Just(ModStat::ZoneDefense),
    ]
}

fn leaf_op() -> impl Strategy<Value = Op> {
    let amount = -6i32..=6;
    prop_oneof![
        amount.clone().prop_map(|v| Op::Truth { v }),
        (who(), amount.clone()).prop_map(|(who, v)| Op::Ip { who, v }),
        (who(), 0i32..=3).prop_map(|(who, n)| Op::Draw { who, n }),
        (who(), 0i32..=3).prop_map(|(who, n)| Op::DiscardRandom { who, n }),
        (who(), 0i32..=3).prop_map(|(who, n)| Op::DiscardChoice { who, n }),
        (who(), region(), amount.clone()).prop_map(|(who, state, v)| Op::Pressure { who, state, v }),
        (region(), amount.clone()).prop_map(|(state, v)| Op::Defense { state, v }),
        (who(), mod_stat(), amount).prop_map(|(who, stat, v)| Op::Modifier { who, stat, v }),
        (who(), prop_oneof![Just("TR-050"), Just("GV-050")])
            .prop_map(|(who, id)| Op::AddCard { who, card_id: CardId::from(id) }),
        (
            prop_oneof![
                Just("immune"),
                Just("blockAttack"),
                Just("curfew"),
                Just("bonusDraw"),
                Just("zoneCostReduction"),
            ],
            any::<bool>(),
        )
            .prop_map(|(name, on)| Op::Flag { name: name.to_string(), on }),
        Just(Op::Special { name: "leakDossier".to_string() }),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    let conditional = (
        prop_oneof![Just(Stat::Truth), Just(Stat::IpOpponent), Just(Stat::Round)],
        prop_oneof![Just(Cmp::Ge), Just(Cmp::Lt), Just(Cmp::Ne)],
        0i32..=100,
        prop::collection::vec(leaf_op(), 0..4),
        prop::collection::vec(leaf_op(), 0..4),
    )
        .prop_map(|(stat, op, value, then, otherwise)| Op::Conditional {
            predicate: Predicate { stat, op, value },
            then,
            otherwise,
        });
    prop_oneof![4 => leaf_op(), 1 => conditional]
}

proptest! {
    /// Normalizing canonical output changes nothing.
    #[test]
    fn prop_normalize_idempotent(ops in prop::collection::vec(op(), 0..12)) {
        let once = merge(ops);
        let value = serde_json::to_value(&once).unwrap();
        prop_assert_eq!(normalize(&value), once.clone());

        let text = serde_json::to_string(&once).unwrap();
        prop_assert_eq!(normalize_str(&text), once);
    }

    /// Merging leaves at most one numeric op per kind and key.
    #[test]
    fn prop_merge_no_zero_amounts(ops in prop::collection::vec(leaf_op(), 0..16)) {
        let merged = merge(ops);
        for op in &merged {
            let zero = matches!(
                op,
                Op::Truth { v: 0 }
                    | Op::Ip { v: 0, .. }
                    | Op::Draw { n: 0, .. }
                    | Op::DiscardRandom { n: 0, .. }
                    | Op::DiscardChoice { n: 0, .. }
                    | Op::Pressure { v: 0, .. }
                    | Op::Defense { v: 0, .. }
                    | Op::Modifier { v: 0, .. }
            );
            prop_assert!(!zero, "zero amount survived: {:?}", op);
        }
        prop_assert_eq!(merge(merged.clone()), merged);
    }
}
