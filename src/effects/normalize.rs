//! Effect normalizer: every legacy encoding to one canonical op list.
//!
//! Accepted shapes:
//! - a flat object (`{"truthDelta": 2, "ipDelta": {"opponent": 1}}`)
//! - an array of typed mini-ops (`[{"k":"ip","who":"opponent","v":-2}]`),
//!   either as JSON or as a JSON-encoded string
//! - a legacy conditional object (`{"if": {...}, "then": ..., "else": ...}`)
//!
//! The boundary is lenient: anything unreadable is dropped with a warning,
//! never an error. Output is always passed through [`merge`], which makes
//! `normalize` idempotent on its own serialized output.

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tracing::warn;

use super::effect::{round_half_up, Cmp, ModStat, Op, Predicate, RegionRef, Stat, Who};
use crate::cards::CardId;

/// Flat keys read by the normalizer, in application order.
const FLAT_KEYS: &[&str] = &[
    "truthDelta",
    "antiTruthDelta",
    "ipDelta",
    "ipSelf",
    "ipOpponent",
    "draw",
    "drawSelf",
    "drawOpponent",
    "discardOpponent",
    "discardRandom",
    "discardChoice",
    "discardOpponentChoice",
    "pressureDelta",
    "defenseDelta",
    "zoneDefense",
    "development",
    "addCardId",
    "flags",
    "if",
    "then",
    "else",
];

/// Keys that belong to the card rather than its effects.
const IGNORED_KEYS: &[&str] = &["reduceFactor", "duration", "conditional"];

/// Normalize any effect value.
///
/// ```
/// use serde_json::json;
/// use shadowgov_engine::effects::{normalize, Op, Who};
///
/// let ops = normalize(&json!({ "truthDelta": 2, "antiTruthDelta": 1, "draw": 1 }));
/// assert_eq!(ops, vec![Op::Truth { v: 3 }, Op::Draw { who: Who::Actor, n: 1 }]);
/// ```
#[must_use]
pub fn normalize(raw: &Value) -> Vec<Op> {
    let mut ops = Vec::new();
    collect(raw, &mut ops);
    merge(ops)
}

/// Normalize a JSON-encoded effect value.
#[must_use]
pub fn normalize_str(raw: &str) -> Vec<Op> {
    normalize(&Value::String(raw.to_string()))
}

fn collect(raw: &Value, out: &mut Vec<Op>) {
    match raw {
        Value::Null => {}
        Value::String(text) => {
            if text.trim().is_empty() {
                return;
            }
            match serde_json::from_str::<Value>(text) {
                Ok(Value::String(_)) => warn!("effect string decodes to another string, ignored"),
                Ok(parsed) => collect(&parsed, out),
                Err(error) => warn!(%error, "unparsable effect string, no effects produced"),
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(map) => mini_op(map, out),
                    other => warn!(item = %other, "non-object mini-op ignored"),
                }
            }
        }
        Value::Object(map) if map.contains_key("k") => mini_op(map, out),
        Value::Object(map) => flat(map, out),
        other => warn!(value = %other, "unsupported effect value ignored"),
    }
}

// === Flat objects ===

fn flat(map: &Map<String, Value>, out: &mut Vec<Op>) {
    let before = out.len();

    for key in FLAT_KEYS {
        let Some(value) = map.get(*key) else {
            continue;
        };
        match *key {
            "truthDelta" | "antiTruthDelta" => push_num(value, key, out, |v| Op::Truth { v }),
            "ipDelta" => ip_delta(value, out),
            "ipSelf" => push_num(value, key, out, |v| Op::Ip { who: Who::Actor, v }),
            "ipOpponent" => push_num(value, key, out, |v| Op::Ip { who: Who::Opponent, v }),
            "draw" | "drawSelf" => push_num(value, key, out, |n| Op::Draw { who: Who::Actor, n }),
            "drawOpponent" => push_num(value, key, out, |n| Op::Draw { who: Who::Opponent, n }),
            "discardOpponent" | "discardRandom" => push_num(value, key, out, |n| {
                Op::DiscardRandom { who: Who::Opponent, n }
            }),
            "discardChoice" | "discardOpponentChoice" => push_num(value, key, out, |n| {
                Op::DiscardChoice { who: Who::Opponent, n }
            }),
            "pressureDelta" => pressure_delta(value, out),
            "defenseDelta" => defense_delta(value, out),
            "zoneDefense" => push_num(value, key, out, |v| Op::Modifier {
                who: Who::Actor,
                stat: ModStat::ZoneDefense,
                v,
            }),
            "development" => development(value, out),
            "addCardId" => match value.as_str() {
                Some(id) if !id.is_empty() => out.push(Op::AddCard {
                    who: Who::Actor,
                    card_id: CardId::from(id),
                }),
                _ => warn!(%value, "addCardId must be a non-empty string"),
            },
            "flags" => match value.as_object() {
                Some(flags) => {
                    for (name, on) in flags {
                        flag(name, on, out);
                    }
                }
                None => warn!(%value, "flags must be an object"),
            },
            "if" => conditional(map, out),
            _ => {}
        }
    }

    let unknown: Vec<&str> = map
        .keys()
        .map(String::as_str)
        .filter(|k| !FLAT_KEYS.contains(k) && !IGNORED_KEYS.contains(k))
        .collect();
    if !unknown.is_empty() {
        warn!(?unknown, "unknown effect keys ignored");
    }
    if out.len() == before && !map.keys().all(|k| IGNORED_KEYS.contains(&k.as_str())) {
        warn!("flat effect object produced no effects");
    }
}

fn ip_delta(value: &Value, out: &mut Vec<Op>) {
    match value {
        Value::Object(parts) => {
            if let Some(v) = parts.get("self").and_then(int) {
                out.push(Op::Ip { who: Who::Actor, v });
            }
            // Opponent figure is a loss magnitude.
            if let Some(v) = parts.get("opponent").and_then(int) {
                out.push(Op::Ip {
                    who: Who::Opponent,
                    v: v.saturating_neg(),
                });
            }
        }
        other => push_num(other, "ipDelta", out, |v| Op::Ip { who: Who::Actor, v }),
    }
}

fn pressure_delta(value: &Value, out: &mut Vec<Op>) {
    match value {
        Value::Object(parts) => {
            let Some(who) = who_field(parts, Who::Actor) else {
                return;
            };
            let Some(v) = num_field(parts) else {
                return;
            };
            out.push(Op::Pressure {
                who,
                state: region_field(parts),
                v,
            });
        }
        other => push_num(other, "pressureDelta", out, |v| Op::Pressure {
            who: Who::Actor,
            state: RegionRef::Target,
            v,
        }),
    }
}

fn defense_delta(value: &Value, out: &mut Vec<Op>) {
    match value {
        Value::Object(parts) => {
            if let Some(v) = num_field(parts) {
                out.push(Op::Defense {
                    state: region_field(parts),
                    v,
                });
            }
        }
        other => push_num(other, "defenseDelta", out, |v| Op::Defense {
            state: RegionRef::Target,
            v,
        }),
    }
}

fn development(value: &Value, out: &mut Vec<Op>) {
    let Some(parts) = value.as_object() else {
        warn!(%value, "development must be an object");
        return;
    };
    for (name, amount) in parts {
        let Some(stat) = mod_stat(name) else {
            warn!(name = %name, "unknown development kind ignored");
            continue;
        };
        if let Some(v) = int(amount) {
            out.push(Op::Modifier {
                who: Who::Actor,
                stat,
                v,
            });
        }
    }
}

fn conditional(map: &Map<String, Value>, out: &mut Vec<Op>) {
    let has_branch = map.contains_key("then") || map.contains_key("else");
    let Some(predicate) = map.get("if").and_then(predicate) else {
        return;
    };
    if !has_branch {
        warn!("conditional without then/else ignored");
        return;
    }
    out.push(Op::Conditional {
        predicate,
        then: map.get("then").map(normalize).unwrap_or_default(),
        otherwise: map.get("else").map(normalize).unwrap_or_default(),
    });
}

fn predicate(value: &Value) -> Option<Predicate> {
    let parts = value.as_object()?;
    let stat = parts.get("stat").and_then(Value::as_str);
    let op = parts.get("op").and_then(Value::as_str).and_then(Cmp::parse);
    let rhs = parts.get("value").and_then(int);

    match (stat, op, rhs) {
        (Some(stat), Some(op), Some(value)) => {
            let stat = Stat::from(stat.to_string());
            if let Stat::Other(name) = &stat {
                warn!(stat = %name, "unknown conditional stat reads as 0");
            }
            Some(Predicate { stat, op, value })
        }
        _ => {
            warn!(%value, "malformed conditional predicate ignored");
            None
        }
    }
}

/// Numeric `zoneCostReduction` and `bonusDraw` become a modifier and a draw.
/// Any non-numeric value, booleans included, stays a plain flag so canonical
/// output reads back unchanged.
fn flag(name: &str, value: &Value, out: &mut Vec<Op>) {
    let amount = match value {
        Value::Number(_) | Value::String(_) => int(value),
        _ => None,
    };
    match (name, amount) {
        ("zoneCostReduction", Some(v)) => out.push(Op::Modifier {
            who: Who::Actor,
            stat: ModStat::ZoneCost,
            v: v.saturating_neg(),
        }),
        ("bonusDraw", Some(n)) => out.push(Op::Draw { who: Who::Actor, n }),
        _ => out.push(Op::Flag {
            name: name.to_string(),
            on: truthy(value),
        }),
    }
}

// === Mini-ops ===

fn mini_op(item: &Map<String, Value>, out: &mut Vec<Op>) {
    let Some(kind) = item.get("k").and_then(Value::as_str) else {
        warn!("mini-op without a string `k` ignored");
        return;
    };

    match kind {
        "truth" => {
            if let Some(v) = num_field(item) {
                out.push(Op::Truth { v });
            }
        }
        "ip" => {
            if let (Some(who), Some(v)) = (who_field(item, Who::Actor), num_field(item)) {
                out.push(Op::Ip { who, v });
            }
        }
        "draw" => {
            if let (Some(who), Some(n)) = (who_field(item, Who::Actor), num_field(item)) {
                out.push(Op::Draw { who, n });
            }
        }
        "discardRandom" | "discardOpponent" => {
            if let (Some(who), Some(n)) = (who_field(item, Who::Opponent), num_field(item)) {
                out.push(Op::DiscardRandom { who, n });
            }
        }
        "discardChoice" => {
            if let (Some(who), Some(n)) = (who_field(item, Who::Opponent), num_field(item)) {
                out.push(Op::DiscardChoice { who, n });
            }
        }
        "pressure" => {
            if let (Some(who), Some(v)) = (who_field(item, Who::Actor), num_field(item)) {
                out.push(Op::Pressure {
                    who,
                    state: region_field(item),
                    v,
                });
            }
        }
        "defense" => {
            if let Some(v) = num_field(item) {
                out.push(Op::Defense {
                    state: region_field(item),
                    v,
                });
            }
        }
        "zoneDefense" => {
            if let (Some(who), Some(v)) = (who_field(item, Who::Actor), num_field(item)) {
                out.push(Op::Modifier {
                    who,
                    stat: ModStat::ZoneDefense,
                    v,
                });
            }
        }
        "modifier" | "development" => {
            let name = item
                .get("stat")
                .or_else(|| item.get("type"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let Some(stat) = mod_stat(name) else {
                warn!(stat = %name, "unknown modifier ignored");
                return;
            };
            if let (Some(who), Some(v)) = (who_field(item, Who::Actor), num_field(item)) {
                out.push(Op::Modifier { who, stat, v });
            }
        }
        "addCard" => {
            let id = item
                .get("cardId")
                .or_else(|| item.get("id"))
                .and_then(Value::as_str);
            match (who_field(item, Who::Actor), id) {
                (Some(who), Some(id)) if !id.is_empty() => out.push(Op::AddCard {
                    who,
                    card_id: CardId::from(id),
                }),
                _ => warn!("addCard without a card id ignored"),
            }
        }
        "flag" => {
            let Some(name) = item.get("name").and_then(Value::as_str) else {
                warn!("flag without a name ignored");
                return;
            };
            match item.get("on").or_else(|| item.get("value")) {
                Some(on) => flag(name, on, out),
                None => out.push(Op::Flag {
                    name: name.to_string(),
                    on: true,
                }),
            }
        }
        "conditional" => conditional(item, out),
        "special" => {
            match item
                .get("fn")
                .or_else(|| item.get("name"))
                .and_then(Value::as_str)
            {
                Some(name) if !name.is_empty() => out.push(Op::Special {
                    name: name.to_string(),
                }),
                _ => warn!("special without a name ignored"),
            }
        }
        "reduceFactor" => {}
        other => warn!(kind = %other, "unknown mini-op kind ignored"),
    }
}

// === Field helpers ===

fn int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n.as_f64().map(round_half_up),
        },
        Value::String(s) => s.trim().parse::<f64>().ok().map(round_half_up),
        Value::Bool(b) => Some(i32::from(*b)),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn push_num(value: &Value, key: &str, out: &mut Vec<Op>, build: impl FnOnce(i32) -> Op) {
    match int(value) {
        Some(v) => out.push(build(v)),
        None => warn!(key, %value, "non-numeric effect value ignored"),
    }
}

fn num_field(item: &Map<String, Value>) -> Option<i32> {
    let found = ["v", "n", "value"]
        .iter()
        .find_map(|key| item.get(*key))
        .and_then(int);
    if found.is_none() {
        warn!(item = ?item, "op without a numeric value ignored");
    }
    found
}

fn who_field(item: &Map<String, Value>, default: Who) -> Option<Who> {
    match item.get("who").or_else(|| item.get("target")) {
        None | Some(Value::Null) => Some(default),
        Some(Value::String(raw)) => {
            let who = Who::parse(raw);
            if who.is_none() {
                warn!(who = %raw, "unknown player reference, op ignored");
            }
            who
        }
        Some(other) => {
            warn!(who = %other, "player reference must be a string, op ignored");
            None
        }
    }
}

fn region_field(item: &Map<String, Value>) -> RegionRef {
    item.get("state")
        .or_else(|| item.get("region"))
        .and_then(Value::as_str)
        .map_or(RegionRef::Target, |id| RegionRef::from(id.to_string()))
}

fn mod_stat(name: &str) -> Option<ModStat> {
    match name {
        "income" => Some(ModStat::Income),
        "mediaCost" => Some(ModStat::MediaCost),
        "zoneCost" => Some(ModStat::ZoneCost),
        "zoneDefense" => Some(ModStat::ZoneDefense),
        _ => None,
    }
}

// === Merge ===

#[derive(Clone, PartialEq, Eq, Hash)]
enum MergeKey {
    Truth,
    Ip(Who),
    Draw(Who),
    DiscardRandom(Who),
    DiscardChoice(Who),
    Pressure(Who, RegionRef),
    Defense(RegionRef),
    Modifier(Who, ModStat),
    Flag(String),
}

fn merge_key(op: &Op) -> Option<MergeKey> {
    match op {
        Op::Truth { .. } => Some(MergeKey::Truth),
        Op::Ip { who, .. } => Some(MergeKey::Ip(*who)),
        Op::Draw { who, .. } => Some(MergeKey::Draw(*who)),
        Op::DiscardRandom { who, .. } => Some(MergeKey::DiscardRandom(*who)),
        Op::DiscardChoice { who, .. } => Some(MergeKey::DiscardChoice(*who)),
        Op::Pressure { who, state, .. } => Some(MergeKey::Pressure(*who, state.clone())),
        Op::Defense { state, .. } => Some(MergeKey::Defense(state.clone())),
        Op::Modifier { who, stat, .. } => Some(MergeKey::Modifier(*who, *stat)),
        Op::Flag { name, .. } => Some(MergeKey::Flag(name.clone())),
        Op::AddCard { .. } | Op::Conditional { .. } | Op::Special { .. } => None,
    }
}

fn amount(op: &Op) -> Option<i32> {
    match op {
        Op::Truth { v }
        | Op::Ip { v, .. }
        | Op::Pressure { v, .. }
        | Op::Defense { v, .. }
        | Op::Modifier { v, .. }
        | Op::Draw { n: v, .. }
        | Op::DiscardRandom { n: v, .. }
        | Op::DiscardChoice { n: v, .. } => Some(*v),
        _ => None,
    }
}

fn amount_mut(op: &mut Op) -> Option<&mut i32> {
    match op {
        Op::Truth { v }
        | Op::Ip { v, .. }
        | Op::Pressure { v, .. }
        | Op::Defense { v, .. }
        | Op::Modifier { v, .. }
        | Op::Draw { n: v, .. }
        | Op::DiscardRandom { n: v, .. }
        | Op::DiscardChoice { n: v, .. } => Some(v),
        _ => None,
    }
}

fn accumulate(slot: &mut Op, next: Op) {
    if matches!(next, Op::Flag { .. }) {
        *slot = next;
        return;
    }
    if let (Some(total), Some(add)) = (amount_mut(slot), amount(&next)) {
        *total = total.saturating_add(add);
    }
}

fn is_empty(op: &Op) -> bool {
    match op {
        Op::Conditional {
            then, otherwise, ..
        } => then.is_empty() && otherwise.is_empty(),
        other => amount(other) == Some(0),
    }
}

/// Combine ops of the same kind and key.
///
/// Numeric ops accumulate in the position of their first occurrence, flags
/// keep the last value written, and ops that sum to zero are dropped.
/// Conditional branches are merged independently.
#[must_use]
pub fn merge(ops: Vec<Op>) -> Vec<Op> {
    let mut out: Vec<Op> = Vec::with_capacity(ops.len());
    let mut slots: FxHashMap<MergeKey, usize> = FxHashMap::default();

    for op in ops {
        let op = match op {
            Op::Conditional {
                predicate,
                then,
                otherwise,
            } => Op::Conditional {
                predicate,
                then: merge(then),
                otherwise: merge(otherwise),
            },
            other => other,
        };

        match merge_key(&op) {
            Some(key) => match slots.get(&key) {
                Some(&index) => accumulate(&mut out[index], op),
                None => {
                    slots.insert(key, out.len());
                    out.push(op);
                }
            },
            None => out.push(op),
        }
    }

    out.retain(|op| !is_empty(op));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionId;
    use serde_json::json;

    #[test]
    fn test_flat_ip_delta_object() {
        let ops = normalize(&json!({ "ipDelta": { "self": 1, "opponent": 2 } }));
        assert_eq!(
            ops,
            vec![Op::Ip { who: Who::Actor, v: 1 }, Op::Ip { who: Who::Opponent, v: -2 }]
        );
    }

    #[test]
    fn test_flat_ip_delta_number() {
        let ops = normalize(&json!({ "ipDelta": 3 }));
        assert_eq!(ops, vec![Op::Ip { who: Who::Actor, v: 3 }]);
    }

    #[test]
    fn test_flat_pressure_forms() {
        let ops = normalize(&json!({ "pressureDelta": 2 }));
        assert_eq!(ops, vec![Op::Pressure { who: Who::Actor, state: RegionRef::Target, v: 2 }]);

        let ops = normalize(&json!({ "pressureDelta": { "state": "TX", "who": "ai", "v": 1 } }));
        assert_eq!(
            ops,
            vec![Op::Pressure {
                who: Who::Opponent,
                state: RegionRef::Id(RegionId::from("TX")),
                v: 1
            }]
        );
    }

    #[test]
    fn test_attack_shape() {
        let ops = normalize(&json!({ "ipDelta": { "opponent": 2 }, "discardOpponent": 1 }));
        assert_eq!(
            ops,
            vec![
                Op::Ip { who: Who::Opponent, v: -2 },
                Op::DiscardRandom { who: Who::Opponent, n: 1 },
            ]
        );
    }

    #[test]
    fn test_mini_op_array_and_aliases() {
        let ops = normalize(&json!([
            { "k": "truth", "value": 2 },
            { "k": "ip", "who": "player", "v": 1 },
            { "k": "discardOpponent", "value": 1 },
            { "k": "pressure", "v": 2 },
            { "k": "flag", "name": "immune", "value": true },
        ]));
        assert_eq!(
            ops,
            vec![
                Op::Truth { v: 2 },
                Op::Ip { who: Who::Actor, v: 1 },
                Op::DiscardRandom { who: Who::Opponent, n: 1 },
                Op::Pressure { who: Who::Actor, state: RegionRef::Target, v: 2 },
                Op::Flag { name: "immune".into(), on: true },
            ]
        );
    }

    #[test]
    fn test_json_string_input() {
        let ops = normalize_str(r#"[{"k":"truth","v":-3},{"k":"truth","v":1}]"#);
        assert_eq!(ops, vec![Op::Truth { v: -2 }]);
    }

    #[test]
    fn test_malformed_string_is_empty() {
        assert!(normalize_str("[{\"k\": \"truth\", ").is_empty());
        assert!(normalize(&json!("not json at all")).is_empty());
    }

    #[test]
    fn test_unknown_kind_and_bad_items_dropped() {
        let ops = normalize(&json!([7, { "k": "teleport" }, { "k": "draw", "n": 2 }]));
        assert_eq!(ops, vec![Op::Draw { who: Who::Actor, n: 2 }]);
    }

    #[test]
    fn test_duplicates_accumulate_at_first_position() {
        let ops = merge(vec![
            Op::Truth { v: 1 },
            Op::Ip { who: Who::Actor, v: 2 },
            Op::Truth { v: 2 },
            Op::Ip { who: Who::Opponent, v: -1 },
            Op::Ip { who: Who::Actor, v: 1 },
        ]);
        assert_eq!(
            ops,
            vec![
                Op::Truth { v: 3 },
                Op::Ip { who: Who::Actor, v: 3 },
                Op::Ip { who: Who::Opponent, v: -1 },
            ]
        );
    }

    #[test]
    fn test_zero_sum_dropped_and_flags_last_wins() {
        let ops = merge(vec![
            Op::Truth { v: 2 },
            Op::Flag { name: "immune".into(), on: true },
            Op::Truth { v: -2 },
            Op::Flag { name: "immune".into(), on: false },
        ]);
        assert_eq!(ops, vec![Op::Flag { name: "immune".into(), on: false }]);
    }

    #[test]
    fn test_legacy_conditional() {
        let ops = normalize(&json!({
            "if": { "stat": "truth", "op": ">=", "value": 60 },
            "then": { "truthDelta": 2 },
            "else": [{ "k": "ip", "who": "player", "v": 1 }]
        }));
        assert_eq!(
            ops,
            vec![Op::Conditional {
                predicate: Predicate { stat: Stat::Truth, op: Cmp::Ge, value: 60 },
                then: vec![Op::Truth { v: 2 }],
                otherwise: vec![Op::Ip { who: Who::Actor, v: 1 }],
            }]
        );
    }

    #[test]
    fn test_development_and_zone_defense() {
        let ops = normalize(&json!({
            "zoneDefense": 1,
            "development": { "income": 2, "mediaCost": -1 },
            "flags": { "zoneCostReduction": 1 }
        }));
        assert_eq!(
            ops,
            vec![
                Op::Modifier { who: Who::Actor, stat: ModStat::ZoneDefense, v: 1 },
                Op::Modifier { who: Who::Actor, stat: ModStat::Income, v: 2 },
                Op::Modifier { who: Who::Actor, stat: ModStat::MediaCost, v: -1 },
                Op::Modifier { who: Who::Actor, stat: ModStat::ZoneCost, v: -1 },
            ]
        );
    }

    #[test]
    fn test_idempotent_on_serialized_output() {
        let raw = json!({
            "truthDelta": 1,
            "ipDelta": { "self": 2, "opponent": 1 },
            "addCardId": "TR-009",
            "flags": { "blockAttack": true },
            "if": { "stat": "ipOpponent", "op": "<", "value": 5 },
            "then": { "discardChoice": 1 }
        });
        let once = normalize(&raw);
        let twice = normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
        assert_eq!(merge(once.clone()), once);
    }

    #[test]
    fn test_single_mini_op_object() {
        let ops = normalize(&json!({ "k": "special", "fn": "leakDossier" }));
        assert_eq!(ops, vec![Op::Special { name: "leakDossier".into() }]);
    }
}
