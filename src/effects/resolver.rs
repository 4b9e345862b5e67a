//! Effect resolution - applying canonical ops to game state.
//!
//! `EffectResolver` is the only code path that mutates state on behalf of a
//! card. It works on a `&mut GameState` the caller has already cloned, with
//! an [`ApplyContext`] naming the acting player, the play's target region and
//! the registries effects may consult.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::effect::{ModStat, Op, Predicate, Stat};
use crate::cards::{Card, CardId, CardRegistry};
use crate::core::{GameState, PlayerId, RulesConfig};
use crate::regions::{Captures, RegionId};

/// Named hook invoked by `special` ops.
pub type SpecialFn = Box<dyn Fn(&mut GameState, PlayerId, Option<&RegionId>) + Send + Sync>;

/// Explicit registry of special effect hooks.
///
/// ```
/// use shadowgov_engine::effects::SpecialRegistry;
///
/// let specials = SpecialRegistry::new()
///     .with("doubleTruth", |state, _actor, _target| state.add_truth(state.truth));
/// assert!(specials.contains("doubleTruth"));
/// ```
#[derive(Default)]
pub struct SpecialRegistry {
    hooks: FxHashMap<String, SpecialFn>,
}

impl SpecialRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook, replacing any hook with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut GameState, PlayerId, Option<&RegionId>) + Send + Sync + 'static,
    ) {
        self.hooks.insert(name.into(), Box::new(hook));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut GameState, PlayerId, Option<&RegionId>) + Send + Sync + 'static,
    ) -> Self {
        self.register(name, hook);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SpecialFn> {
        self.hooks.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for SpecialRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.hooks.keys().collect();
        names.sort();
        f.debug_struct("SpecialRegistry").field("hooks", &names).finish()
    }
}

/// Picks the cards a player discards for `discardChoice` ops.
///
/// Returned ids that are not in hand are ignored; any shortfall is filled
/// at random.
pub trait DiscardChooser: Send + Sync {
    fn choose(&self, state: &GameState, player: PlayerId, count: usize) -> Vec<CardId>;
}

/// Discards the cheapest cards first.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheapestFirst;

impl DiscardChooser for CheapestFirst {
    fn choose(&self, state: &GameState, player: PlayerId, count: usize) -> Vec<CardId> {
        let mut hand: Vec<&Card> = state.players[player].hand.iter().collect();
        hand.sort_by_key(|card| card.cost);
        hand.into_iter().take(count).map(|card| card.id.clone()).collect()
    }
}

/// Context for resolving ops.
pub struct ApplyContext<'a> {
    /// Player relative references resolve against.
    pub actor: PlayerId,
    /// Region the play was aimed at.
    pub target: Option<&'a RegionId>,
    pub config: &'a RulesConfig,
    /// Lookup for `addCard`.
    pub cards: &'a CardRegistry,
    pub specials: &'a SpecialRegistry,
    pub chooser: &'a dyn DiscardChooser,
}

/// What resolution changed beyond plain numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub captures: Captures,
    /// Ops that could not be resolved (unknown region, card or hook).
    pub skipped: usize,
}

/// Resolves ops on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply ops in order.
    pub fn apply(state: &mut GameState, ops: &[Op], ctx: &ApplyContext<'_>) -> ApplyReport {
        let mut report = ApplyReport::default();
        for op in ops {
            Self::apply_one(state, op, ctx, &mut report);
        }
        report
    }

    fn apply_one(state: &mut GameState, op: &Op, ctx: &ApplyContext<'_>, report: &mut ApplyReport) {
        match op {
            Op::Truth { v } => state.add_truth(*v),

            Op::Ip { who, v } => state.players[who.resolve(ctx.actor)].add_ip(*v),

            Op::Draw { who, n } => {
                let player = who.resolve(ctx.actor);
                let drawn = draw_capped(state, player, count(*n), ctx.config.effect_draw_cap);
                debug!(%player, drawn, "effect draw");
            }

            Op::DiscardRandom { who, n } => {
                discard_random(state, who.resolve(ctx.actor), count(*n));
            }

            Op::DiscardChoice { who, n } => {
                let player = who.resolve(ctx.actor);
                let wanted = count(*n);
                let picks = ctx.chooser.choose(state, player, wanted);
                let mut discarded = 0;
                for id in picks.iter().take(wanted) {
                    let hand_owner = &mut state.players[player];
                    if let Some(card) = hand_owner.take_from_hand(id) {
                        hand_owner.discard.push_back(card);
                        discarded += 1;
                    }
                }
                discard_random(state, player, wanted - discarded);
                debug!(%player, chosen = discarded, wanted, "discard by choice");
            }

            Op::Pressure { who, state: region, v } => {
                let Some(region) = region.resolve(ctx.target) else {
                    warn!("pressure op without a target region skipped");
                    report.skipped += 1;
                    return;
                };
                if !state.regions.contains(region) {
                    warn!(%region, "pressure on unknown region skipped");
                    report.skipped += 1;
                    return;
                }
                let region = region.clone();
                if let Some(capture) = state.add_pressure(&region, who.resolve(ctx.actor), *v) {
                    report.captures.push(capture);
                }
            }

            Op::Defense { state: region, v } => {
                let adjusted = region
                    .resolve(ctx.target)
                    .cloned()
                    .and_then(|id| state.regions.adjust_defense(&id, *v));
                if adjusted.is_none() {
                    warn!(?region, "defense op on unknown region skipped");
                    report.skipped += 1;
                }
            }

            Op::AddCard { who, card_id } => {
                let Some(card) = ctx.cards.get(card_id) else {
                    warn!(%card_id, "addCard for unregistered card skipped");
                    report.skipped += 1;
                    return;
                };
                let player = &mut state.players[who.resolve(ctx.actor)];
                if player.hand.len() < ctx.config.effect_draw_cap {
                    player.hand.push_back(card.clone());
                } else {
                    player.discard.push_back(card.clone());
                }
            }

            Op::Flag { name, on } => match name.as_str() {
                "immune" => state.turn_flags[ctx.actor].immune = *on,
                "blockAttack" => state.turn_flags[ctx.actor].block_attack = *on,
                _ => {
                    state.flags.insert(name.clone(), *on);
                }
            },

            Op::Modifier { who, stat, v } => {
                let player = &mut state.players[who.resolve(ctx.actor)];
                match stat {
                    ModStat::Income => player.passive_income = player.passive_income.saturating_add(*v),
                    ModStat::MediaCost => player.cost_mods.media = player.cost_mods.media.saturating_add(*v),
                    ModStat::ZoneCost => player.cost_mods.zone = player.cost_mods.zone.saturating_add(*v),
                    ModStat::ZoneDefense => {
                        player.zone_defense_bonus = player.zone_defense_bonus.saturating_add(*v);
                    }
                }
            }

            Op::Conditional {
                predicate,
                then,
                otherwise,
            } => {
                let branch = if holds(state, predicate, ctx.actor) {
                    then
                } else {
                    otherwise
                };
                for op in branch {
                    Self::apply_one(state, op, ctx, report);
                }
            }

            Op::Special { name } => match ctx.specials.get(name) {
                Some(hook) => hook(state, ctx.actor, ctx.target),
                None => {
                    warn!(special = %name, "unregistered special effect skipped");
                    report.skipped += 1;
                }
            },
        }
    }
}

fn count(n: i32) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Draw `n` cards; cards beyond `cap` go straight to the discard pile.
/// Stops quietly when deck and discard are both empty.
pub(crate) fn draw_capped(state: &mut GameState, player: PlayerId, n: usize, cap: usize) -> usize {
    let GameState { players, rng, .. } = state;
    let seat = &mut players[player];
    let mut drawn = 0;
    for _ in 0..n {
        let Some(card) = seat.pop_deck(rng) else {
            break;
        };
        if seat.hand.len() < cap {
            seat.hand.push_back(card);
        } else {
            seat.discard.push_back(card);
        }
        drawn += 1;
    }
    drawn
}

/// Discard up to `n` cards chosen uniformly at random.
pub(crate) fn discard_random(state: &mut GameState, player: PlayerId, n: usize) -> usize {
    let GameState { players, rng, .. } = state;
    let seat = &mut players[player];
    let mut discarded = 0;
    for _ in 0..n {
        if seat.hand.is_empty() {
            break;
        }
        let index = rng.gen_index(seat.hand.len());
        let card = seat.hand.remove(index);
        debug!(%player, card = %card.id, "random discard");
        seat.discard.push_back(card);
        discarded += 1;
    }
    discarded
}

fn read_stat(state: &GameState, stat: &Stat, actor: PlayerId) -> i32 {
    let to_i32 = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
    match stat {
        Stat::Truth => state.truth,
        Stat::IpSelf => state.players[actor].ip,
        Stat::IpOpponent => state.players[actor.opponent()].ip,
        Stat::ZonesControlled => to_i32(state.players[actor].states.len()),
        Stat::Round => i32::try_from(state.round()).unwrap_or(i32::MAX),
        Stat::Other(_) => 0,
    }
}

/// Evaluate a predicate from the actor's point of view.
#[must_use]
pub fn holds(state: &GameState, predicate: &Predicate, actor: PlayerId) -> bool {
    predicate
        .op
        .eval(read_stat(state, &predicate.stat, actor), predicate.value)
}
