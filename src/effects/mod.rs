//! Card effects: the canonical op set, the normalizer and the applier.
//!
//! - `Op`: tagged union of everything a card can do
//! - `normalize`: any legacy encoding (flat object, mini-op array, JSON
//!   string, nested conditional) into an ordered `Vec<Op>`
//! - `EffectResolver`: the one place ops mutate a `GameState`
//!
//! Relative references (`Who::Actor`, `Who::Opponent`, `RegionRef::Target`)
//! stay symbolic until application, where the `ApplyContext` resolves them.

mod effect;
mod normalize;
mod resolver;

pub use effect::{round_half_up, Cmp, ModStat, Op, Predicate, RegionRef, Stat, Who};
pub use normalize::{merge, normalize, normalize_str};
pub use resolver::{
    holds, ApplyContext, ApplyReport, CheapestFirst, DiscardChooser, EffectResolver, SpecialFn,
    SpecialRegistry,
};

pub(crate) use resolver::draw_capped;
