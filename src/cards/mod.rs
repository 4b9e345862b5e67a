//! Card system: definitions, registry and the bundled core pool.
//!
//! ## Key Types
//!
//! - `CardId`: identifier, prefixed by faction (`TR-` / `GV-`)
//! - `Card`: canonical card with its effects as `Vec<Op>`
//! - `RawCard`: authored record, effects in any legacy encoding
//! - `CardRegistry`: validated catalogue passed explicitly to the engine

pub mod definition;
pub mod pool;
pub mod registry;

pub use definition::{Card, CardId, CardType, RawCard, Rarity, PARTIAL_BLOCK_TAG};
pub use pool::{core_pool, CORE_CARDS_JSON};
pub use registry::CardRegistry;
