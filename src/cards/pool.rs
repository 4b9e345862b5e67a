//! The bundled core card pool.

use super::registry::CardRegistry;
use crate::core::CardTables;
use crate::error::ContentError;

/// Raw JSON of the core pool, both factions.
pub const CORE_CARDS_JSON: &str = include_str!("../../content/core_cards.json");

/// Load and validate the core pool against `tables`.
pub fn core_pool(tables: &CardTables) -> Result<CardRegistry, ContentError> {
    CardRegistry::load_json(CORE_CARDS_JSON, tables)
}
