//! Regions: the fixed map of contested states, their capture thresholds,
//! and per-player pressure.
//!
//! ## Key Types
//!
//! - `RegionId`: two-letter region code (`"CA"`, `"DC"`, ...)
//! - `RegionConfig`: static region data (name, base defense)
//! - `PressureBoard`: pressure per region per player plus live defense
//! - `Capture`: an ownership transfer produced by the board

mod board;

pub use board::{Capture, Captures, PressureBoard, MIN_DEFENSE};

use serde::{Deserialize, Serialize};

/// Region identifier, e.g. `"CA"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Static data for one region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub id: RegionId,
    pub name: String,
    /// Capture threshold at game start.
    pub defense: i32,
}

impl RegionConfig {
    pub fn new(id: impl Into<RegionId>, name: impl Into<String>, defense: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            defense,
        }
    }
}

const DEFAULT_REGIONS: [(&str, &str, i32); 20] = [
    ("CA", "California", 4),
    ("TX", "Texas", 4),
    ("NY", "New York", 5),
    ("FL", "Florida", 2),
    ("IL", "Illinois", 3),
    ("PA", "Pennsylvania", 3),
    ("OH", "Ohio", 3),
    ("GA", "Georgia", 3),
    ("NC", "North Carolina", 3),
    ("MI", "Michigan", 3),
    ("DC", "District of Columbia", 5),
    ("WA", "Washington", 3),
    ("NV", "Nevada", 2),
    ("CO", "Colorado", 2),
    ("VA", "Virginia", 3),
    ("MD", "Maryland", 3),
    ("LA", "Louisiana", 2),
    ("TN", "Tennessee", 2),
    ("AL", "Alabama", 2),
    ("KY", "Kentucky", 2),
];

/// The standard 20-region map.
#[must_use]
pub fn default_regions() -> Vec<RegionConfig> {
    DEFAULT_REGIONS
        .iter()
        .map(|&(id, name, defense)| RegionConfig::new(id, name, defense))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regions() {
        let regions = default_regions();
        assert_eq!(regions.len(), 20);
        assert!(regions.iter().all(|r| (2..=5).contains(&r.defense)));

        let dc = regions.iter().find(|r| r.id.as_str() == "DC").unwrap();
        assert_eq!(dc.defense, 5);
    }

    #[test]
    fn test_region_id_serde_transparent() {
        let id = RegionId::from("NV");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"NV\"");
    }
}
