use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KitchenError;

/// Stable identifier assigned by the item registry.
pub type ItemId = u32;

/// Unit of measure for an item's cooked and wasted quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pieces,
    Kg,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pieces => "pieces",
            Unit::Kg => "kg",
        }
    }

    /// Whether quantities of this unit are counted rather than weighed.
    pub fn is_count(&self) -> bool {
        matches!(self, Unit::Pieces)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pieces" | "piece" | "pcs" => Ok(Unit::Pieces),
            "kg" => Ok(Unit::Kg),
            other => Err(KitchenError::InvalidInput(format!(
                "unknown unit '{}' (use pieces/kg)",
                other
            ))),
        }
    }
}

/// A food item tracked by the kitchen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    pub name: String,

    pub unit: Unit,

    #[serde(rename = "is_active", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            id,
            name: name.into(),
            unit,
            active: true,
        }
    }

    /// Canonical key for name lookups (trimmed, lowercase).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}
