//! Inventory entity: a named container that articles belong to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an inventory.
pub type InventoryId = Uuid;

/// A physical or logical stock location (warehouse, shelf, project box).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Inventory {
    pub id: InventoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Input for creating an inventory. Missing description becomes empty.
#[derive(Debug, Clone, Default)]
pub struct NewInventory {
    pub name: String,
    pub description: Option<String>,
}

impl NewInventory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an inventory. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}
