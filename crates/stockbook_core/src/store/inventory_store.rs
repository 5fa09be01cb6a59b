//! Inventory store: the containers articles belong to, plus the active pointer.
//!
//! # Responsibility
//! - Own the inventory collection and the single authoritative
//!   active-inventory pointer.
//! - Guarantee at least one inventory always exists.
//!
//! # Invariants
//! - `remove` refuses to empty the collection; the last inventory stays.
//! - After a successful `remove` the active pointer resolves to a live
//!   inventory (first remaining, by collection order).
//! - `set_active` does not validate the id; stale pointers are healed on
//!   restore and on delete, not on assignment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{DEFAULT_INVENTORY_DESCRIPTION, DEFAULT_INVENTORY_NAME};
use crate::model::epoch_ms_now;
use crate::model::inventory::{Inventory, InventoryId, InventoryPatch, NewInventory};

/// Persisted subset of the inventory store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InventorySnapshot {
    #[serde(default)]
    pub inventories: Vec<Inventory>,
    #[serde(default = "Uuid::nil")]
    pub active_inventory: InventoryId,
}

/// In-memory inventory collection with the authoritative active pointer.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    inventories: Vec<Inventory>,
    active: InventoryId,
}

impl InventoryStore {
    /// Key of this store's snapshot row.
    pub const STORE_KEY: &'static str = "inventories";

    /// Creates a store holding the seeded default inventory, active.
    pub fn with_default() -> Self {
        let inventory = Inventory {
            id: Uuid::new_v4(),
            name: DEFAULT_INVENTORY_NAME.to_string(),
            description: DEFAULT_INVENTORY_DESCRIPTION.to_string(),
            created_at: epoch_ms_now(),
        };
        let active = inventory.id;
        Self {
            inventories: vec![inventory],
            active,
        }
    }

    /// Restores a store from its persisted snapshot.
    ///
    /// A pointer that no longer resolves (stale snapshot, nil default) is
    /// healed to the first inventory so the invariant holds from load on.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        let mut store = Self {
            inventories: snapshot.inventories,
            active: snapshot.active_inventory,
        };
        if store.get(store.active).is_none() {
            if let Some(first) = store.inventories.first() {
                store.active = first.id;
            }
        }
        store
    }

    /// Captures the persisted subset of this store.
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            inventories: self.inventories.clone(),
            active_inventory: self.active,
        }
    }

    /// Adds an inventory and returns the generated id. The new inventory
    /// does not become active.
    pub fn add(&mut self, input: NewInventory) -> InventoryId {
        let inventory = Inventory {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description.unwrap_or_default(),
            created_at: epoch_ms_now(),
        };
        let id = inventory.id;
        self.inventories.push(inventory);
        id
    }

    /// Applies the patch to the matching inventory. Returns `false`
    /// without touching state when the id is unknown.
    pub fn update(&mut self, id: InventoryId, patch: InventoryPatch) -> bool {
        let Some(inventory) = self
            .inventories
            .iter_mut()
            .find(|inventory| inventory.id == id)
        else {
            return false;
        };
        if let Some(name) = patch.name {
            inventory.name = name;
        }
        if let Some(description) = patch.description {
            inventory.description = description;
        }
        true
    }

    /// Removes the matching inventory.
    ///
    /// Refused (returning `false`) when it would remove the last remaining
    /// inventory or when the id is unknown. When the removed inventory was
    /// active, the pointer moves to the first remaining one.
    pub fn remove(&mut self, id: InventoryId) -> bool {
        if self.inventories.len() <= 1 {
            return false;
        }
        let before = self.inventories.len();
        self.inventories.retain(|inventory| inventory.id != id);
        if self.inventories.len() == before {
            return false;
        }
        if self.active == id {
            if let Some(first) = self.inventories.first() {
                self.active = first.id;
            }
        }
        true
    }

    /// Repoints the active inventory. The id is not validated here.
    pub fn set_active(&mut self, id: InventoryId) {
        self.active = id;
    }

    /// The authoritative active pointer.
    pub fn active_id(&self) -> InventoryId {
        self.active
    }

    /// The active inventory, when the pointer resolves.
    pub fn active(&self) -> Option<&Inventory> {
        self.get(self.active)
    }

    pub fn get(&self, id: InventoryId) -> Option<&Inventory> {
        self.inventories.iter().find(|inventory| inventory.id == id)
    }

    /// Whether a trimmed, case-insensitive match for `name` exists,
    /// ignoring the `exclude` id so edit forms do not collide with the
    /// inventory being edited.
    pub fn is_name_taken(&self, name: &str, exclude: Option<InventoryId>) -> bool {
        let needle = name.trim().to_lowercase();
        self.inventories.iter().any(|inventory| {
            Some(inventory.id) != exclude && inventory.name.to_lowercase() == needle
        })
    }

    /// Every inventory in insertion order.
    pub fn inventories(&self) -> &[Inventory] {
        &self.inventories
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_heals_a_dangling_pointer() {
        let store = InventoryStore::with_default();
        let mut snapshot = store.snapshot();
        snapshot.active_inventory = Uuid::new_v4();

        let restored = InventoryStore::from_snapshot(snapshot);
        assert_eq!(
            Some(restored.active_id()),
            restored.inventories().first().map(|inv| inv.id)
        );
    }

    #[test]
    fn restore_keeps_a_valid_pointer() {
        let mut store = InventoryStore::with_default();
        let second = store.add(NewInventory::named("Workshop"));
        store.set_active(second);

        let restored = InventoryStore::from_snapshot(store.snapshot());
        assert_eq!(restored.active_id(), second);
    }
}
