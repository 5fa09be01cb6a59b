//! Category store: the label catalog offered by article forms.
//!
//! # Responsibility
//! - Own the category collection and its name lookups.
//! - Answer the duplicate-name question for form validation.
//!
//! # Invariants
//! - The store itself allows any mutation; referential protection for
//!   in-use categories is enforced by the service layer.
//! - Name uniqueness is a validation concern, not a store invariant; a
//!   direct `add` with a duplicate name is accepted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{DEFAULT_CATEGORIES, FALLBACK_CATEGORY_COLOR, FALLBACK_CATEGORY_ICON};
use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};

/// Persisted subset of the category store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategorySnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// In-memory category collection.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    /// Key of this store's snapshot row.
    pub const STORE_KEY: &'static str = "categories";

    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the default category set.
    pub fn with_defaults() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|seed| Category {
                id: Uuid::new_v4(),
                name: seed.name.to_string(),
                color: seed.color.to_string(),
                icon: seed.icon.to_string(),
            })
            .collect();
        Self { categories }
    }

    /// Restores a store from its persisted snapshot.
    pub fn from_snapshot(snapshot: CategorySnapshot) -> Self {
        Self {
            categories: snapshot.categories,
        }
    }

    /// Captures the persisted subset of this store.
    pub fn snapshot(&self) -> CategorySnapshot {
        CategorySnapshot {
            categories: self.categories.clone(),
        }
    }

    /// Adds a category, substituting the neutral fallbacks for a missing
    /// color or icon. Returns the generated id.
    pub fn add(&mut self, input: NewCategory) -> CategoryId {
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name,
            color: input
                .color
                .unwrap_or_else(|| FALLBACK_CATEGORY_COLOR.to_string()),
            icon: input
                .icon
                .unwrap_or_else(|| FALLBACK_CATEGORY_ICON.to_string()),
        };
        let id = category.id;
        self.categories.push(category);
        id
    }

    /// Applies the patch to the matching category. Returns `false` without
    /// touching state when the id is unknown.
    pub fn update(&mut self, id: CategoryId, patch: CategoryPatch) -> bool {
        let Some(category) = self.categories.iter_mut().find(|category| category.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        true
    }

    /// Removes the matching category. Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: CategoryId) -> bool {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        self.categories.len() != before
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Exact-name lookup, used to resolve an article's category styling.
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Whether a trimmed, case-insensitive match for `name` exists,
    /// ignoring the `exclude` id so edit forms do not collide with the
    /// category being edited.
    pub fn is_name_taken(&self, name: &str, exclude: Option<CategoryId>) -> bool {
        let needle = name.trim().to_lowercase();
        self.categories
            .iter()
            .any(|category| Some(category.id) != exclude && category.name.to_lowercase() == needle)
    }

    /// Category names sorted case-insensitively, for pickers.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .categories
            .iter()
            .map(|category| category.name.clone())
            .collect();
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        names
    }

    /// Every category in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
