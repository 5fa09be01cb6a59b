//! Article store: the collection plus its eagerly derived visible subset.
//!
//! # Responsibility
//! - Own every article across all inventories.
//! - Maintain the filtered view (search, category, active inventory) and
//!   the low-stock selection over the active inventory.
//!
//! # Invariants
//! - `filtered` always equals filtering `articles` with the current
//!   criteria; every mutating call recomputes it before returning.
//! - Quantity arithmetic saturates at zero and `u32::MAX`; no mutation
//!   can produce negative stock.
//! - The store trusts its `active_inventory` mirror; the service layer
//!   keeps it aligned with the authoritative inventory store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::UNCATEGORIZED;
use crate::model::article::{Article, ArticleId, ArticlePatch, NewArticle};
use crate::model::epoch_ms_now;
use crate::model::inventory::InventoryId;

/// Category predicate of the derived view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category matches.
    #[default]
    All,
    /// Exact category-name match.
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// Persisted subset of the article store.
///
/// Filter criteria are session state and deliberately absent; a restored
/// store starts with the neutral filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ArticleSnapshot {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default = "Uuid::nil")]
    pub active_inventory: InventoryId,
}

/// In-memory article collection with an always-fresh filtered view.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    articles: Vec<Article>,
    filtered: Vec<Article>,
    search_term: String,
    category_filter: CategoryFilter,
    active_inventory: InventoryId,
}

impl ArticleStore {
    /// Key of this store's snapshot row.
    pub const STORE_KEY: &'static str = "articles";

    /// Creates an empty store scoped to the given inventory.
    pub fn new(active_inventory: InventoryId) -> Self {
        Self {
            articles: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            category_filter: CategoryFilter::All,
            active_inventory,
        }
    }

    /// Restores a store from its persisted snapshot with neutral filters.
    pub fn from_snapshot(snapshot: ArticleSnapshot) -> Self {
        let mut store = Self::new(snapshot.active_inventory);
        store.articles = snapshot.articles;
        store.recompute_filtered();
        store
    }

    /// Captures the persisted subset of this store.
    pub fn snapshot(&self) -> ArticleSnapshot {
        ArticleSnapshot {
            articles: self.articles.clone(),
            active_inventory: self.active_inventory,
        }
    }

    /// Adds an article, filling unspecified fields with the store defaults:
    /// zero quantity, an alert threshold of one, the uncategorized sentinel,
    /// and the currently active inventory. Returns the generated id.
    pub fn add(&mut self, input: NewArticle) -> ArticleId {
        let now = epoch_ms_now();
        let article = Article {
            id: Uuid::new_v4(),
            name: input.name,
            quantity: input.quantity.unwrap_or(0),
            min_quantity: input.min_quantity.unwrap_or(1),
            category: input.category.unwrap_or_else(|| UNCATEGORIZED.to_string()),
            inventory_id: input.inventory_id.unwrap_or(self.active_inventory),
            created_at: now,
            updated_at: now,
        };
        let id = article.id;
        self.articles.push(article);
        self.recompute_filtered();
        id
    }

    /// Applies the patch to the matching article and refreshes its
    /// `updated_at`. Returns `false` without touching state when the id
    /// is unknown.
    pub fn update(&mut self, id: ArticleId, patch: ArticlePatch) -> bool {
        let Some(article) = self.articles.iter_mut().find(|article| article.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            article.name = name;
        }
        if let Some(quantity) = patch.quantity {
            article.quantity = quantity;
        }
        if let Some(min_quantity) = patch.min_quantity {
            article.min_quantity = min_quantity;
        }
        if let Some(category) = patch.category {
            article.category = category;
        }
        if let Some(inventory_id) = patch.inventory_id {
            article.inventory_id = inventory_id;
        }
        article.updated_at = epoch_ms_now();
        self.recompute_filtered();
        true
    }

    /// Removes the matching article. Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: ArticleId) -> bool {
        let before = self.articles.len();
        self.articles.retain(|article| article.id != id);
        self.recompute_filtered();
        self.articles.len() != before
    }

    /// Removes every article belonging to `inventory_id` and returns how
    /// many were dropped. The cascade counterpart of an inventory delete.
    pub fn remove_by_inventory(&mut self, inventory_id: InventoryId) -> usize {
        let before = self.articles.len();
        self.articles
            .retain(|article| article.inventory_id != inventory_id);
        self.recompute_filtered();
        before - self.articles.len()
    }

    /// Raises the quantity by `amount`, saturating at `u32::MAX`.
    /// Unknown ids are a no-op reported as `false`.
    pub fn increment_quantity(&mut self, id: ArticleId, amount: u32) -> bool {
        let Some(current) = self.get(id).map(|article| article.quantity) else {
            return false;
        };
        self.update(id, ArticlePatch::quantity(current.saturating_add(amount)))
    }

    /// Lowers the quantity by `amount`, clamping at zero.
    /// Unknown ids are a no-op reported as `false`.
    pub fn decrement_quantity(&mut self, id: ArticleId, amount: u32) -> bool {
        let Some(current) = self.get(id).map(|article| article.quantity) else {
            return false;
        };
        self.update(id, ArticlePatch::quantity(current.saturating_sub(amount)))
    }

    /// Sets the quantity to an absolute value.
    /// Unknown ids are a no-op reported as `false`.
    pub fn set_quantity(&mut self, id: ArticleId, quantity: u32) -> bool {
        self.update(id, ArticlePatch::quantity(quantity))
    }

    /// Replaces the search term. Matching is case-insensitive on the name.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute_filtered();
    }

    /// Replaces the category predicate.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
        self.recompute_filtered();
    }

    /// Points the view at another inventory. The store accepts any id;
    /// the service layer is responsible for passing a live one.
    pub fn set_active_inventory(&mut self, inventory_id: InventoryId) {
        self.active_inventory = inventory_id;
        self.recompute_filtered();
    }

    /// Every article across all inventories, in insertion order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// The derived view: search, category, and active-inventory predicates
    /// ANDed together, in insertion order.
    pub fn filtered(&self) -> &[Article] {
        &self.filtered
    }

    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    pub fn active_inventory(&self) -> InventoryId {
        self.active_inventory
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Articles of the active inventory at or below their alert threshold.
    pub fn low_stock(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| {
                article.inventory_id == self.active_inventory && article.is_low_stock()
            })
            .collect()
    }

    /// Distinct category names in first-use order, skipping empty names.
    pub fn used_category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for article in &self.articles {
            if article.category.is_empty() {
                continue;
            }
            if !names.iter().any(|name| name == &article.category) {
                names.push(article.category.clone());
            }
        }
        names
    }

    /// Number of articles referencing the category name, across all
    /// inventories. Drives the category delete guard.
    pub fn count_in_category(&self, name: &str) -> usize {
        self.articles
            .iter()
            .filter(|article| article.category == name)
            .count()
    }

    /// Number of articles belonging to the inventory, ignoring filters.
    pub fn count_in_inventory(&self, inventory_id: InventoryId) -> usize {
        self.articles
            .iter()
            .filter(|article| article.inventory_id == inventory_id)
            .count()
    }

    fn recompute_filtered(&mut self) {
        let term = self.search_term.to_lowercase();
        let filtered = self
            .articles
            .iter()
            .filter(|article| {
                article.name.to_lowercase().contains(&term)
                    && self.category_filter.matches(&article.category)
                    && article.inventory_id == self.active_inventory
            })
            .cloned()
            .collect();
        self.filtered = filtered;
    }
}
