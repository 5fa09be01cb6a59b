//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical stock record shared by store and service layers.
//! - Provide the pure stock classification helpers (low stock, level bands).
//!
//! # Invariants
//! - `id` is stable and never reused for another article.
//! - `quantity` and `min_quantity` are unsigned; negative stock is
//!   unrepresentable by construction.
//! - `category` holds a category *name*, not an id; an article keeps its
//!   name even if the matching category is deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::inventory::InventoryId;

/// Stable identifier for an article.
pub type ArticleId = Uuid;

/// Display band for a quantity, used by dashboards and list badges.
///
/// The bands are fixed thresholds over the absolute quantity and are
/// independent of the per-article `min_quantity` alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// 0 to 5 units.
    Critical,
    /// 6 to 10 units.
    Low,
    /// 11 to 50 units.
    Normal,
    /// 51 units and above.
    High,
}

impl StockLevel {
    /// Maps a quantity onto its display band.
    pub fn classify(quantity: u32) -> Self {
        match quantity {
            0..=5 => Self::Critical,
            6..=10 => Self::Low,
            11..=50 => Self::Normal,
            _ => Self::High,
        }
    }

    /// Lowercase label for log lines and simple UIs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

/// A tracked stock item inside one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Article {
    pub id: ArticleId,
    pub name: String,
    /// Units currently on hand.
    pub quantity: u32,
    /// Alert threshold; at or below this the article counts as low stock.
    pub min_quantity: u32,
    /// Category name; may be the uncategorized sentinel.
    pub category: String,
    /// Owning inventory. Dangles only between an inventory delete and the
    /// caller-driven cascade that removes the orphans.
    pub inventory_id: InventoryId,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last mutation time in epoch milliseconds.
    pub updated_at: i64,
}

impl Article {
    /// An article is low on stock when it has dropped to its alert
    /// threshold or below. Holds for `min_quantity == 0` only at zero.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    /// Display band for the current quantity.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.quantity)
    }
}

/// Input for creating an article.
///
/// Unspecified fields take the store defaults: zero quantity, an alert
/// threshold of one, the uncategorized sentinel, and the active inventory.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub name: String,
    pub quantity: Option<u32>,
    pub min_quantity: Option<u32>,
    pub category: Option<String>,
    pub inventory_id: Option<InventoryId>,
}

impl NewArticle {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an article. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ArticlePatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub min_quantity: Option<u32>,
    pub category: Option<String>,
    pub inventory_id: Option<InventoryId>,
}

impl ArticlePatch {
    /// Patch that only replaces the quantity.
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}
