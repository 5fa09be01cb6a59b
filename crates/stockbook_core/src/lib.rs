//! Core domain logic for stockbook, a local-first inventory tracker.
//! This crate is the single source of truth for stock invariants.

pub mod defaults;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::article::{Article, ArticleId, ArticlePatch, NewArticle, StockLevel};
pub use model::category::{Category, CategoryId, CategoryPatch, NewCategory};
pub use model::inventory::{Inventory, InventoryId, InventoryPatch, NewInventory};
pub use service::app::{App, AppError, AppResult, DashboardSummary, RenamePolicy};
pub use service::forms::{
    validate_article, validate_category, validate_inventory, ArticleForm, CategoryForm, Field,
    FieldErrors, InventoryForm,
};
pub use storage::{StorageError, StorageResult};
pub use store::article_store::{ArticleSnapshot, ArticleStore, CategoryFilter};
pub use store::category_store::{CategorySnapshot, CategoryStore};
pub use store::inventory_store::{InventorySnapshot, InventoryStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
