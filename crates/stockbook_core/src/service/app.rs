//! Persisted application facade over the three stores.
//!
//! # Responsibility
//! - Own the storage connection and the store trio for one database.
//! - Validate input, apply cross-store rules, and persist the owning
//!   store's snapshot after every successful mutation.
//!
//! # Invariants
//! - The inventory store holds the one authoritative active pointer; the
//!   article store's copy is a mirror this facade keeps aligned.
//! - Operations spanning two stores persist both snapshots in a single
//!   transaction.
//! - Mutations that change nothing (unknown ids) skip persistence.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use log::info;
use rusqlite::Connection;

use crate::model::article::{Article, ArticleId, ArticlePatch};
use crate::model::category::{CategoryId, CategoryPatch};
use crate::model::inventory::{InventoryId, InventoryPatch};
use crate::service::forms::{
    validate_article, validate_category, validate_inventory, ArticleForm, CategoryForm,
    FieldErrors, InventoryForm,
};
use crate::storage::{
    encode_snapshot, load_snapshot, open_storage, open_storage_in_memory, write_snapshot,
    write_snapshots, StorageError, StorageResult,
};
use crate::store::article_store::{ArticleSnapshot, ArticleStore, CategoryFilter};
use crate::store::category_store::{CategorySnapshot, CategoryStore};
use crate::store::inventory_store::{InventorySnapshot, InventoryStore};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Form input failed validation; per-field messages inside.
    Invalid(FieldErrors),
    /// Refused to delete the last remaining inventory.
    LastInventory,
    InventoryNotFound(InventoryId),
    CategoryNotFound(CategoryId),
    /// The category is still referenced by articles.
    CategoryInUse { name: String, articles: usize },
    Storage(StorageError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "validation failed: {errors}"),
            Self::LastInventory => write!(f, "cannot delete the last remaining inventory"),
            Self::InventoryNotFound(id) => write!(f, "inventory not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::CategoryInUse { name, articles } => {
                write!(f, "category `{name}` is still used by {articles} article(s)")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<FieldErrors> for AppError {
    fn from(value: FieldErrors) -> Self {
        Self::Invalid(value)
    }
}

/// What to do with referencing articles when a category is renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenamePolicy {
    /// Refuse the rename while any article still uses the old name.
    Reject,
    /// Rewrite referencing articles to the new name, atomically.
    Cascade,
}

/// Headline numbers for the active inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub inventory_name: String,
    pub inventory_description: String,
    /// Articles in the active inventory, ignoring filters.
    pub article_count: usize,
    /// Sum of all quantities in the active inventory.
    pub total_units: u64,
    /// Articles of the active inventory at or below their threshold.
    pub low_stock_count: usize,
}

/// The application core: three stores bound to one snapshot database.
#[derive(Debug)]
pub struct App {
    conn: Connection,
    articles: ArticleStore,
    categories: CategoryStore,
    inventories: InventoryStore,
}

impl App {
    /// Opens (or creates) the snapshot database at `path` and restores
    /// the stores from it.
    ///
    /// # Contract
    /// - A fresh database is seeded with the default inventory and the
    ///   default category set before this returns.
    /// - The article store's inventory mirror is reconciled with the
    ///   authoritative pointer; a reconciled or seeded state is persisted.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let conn = open_storage(path)?;
        Self::restore(conn)
    }

    /// In-memory variant of [`App::open`] for tests and smoke runs.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = open_storage_in_memory()?;
        Self::restore(conn)
    }

    fn restore(mut conn: Connection) -> AppResult<Self> {
        let mut seed_inventories = false;
        let inventories =
            match load_snapshot::<InventorySnapshot>(&conn, InventoryStore::STORE_KEY)? {
                Some(snapshot) if !snapshot.inventories.is_empty() => {
                    InventoryStore::from_snapshot(snapshot)
                }
                // Absent row or an (invalid) empty collection: reseed.
                _ => {
                    seed_inventories = true;
                    InventoryStore::with_default()
                }
            };

        let mut seed_categories = false;
        let categories = match load_snapshot::<CategorySnapshot>(&conn, CategoryStore::STORE_KEY)? {
            Some(snapshot) => CategoryStore::from_snapshot(snapshot),
            None => {
                seed_categories = true;
                CategoryStore::with_defaults()
            }
        };

        let mut persist_articles = false;
        let mut articles = match load_snapshot::<ArticleSnapshot>(&conn, ArticleStore::STORE_KEY)? {
            Some(snapshot) => ArticleStore::from_snapshot(snapshot),
            None => {
                persist_articles = true;
                ArticleStore::new(inventories.active_id())
            }
        };
        if articles.active_inventory() != inventories.active_id() {
            articles.set_active_inventory(inventories.active_id());
            persist_articles = true;
        }

        let mut entries: Vec<(&'static str, String)> = Vec::new();
        if seed_inventories {
            entries.push((
                InventoryStore::STORE_KEY,
                encode_snapshot(InventoryStore::STORE_KEY, &inventories.snapshot())?,
            ));
        }
        if seed_categories {
            entries.push((
                CategoryStore::STORE_KEY,
                encode_snapshot(CategoryStore::STORE_KEY, &categories.snapshot())?,
            ));
        }
        if persist_articles {
            entries.push((
                ArticleStore::STORE_KEY,
                encode_snapshot(ArticleStore::STORE_KEY, &articles.snapshot())?,
            ));
        }
        if !entries.is_empty() {
            write_snapshots(&mut conn, &entries)?;
        }

        info!(
            "event=app_open module=service status=ok inventories={} categories={} articles={} seeded={}",
            inventories.len(),
            categories.len(),
            articles.len(),
            seed_inventories || seed_categories
        );
        Ok(Self {
            conn,
            articles,
            categories,
            inventories,
        })
    }

    /// Validates the form and adds the article to the active inventory
    /// (or the form's explicit one). Returns the new id.
    pub fn create_article(&mut self, form: &ArticleForm) -> AppResult<ArticleId> {
        let input = validate_article(form)?;
        let id = self.articles.add(input);
        self.persist_articles()?;
        Ok(id)
    }

    /// Validates the form and rewrites the matching article with it.
    /// `Ok(false)` when the id is unknown; nothing is persisted then.
    pub fn update_article(&mut self, id: ArticleId, form: &ArticleForm) -> AppResult<bool> {
        let input = validate_article(form)?;
        let patch = ArticlePatch {
            name: Some(input.name),
            quantity: input.quantity,
            min_quantity: input.min_quantity,
            category: input.category,
            inventory_id: input.inventory_id,
        };
        let changed = self.articles.update(id, patch);
        if changed {
            self.persist_articles()?;
        }
        Ok(changed)
    }

    /// Removes one article. `Ok(false)` when the id is unknown.
    pub fn delete_article(&mut self, id: ArticleId) -> AppResult<bool> {
        let removed = self.articles.remove(id);
        if removed {
            self.persist_articles()?;
        }
        Ok(removed)
    }

    /// Raises an article's quantity, saturating at `u32::MAX`.
    pub fn increment_quantity(&mut self, id: ArticleId, amount: u32) -> AppResult<bool> {
        let changed = self.articles.increment_quantity(id, amount);
        if changed {
            self.persist_articles()?;
        }
        Ok(changed)
    }

    /// Lowers an article's quantity, clamping at zero.
    pub fn decrement_quantity(&mut self, id: ArticleId, amount: u32) -> AppResult<bool> {
        let changed = self.articles.decrement_quantity(id, amount);
        if changed {
            self.persist_articles()?;
        }
        Ok(changed)
    }

    /// Sets an article's quantity to an absolute value.
    pub fn set_quantity(&mut self, id: ArticleId, quantity: u32) -> AppResult<bool> {
        let changed = self.articles.set_quantity(id, quantity);
        if changed {
            self.persist_articles()?;
        }
        Ok(changed)
    }

    /// Replaces the search term. Session state only; not persisted.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.articles.set_search_term(term);
    }

    /// Replaces the category filter. Session state only; not persisted.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.articles.set_category_filter(filter);
    }

    /// Validates the form and adds an inventory. The new inventory is not
    /// activated. Returns the new id.
    pub fn create_inventory(&mut self, form: &InventoryForm) -> AppResult<InventoryId> {
        let input = validate_inventory(form, &self.inventories, None)?;
        let id = self.inventories.add(input);
        self.persist_inventories()?;
        Ok(id)
    }

    /// Validates the form and rewrites the matching inventory with it.
    /// `Ok(false)` when the id is unknown.
    pub fn update_inventory(&mut self, id: InventoryId, form: &InventoryForm) -> AppResult<bool> {
        let input = validate_inventory(form, &self.inventories, Some(id))?;
        let patch = InventoryPatch {
            name: Some(input.name),
            description: Some(input.description.unwrap_or_default()),
        };
        let changed = self.inventories.update(id, patch);
        if changed {
            self.persist_inventories()?;
        }
        Ok(changed)
    }

    /// Deletes an inventory together with every article it contains.
    ///
    /// # Contract
    /// - Refused with [`AppError::LastInventory`] while it is the only one.
    /// - When the deleted inventory was active, the pointer moves to the
    ///   first remaining inventory and the article mirror follows.
    /// - Article and inventory snapshots are persisted in one transaction.
    /// - Returns how many articles the cascade removed.
    pub fn delete_inventory(&mut self, id: InventoryId) -> AppResult<usize> {
        if self.inventories.get(id).is_none() {
            return Err(AppError::InventoryNotFound(id));
        }
        if self.inventories.len() <= 1 {
            return Err(AppError::LastInventory);
        }

        let removed_articles = self.articles.remove_by_inventory(id);
        self.inventories.remove(id);
        self.articles
            .set_active_inventory(self.inventories.active_id());

        let entries = vec![
            (
                ArticleStore::STORE_KEY,
                encode_snapshot(ArticleStore::STORE_KEY, &self.articles.snapshot())?,
            ),
            (
                InventoryStore::STORE_KEY,
                encode_snapshot(InventoryStore::STORE_KEY, &self.inventories.snapshot())?,
            ),
        ];
        write_snapshots(&mut self.conn, &entries)?;

        info!(
            "event=inventory_delete module=service status=ok inventory={id} removed_articles={removed_articles}"
        );
        Ok(removed_articles)
    }

    /// Repoints the active inventory and the article mirror, persisting
    /// both stores in one transaction. The id is not validated, matching
    /// the store contract.
    pub fn set_active_inventory(&mut self, id: InventoryId) -> AppResult<()> {
        self.inventories.set_active(id);
        self.articles.set_active_inventory(id);

        let entries = vec![
            (
                ArticleStore::STORE_KEY,
                encode_snapshot(ArticleStore::STORE_KEY, &self.articles.snapshot())?,
            ),
            (
                InventoryStore::STORE_KEY,
                encode_snapshot(InventoryStore::STORE_KEY, &self.inventories.snapshot())?,
            ),
        ];
        write_snapshots(&mut self.conn, &entries)?;
        Ok(())
    }

    /// Removes articles whose inventory no longer exists and returns how
    /// many were dropped. Recovery pass for states written before the
    /// delete cascade existed, or mutated by external tooling.
    pub fn sweep_orphaned_articles(&mut self) -> AppResult<usize> {
        let orphaned: Vec<ArticleId> = self
            .articles
            .articles()
            .iter()
            .filter(|article| self.inventories.get(article.inventory_id).is_none())
            .map(|article| article.id)
            .collect();

        let mut removed = 0;
        for id in orphaned {
            if self.articles.remove(id) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.persist_articles()?;
            info!("event=orphan_sweep module=service status=ok removed_articles={removed}");
        }
        Ok(removed)
    }

    /// Validates the form and adds a category. Returns the new id.
    pub fn create_category(&mut self, form: &CategoryForm) -> AppResult<CategoryId> {
        let input = validate_category(form, &self.categories, None)?;
        let id = self.categories.add(input);
        self.persist_categories()?;
        Ok(id)
    }

    /// Validates the form and rewrites the matching category with it.
    ///
    /// # Contract
    /// - A name change with referencing articles follows `policy`:
    ///   [`RenamePolicy::Reject`] fails with [`AppError::CategoryInUse`],
    ///   [`RenamePolicy::Cascade`] rewrites the articles and persists both
    ///   stores in one transaction.
    /// - Color/icon-only edits never touch articles.
    pub fn update_category(
        &mut self,
        id: CategoryId,
        form: &CategoryForm,
        policy: RenamePolicy,
    ) -> AppResult<()> {
        let Some(current) = self.categories.get(id) else {
            return Err(AppError::CategoryNotFound(id));
        };
        let old_name = current.name.clone();
        let input = validate_category(form, &self.categories, Some(id))?;
        let renaming = input.name != old_name;
        let in_use = self.articles.count_in_category(&old_name);

        if renaming && in_use > 0 {
            match policy {
                RenamePolicy::Reject => {
                    return Err(AppError::CategoryInUse {
                        name: old_name,
                        articles: in_use,
                    });
                }
                RenamePolicy::Cascade => {
                    let new_name = input.name.clone();
                    let affected: Vec<ArticleId> = self
                        .articles
                        .articles()
                        .iter()
                        .filter(|article| article.category == old_name)
                        .map(|article| article.id)
                        .collect();
                    for article_id in affected {
                        self.articles.update(
                            article_id,
                            ArticlePatch {
                                category: Some(new_name.clone()),
                                ..ArticlePatch::default()
                            },
                        );
                    }
                    self.categories.update(
                        id,
                        CategoryPatch {
                            name: Some(input.name),
                            color: input.color,
                            icon: input.icon,
                        },
                    );

                    let entries = vec![
                        (
                            ArticleStore::STORE_KEY,
                            encode_snapshot(ArticleStore::STORE_KEY, &self.articles.snapshot())?,
                        ),
                        (
                            CategoryStore::STORE_KEY,
                            encode_snapshot(CategoryStore::STORE_KEY, &self.categories.snapshot())?,
                        ),
                    ];
                    write_snapshots(&mut self.conn, &entries)?;
                    info!(
                        "event=category_rename module=service status=ok category={id} rewritten_articles={in_use}"
                    );
                    return Ok(());
                }
            }
        }

        self.categories.update(
            id,
            CategoryPatch {
                name: Some(input.name),
                color: input.color,
                icon: input.icon,
            },
        );
        self.persist_categories()?;
        Ok(())
    }

    /// Deletes a category.
    ///
    /// # Contract
    /// - Refused with [`AppError::CategoryInUse`] while any article still
    ///   references the name, across all inventories.
    pub fn delete_category(&mut self, id: CategoryId) -> AppResult<()> {
        let Some(category) = self.categories.get(id) else {
            return Err(AppError::CategoryNotFound(id));
        };
        let name = category.name.clone();
        let in_use = self.articles.count_in_category(&name);
        if in_use > 0 {
            return Err(AppError::CategoryInUse {
                name,
                articles: in_use,
            });
        }

        self.categories.remove(id);
        self.persist_categories()?;
        Ok(())
    }

    pub fn articles(&self) -> &ArticleStore {
        &self.articles
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn inventories(&self) -> &InventoryStore {
        &self.inventories
    }

    /// Low-stock articles of the active inventory.
    pub fn low_stock(&self) -> Vec<&Article> {
        self.articles.low_stock()
    }

    /// Headline numbers for the active inventory.
    ///
    /// All three counts are taken from one pass over the articles, scoped
    /// by the authoritative pointer, so the summary cannot mix scopes.
    pub fn dashboard(&self) -> DashboardSummary {
        let active_id = self.inventories.active_id();
        let (inventory_name, inventory_description) = self
            .inventories
            .active()
            .map(|inventory| (inventory.name.clone(), inventory.description.clone()))
            .unwrap_or_default();

        let mut article_count = 0;
        let mut total_units = 0u64;
        let mut low_stock_count = 0;
        for article in self.articles.articles() {
            if article.inventory_id != active_id {
                continue;
            }
            article_count += 1;
            total_units += u64::from(article.quantity);
            if article.is_low_stock() {
                low_stock_count += 1;
            }
        }

        DashboardSummary {
            inventory_name,
            inventory_description,
            article_count,
            total_units,
            low_stock_count,
        }
    }

    fn persist_articles(&self) -> StorageResult<()> {
        write_snapshot(&self.conn, ArticleStore::STORE_KEY, &self.articles.snapshot())
    }

    fn persist_categories(&self) -> StorageResult<()> {
        write_snapshot(
            &self.conn,
            CategoryStore::STORE_KEY,
            &self.categories.snapshot(),
        )
    }

    fn persist_inventories(&self) -> StorageResult<()> {
        write_snapshot(
            &self.conn,
            InventoryStore::STORE_KEY,
            &self.inventories.snapshot(),
        )
    }
}
