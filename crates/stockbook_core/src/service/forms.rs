//! Form validation for create and edit flows.
//!
//! # Responsibility
//! - Turn raw form input into validated store inputs.
//! - Report every failing field at once, keyed by field, never by panic.
//!
//! # Invariants
//! - Validators are pure; they read stores for duplicate checks but never
//!   mutate anything.
//! - A validator returns either a complete store input or a non-empty
//!   [`FieldErrors`], not both.
//! - Validated names are trimmed; stores receive no padded names.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::model::article::NewArticle;
use crate::model::category::{CategoryId, NewCategory};
use crate::model::inventory::{InventoryId, NewInventory};
use crate::store::category_store::CategoryStore;
use crate::store::inventory_store::InventoryStore;

/// Form fields a validation message can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Quantity,
    MinQuantity,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::MinQuantity => "min_quantity",
        };
        write!(f, "{label}")
    }
}

/// Per-field validation messages. Empty means the form passed.
///
/// Each field keeps its first message; later rules do not overwrite an
/// already-failed field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message attached to the field, when it failed.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn put(&mut self, field: Field, message: &str) {
        self.errors
            .entry(field)
            .or_insert_with(|| message.to_string());
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw input of the article create/edit form.
///
/// Quantities are `None` while the field is blank; signed values let the
/// validator report negative input instead of silently clamping it.
#[derive(Debug, Clone, Default)]
pub struct ArticleForm {
    pub name: String,
    pub quantity: Option<i64>,
    pub min_quantity: Option<i64>,
    /// `None` falls back to the uncategorized sentinel.
    pub category: Option<String>,
    /// `None` targets the active inventory.
    pub inventory_id: Option<InventoryId>,
}

/// Raw input of the category create/edit form.
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    /// Empty falls back to the neutral default color.
    pub color: String,
    /// Empty falls back to the neutral default icon.
    pub icon: String,
}

/// Raw input of the inventory create/edit form.
#[derive(Debug, Clone, Default)]
pub struct InventoryForm {
    pub name: String,
    pub description: String,
}

/// Validates an article form.
///
/// # Contract
/// - `name` must be non-blank.
/// - Both quantities must be present, non-negative, and fit in `u32`.
/// - When both quantities pass on their own, the alert threshold must not
///   exceed the current quantity.
pub fn validate_article(form: &ArticleForm) -> Result<NewArticle, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = form.name.trim();
    if name.is_empty() {
        errors.put(Field::Name, "Name is required");
    }

    let quantity = match form.quantity {
        None => {
            errors.put(Field::Quantity, "Quantity is required");
            None
        }
        Some(value) if value < 0 => {
            errors.put(Field::Quantity, "Quantity cannot be negative");
            None
        }
        Some(value) => match u32::try_from(value) {
            Ok(value) => Some(value),
            Err(_) => {
                errors.put(Field::Quantity, "Quantity is too large");
                None
            }
        },
    };
    let min_quantity = match form.min_quantity {
        None => {
            errors.put(Field::MinQuantity, "Minimum quantity is required");
            None
        }
        Some(value) if value < 0 => {
            errors.put(Field::MinQuantity, "Minimum quantity cannot be negative");
            None
        }
        Some(value) => match u32::try_from(value) {
            Ok(value) => Some(value),
            Err(_) => {
                errors.put(Field::MinQuantity, "Minimum quantity is too large");
                None
            }
        },
    };
    if let (Some(quantity), Some(min)) = (quantity, min_quantity) {
        if min > quantity {
            errors.put(
                Field::MinQuantity,
                "Minimum quantity cannot exceed the current quantity",
            );
        }
    }

    let category = form
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_string);

    errors.into_result(NewArticle {
        name: name.to_string(),
        quantity,
        min_quantity,
        category,
        inventory_id: form.inventory_id,
    })
}

/// Validates a category form against the existing catalog.
///
/// # Contract
/// - `name` must be non-blank and unique case-insensitively, ignoring the
///   category being edited.
pub fn validate_category(
    form: &CategoryForm,
    categories: &CategoryStore,
    editing: Option<CategoryId>,
) -> Result<NewCategory, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = form.name.trim();
    if name.is_empty() {
        errors.put(Field::Name, "Name is required");
    } else if categories.is_name_taken(name, editing) {
        errors.put(Field::Name, "A category with this name already exists");
    }

    let color = non_blank(&form.color);
    let icon = non_blank(&form.icon);
    errors.into_result(NewCategory {
        name: name.to_string(),
        color,
        icon,
    })
}

/// Validates an inventory form against the existing collection.
///
/// # Contract
/// - `name` must be non-blank and unique case-insensitively, ignoring the
///   inventory being edited.
pub fn validate_inventory(
    form: &InventoryForm,
    inventories: &InventoryStore,
    editing: Option<InventoryId>,
) -> Result<NewInventory, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = form.name.trim();
    if name.is_empty() {
        errors.put(Field::Name, "Name is required");
    } else if inventories.is_name_taken(name, editing) {
        errors.put(Field::Name, "An inventory with this name already exists");
    }

    errors.into_result(NewInventory {
        name: name.to_string(),
        description: non_blank(&form.description),
    })
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
