//! Category entity: a display label articles reference by name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// A named grouping with presentation hints for the UI layer.
///
/// Articles reference categories by `name`, not by id, so renaming a
/// category does not implicitly move the articles that use the old name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Hex color such as `#3B82F6`.
    pub color: String,
    /// Icon name from the fixed icon table.
    pub icon: String,
}

/// Input for creating a category. Missing color/icon fall back to the
/// neutral defaults from [`crate::defaults`].
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a category. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}
