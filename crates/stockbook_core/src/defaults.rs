//! Fixed seed data and display tables.
//!
//! # Responsibility
//! - Provide the category set seeded into a fresh database.
//! - Hold the palette and icon tables the UI offers when creating
//!   categories, plus the neutral fallbacks for unstyled ones.
//!
//! # Invariants
//! - Seed names are unique case-insensitively.
//! - Tables are append-only across releases; persisted data references
//!   entries by value, so removing one would orphan stored categories.

/// Category name assigned to articles created without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Color applied to categories created without an explicit color.
pub const FALLBACK_CATEGORY_COLOR: &str = "#6B7280";

/// Icon applied to categories created without an explicit icon.
pub const FALLBACK_CATEGORY_ICON: &str = "Tag";

/// Name of the inventory seeded into a fresh database.
pub const DEFAULT_INVENTORY_NAME: &str = "Main inventory";

/// Description of the seeded inventory.
pub const DEFAULT_INVENTORY_DESCRIPTION: &str = "Primary working inventory";

/// One entry of the seeded category set.
#[derive(Debug, Clone, Copy)]
pub struct CategorySeed {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Categories seeded into a fresh database, in display order.
pub const DEFAULT_CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        name: "Raw materials",
        color: "#3B82F6",
        icon: "Package",
    },
    CategorySeed {
        name: "Finished goods",
        color: "#10B981",
        icon: "Box",
    },
    CategorySeed {
        name: "Tools",
        color: "#F59E0B",
        icon: "Wrench",
    },
    CategorySeed {
        name: "Supplies",
        color: "#8B5CF6",
        icon: "Clipboard",
    },
    CategorySeed {
        name: "Spare parts",
        color: "#EF4444",
        icon: "Settings",
    },
];

/// Colors offered by category forms, in display order.
pub const CATEGORY_COLORS: &[&str] = &[
    "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EF4444", "#06B6D4", "#84CC16", "#F97316",
    "#EC4899", "#6366F1",
];

/// Icon names offered by category forms, in display order.
pub const CATEGORY_ICONS: &[&str] = &[
    "Package",
    "Box",
    "Wrench",
    "Clipboard",
    "Settings",
    "ShoppingCart",
    "Truck",
    "Factory",
    "Cpu",
    "Zap",
    "Hammer",
    "Scissors",
    "Paintbrush",
    "Beaker",
    "Tag",
];
