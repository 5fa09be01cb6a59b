//! In-memory state containers, one per entity collection.
//!
//! # Responsibility
//! - Own the article, category, and inventory collections and their
//!   collection-local invariants.
//! - Expose snapshot conversions so the service layer can persist and
//!   restore each store independently.
//!
//! # Invariants
//! - Stores never touch each other; cross-store rules (cascades, guards,
//!   pointer propagation) live in the service layer.
//! - Mutations are synchronous and infallible; absent ids make a mutation
//!   a no-op reported through its return value.

pub mod article_store;
pub mod category_store;
pub mod inventory_store;
