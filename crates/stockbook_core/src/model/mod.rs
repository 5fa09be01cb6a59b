//! Domain model for inventories, categories, and stock articles.
//!
//! # Responsibility
//! - Define the canonical entity shapes shared by stores and services.
//! - Hold the pure helpers that classify stock without touching state.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID; ids are never reused.
//! - Quantities are unsigned; a stock level below zero cannot be represented.

pub mod article;
pub mod category;
pub mod inventory;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as Unix epoch milliseconds.
///
/// Falls back to `0` when the system clock reports a pre-epoch time.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
