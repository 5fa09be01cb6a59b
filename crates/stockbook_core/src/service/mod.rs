//! Use-case layer: form validation and the persisted application facade.
//!
//! # Responsibility
//! - Validate form input before it reaches the stores.
//! - Coordinate cross-store rules and persist snapshots after mutations.
//!
//! # Invariants
//! - Stores are only reachable through [`app::App`] in normal operation;
//!   direct store use is for tests and embedders with their own plumbing.

pub mod app;
pub mod forms;
