//! UI-agnostic data shaping for list screens.
//!
//! # Responsibility
//! - Filter records by free-text query and order them by one field.
//!
//! # Invariants
//! - Shaping never mutates the source collection.

pub mod list_view;
