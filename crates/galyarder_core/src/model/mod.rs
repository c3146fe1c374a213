//! Generic record model shared by every life-management domain.
//!
//! # Responsibility
//! - Define the tagged field value union and the record shape.
//! - Define static field schemas used by forms, list views and stores.
//!
//! # Invariants
//! - Every persisted record carries a stable `RecordId`.
//! - Field schemas are static data and never mutated at runtime.

pub mod record;
pub mod schema;
pub mod value;
