//! Per-domain entity stores.
//!
//! # Responsibility
//! - Own one collection and expose CRUD plus listing over it.
//! - Mirror every applied mutation to namespaced storage.
//!
//! # Invariants
//! - Record ids are unique within a store.
//! - Required schema fields are non-empty on every stored record.
//! - Missing ids are a silent no-op unless strict mode is enabled.

pub mod entity_store;
