//! Draft editing and submission.
//!
//! # Responsibility
//! - Hold per-field draft values for create and edit flows.
//! - Coerce raw text input by field kind and validate before submission.
//!
//! # Invariants
//! - A draft with validation errors never reaches a store.

pub mod draft;
