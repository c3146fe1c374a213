//! Core life-management logic for GalyarderOS.
//! Stores, list shaping, form validation and persistence live here; UI
//! layers only call the APIs re-exported below.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod domains;
pub mod form;
pub mod logging;
pub mod model;
pub mod persist;
pub mod store;
pub mod view;
pub mod workspace;

pub use config::{ConfigError, CoreConfig};
pub use dashboard::{DashboardError, DashboardStore, MODULE_CATALOG};
pub use domains::family::UpcomingBirthday;
pub use domains::Domain;
pub use form::draft::{FormError, FormState, Submission};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{field_map, FieldMap, Record, RecordId};
pub use model::schema::{FieldDescriptor, FieldKind, FieldSchema, ValidationErrors};
pub use model::value::FieldValue;
pub use persist::{
    DiagnosticSink, MemoryNamespaceStorage, Namespace, NamespaceStorage, PersistDiagnostic,
    PersistError, PersistStage, SqliteNamespaceStorage,
};
pub use store::entity_store::{EntityStore, Mutation, StoreError, StoreOptions, StoreResult};
pub use view::list_view::{shape_list, ListQuery, SortDirection};
pub use workspace::LifeWorkspace;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
