//! Dashboard shell state: module catalog and pinned modules.
//!
//! # Responsibility
//! - Enumerate the dashboard module ids.
//! - Persist the user's pinned modules; keep the active module in memory.
//!
//! # Invariants
//! - Pinned ids are unique, catalog members, and keep pin order.
//! - `active_module` is UI-only state and is never persisted.

use crate::persist::{
    decode_payload, encode_payload, Namespace, NamespaceStorage, PersistResult, PersistStage,
};
use crate::store::entity_store::StoreOptions;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAMESPACE: &str = "galyarder.dashboard";

/// Every module the dashboard shell can host.
pub const MODULE_CATALOG: &[&str] = &[
    "overview",
    "finance",
    "sleep",
    "family",
    "spirituality",
    "gratitude",
    "responsibilities",
    "habits",
    "goals",
    "journal",
    "health",
    "fitness",
    "nutrition",
    "learning",
    "reading",
    "career",
    "relationships",
    "mindfulness",
    "productivity",
    "time",
    "calendar",
    "projects",
    "ideas",
    "travel",
    "home",
    "assistant",
    "settings",
];

const DEFAULT_PINNED: &[&str] = &["overview", "finance", "family"];

pub fn is_known_module(id: &str) -> bool {
    MODULE_CATALOG.contains(&id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    UnknownModule(String),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownModule(id) => write!(f, "unknown dashboard module: {id}"),
        }
    }
}

impl Error for DashboardError {}

#[derive(Serialize)]
struct DashboardOut<'a> {
    pinned_modules: &'a [String],
}

#[derive(Deserialize)]
struct DashboardIn {
    #[serde(default)]
    pinned_modules: Vec<String>,
}

/// Pinned-module state of the dashboard shell.
pub struct DashboardStore<S: NamespaceStorage> {
    namespace: Namespace,
    pinned: Vec<String>,
    active_module: Option<String>,
    storage: S,
    options: StoreOptions,
}

impl<S: NamespaceStorage> DashboardStore<S> {
    /// Opens the dashboard state, falling back to the default pins.
    ///
    /// Stored ids missing from the catalog are dropped.
    pub fn open(storage: S, options: StoreOptions) -> Self {
        let namespace = Namespace::from_static(NAMESPACE);
        let pinned = match load_pins(&storage, &namespace) {
            Ok(Some(stored)) => sanitize_pins(stored),
            Ok(None) => DEFAULT_PINNED.iter().map(|id| id.to_string()).collect(),
            Err(err) => {
                options.report(&namespace, PersistStage::Load, &err);
                DEFAULT_PINNED.iter().map(|id| id.to_string()).collect()
            }
        };
        info!(
            "event=store_open module=dashboard status=ok namespace={} pinned={}",
            namespace,
            pinned.len()
        );

        Self {
            namespace,
            pinned,
            active_module: None,
            storage,
            options,
        }
    }

    pub fn pinned(&self) -> &[String] {
        &self.pinned
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|pinned| pinned == id)
    }

    /// Appends `id` to the pins; returns `false` if it was already pinned.
    pub fn pin(&mut self, id: &str) -> Result<bool, DashboardError> {
        ensure_known(id)?;
        if self.is_pinned(id) {
            return Ok(false);
        }
        self.pinned.push(id.to_string());
        self.mirror();
        Ok(true)
    }

    /// Removes `id` from the pins; returns `false` if it was not pinned.
    pub fn unpin(&mut self, id: &str) -> bool {
        let before = self.pinned.len();
        self.pinned.retain(|pinned| pinned != id);
        if self.pinned.len() == before {
            return false;
        }
        self.mirror();
        true
    }

    /// Flips the pin state of `id`; returns whether it is pinned afterwards.
    pub fn toggle_pin(&mut self, id: &str) -> Result<bool, DashboardError> {
        ensure_known(id)?;
        if self.unpin(id) {
            return Ok(false);
        }
        self.pin(id)
    }

    pub fn active_module(&self) -> Option<&str> {
        self.active_module.as_deref()
    }

    pub fn set_active(&mut self, id: Option<&str>) -> Result<(), DashboardError> {
        if let Some(id) = id {
            ensure_known(id)?;
        }
        self.active_module = id.map(str::to_string);
        Ok(())
    }

    fn mirror(&self) {
        let result = encode_payload(&DashboardOut {
            pinned_modules: &self.pinned,
        })
        .and_then(|payload| self.storage.save_namespace(&self.namespace, &payload));
        match result {
            Ok(()) => debug!(
                "event=dashboard_pins module=dashboard status=ok pinned={}",
                self.pinned.len()
            ),
            Err(err) => self
                .options
                .report(&self.namespace, PersistStage::Save, &err),
        }
    }
}

fn ensure_known(id: &str) -> Result<(), DashboardError> {
    if is_known_module(id) {
        Ok(())
    } else {
        Err(DashboardError::UnknownModule(id.to_string()))
    }
}

fn load_pins<S: NamespaceStorage>(
    storage: &S,
    namespace: &Namespace,
) -> PersistResult<Option<Vec<String>>> {
    let Some(payload) = storage.load_namespace(namespace)? else {
        return Ok(None);
    };
    let state: DashboardIn = decode_payload(namespace, &payload)?;
    Ok(Some(state.pinned_modules))
}

fn sanitize_pins(stored: Vec<String>) -> Vec<String> {
    let mut pins: Vec<String> = Vec::with_capacity(stored.len());
    for id in stored {
        if !is_known_module(&id) {
            warn!("event=store_open module=dashboard status=repaired reason=unknown_module");
            continue;
        }
        if !pins.contains(&id) {
            pins.push(id);
        }
    }
    pins
}
