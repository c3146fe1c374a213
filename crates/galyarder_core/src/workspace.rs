//! Application-wide store container.
//!
//! # Responsibility
//! - Construct every domain store and the dashboard store once, from one
//!   storage handle and one set of options.
//! - Hand stores to callers by reference instead of global singletons.
//!
//! # Invariants
//! - Each domain has exactly one store per workspace.

use crate::dashboard::DashboardStore;
use crate::domains::family::{upcoming_birthdays, UpcomingBirthday};
use crate::domains::Domain;
use crate::persist::NamespaceStorage;
use crate::store::entity_store::{EntityStore, StoreOptions};
use chrono::NaiveDate;
use log::info;

/// Every store of one application session.
pub struct LifeWorkspace<S: NamespaceStorage + Clone> {
    pub family: EntityStore<S>,
    pub sleep: EntityStore<S>,
    pub gratitude: EntityStore<S>,
    pub responsibilities: EntityStore<S>,
    pub spiritual: EntityStore<S>,
    pub dashboard: DashboardStore<S>,
}

impl<S: NamespaceStorage + Clone> LifeWorkspace<S> {
    /// Opens all stores over `storage`, each rehydrating its namespace.
    pub fn open(storage: S, options: StoreOptions) -> Self {
        let open_store = |domain: Domain| {
            EntityStore::open(
                domain.namespace(),
                domain.schema(),
                domain.seed(),
                storage.clone(),
                options.clone(),
            )
        };

        let workspace = Self {
            family: open_store(Domain::Family),
            sleep: open_store(Domain::Sleep),
            gratitude: open_store(Domain::Gratitude),
            responsibilities: open_store(Domain::Responsibility),
            spiritual: open_store(Domain::Spiritual),
            dashboard: DashboardStore::open(storage.clone(), options.clone()),
        };
        info!(
            "event=workspace_open module=workspace status=ok stores={}",
            Domain::ALL.len()
        );
        workspace
    }

    pub fn store(&self, domain: Domain) -> &EntityStore<S> {
        match domain {
            Domain::Family => &self.family,
            Domain::Sleep => &self.sleep,
            Domain::Gratitude => &self.gratitude,
            Domain::Responsibility => &self.responsibilities,
            Domain::Spiritual => &self.spiritual,
        }
    }

    pub fn store_mut(&mut self, domain: Domain) -> &mut EntityStore<S> {
        match domain {
            Domain::Family => &mut self.family,
            Domain::Sleep => &mut self.sleep,
            Domain::Gratitude => &mut self.gratitude,
            Domain::Responsibility => &mut self.responsibilities,
            Domain::Spiritual => &mut self.spiritual,
        }
    }

    /// Family birthdays in `[today, today + within_days]`.
    pub fn upcoming_birthdays(&self, today: NaiveDate, within_days: u32) -> Vec<UpcomingBirthday> {
        upcoming_birthdays(self.family.records(), today, within_days)
    }
}
