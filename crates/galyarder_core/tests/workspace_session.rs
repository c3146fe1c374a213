use chrono::NaiveDate;
use galyarder_core::db::open_db;
use galyarder_core::domains::{responsibility, sleep};
use galyarder_core::{
    field_map, Domain, LifeWorkspace, MemoryNamespaceStorage, SqliteNamespaceStorage,
    StoreOptions,
};

#[test]
fn fresh_workspace_starts_from_seeds() {
    let storage = MemoryNamespaceStorage::new();
    let workspace = LifeWorkspace::open(&storage, StoreOptions::default());

    for domain in Domain::ALL {
        assert_eq!(workspace.store(domain).records(), domain.seed().as_slice());
    }
    assert_eq!(workspace.dashboard.pinned(), ["overview", "finance", "family"]);
    assert!(storage.keys().is_empty());
}

#[test]
fn mutations_in_one_store_only_touch_its_namespace() {
    let storage = MemoryNamespaceStorage::new();
    let mut workspace = LifeWorkspace::open(&storage, StoreOptions::default());

    workspace.store_mut(Domain::Sleep).delete("1").unwrap();

    assert_eq!(storage.keys(), vec![sleep::NAMESPACE.to_string()]);
    assert_eq!(workspace.sleep.len(), 2);
    assert_eq!(workspace.family.len(), 3);
}

#[test]
fn workspace_state_survives_reopen_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("galyarder.db");

    {
        let conn = open_db(&path).unwrap();
        let mut workspace =
            LifeWorkspace::open(SqliteNamespaceStorage::new(&conn), StoreOptions::default());
        workspace
            .responsibilities
            .update("1", field_map([("completed", true)]))
            .unwrap();
        workspace.dashboard.pin("sleep").unwrap();
        workspace.dashboard.set_active(Some("sleep")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let workspace =
        LifeWorkspace::open(SqliteNamespaceStorage::new(&conn), StoreOptions::default());
    let pending = responsibility::pending(workspace.responsibilities.records())
        .into_iter()
        .map(|record| record.id)
        .collect::<Vec<_>>();
    assert_eq!(pending, vec!["2"]);
    assert!(workspace.dashboard.is_pinned("sleep"));
    assert_eq!(workspace.dashboard.active_module(), None);
}

#[test]
fn upcoming_birthdays_read_from_family_store() {
    let storage = MemoryNamespaceStorage::new();
    let workspace = LifeWorkspace::open(&storage, StoreOptions::default());

    let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let upcoming = workspace.upcoming_birthdays(today, 30);

    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].name, "Sarah");
    assert_eq!(
        upcoming[0].next_occurrence,
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    );
}
