//! CLI probe over the core stores.
//!
//! # Responsibility
//! - Open the configured database and workspace outside any UI runtime.
//! - Print a deterministic summary for quick local sanity checks.

use chrono::Local;
use galyarder_core::db::open_db;
use galyarder_core::{
    core_version, init_logging, CoreConfig, Domain, LifeWorkspace, SqliteNamespaceStorage,
};
use log::error;
use std::process::ExitCode;

const BIRTHDAY_WINDOW_DAYS: u32 = 30;

fn main() -> ExitCode {
    let command = std::env::args().nth(1).unwrap_or_else(|| "summary".to_string());
    match command.as_str() {
        "version" => {
            println!("galyarder_core version={}", core_version());
            ExitCode::SUCCESS
        }
        "summary" => match run_summary() {
            Ok(()) => ExitCode::SUCCESS,
            Err(message) => {
                error!("event=cli_summary module=cli status=error error={message}");
                eprintln!("error: {message}");
                ExitCode::FAILURE
            }
        },
        other => {
            eprintln!("unknown command `{other}`; expected summary|version");
            ExitCode::from(2)
        }
    }
}

fn run_summary() -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy()).map_err(|err| err.to_string())?;
    }

    let conn = open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;
    let workspace = LifeWorkspace::open(
        SqliteNamespaceStorage::new(&conn),
        config.store_options(),
    );

    println!("database={}", config.db_path.display());
    for domain in Domain::ALL {
        let store = workspace.store(domain);
        println!("{} records={}", store.namespace(), store.len());
    }
    println!("pinned={}", workspace.dashboard.pinned().join(","));

    let today = Local::now().date_naive();
    for birthday in workspace.upcoming_birthdays(today, BIRTHDAY_WINDOW_DAYS) {
        println!(
            "birthday name={} date={} in_days={} turning={}",
            birthday.name, birthday.next_occurrence, birthday.days_until, birthday.turning
        );
    }
    Ok(())
}
