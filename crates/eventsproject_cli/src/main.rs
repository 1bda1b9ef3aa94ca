//! CLI entry point.
//!
//! # Responsibility
//! - Verify `eventsproject_core` linkage and database bootstrap.
//! - Optionally run the organizer cost recomputation once.

use clap::Parser;
use eventsproject_core::db::open_db;
use eventsproject_core::{
    core_version, CoreConfig, EventService, SqliteEventRepository, SqliteLogisticsRepository,
    SqliteParticipantRepository,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "eventsproject_cli")]
#[command(version, about = "Open the events database and optionally recompute organizer costs")]
struct CliArgs {
    /// SQLite database file; overrides EVENTSPROJECT_DB_PATH
    db_path: Option<PathBuf>,

    /// Recompute and persist costs of the default organizer's events
    #[arg(long)]
    recompute: bool,
}

fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    let mut config = CoreConfig::from_env();
    if let Some(path) = args.db_path {
        config.db_path = path;
    }
    config.init_logging()?;

    println!("eventsproject_core version={}", core_version());

    let conn = open_db(&config.db_path)?;
    println!("db path={} status=ready", config.db_path.display());

    if args.recompute {
        let service = EventService::new(
            SqliteEventRepository::try_new(&conn)?,
            SqliteParticipantRepository::try_new(&conn)?,
            SqliteLogisticsRepository::try_new(&conn)?,
        );
        let updated = service.compute_and_persist_organizer_costs()?;
        info!("event=cli_recompute module=cli status=ok events={updated}");
        println!("recomputed events={updated}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
