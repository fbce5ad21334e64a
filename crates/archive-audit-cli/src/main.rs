mod commands;
mod demo;
mod logging;
mod output;
mod progress;

use std::process;

use archive_audit_core::storage::Database;
use archive_audit_core::{AppConfig, ArchiveSelector, AuditEngine, SelectionCriteria};
use clap::{CommandFactory, Parser};
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliObserver;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match archive_audit_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Audit { limit, json, csv }) => {
            let mut config = config;
            if limit.is_some() {
                config.archive_limit = limit;
            }
            let csv_path = csv.or_else(|| config.report_path.clone());
            if let Err(err) = run_audit(config, json, csv_path.as_deref()) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::AuditArchive { archive_id }) => {
            if let Err(err) = run_audit_archive(config, archive_id) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::ListArchives) => {
            if let Err(err) = run_list_archives(&config) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        Some(Commands::SeedDemo { path }) => {
            let db = Database::open(&path)?;
            demo::seed_demo(&db)?;
            info!("Demo archive store written to {}", path);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_audit(
    config: AppConfig,
    json: bool,
    csv_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open_read_only(&config.database_path)?;
    let engine = AuditEngine::new(config);
    let observer = CliObserver::new();
    let report = engine.run(&db, &observer)?;

    println!();
    output::print_summary(&report);

    if let Some(path) = csv_path {
        let rows = output::write_csv(path, &report)?;
        info!("Wrote {} flagged archives to {}", rows, path);
    }
    if json {
        println!("{}", report.to_json()?);
    }

    Ok(())
}

fn run_audit_archive(config: AppConfig, archive_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open_read_only(&config.database_path)?;
    let engine = AuditEngine::new(config);
    let result = engine.audit_archive(&db, archive_id, &CliObserver::new())?;
    output::print_archive(&result);
    Ok(())
}

fn run_list_archives(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open_read_only(&config.database_path)?;
    let archives = db.select_archives(&SelectionCriteria::from(config))?;
    for (archive_id, owner) in &archives {
        println!(
            "{}\t{}\t{}",
            archive_id,
            owner.email.as_deref().unwrap_or("-"),
            owner.display_name.as_deref().unwrap_or("-"),
        );
    }
    info!("{} archives selected", archives.len());
    Ok(())
}
