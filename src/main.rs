mod audit;
mod cli;
mod config;
mod logging;
mod snapshot;
mod techsupport;
mod utils;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};

use audit::sink::FsReportSink;
use config::AuditConfig;
use snapshot::DirSnapshotStore;

const EXIT_FATAL: i32 = 1;

fn main() {
    let cli = Cli::parse();
    logging::init(
        &logging::LogConfig::new()
            .level(cli.log_level.clone())
            .format(cli.log_format)
            .with_target(cli.verbose),
    );

    let result = match cli.command {
        Commands::Report { input, output_directory, jobs } => run_report(&input, output_directory, jobs),
        Commands::TechSupport { input, output_directory } => run_tech_support(&input, output_directory),
        Commands::Checks => {
            print_checks();
            Ok(audit::EXIT_OK)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_FATAL);
        }
    }
}

fn load_config(input: &Path, output_directory: Option<PathBuf>) -> anyhow::Result<AuditConfig> {
    let mut config = AuditConfig::load(input)
        .with_context(|| format!("loading {}", input.display()))?;
    if let Some(dir) = output_directory {
        config.output_directory = dir;
    }
    Ok(config)
}

fn run_report(input: &Path, output_directory: Option<PathBuf>, jobs: Option<usize>) -> anyhow::Result<i32> {
    let config = load_config(input, output_directory)?;
    let store = DirSnapshotStore::new(&config.output_directory);
    let sink = FsReportSink::new(&config.output_directory);

    let outcome = audit::run_audit(
        &config.devices,
        &config.audit,
        &store,
        &sink,
        jobs.unwrap_or(config.jobs),
    )
    .context("audit aborted")?;

    for (device, status) in &outcome.statuses {
        println!("{:<24} {}", device, status);
    }
    for excluded in &outcome.fleet.excluded {
        println!("{:<24} EXCLUDED  {}", excluded.device, excluded.reason);
    }
    println!(
        "{} device(s), checks [{}], generated {}; reports written to {}",
        outcome.fleet.devices.len(),
        outcome.fleet.checks.join(", "),
        outcome.fleet.generated_at,
        config.output_directory.display()
    );
    Ok(outcome.exit_code())
}

fn run_tech_support(input: &Path, output_directory: Option<PathBuf>) -> anyhow::Result<i32> {
    let config = load_config(input, output_directory)?;
    if config.custom_show_tech_support.is_empty() {
        anyhow::bail!("'custom_show_tech_support' lists no commands in {}", input.display());
    }

    let store = DirSnapshotStore::new(&config.output_directory);
    let failed = techsupport::write_all(&config.devices, &config.custom_show_tech_support, &store);
    if failed.is_empty() {
        Ok(audit::EXIT_OK)
    } else {
        eprintln!("tech-support not assembled for: {}", failed.join(", "));
        Ok(audit::EXIT_DEVICES_EXCLUDED)
    }
}

fn print_checks() {
    for check in audit::registry::all() {
        let header = check.header();
        println!("{:<26} {:<32} {}", check.name(), check.alias(), header.title);
        println!("{:<26} requires: {} | json", "", header.command);
    }
}
