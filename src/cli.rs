use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(name = "eosaudit")]
#[command(version)]
#[command(about = "Audit reports for Arista EOS switch fleets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "eosaudit=trace")
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Include module targets in log lines
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured checks against collected outputs and write reports
    Report {
        /// Input file listing devices, output directory and checks
        #[arg(short, long, default_value = "input.yml")]
        input: PathBuf,

        /// Override `output_directory` from the input file
        #[arg(short, long)]
        output_directory: Option<PathBuf>,

        /// Worker threads (0 = one per CPU); overrides `jobs` from the input file
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Assemble the custom show tech-support file for each device
    TechSupport {
        /// Input file listing devices, output directory and commands
        #[arg(short, long, default_value = "input.yml")]
        input: PathBuf,

        /// Override `output_directory` from the input file
        #[arg(short, long)]
        output_directory: Option<PathBuf>,
    },

    /// List the available checks
    Checks,
}
