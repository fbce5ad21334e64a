use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "archive-audit")]
#[command(about = "Find duplicate folder and file paths within archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Audit every selected archive and print the tally
    Audit {
        /// Audit at most this many archives (newest first)
        #[arg(long)]
        limit: Option<i64>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Write one CSV row per flagged archive to this file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Audit a single archive and list its duplicate paths
    AuditArchive {
        archive_id: i64,
    },
    /// List the archives an audit would visit
    ListArchives,
    /// Print configuration values
    PrintConfig,
    /// Create a small archive store with known defects at the given path
    SeedDemo {
        path: String,
    },
}
