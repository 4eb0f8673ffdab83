use clap::{Parser, Subcommand};
use snag_core::OutputFormat;

#[derive(Parser)]
#[command(name = "snag")]
#[command(about = "Snag: capture recurring tool failures as reflections")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hook entry point: read hook JSON from stdin and record a reflection if
    /// the transcript shows a failure. Always exits 0.
    Capture,

    /// Summarize the project's reflection log
    Status {
        /// Working directory (defaults to CWD)
        #[arg(long)]
        cd: Option<String>,
    },

    /// Print a reminder when too many reflections await review
    Pending {
        /// Working directory (defaults to CWD)
        #[arg(long)]
        cd: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective merged configuration
    Show {
        /// Working directory (defaults to CWD)
        #[arg(long)]
        cd: Option<String>,
    },
}
