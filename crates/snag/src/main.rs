use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod capture_cmd;
mod cli;
mod config_cmds;
mod status_cmd;

use cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let output_format = cli.format;

    match cli.command {
        Commands::Capture => capture_cmd::handle_capture(),
        Commands::Status { cd } => status_cmd::handle_status(cd, output_format)?,
        Commands::Pending { cd } => status_cmd::handle_pending(cd)?,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show { cd } => config_cmds::handle_config_show(cd, output_format)?,
        },
    }

    Ok(())
}

pub(crate) fn determine_project_root(cd: Option<&str>) -> Result<PathBuf> {
    match cd {
        Some(path) => Ok(PathBuf::from(path)),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}
