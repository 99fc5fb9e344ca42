use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::{Cli, Commands};
use crate::cli_cmds::*;
use crate::config::Config;

fn init_logging(verbose: bool) {
    let default = if verbose { "wallpic=debug" } else { "wallpic=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;
    if let Some(root) = cli.root {
        config.library.root = root;
    }
    if let Some(db) = cli.db {
        config.catalog.database = db;
    }

    match cli.command {
        Commands::Category { action } => {
            cmd_category(action, &config)?;
        }
        Commands::Import { category, all } => {
            cmd_import(&config, category.as_deref(), all)?;
        }
        Commands::Scan { category } => {
            cmd_scan(&config, &category)?;
        }
        Commands::ExportUrls { out_dir } => {
            cmd_export_urls(&config, &out_dir)?;
        }
        Commands::Config => {
            cmd_config(&config, &config_path)?;
        }
    }

    Ok(())
}
