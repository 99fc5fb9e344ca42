mod catalog;
mod cli;
mod cli_cmds;
mod config;
mod discovery;
mod error;
mod importer;
mod pairing;
mod utils;
mod wallpaper;

use anyhow::Result;

pub(crate) use cli::CategoryAction;

fn main() -> Result<()> {
    cli::run()
}
