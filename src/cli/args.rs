use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wallpic")]
#[command(version)]
#[command(about = "Import local wallpaper folders into a gallery catalog")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Configuration file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Folder holding one subfolder per category
    #[arg(short, long, global = true)]
    pub(crate) root: Option<PathBuf>,

    /// Catalog database file
    #[arg(long, global = true)]
    pub(crate) db: Option<PathBuf>,

    /// Log per-file pairing decisions
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage catalog categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Import a category's images into the catalog
    Import {
        /// Category id or name (prompted when omitted)
        category: Option<String>,

        /// Import every category in the catalog
        #[arg(short, long, conflicts_with = "category")]
        all: bool,
    },
    /// Show how a category would be imported without writing anything
    Scan {
        /// Category id or name
        category: String,
    },
    /// Write every stored image and thumbnail URL to timestamped lists
    ExportUrls {
        /// Directory for the URL lists
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the configuration file path and its effective contents
    Config,
}

#[derive(Subcommand)]
pub(crate) enum CategoryAction {
    /// List catalog categories with their wallpaper counts
    List,
    /// Create catalog categories from the [[categories]] config mapping
    Sync,
    /// Recompute category counts from stored wallpapers
    Recount,
}
