use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub cdn: CdnConfig,
    /// Explicit category name -> catalog id mapping
    #[serde(default)]
    pub categories: Vec<CategoryMapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folder holding one subfolder per category
    pub root: PathBuf,
    /// Subfolder name for full-size images in the organized layout
    #[serde(default = "default_wallpapers_dir")]
    pub wallpapers_dir: String,
    /// Subfolder name for thumbnails in the organized layout
    #[serde(default = "default_thumbnails_dir")]
    pub thumbnails_dir: String,
}

fn default_wallpapers_dir() -> String {
    "Wallpapers".to_string()
}

fn default_thumbnails_dir() -> String {
    "Thumbnails".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// SQLite database file
    pub database: PathBuf,
}

/// Thresholds for wallpaper/thumbnail name matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum score for a similar-name match (0.0-1.0)
    #[serde(default = "default_match_threshold")]
    pub threshold: f64,
    /// Added to the score when one name contains the other
    #[serde(default = "default_substring_bonus")]
    pub substring_bonus: f64,
    /// Leading characters that, when shared, match immediately
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,
    /// Similarity a flat-layout thumbnail must exceed
    #[serde(default = "default_match_threshold")]
    pub flat_threshold: f64,
}

fn default_match_threshold() -> f64 {
    0.6
}

fn default_substring_bonus() -> f64 {
    0.3
}

fn default_prefix_len() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    pub base_url: String,
}

/// Maps a category name to its catalog id, optionally with its own folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub folder: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Gallery sort position; defaults to the entry's position times ten
    #[serde(default)]
    pub display_order: Option<u32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cover_image_url: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: dirs::picture_dir()
                .map(|p| p.join("wallpic"))
                .unwrap_or_else(|| PathBuf::from("~/Pictures/wallpic")),
            wallpapers_dir: default_wallpapers_dir(),
            thumbnails_dir: default_thumbnails_dir(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: directories::ProjectDirs::from("com", "wallpic", "wallpic")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
                .join("catalog.sqlite3"),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_match_threshold(),
            substring_bonus: default_substring_bonus(),
            prefix_len: default_prefix_len(),
            flat_threshold: default_match_threshold(),
        }
    }
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cdn.example.com".to_string(),
        }
    }
}

impl Config {
    /// Return the path to the default configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "wallpic", "wallpic")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from file, creating default if missing or corrupt.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    tracing::warn!("Using default configuration.");
                    Ok(Config::default())
                }
            }
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)?;

        Ok(())
    }

    /// Category root, expanding ~ if needed.
    pub fn library_root(&self) -> PathBuf {
        crate::utils::expand_tilde(&self.library.root)
    }

    /// Catalog database path, expanding ~ if needed.
    pub fn database_path(&self) -> PathBuf {
        crate::utils::expand_tilde(&self.catalog.database)
    }

    /// Look up a mapping entry by name (case-insensitive) or id.
    pub fn mapping_for(&self, key: &str) -> Option<&CategoryMapping> {
        let key = key.trim();
        let by_id = key.parse::<i64>().ok();
        self.categories
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(key) || Some(m.id) == by_id)
    }

    /// Explicit folder configured for a category name.
    ///
    /// Keyed by name because `category sync` may store a category under a
    /// different id than the one configured.
    pub fn folder_for(&self, category_name: &str) -> Option<&Path> {
        self.categories
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(category_name))
            .and_then(|m| m.folder.as_deref())
    }
}
