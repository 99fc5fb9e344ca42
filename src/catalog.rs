//! Gallery catalog the importer writes into.
//!
//! The pipeline only reads categories and appends wallpapers; category
//! rows are managed through `wallpic category sync`.

#[cfg(test)]
pub(crate) mod memory;
mod sqlite;

pub use sqlite::SqliteCatalog;

use crate::wallpaper::{Orientation, WallpaperRecord};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub display_order: u32,
    pub desktop_count: u32,
    pub mobile_count: u32,
}

impl Category {
    pub fn total(&self) -> u32 {
        self.desktop_count + self.mobile_count
    }
}

/// URL slug for a category name
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .replace('/', "-")
        .replace('&', "and")
        .replace(['(', ')'], "")
}

/// Category fields written by `wallpic category sync`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    /// Preferred id; a taken id falls back to the next free one
    pub id: Option<i64>,
    pub description: String,
    pub display_order: u32,
    pub cover_image_url: String,
}

impl NewCategory {
    pub fn named(name: &str, id: Option<i64>) -> Self {
        Self {
            name: name.to_string(),
            id,
            ..Default::default()
        }
    }
}

/// Published URLs of one stored wallpaper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUrls {
    pub orientation: Orientation,
    pub image_url: String,
    pub thumbnail_url: String,
}

/// Storage collaborator for imported wallpapers
pub trait CatalogStore {
    /// All categories ordered by id
    fn categories(&self) -> Result<Vec<Category>>;

    fn category_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Exact name match
    fn category_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Create a category or refresh the description and display order of an
    /// existing one with the same name or slug. Returns the category id.
    fn upsert_category(&mut self, category: &NewCategory) -> Result<i64>;

    /// Append one wallpaper and bump the category's matching counter.
    /// Returns the id assigned to the wallpaper.
    fn insert_wallpaper(&mut self, category_id: i64, record: &WallpaperRecord) -> Result<i64>;

    /// Recompute per-category counts from the stored wallpapers
    fn recount(&mut self) -> Result<Vec<Category>>;

    /// URLs of every stored wallpaper, desktop first, each in insertion order
    fn wallpaper_urls(&self) -> Result<Vec<StoredUrls>>;
}

/// Find a category by numeric id or by name (exact, then case-insensitive).
pub fn find_category(store: &dyn CatalogStore, key: &str) -> Result<Option<Category>> {
    let key = key.trim();
    if let Ok(id) = key.parse::<i64>() {
        if let Some(category) = store.category_by_id(id)? {
            return Ok(Some(category));
        }
    }
    if let Some(category) = store.category_by_name(key)? {
        return Ok(Some(category));
    }
    Ok(store
        .categories()?
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(key)))
}
