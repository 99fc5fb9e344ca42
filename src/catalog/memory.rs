use super::{slugify, CatalogStore, Category, NewCategory, StoredUrls};
use crate::wallpaper::{Orientation, WallpaperRecord};
use anyhow::{bail, Result};

/// In-memory catalog for tests
#[derive(Debug, Default)]
pub(crate) struct MemoryCatalog {
    pub categories: Vec<Category>,
    pub wallpapers: Vec<(i64, WallpaperRecord)>,
    /// Titles whose insert should fail
    pub reject_titles: Vec<String>,
}

impl CatalogStore for MemoryCatalog {
    fn categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    fn category_by_id(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    fn category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.name == name).cloned())
    }

    fn upsert_category(&mut self, new: &NewCategory) -> Result<i64> {
        let slug = slugify(&new.name);
        if let Some(existing) = self
            .categories
            .iter_mut()
            .find(|c| c.name == new.name || c.slug == slug)
        {
            existing.description = new.description.clone();
            existing.display_order = new.display_order;
            return Ok(existing.id);
        }

        let next_free = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let id = new
            .id
            .filter(|id| self.categories.iter().all(|c| c.id != *id))
            .unwrap_or(next_free);
        self.categories.push(Category {
            id,
            name: new.name.clone(),
            slug,
            description: new.description.clone(),
            display_order: new.display_order,
            desktop_count: 0,
            mobile_count: 0,
        });
        Ok(id)
    }

    fn insert_wallpaper(&mut self, category_id: i64, record: &WallpaperRecord) -> Result<i64> {
        if self.reject_titles.contains(&record.title) {
            bail!("insert rejected");
        }
        let Some(category) = self.categories.iter_mut().find(|c| c.id == category_id) else {
            bail!("unknown category {}", category_id);
        };
        match record.orientation {
            Orientation::Desktop => category.desktop_count += 1,
            Orientation::Mobile => category.mobile_count += 1,
        }
        self.wallpapers.push((category_id, record.clone()));
        Ok(self.wallpapers.len() as i64)
    }

    fn recount(&mut self) -> Result<Vec<Category>> {
        for category in &mut self.categories {
            let category_id = category.id;
            let of_category = |o: Orientation| {
                self.wallpapers
                    .iter()
                    .filter(|(id, r)| *id == category_id && r.orientation == o)
                    .count() as u32
            };
            category.desktop_count = of_category(Orientation::Desktop);
            category.mobile_count = of_category(Orientation::Mobile);
        }
        self.categories()
    }

    fn wallpaper_urls(&self) -> Result<Vec<StoredUrls>> {
        let urls_for = |o: Orientation| {
            self.wallpapers
                .iter()
                .filter(move |(_, r)| r.orientation == o)
                .map(|(_, r)| StoredUrls {
                    orientation: r.orientation,
                    image_url: r.urls.image_url.clone(),
                    thumbnail_url: r.urls.thumbnail_url.clone(),
                })
        };
        Ok(urls_for(Orientation::Desktop)
            .chain(urls_for(Orientation::Mobile))
            .collect())
    }
}
