use super::{slugify, CatalogStore, Category, NewCategory, StoredUrls};
use crate::wallpaper::{Orientation, WallpaperRecord};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::path::{Path, PathBuf};

/// SQLite-backed gallery catalog
pub struct SqliteCatalog {
    conn: Connection,
    db_path: PathBuf,
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl SqliteCatalog {
    /// Open (or create) the catalog database and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open catalog {}", path.display()))?;
        let catalog = Self {
            conn,
            db_path: path.to_path_buf(),
        };
        catalog.init_schema()?;
        tracing::debug!(path = %path.display(), "catalog opened");

        Ok(catalog)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let catalog = Self {
            conn: Connection::open_in_memory()?,
            db_path: PathBuf::from(":memory:"),
        };
        catalog.init_schema()?;
        Ok(catalog)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "PRAGMA foreign_keys = ON;

                CREATE TABLE IF NOT EXISTS categories (
                    id                       INTEGER PRIMARY KEY AUTOINCREMENT,
                    name                     TEXT NOT NULL UNIQUE,
                    slug                     TEXT NOT NULL UNIQUE,
                    description              TEXT NOT NULL DEFAULT '',
                    cover_image_url          TEXT NOT NULL DEFAULT '',
                    display_order            INTEGER NOT NULL DEFAULT 0,
                    desktop_wallpaper_count  INTEGER NOT NULL DEFAULT 0,
                    mobile_wallpaper_count   INTEGER NOT NULL DEFAULT 0,
                    is_active                INTEGER NOT NULL DEFAULT 1,
                    created_at               TEXT NOT NULL,
                    updated_at               TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS desktop_wallpapers (
                    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
                    category_id          INTEGER NOT NULL REFERENCES categories(id),
                    title                TEXT NOT NULL,
                    tags                 TEXT NOT NULL DEFAULT '',
                    color_palette        TEXT NOT NULL,
                    image_url            TEXT NOT NULL,
                    thumbnail_url        TEXT NOT NULL,
                    resolution_width     INTEGER NOT NULL,
                    resolution_height    INTEGER NOT NULL,
                    aspect_ratio         TEXT NOT NULL DEFAULT '',
                    file_format          TEXT NOT NULL DEFAULT 'JPEG',
                    cdn_path             TEXT NOT NULL DEFAULT '',
                    quality_label        TEXT NOT NULL,
                    likes_count          INTEGER NOT NULL DEFAULT 0,
                    favorites_count      INTEGER NOT NULL DEFAULT 0,
                    downloads_count      INTEGER NOT NULL DEFAULT 0,
                    views_count          INTEGER NOT NULL DEFAULT 0,
                    is_trending          INTEGER NOT NULL DEFAULT 0,
                    trending_percentage  INTEGER NOT NULL DEFAULT 0,
                    is_featured          INTEGER NOT NULL DEFAULT 0,
                    display_order        INTEGER NOT NULL DEFAULT 0,
                    match_type           TEXT NOT NULL,
                    created_at           TEXT NOT NULL,
                    updated_at           TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS mobile_wallpapers (
                    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
                    category_id          INTEGER NOT NULL REFERENCES categories(id),
                    title                TEXT NOT NULL,
                    tags                 TEXT NOT NULL DEFAULT '',
                    color_palette        TEXT NOT NULL,
                    image_url            TEXT NOT NULL,
                    thumbnail_url        TEXT NOT NULL,
                    resolution_width     INTEGER NOT NULL,
                    resolution_height    INTEGER NOT NULL,
                    aspect_ratio         TEXT NOT NULL DEFAULT '',
                    file_format          TEXT NOT NULL DEFAULT 'JPEG',
                    cdn_path             TEXT NOT NULL DEFAULT '',
                    quality_label        TEXT NOT NULL,
                    device_type          TEXT NOT NULL DEFAULT 'phone',
                    likes_count          INTEGER NOT NULL DEFAULT 0,
                    favorites_count      INTEGER NOT NULL DEFAULT 0,
                    downloads_count      INTEGER NOT NULL DEFAULT 0,
                    views_count          INTEGER NOT NULL DEFAULT 0,
                    is_trending          INTEGER NOT NULL DEFAULT 0,
                    trending_percentage  INTEGER NOT NULL DEFAULT 0,
                    is_featured          INTEGER NOT NULL DEFAULT 0,
                    display_order        INTEGER NOT NULL DEFAULT 0,
                    match_type           TEXT NOT NULL,
                    created_at           TEXT NOT NULL,
                    updated_at           TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_desktop_category
                    ON desktop_wallpapers(category_id, display_order);
                CREATE INDEX IF NOT EXISTS idx_mobile_category
                    ON mobile_wallpapers(category_id, display_order);",
            )
            .context("Failed to initialize catalog schema")
    }

    fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            slug: row.get(2)?,
            description: row.get(3)?,
            display_order: row.get(4)?,
            desktop_count: row.get(5)?,
            mobile_count: row.get(6)?,
        })
    }
}

const CATEGORY_COLUMNS: &str = "id, name, slug, description, display_order, \
     desktop_wallpaper_count, mobile_wallpaper_count";

impl CatalogStore for SqliteCatalog {
    fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"))?;
        let rows = stmt.query_map([], Self::category_from_row)?;

        let mut categories = Vec::new();
        for category in rows {
            categories.push(category?);
        }
        Ok(categories)
    }

    fn category_by_id(&self, id: i64) -> Result<Option<Category>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
                [id],
                Self::category_from_row,
            )
            .optional()?)
    }

    fn category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = ?1"),
                [name],
                Self::category_from_row,
            )
            .optional()?)
    }

    fn upsert_category(&mut self, new: &NewCategory) -> Result<i64> {
        let slug = slugify(&new.name);
        let now = timestamp();

        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?1 OR slug = ?2",
                params![new.name, slug],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(existing) = existing {
            self.conn.execute(
                "UPDATE categories
                 SET description = ?1, display_order = ?2, is_active = 1, updated_at = ?3
                 WHERE id = ?4",
                params![new.description, new.display_order, now, existing],
            )?;
            return Ok(existing);
        }

        if let Some(id) = new.id {
            match self.conn.execute(
                "INSERT INTO categories
                 (id, name, slug, description, cover_image_url, display_order, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    id,
                    new.name,
                    slug,
                    new.description,
                    new.cover_image_url,
                    new.display_order,
                    now
                ],
            ) {
                Ok(_) => return Ok(id),
                Err(e) => {
                    tracing::warn!("Category id {} unavailable for '{}': {}", id, new.name, e);
                }
            }
        }

        self.conn.execute(
            "INSERT INTO categories
             (name, slug, description, cover_image_url, display_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                new.name,
                slug,
                new.description,
                new.cover_image_url,
                new.display_order,
                now
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_wallpaper(&mut self, category_id: i64, record: &WallpaperRecord) -> Result<i64> {
        let (table, counter) = match record.orientation {
            Orientation::Desktop => ("desktop_wallpapers", "desktop_wallpaper_count"),
            Orientation::Mobile => ("mobile_wallpapers", "mobile_wallpaper_count"),
        };

        let now = timestamp();
        let tags = record.tags_joined();
        let palette = serde_json::to_string(&record.palette)?;
        let quality = record.quality.as_str();
        let match_type = record.confidence.as_str();
        let device = record.device_type.map(|d| d.as_str());
        let e = &record.engagement;

        let mut columns = vec![
            "category_id",
            "title",
            "tags",
            "color_palette",
            "image_url",
            "thumbnail_url",
            "resolution_width",
            "resolution_height",
            "aspect_ratio",
            "file_format",
            "cdn_path",
            "quality_label",
            "likes_count",
            "favorites_count",
            "downloads_count",
            "views_count",
            "is_trending",
            "trending_percentage",
            "is_featured",
            "display_order",
            "match_type",
            "created_at",
            "updated_at",
        ];
        let mut values: Vec<&dyn ToSql> = vec![
            &category_id,
            &record.title,
            &tags,
            &palette,
            &record.urls.image_url,
            &record.urls.thumbnail_url,
            &record.width,
            &record.height,
            &record.aspect_ratio,
            &record.file_format,
            &record.urls.cdn_path,
            &quality,
            &e.likes,
            &e.favorites,
            &e.downloads,
            &e.views,
            &e.is_trending,
            &e.trending_percentage,
            &e.is_featured,
            &record.display_order,
            &match_type,
            &now,
            &now,
        ];
        if let Some(device) = &device {
            columns.push("device_type");
            values.push(device);
        }

        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction()?;
        tx.execute(&sql, values.as_slice())
            .with_context(|| format!("Failed to insert into {table}"))?;
        let wallpaper_id = tx.last_insert_rowid();
        tx.execute(
            &format!("UPDATE categories SET {counter} = {counter} + 1, updated_at = ?1 WHERE id = ?2"),
            params![now, category_id],
        )?;
        tx.commit()?;

        Ok(wallpaper_id)
    }

    fn recount(&mut self) -> Result<Vec<Category>> {
        self.conn.execute(
            "UPDATE categories SET
                desktop_wallpaper_count =
                    (SELECT COUNT(*) FROM desktop_wallpapers WHERE category_id = categories.id),
                mobile_wallpaper_count =
                    (SELECT COUNT(*) FROM mobile_wallpapers WHERE category_id = categories.id),
                updated_at = ?1",
            [timestamp()],
        )?;
        self.categories()
    }

    fn wallpaper_urls(&self) -> Result<Vec<StoredUrls>> {
        let mut urls = Vec::new();
        for (table, orientation) in [
            ("desktop_wallpapers", Orientation::Desktop),
            ("mobile_wallpapers", Orientation::Mobile),
        ] {
            let mut stmt = self
                .conn
                .prepare(&format!("SELECT image_url, thumbnail_url FROM {table} ORDER BY id"))?;
            let rows = stmt.query_map([], |row| {
                Ok(StoredUrls {
                    orientation,
                    image_url: row.get(0)?,
                    thumbnail_url: row.get(1)?,
                })
            })?;
            for row in rows {
                urls.push(row?);
            }
        }
        Ok(urls)
    }
}
