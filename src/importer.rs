//! Per-category import: discovery, pairing, metadata and storage.

use crate::catalog::{CatalogStore, Category};
use crate::config::Config;
use crate::discovery::{find_category_folder, scan_folder, CategoryFolder, Layout};
use crate::error::{ImportError, ImportResult};
use crate::pairing::{pair_flat, pair_organized, PairedImage};
use crate::wallpaper::{build_record, Orientation, RecordContext, WallpaperRecord};
use rand::Rng;
use std::path::PathBuf;

/// A catalog category to import into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTarget {
    pub id: i64,
    pub name: String,
    /// Folder override from the category mapping
    pub folder: Option<PathBuf>,
}

impl CategoryTarget {
    pub fn from_category(category: &Category, config: &Config) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            folder: config.folder_for(&category.name).map(PathBuf::from),
        }
    }
}

/// Counts for one category run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub desktop: usize,
    pub mobile: usize,
}

impl ImportSummary {
    pub fn absorb(&mut self, other: &ImportSummary) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.desktop += other.desktop;
        self.mobile += other.mobile;
    }

    fn record(&mut self, orientation: Orientation) {
        self.succeeded += 1;
        match orientation {
            Orientation::Desktop => self.desktop += 1,
            Orientation::Mobile => self.mobile += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImportSummary),
    /// The category folder holds no images
    NothingToDo,
}

/// Totals for an import across several categories
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub totals: ImportSummary,
    /// Categories that imported at least one wallpaper
    pub categories_imported: usize,
    /// Categories with no folder or no images
    pub categories_skipped: usize,
}

/// Discovery and pairing result for one category
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub folder: CategoryFolder,
    pub layout: Layout,
    pub pairs: Vec<PairedImage>,
}

/// Dry-run result for one pair
#[derive(Debug)]
pub struct PreviewItem {
    pub index: usize,
    pub pair: PairedImage,
    pub record: ImportResult<WallpaperRecord>,
}

pub struct Importer<'a, R: Rng> {
    config: &'a Config,
    rng: R,
}

impl<'a, R: Rng> Importer<'a, R> {
    pub fn new(config: &'a Config, rng: R) -> Self {
        Self { config, rng }
    }

    /// Locate the category folder and pair its images.
    pub fn plan(&self, target: &CategoryTarget) -> ImportResult<ImportPlan> {
        let root = self.config.library_root();
        let folder = find_category_folder(&root, &target.name, target.folder.as_deref())?;
        let layout = scan_folder(&folder.path, &self.config.library)?;

        let pairs = match &layout {
            Layout::Organized {
                wallpapers,
                thumbnails,
            } => pair_organized(wallpapers, thumbnails, &self.config.matching),
            Layout::Flat(files) => pair_flat(files, &self.config.matching),
        };

        tracing::debug!(
            category = %target.name,
            folder = %folder.path.display(),
            pairs = pairs.len(),
            "planned import"
        );

        Ok(ImportPlan {
            folder,
            layout,
            pairs,
        })
    }

    /// Build every record without touching the catalog.
    pub fn preview(&mut self, target: &CategoryTarget) -> ImportResult<Vec<PreviewItem>> {
        let plan = self.plan(target)?;
        let cdn_base = self.config.cdn.base_url.as_str();

        let items = plan
            .pairs
            .into_iter()
            .enumerate()
            .map(|(i, pair)| {
                let ctx = RecordContext {
                    category_id: target.id,
                    index: i + 1,
                    cdn_base,
                };
                let record = build_record(&pair, &ctx, &mut self.rng);
                PreviewItem {
                    index: i + 1,
                    pair,
                    record,
                }
            })
            .collect();

        Ok(items)
    }

    /// Import one category into `store`.
    ///
    /// Unreadable images and rejected inserts are counted as failed; only a
    /// missing or unreadable category folder is returned as an error.
    pub fn import_category(
        &mut self,
        target: &CategoryTarget,
        store: &mut dyn CatalogStore,
    ) -> ImportResult<ImportOutcome> {
        let plan = self.plan(target)?;
        if plan.layout.is_empty() {
            tracing::info!("No images found for '{}'", target.name);
            return Ok(ImportOutcome::NothingToDo);
        }

        let (wallpapers, thumbnails, unsorted) = plan.layout.role_counts();
        tracing::info!(
            "Importing '{}' from {} ({} wallpapers, {} thumbnails, {} unsorted)",
            target.name,
            plan.folder.path.display(),
            wallpapers,
            thumbnails,
            unsorted
        );

        let total = plan.pairs.len();
        let mut summary = ImportSummary::default();

        for (i, pair) in plan.pairs.iter().enumerate() {
            let ctx = RecordContext {
                category_id: target.id,
                index: i + 1,
                cdn_base: &self.config.cdn.base_url,
            };

            match self.store_one(pair, &ctx, store) {
                Ok(record) => {
                    summary.record(record.orientation);
                    tracing::info!(
                        "[{}/{}] {} ({}, {}, {})",
                        i + 1,
                        total,
                        record.title,
                        record.orientation.as_str(),
                        record.quality.as_str(),
                        record.confidence
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!("[{}/{}] {}", i + 1, total, e);
                }
            }
        }

        Ok(ImportOutcome::Imported(summary))
    }

    fn store_one(
        &mut self,
        pair: &PairedImage,
        ctx: &RecordContext<'_>,
        store: &mut dyn CatalogStore,
    ) -> ImportResult<WallpaperRecord> {
        let record = build_record(pair, ctx, &mut self.rng)?;
        store
            .insert_wallpaper(ctx.category_id, &record)
            .map_err(|source| ImportError::StorageWrite {
                title: record.title.clone(),
                source,
            })?;
        Ok(record)
    }

    /// Import several categories, skipping those without a usable folder.
    pub fn import_all(
        &mut self,
        targets: &[CategoryTarget],
        store: &mut dyn CatalogStore,
    ) -> BatchSummary {
        let mut batch = BatchSummary::default();

        for target in targets {
            match self.import_category(target, store) {
                Ok(ImportOutcome::Imported(summary)) => {
                    if summary.succeeded > 0 {
                        batch.categories_imported += 1;
                    }
                    batch.totals.absorb(&summary);
                }
                Ok(ImportOutcome::NothingToDo) => batch.categories_skipped += 1,
                Err(e) => {
                    tracing::warn!("Skipping '{}': {}", target.name, e);
                    batch.categories_skipped += 1;
                }
            }
        }

        batch
    }
}
