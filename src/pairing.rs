//! Wallpaper/thumbnail pairing.
//!
//! Scraped collections rarely keep matching names for full images and
//! thumbnails, so pairing falls back from exact names to name similarity and
//! finally to file size, recording how each pair was established.

mod scoring;
pub(crate) mod similarity;

use crate::config::MatchingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use similarity::sequence_ratio;

/// Where a discovered file sits in the category folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Inside the full-size wallpapers subfolder
    Wallpaper,
    /// Inside the thumbnails subfolder
    Thumbnail,
    /// Flat layout: role is inferred from size during pairing
    Unsorted,
}

/// An image file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
    pub role: FileRole,
}

impl ImageFile {
    /// Lower-cased filename without extension, used for all name comparisons
    pub fn normalized_name(&self) -> String {
        crate::utils::normalized_stem(&self.filename)
    }
}

/// How a wallpaper was matched to its thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    /// Identical filenames in both subfolders
    Exact,
    /// Name similarity above the configured threshold
    Similar,
    /// Flat layout: larger file paired with a smaller, similarly named one
    SizeBased,
    /// Organized layout with no usable thumbnail
    NoThumb,
    /// Flat layout with no usable thumbnail
    NoMatch,
}

impl MatchConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchConfidence::Exact => "exact",
            MatchConfidence::Similar => "similar",
            MatchConfidence::SizeBased => "size_based",
            MatchConfidence::NoThumb => "no_thumb",
            MatchConfidence::NoMatch => "no_match",
        }
    }
}

impl fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One wallpaper and the thumbnail chosen for it (possibly itself)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedImage {
    pub wallpaper_path: PathBuf,
    pub thumbnail_path: PathBuf,
    pub filename: String,
    pub confidence: MatchConfidence,
}

impl PairedImage {
    fn new(wallpaper: &ImageFile, thumbnail: &ImageFile, confidence: MatchConfidence) -> Self {
        Self {
            wallpaper_path: wallpaper.path.clone(),
            thumbnail_path: thumbnail.path.clone(),
            filename: wallpaper.filename.clone(),
            confidence,
        }
    }

    /// True when a separate thumbnail file was found
    pub fn has_thumbnail(&self) -> bool {
        self.wallpaper_path != self.thumbnail_path
    }
}

/// Pair files from separate wallpaper and thumbnail folders.
///
/// Runs the exact, similar and no-thumbnail passes in order. Each pass takes
/// the remaining pools explicitly and removes what it consumes, so a
/// thumbnail is used at most once and every wallpaper yields exactly one pair.
pub fn pair_organized(
    wallpapers: &[ImageFile],
    thumbnails: &[ImageFile],
    rules: &MatchingConfig,
) -> Vec<PairedImage> {
    let mut remaining_wallpapers: Vec<&ImageFile> = wallpapers.iter().collect();
    let mut remaining_thumbnails: Vec<&ImageFile> = thumbnails.iter().collect();

    let mut pairs = exact_pass(&mut remaining_wallpapers, &mut remaining_thumbnails);
    pairs.extend(similar_pass(
        &mut remaining_wallpapers,
        &mut remaining_thumbnails,
        rules,
    ));
    pairs.extend(
        remaining_wallpapers
            .into_iter()
            .map(|wp| PairedImage::new(wp, wp, MatchConfidence::NoThumb)),
    );

    pairs
}

fn exact_pass<'a>(
    wallpapers: &mut Vec<&'a ImageFile>,
    thumbnails: &mut Vec<&'a ImageFile>,
) -> Vec<PairedImage> {
    let mut pairs = Vec::new();
    wallpapers.retain(|wp| {
        match thumbnails.iter().position(|t| t.filename == wp.filename) {
            Some(idx) => {
                let thumb = thumbnails.remove(idx);
                pairs.push(PairedImage::new(wp, thumb, MatchConfidence::Exact));
                false
            }
            None => true,
        }
    });
    pairs
}

fn similar_pass<'a>(
    wallpapers: &mut Vec<&'a ImageFile>,
    thumbnails: &mut Vec<&'a ImageFile>,
    rules: &MatchingConfig,
) -> Vec<PairedImage> {
    let mut pairs = Vec::new();
    let mut candidate_names: Vec<String> =
        thumbnails.iter().map(|t| t.normalized_name()).collect();

    wallpapers.retain(|wp| {
        match scoring::best_match(&wp.normalized_name(), &candidate_names, rules) {
            Some(idx) => {
                let thumb = thumbnails.remove(idx);
                candidate_names.remove(idx);
                tracing::debug!(wallpaper = %wp.filename, thumbnail = %thumb.filename, "similar-name match");
                pairs.push(PairedImage::new(wp, thumb, MatchConfidence::Similar));
                false
            }
            None => true,
        }
    });
    pairs
}

/// Pair files that all live in one folder.
///
/// Files are walked largest first; each unconsumed file becomes a wallpaper
/// and takes the next unconsumed file whose name similarity exceeds
/// `flat_threshold` as its thumbnail.
pub fn pair_flat(files: &[ImageFile], rules: &MatchingConfig) -> Vec<PairedImage> {
    let mut by_size: Vec<&ImageFile> = files.iter().collect();
    by_size.sort_by(|a, b| b.size.cmp(&a.size));
    let names: Vec<String> = by_size.iter().map(|f| f.normalized_name()).collect();

    let mut consumed = vec![false; by_size.len()];
    let mut pairs = Vec::new();

    for i in 0..by_size.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;
        let wallpaper = by_size[i];

        let thumb_idx = (i + 1..by_size.len()).find(|&j| {
            !consumed[j] && sequence_ratio(&names[i], &names[j]) > rules.flat_threshold
        });

        match thumb_idx {
            Some(j) => {
                consumed[j] = true;
                pairs.push(PairedImage::new(
                    wallpaper,
                    by_size[j],
                    MatchConfidence::SizeBased,
                ));
            }
            None => pairs.push(PairedImage::new(
                wallpaper,
                wallpaper,
                MatchConfidence::NoMatch,
            )),
        }
    }

    pairs
}
