mod cdn;
mod palette;
mod resolution;
mod tags;
mod title;

pub use cdn::{cdn_urls, content_hash, CdnUrls};
pub use palette::{extract_palette, ColorPalette};
pub use resolution::{aspect_ratio, quality_label, DeviceType, Orientation, QualityLabel};
pub use tags::tags_from_title;
pub use title::title_from_filename;

use crate::error::{ImportError, ImportResult};
use crate::pairing::{MatchConfidence, PairedImage};
use image::error::ImageFormatHint;
use image::ImageReader;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;

/// Gallery counters seeded at import time.
///
/// Drawn from the caller's random source; not derived from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u32,
    pub favorites: u32,
    pub downloads: u32,
    pub views: u32,
    pub is_trending: bool,
    pub trending_percentage: u8,
    pub is_featured: bool,
}

impl Engagement {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let likes = rng.gen_range(1000..=10000);
        let favorites = rng.gen_range(500..=8000);
        let downloads = rng.gen_range(100..=5000);
        let views = rng.gen_range(5000..=50000);
        let trending_percentage = if rng.gen::<f64>() > 0.7 {
            rng.gen_range(10..=95)
        } else {
            0
        };
        Self {
            likes,
            favorites,
            downloads,
            views,
            trending_percentage,
            is_trending: rng.gen::<f64>() > 0.7,
            is_featured: rng.gen::<f64>() > 0.7,
        }
    }
}

/// Everything the catalog stores for one imported wallpaper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallpaperRecord {
    pub title: String,
    pub tags: Vec<String>,
    pub palette: ColorPalette,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: String,
    pub orientation: Orientation,
    pub quality: QualityLabel,
    /// Only set for mobile wallpapers
    pub device_type: Option<DeviceType>,
    pub file_format: String,
    pub urls: CdnUrls,
    pub display_order: u32,
    pub confidence: MatchConfidence,
    pub engagement: Engagement,
}

impl WallpaperRecord {
    /// Tags as stored in the catalog
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }
}

/// Per-item inputs that do not come from the image itself
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub category_id: i64,
    /// 1-based position in the category's pairing order
    pub index: usize,
    pub cdn_base: &'a str,
}

impl RecordContext<'_> {
    pub fn display_order(&self) -> u32 {
        (self.index as u32).saturating_mul(10)
    }
}

/// Build the catalog record for one paired image.
///
/// Fails only when the wallpaper cannot be read or its header cannot be
/// parsed. When the pixel data does not decode, the record keeps its header
/// dimensions and gets a fallback palette.
pub fn build_record<R: Rng + ?Sized>(
    pair: &PairedImage,
    ctx: &RecordContext<'_>,
    rng: &mut R,
) -> ImportResult<WallpaperRecord> {
    let bytes = fs::read(&pair.wallpaper_path).map_err(|source| ImportError::Io {
        path: pair.wallpaper_path.clone(),
        source,
    })?;
    let decode_err = |source: image::ImageError| ImportError::ImageDecode {
        path: pair.wallpaper_path.clone(),
        source,
    };

    // Size and format come from the header alone; a damaged pixel payload
    // still yields a record.
    let reader = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|source| ImportError::Io {
            path: pair.wallpaper_path.clone(),
            source,
        })?;
    let Some(format) = reader.format() else {
        return Err(decode_err(image::ImageError::Unsupported(
            ImageFormatHint::Unknown.into(),
        )));
    };
    let (width, height) = reader.into_dimensions().map_err(decode_err)?;
    if width == 0 || height == 0 {
        return Err(decode_err(image::ImageError::Limits(
            image::error::LimitError::from_kind(image::error::LimitErrorKind::DimensionError),
        )));
    }

    let orientation = Orientation::from_dimensions(width, height);
    let title = title_from_filename(&pair.filename);
    let tags = tags_from_title(&title);

    let palette = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| e.to_string())
        .and_then(|img| extract_palette(&img).ok_or_else(|| "no pixels to sample".to_string()));
    let palette = match palette {
        Ok(palette) => palette,
        Err(reason) => {
            let err = ImportError::PaletteExtraction {
                path: pair.wallpaper_path.clone(),
                reason,
            };
            tracing::warn!("{}; using fallback palette", err);
            ColorPalette::fallback(rng)
        }
    };

    let hash = content_hash(&bytes);
    let urls = cdn_urls(
        ctx.cdn_base,
        ctx.category_id,
        ctx.index,
        &hash,
        &pair.wallpaper_path,
    );

    Ok(WallpaperRecord {
        title,
        tags,
        palette,
        width,
        height,
        aspect_ratio: aspect_ratio(width, height),
        orientation,
        quality: quality_label(width, height, orientation),
        device_type: match orientation {
            Orientation::Mobile => Some(DeviceType::from_width(width)),
            Orientation::Desktop => None,
        },
        file_format: format!("{:?}", format).to_uppercase(),
        urls,
        display_order: ctx.display_order(),
        confidence: pair.confidence,
        engagement: Engagement::roll(rng),
    })
}
