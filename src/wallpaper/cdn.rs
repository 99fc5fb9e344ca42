use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Synthetic CDN locations for a wallpaper and its thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnUrls {
    pub image_url: String,
    pub thumbnail_url: String,
    pub cdn_path: String,
}

/// First 8 hex characters of the SHA-256 of `bytes`
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    digest[..8].to_string()
}

/// Build CDN URLs for the `index`-th wallpaper of a category.
pub fn cdn_urls(
    base_url: &str,
    category_id: i64,
    index: usize,
    hash: &str,
    wallpaper_path: &Path,
) -> CdnUrls {
    let base = base_url.trim_end_matches('/');
    let ext = wallpaper_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    let wp_filename = format!("cat{:02}_wp{:03}_{}{}", category_id, index, hash, ext);
    let thumb_filename = format!("cat{:02}_thumb{:03}_{}{}", category_id, index, hash, ext);

    CdnUrls {
        image_url: format!("{}/wallpapers/{}/{}", base, category_id, wp_filename),
        thumbnail_url: format!("{}/thumbnails/{}/{}", base, category_id, thumb_filename),
        cdn_path: format!("/wallpapers/{}/{}", category_id, wp_filename),
    }
}
