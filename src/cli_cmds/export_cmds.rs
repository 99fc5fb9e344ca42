use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::open_catalog;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::wallpaper::Orientation;

/// Files written by one URL export
#[derive(Debug)]
struct UrlExport {
    image_list: PathBuf,
    thumbnail_list: PathBuf,
    desktop: usize,
    mobile: usize,
}

/// Write every stored image URL and thumbnail URL, one per line, to
/// `all_image_urls_{stamp}.txt` and `all_thumbnail_urls_{stamp}.txt`.
fn write_url_lists(store: &dyn CatalogStore, out_dir: &Path, stamp: &str) -> Result<UrlExport> {
    let urls = store.wallpaper_urls()?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let image_list = out_dir.join(format!("all_image_urls_{stamp}.txt"));
    let images: String = urls.iter().map(|u| format!("{}\n", u.image_url)).collect();
    fs::write(&image_list, images)
        .with_context(|| format!("Failed to write {}", image_list.display()))?;

    let thumbnail_list = out_dir.join(format!("all_thumbnail_urls_{stamp}.txt"));
    let thumbnails: String = urls
        .iter()
        .map(|u| format!("{}\n", u.thumbnail_url))
        .collect();
    fs::write(&thumbnail_list, thumbnails)
        .with_context(|| format!("Failed to write {}", thumbnail_list.display()))?;

    let desktop = urls
        .iter()
        .filter(|u| u.orientation == Orientation::Desktop)
        .count();

    Ok(UrlExport {
        image_list,
        thumbnail_list,
        desktop,
        mobile: urls.len() - desktop,
    })
}

pub fn cmd_export_urls(config: &Config, out_dir: &Path) -> Result<()> {
    let store = open_catalog(config)?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let export = write_url_lists(&store, out_dir, &stamp)?;
    let total = export.desktop + export.mobile;

    println!(
        "✓ Saved {} image URLs to: {}",
        total,
        export.image_list.display()
    );
    println!(
        "✓ Saved {} thumbnail URLs to: {}",
        total,
        export.thumbnail_list.display()
    );
    println!("\nSummary:");
    println!("  Desktop wallpapers: {}", export.desktop);
    println!("  Mobile wallpapers:  {}", export.mobile);
    println!("  Total wallpapers:   {}", total);

    Ok(())
}
