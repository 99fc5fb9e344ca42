//! Category folder lookup and image discovery.

use crate::config::LibraryConfig;
use crate::error::{ImportError, ImportResult};
use crate::pairing::{FileRole, ImageFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A category folder that exists on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFolder {
    pub path: PathBuf,
    /// The name variant that resolved
    pub matched_name: String,
}

/// How the images of a category folder are arranged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Separate subfolders for full images and thumbnails
    Organized {
        wallpapers: Vec<ImageFile>,
        thumbnails: Vec<ImageFile>,
    },
    /// Everything in the category folder itself
    Flat(Vec<ImageFile>),
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        match self {
            Layout::Organized { wallpapers, .. } => wallpapers.is_empty(),
            Layout::Flat(files) => files.is_empty(),
        }
    }

    /// Count of (wallpaper, thumbnail, unsorted) files
    pub fn role_counts(&self) -> (usize, usize, usize) {
        let files: Vec<&ImageFile> = match self {
            Layout::Organized {
                wallpapers,
                thumbnails,
            } => wallpapers.iter().chain(thumbnails.iter()).collect(),
            Layout::Flat(files) => files.iter().collect(),
        };
        files.iter().fold((0, 0, 0), |(w, t, u), f| match f.role {
            FileRole::Wallpaper => (w + 1, t, u),
            FileRole::Thumbnail => (w, t + 1, u),
            FileRole::Unsorted => (w, t, u + 1),
        })
    }
}

/// Folder names tried for a category, in lookup order.
pub fn folder_name_variants(name: &str) -> Vec<String> {
    let mut variants = vec![
        name.to_string(),
        name.replace('/', "_"),
        name.replace('/', "-"),
        name.to_lowercase(),
        name.to_uppercase(),
        title_case(name),
    ];
    let mut seen = std::collections::HashSet::new();
    variants.retain(|v| seen.insert(v.clone()));
    variants
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Resolve the folder holding a category's images.
///
/// An explicit folder from the category mapping is tried first, then each
/// name variant under `root`.
pub fn find_category_folder(
    root: &Path,
    category_name: &str,
    explicit: Option<&Path>,
) -> ImportResult<CategoryFolder> {
    if let Some(folder) = explicit {
        let path = if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            root.join(folder)
        };
        if path.is_dir() {
            return Ok(CategoryFolder {
                matched_name: folder.display().to_string(),
                path,
            });
        }
        tracing::warn!(folder = %path.display(), "mapped folder missing, trying name variants");
    }

    folder_name_variants(category_name)
        .into_iter()
        .map(|variant| (root.join(&variant), variant))
        .find(|(path, _)| path.is_dir())
        .map(|(path, matched_name)| CategoryFolder { path, matched_name })
        .ok_or_else(|| ImportError::CategoryFolderNotFound(category_name.to_string()))
}

/// Detect the layout of a category folder and list its images.
pub fn scan_folder(folder: &Path, library: &LibraryConfig) -> ImportResult<Layout> {
    let wallpapers_dir = folder.join(&library.wallpapers_dir);
    let thumbnails_dir = folder.join(&library.thumbnails_dir);

    if wallpapers_dir.is_dir() && thumbnails_dir.is_dir() {
        Ok(Layout::Organized {
            wallpapers: list_images(&wallpapers_dir, FileRole::Wallpaper)?,
            thumbnails: list_images(&thumbnails_dir, FileRole::Thumbnail)?,
        })
    } else {
        Ok(Layout::Flat(list_images(folder, FileRole::Unsorted)?))
    }
}

/// Image files directly inside `dir`, sorted by filename.
fn list_images(dir: &Path, role: FileRole) -> ImportResult<Vec<ImageFile>> {
    if !dir.is_dir() {
        return Err(ImportError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let files = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && crate::utils::is_image_file(e.path()))
        .map(|e| ImageFile {
            size: e.metadata().map(|m| m.len()).unwrap_or(0),
            filename: e.file_name().to_string_lossy().into_owned(),
            path: e.path().to_path_buf(),
            role,
        })
        .collect();

    Ok(files)
}
