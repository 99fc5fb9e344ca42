//! Error taxonomy for the import pipeline.
//!
//! Only a failure to open the catalog or configuration is fatal to a run.
//! Everything below surfaces as a skipped category or a failed item count.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    /// No folder under any naming variant matches the category
    #[error("no folder found for category '{0}'")]
    CategoryFolderNotFound(String),

    /// Image could not be opened or measured
    #[error("failed to read image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image decoded but the palette could not be computed
    #[error("palette extraction failed for {path}: {reason}")]
    PaletteExtraction { path: PathBuf, reason: String },

    /// Catalog rejected the record
    #[error("failed to store '{title}': {source}")]
    StorageWrite {
        title: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ImportResult<T> = std::result::Result<T, ImportError>;
