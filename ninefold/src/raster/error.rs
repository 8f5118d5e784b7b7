//! Error types for raster operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, transforming or saving rasters.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The image file does not exist.
    #[error("Could not find an image for the background at '{0}'")]
    NotFound(PathBuf),

    /// The image could not be decoded.
    #[error("Could not load an image for the background at '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image could not be encoded or written.
    #[error("Could not save a background image to '{path}': {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A verbatim copy failed.
    #[error("Could not copy image file '{from}' to '{to}': {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Background images must be square.
    #[error("Image for the background must be square, found {width}×{height}")]
    NonSquare { width: u32, height: u32 },
}

impl RasterError {
    /// Whether the error is about the image content rather than I/O.
    pub fn is_structural(&self) -> bool {
        matches!(self, RasterError::NonSquare { .. })
    }
}
