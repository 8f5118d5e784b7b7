//! Errors raised while reading, validating or writing map documents.

use std::path::PathBuf;

use thiserror::Error;

use super::document::Orientation;

/// Errors that can occur while handling a map document.
#[derive(Debug, Error)]
pub enum MapError {
    /// Only orthogonal maps can be split.
    #[error("Only an orthogonal map may be exported (found {0})")]
    NotOrthogonal(Orientation),

    /// The map is not square in tiles.
    #[error("Width and height of the map must be equal ({width}×{height})")]
    NonSquareMap { width: u32, height: u32 },

    /// The tiles are not square.
    #[error("Width and height of the tile must be equal ({width}×{height})")]
    NonSquareTiles { width: u32, height: u32 },

    /// The map's pixel side does not fit in 32 bits.
    #[error("The map is too large ({map_size}x {tile_size})")]
    MapTooLarge { map_size: u32, tile_size: u32 },

    /// The map has no `^` object group.
    #[error("Layer '^' not found")]
    MissingAreaGroup,

    /// Object `^.0` does not declare an extent.
    #[error("The property 'extent' must be declared on the object '^.0'")]
    MissingExtent,

    /// The declared extent is not a positive number.
    #[error("The property 'extent' must be a number greater than 0, found '{0}'")]
    InvalidExtent(String),

    /// An object in `^` is not named after a survey level.
    #[error("Undefined object name '{0}' in the layer '^'")]
    UnknownAreaObject(String),

    /// A survey object lacks its size property.
    #[error("The property '{property}' was not found on the object '^.{survey}'")]
    MissingSize { survey: u32, property: &'static str },

    /// A size property is malformed.
    #[error("Invalid size '{value}' on the object '^.{survey}': {reason}")]
    InvalidSize {
        survey: u32,
        value: String,
        reason: &'static str,
    },

    /// Reading or writing the document failed.
    #[error("I/O error on map document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded or decoded.
    #[error("Malformed map document {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MapError {
    /// Whether this error came from the filesystem or the encoding layer
    /// rather than from the document's content.
    pub fn is_io(&self) -> bool {
        matches!(self, MapError::Io { .. } | MapError::Format { .. })
    }
}
