//! Error types for pyramid builds.

use std::path::PathBuf;

use thiserror::Error;

use crate::coord::{CoordError, DirectionAddress};
use crate::map::MapError;
use crate::raster::RasterError;

/// Broad classification of a build failure.
///
/// A missing size configuration is not a failure: it ends the branch and
/// is reported as a pruned branch in the build report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An address maps outside its parent raster.
    GeometryViolation,
    /// The source map or its configuration cannot be split.
    StructuralInvalid,
    /// Reading or writing an image or a document failed.
    IoFailure,
}

/// Errors that abort a pyramid build.
#[derive(Debug, Error)]
pub enum PyramidError {
    /// The address of a child does not fit inside its parent raster.
    #[error("Address {address} at survey {survey} does not fit its parent: {source}")]
    Geometry {
        address: DirectionAddress,
        survey: u32,
        #[source]
        source: CoordError,
    },

    /// The map document is invalid or could not be read/written.
    #[error(transparent)]
    Map(#[from] MapError),

    /// A background image is invalid or could not be read/written.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// An output directory could not be created.
    #[error("Could not create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image layer's source has no file name.
    #[error("Image layer source '{0}' has no file name")]
    InvalidImageSource(PathBuf),
}

impl PyramidError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PyramidError::Geometry { .. } => ErrorKind::GeometryViolation,
            PyramidError::Map(e) if e.is_io() => ErrorKind::IoFailure,
            PyramidError::Map(_) => ErrorKind::StructuralInvalid,
            PyramidError::Raster(e) if e.is_structural() => ErrorKind::StructuralInvalid,
            PyramidError::Raster(_) => ErrorKind::IoFailure,
            PyramidError::CreateDir { .. } => ErrorKind::IoFailure,
            PyramidError::InvalidImageSource(_) => ErrorKind::StructuralInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Direction;

    #[test]
    fn test_kind_geometry() {
        let err = PyramidError::Geometry {
            address: DirectionAddress::from(Direction::E),
            survey: 1,
            source: CoordError::EmptyRaster,
        };
        assert_eq!(err.kind(), ErrorKind::GeometryViolation);
        assert!(err.to_string().starts_with("Address E at survey 1"));
    }

    #[test]
    fn test_kind_structural() {
        let err: PyramidError = MapError::MissingExtent.into();
        assert_eq!(err.kind(), ErrorKind::StructuralInvalid);
        assert_eq!(
            err.to_string(),
            "The property 'extent' must be declared on the object '^.0'"
        );

        let err: PyramidError = RasterError::NonSquare {
            width: 2,
            height: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::StructuralInvalid);
    }

    #[test]
    fn test_kind_io() {
        let err: PyramidError = RasterError::NotFound(PathBuf::from("bg.png")).into();
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err = PyramidError::CreateDir {
            path: PathBuf::from("/out/2"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }
}
