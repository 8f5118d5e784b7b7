//! Map document persistence.
//!
//! [`MapStore`] is the seam between the builder and the document format.
//! [`JsonMapStore`] is the bundled implementation; other encodings can be
//! plugged in without touching the builder.

use std::fs;
use std::path::Path;

use super::document::MapDocument;
use super::error::MapError;

/// Loads and saves map documents.
///
/// Implementations must be thread-safe so sibling branches can be written
/// from the rayon pool.
pub trait MapStore: Send + Sync {
    /// Read a document from `path`.
    fn load(&self, path: &Path) -> Result<MapDocument, MapError>;

    /// Write `document` to `path`, replacing any existing file.
    fn save(&self, document: &MapDocument, path: &Path) -> Result<(), MapError>;
}

/// Stores documents as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMapStore;

impl MapStore for JsonMapStore {
    fn load(&self, path: &Path) -> Result<MapDocument, MapError> {
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| MapError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self, document: &MapDocument, path: &Path) -> Result<(), MapError> {
        let text = serde_json::to_string_pretty(document).map_err(|source| MapError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Layer, MapObject, ObjectGroup, Point, Shape};
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("world 9x 27.tmx");
        let doc = MapDocument::square(9, 27).with_layer(Layer::Objects(ObjectGroup::new(
            "rivers",
            vec![MapObject::with_points(
                7,
                Shape::Polyline,
                1.0,
                2.0,
                vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
            )],
        )));

        JsonMapStore.save(&doc, &path).unwrap();
        assert_eq!(JsonMapStore.load(&path).unwrap(), doc);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = JsonMapStore
            .load(&temp.path().join("missing.tmx"))
            .unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.tmx");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonMapStore.load(&path),
            Err(MapError::Format { .. })
        ));
    }
}
