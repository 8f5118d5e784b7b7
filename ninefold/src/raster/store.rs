//! Raster persistence.

use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use super::error::RasterError;

/// Loads, saves and copies background images.
pub trait RasterStore: Send + Sync {
    /// Decode the image at `path` as RGBA.
    fn load(&self, path: &Path) -> Result<RgbaImage, RasterError>;

    /// Encode `image` to `path`, choosing the format from the extension.
    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), RasterError>;

    /// Copy the file at `from` to `to` byte for byte, replacing `to`.
    fn copy(&self, from: &Path, to: &Path) -> Result<(), RasterError>;
}

/// [`RasterStore`] on the local filesystem using the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRasterStore;

impl RasterStore for FsRasterStore {
    fn load(&self, path: &Path) -> Result<RgbaImage, RasterError> {
        if !path.exists() {
            return Err(RasterError::NotFound(path.to_path_buf()));
        }
        let image = image::open(path).map_err(|source| RasterError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(image.to_rgba8())
    }

    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), RasterError> {
        let map_err = |source| RasterError::Save {
            path: path.to_path_buf(),
            source,
        };

        // JPEG has no alpha channel.
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgba8(image.clone())
                .into_rgb8()
                .save(path)
                .map_err(map_err),
            _ => image.save(path).map_err(map_err),
        }
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), RasterError> {
        if !from.exists() {
            return Err(RasterError::NotFound(from.to_path_buf()));
        }
        let copy_err = |source| RasterError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        };

        if to.exists() {
            let same = fs::canonicalize(from).map_err(copy_err)?
                == fs::canonicalize(to).map_err(copy_err)?;
            if same {
                return Ok(());
            }
            fs::remove_file(to).map_err(copy_err)?;
        }
        fs::copy(from, to).map_err(copy_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bg.png");
        let image = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));

        FsRasterStore.save(&image, &path).unwrap();
        let loaded = FsRasterStore.load(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_save_jpeg_drops_alpha() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bg.jpg");
        let image = RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 128]));

        FsRasterStore.save(&image, &path).unwrap();
        assert_eq!(FsRasterStore.load(&path).unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn test_load_missing() {
        let temp = TempDir::new().unwrap();
        let err = FsRasterStore.load(&temp.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, RasterError::NotFound(_)));
    }

    #[test]
    fn test_copy_replaces_target() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("a.png");
        let to = temp.path().join("b.png");
        std::fs::write(&from, b"new").unwrap();
        std::fs::write(&to, b"old").unwrap();

        FsRasterStore.copy(&from, &to).unwrap();
        assert_eq!(std::fs::read(&to).unwrap(), b"new");
    }

    #[test]
    fn test_copy_onto_itself_is_noop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.png");
        std::fs::write(&path, b"keep").unwrap();

        FsRasterStore.copy(&path, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"keep");
    }
}
