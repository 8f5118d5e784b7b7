//! Cropping and rescaling of background rasters.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::error::RasterError;
use crate::coord::PixelRect;

/// Resampling filter used when a crop is rescaled.
///
/// Every filter is deterministic; only the output dimensions are part of
/// the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFilter {
    /// Nearest neighbour (fastest, the default).
    #[default]
    Nearest,
    /// Linear filter.
    Triangle,
    /// Cubic filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl ScaleFilter {
    /// Name used in configuration files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ScaleFilter::Nearest => "nearest",
            ScaleFilter::Triangle => "triangle",
            ScaleFilter::CatmullRom => "catmull-rom",
            ScaleFilter::Gaussian => "gaussian",
            ScaleFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl From<ScaleFilter> for FilterType {
    fn from(filter: ScaleFilter) -> Self {
        match filter {
            ScaleFilter::Nearest => FilterType::Nearest,
            ScaleFilter::Triangle => FilterType::Triangle,
            ScaleFilter::CatmullRom => FilterType::CatmullRom,
            ScaleFilter::Gaussian => FilterType::Gaussian,
            ScaleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ScaleFilter::Nearest),
            "triangle" => Ok(ScaleFilter::Triangle),
            "catmull-rom" | "catmullrom" => Ok(ScaleFilter::CatmullRom),
            "gaussian" => Ok(ScaleFilter::Gaussian),
            "lanczos3" => Ok(ScaleFilter::Lanczos3),
            other => Err(format!("unknown scale filter '{}'", other)),
        }
    }
}

/// Side of a background image, which must be square.
pub fn square_side(image: &RgbaImage) -> Result<u32, RasterError> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(RasterError::NonSquare { width, height });
    }
    Ok(width)
}

/// Cut `rect` out of `source` and rescale it to `size × size`.
///
/// The crop is a borrowed view into the source buffer; pixels are only
/// copied by the resize (or once, when no resize is needed). `rect` must
/// already be validated against the source dimensions.
pub fn crop_and_scale(
    source: &RgbaImage,
    rect: PixelRect,
    size: u32,
    filter: ScaleFilter,
) -> RgbaImage {
    debug_assert!(rect.end_x() <= source.width() && rect.end_y() <= source.height());

    let view = imageops::crop_imm(source, rect.x, rect.y, rect.width, rect.height);
    if rect.width == size && rect.height == size {
        return view.to_image();
    }
    imageops::resize(&*view, size, size, filter.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 9×9 image where each 3×3 cell has its own colour.
    fn cell_image() -> RgbaImage {
        RgbaImage::from_fn(9, 9, |x, y| {
            let cell = (y / 3) * 3 + x / 3;
            Rgba([cell as u8 * 10, 0, 0, 255])
        })
    }

    #[test]
    fn test_crop_without_scale() {
        let image = cell_image();
        let out = crop_and_scale(&image, PixelRect::new(6, 0, 3, 3), 3, ScaleFilter::Nearest);
        assert_eq!(out.dimensions(), (3, 3));
        assert!(out.pixels().all(|p| p.0[0] == 20));
    }

    #[test]
    fn test_crop_and_upscale() {
        let image = cell_image();
        let out = crop_and_scale(&image, PixelRect::new(3, 3, 3, 3), 12, ScaleFilter::Nearest);
        assert_eq!(out.dimensions(), (12, 12));
        assert!(out.pixels().all(|p| p.0[0] == 40));
    }

    #[test]
    fn test_crop_and_downscale_dimensions() {
        let image = RgbaImage::new(90, 90);
        for filter in [
            ScaleFilter::Nearest,
            ScaleFilter::Triangle,
            ScaleFilter::Lanczos3,
        ] {
            let out = crop_and_scale(&image, PixelRect::new(0, 0, 30, 30), 7, filter);
            assert_eq!(out.dimensions(), (7, 7));
        }
    }

    #[test]
    fn test_square_side() {
        assert_eq!(square_side(&RgbaImage::new(5, 5)).unwrap(), 5);
        assert!(matches!(
            square_side(&RgbaImage::new(5, 4)),
            Err(RasterError::NonSquare {
                width: 5,
                height: 4
            })
        ));
    }

    #[test]
    fn test_filter_names_roundtrip() {
        for filter in [
            ScaleFilter::Nearest,
            ScaleFilter::Triangle,
            ScaleFilter::CatmullRom,
            ScaleFilter::Gaussian,
            ScaleFilter::Lanczos3,
        ] {
            assert_eq!(filter.name().parse::<ScaleFilter>(), Ok(filter));
        }
        assert!("bicubic".parse::<ScaleFilter>().is_err());
    }
}
