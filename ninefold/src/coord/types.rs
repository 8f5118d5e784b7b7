//! Geometry value types shared by the address algebra and the builder.

use std::fmt;
use std::ops::{Add, Mul};

use thiserror::Error;

/// Errors produced when a normalized region is mapped into pixel space.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// The derived rectangle is not fully inside the raster.
    #[error(
        "Not correct rectangle for the background image: center ({cx}, {cy}) size {size} \
         maps to x={x} y={y} side={width} inside a raster of side {raster_side}"
    )]
    OutOfBounds {
        cx: f64,
        cy: f64,
        size: f64,
        x: i64,
        y: i64,
        width: i64,
        raster_side: u32,
    },

    /// The raster has no pixels to address.
    #[error("Raster side must be greater than 0")]
    EmptyRaster,
}

/// A point or vector in normalized map space (origin at the map center, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Sentinel returned for directions outside the 3×3 grid.
    pub const UNDEFINED: Vec2 = Vec2 {
        x: f64::MAX,
        y: f64::MAX,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether this is the [`Vec2::UNDEFINED`] sentinel.
    pub fn is_undefined(&self) -> bool {
        self.x == f64::MAX && self.y == f64::MAX
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

/// Center/size of a square area relative to the whole top-level map.
///
/// The full map is the unit square centered at the origin, so `center`
/// lies in `[-0.5, 0.5)` on both axes and `size` in `(0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRegion {
    pub center: Vec2,
    pub size: f64,
}

impl NormalizedRegion {
    /// The whole map.
    pub const FULL: NormalizedRegion = NormalizedRegion {
        center: Vec2::ZERO,
        size: 1.0,
    };

    pub const fn new(center: Vec2, size: f64) -> Self {
        Self { center, size }
    }

    /// Map this region into a square raster of the given side.
    ///
    /// Image space has its origin at the top-left corner with y down, so
    /// the y coordinate is flipped. Coordinates are rounded to the nearest
    /// pixel rather than truncated, so neighbouring cells stay flush when
    /// the side is not divisible by 3; for sides divisible by 3 both give
    /// the same rectangle. The rectangle must lie fully inside the raster.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::OutOfBounds`] when any edge falls outside the
    /// raster or the rectangle is empty.
    pub fn pixel_rect(&self, raster_side: u32) -> Result<PixelRect, CoordError> {
        if raster_side == 0 {
            return Err(CoordError::EmptyRaster);
        }

        let side = f64::from(raster_side);
        let half = self.size / 2.0;
        let x = ((self.center.x + 0.5 - half) * side).round() as i64;
        let y = (side - (self.center.y + 0.5 + half) * side).round() as i64;
        let width = (self.size * side).round() as i64;

        let limit = i64::from(raster_side);
        if x < 0 || y < 0 || width <= 0 || x + width > limit || y + width > limit {
            return Err(CoordError::OutOfBounds {
                cx: self.center.x,
                cy: self.center.y,
                size: self.size,
                x,
                y,
                width,
                raster_side,
            });
        }

        Ok(PixelRect {
            x: x as u32,
            y: y as u32,
            width: width as u32,
            height: width as u32,
        })
    }

    /// Map this region into a square of the given side without rounding.
    ///
    /// Used for vector geometry, where the side is expressed in tiles.
    pub fn scaled_rect(&self, side: f64) -> RectF {
        let half = self.size / 2.0;
        RectF {
            x: (self.center.x + 0.5 - half) * side,
            y: side - (self.center.y + 0.5 + half) * side,
            width: self.size * side,
            height: self.size * side,
        }
    }
}

impl Default for NormalizedRegion {
    fn default() -> Self {
        Self::FULL
    }
}

/// Integer rectangle in image space (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The x coordinate immediately right of the rectangle.
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// The y coordinate immediately below the rectangle.
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}×{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Floating-point rectangle in image space (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_region_covers_whole_raster() {
        let rect = NormalizedRegion::FULL.pixel_rect(243).unwrap();
        assert_eq!(rect, PixelRect::new(0, 0, 243, 243));
    }

    #[test]
    fn test_cardinal_regions_are_flush_with_edges() {
        let third = 1.0 / 3.0;
        let cases = [
            (Vec2::new(0.0, third), PixelRect::new(81, 0, 81, 81)),
            (Vec2::new(third, 0.0), PixelRect::new(162, 81, 81, 81)),
            (Vec2::new(0.0, -third), PixelRect::new(81, 162, 81, 81)),
            (Vec2::new(-third, 0.0), PixelRect::new(0, 81, 81, 81)),
        ];

        for (center, expected) in cases {
            let rect = NormalizedRegion::new(center, third).pixel_rect(243).unwrap();
            assert_eq!(rect, expected, "center {:?}", center);
        }
    }

    #[test]
    fn test_north_east_region() {
        let third = 1.0 / 3.0;
        let rect = NormalizedRegion::new(Vec2::new(third, third), third)
            .pixel_rect(243)
            .unwrap();
        assert_eq!(rect, PixelRect::new(162, 0, 81, 81));
        assert_eq!(rect.end_x(), 243);
        assert_eq!(rect.end_y(), 81);
    }

    #[test]
    fn test_rounding_keeps_east_cell_flush_on_odd_side() {
        // 100 is not divisible by 3: truncating would end the east cell at 99.
        let third = 1.0 / 3.0;
        let east = NormalizedRegion::new(Vec2::new(third, 0.0), third)
            .pixel_rect(100)
            .unwrap();
        assert_eq!(east, PixelRect::new(67, 33, 33, 33));
        assert_eq!(east.end_x(), 100);
    }

    #[test]
    fn test_region_outside_raster_is_rejected() {
        let region = NormalizedRegion::new(Vec2::new(0.6, 0.0), 1.0 / 3.0);
        let err = region.pixel_rect(243).unwrap_err();
        assert!(matches!(err, CoordError::OutOfBounds { .. }));
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        assert_eq!(
            NormalizedRegion::FULL.pixel_rect(0),
            Err(CoordError::EmptyRaster)
        );
    }

    #[test]
    fn test_scaled_rect_in_tiles() {
        let third = 1.0 / 3.0;
        let rect = NormalizedRegion::new(Vec2::new(third, 0.0), third).scaled_rect(9.0);
        assert!((rect.x - 6.0).abs() < 1e-9);
        assert!((rect.y - 3.0).abs() < 1e-9);
        assert!((rect.width - 3.0).abs() < 1e-9);
        assert!(rect.contains(6.0, 3.0));
        assert!(rect.contains(9.0, 6.0));
        assert!(!rect.contains(5.9, 4.0));
    }

    #[test]
    fn test_undefined_vector_sentinel() {
        assert!(Vec2::UNDEFINED.is_undefined());
        assert!(!Vec2::ZERO.is_undefined());
    }
}
