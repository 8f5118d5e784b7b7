//! Addressing inside nested 3×3 grids.
//!
//! A map is split into nine cells, each cell into nine more, and so on.
//! [`DirectionAddress`] names a cell at some depth as a short path of
//! [`Direction`]s and turns that path into a [`NormalizedRegion`], which
//! [`NormalizedRegion::pixel_rect`] then maps onto a concrete raster.
//!
//! # Example
//!
//! ```
//! use ninefold::coord::{Direction, DirectionAddress, PixelRect};
//!
//! let address = DirectionAddress::from(Direction::NE);
//! let rect = address.area().pixel_rect(243).unwrap();
//! assert_eq!(rect, PixelRect::new(162, 0, 81, 81));
//! assert_eq!(address.path_id(), 5);
//! ```

mod address;
mod direction;
mod types;

pub use address::{DirectionAddress, CAPACITY, MAX_SURVEY};
pub use direction::{shift_of_code, Direction, ParseDirectionError};
pub use types::{CoordError, NormalizedRegion, PixelRect, RectF, Vec2};
