//! Background rasters: loading, saving, cropping and rescaling.

mod error;
mod scale;
mod store;

pub use error::RasterError;
pub use scale::{crop_and_scale, square_side, ScaleFilter};
pub use store::{FsRasterStore, RasterStore};
