//! Map documents: value types, the `^` area group and persistence.
//!
//! Reading and writing the document format is kept behind [`MapStore`];
//! everything else here is plain data the builder transforms into new
//! values.

mod area;
mod document;
mod error;
mod store;

pub use area::{
    format_number, level_extent, LevelSize, AREA_GROUP, COMPUTED_EXTENT_PROPERTY,
    COMPUTED_SIZE_PROPERTY, EXTENT_PROPERTY, MAX_LEVEL, SIZE_PROPERTY,
};
pub use document::{
    ImageLayer, Layer, MapDocument, MapObject, ObjectGroup, Orientation, Point, Properties, Shape,
};
pub use error::MapError;
pub use store::{JsonMapStore, MapStore};
