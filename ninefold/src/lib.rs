//! Ninefold - recursive 3×3 pyramids of tile maps
//!
//! This library splits a square tile map into nine sub-maps, each of those
//! into nine more, and so on, producing ever more detailed maps of smaller
//! areas. Background images are cropped and rescaled per level; vector
//! object groups are rescaled (and optionally culled) to match.
//!
//! The crate is organised bottom-up:
//!
//! - [`coord`]: directions, direction addresses and their geometry
//! - [`map`]: map documents and the `^` area group
//! - [`raster`]: background image loading, cropping and rescaling
//! - [`objects`]: object group transforms between levels
//! - [`pyramid`]: the recursive builder
//! - [`config`] and [`logging`]: ambient setup used by the CLI

pub mod config;
pub mod coord;
pub mod logging;
pub mod map;
pub mod objects;
pub mod pyramid;
pub mod raster;
