//! Pyramid builds.
//!
//! [`PyramidBuilder`] turns one square map into a directory tree of maps:
//!
//! ```text
//! out/
//!   world 9x 27.tmx        top map, survey 0
//!   bg.png                 verbatim copy of the background
//!   0/ .. 8/               one directory per direction code
//!     world 9x 27.tmx      child map, survey 1
//!     bg.png               cropped and rescaled background
//!     0/ .. 8/             survey 2, if sized
//! ```
//!
//! The depth of the tree is bounded by [`BuildConfig::max_survey`] and by
//! the survey sizes configured in the top map's `^` group.

mod builder;
mod config;
mod error;
mod naming;
mod report;

pub use builder::{PyramidBuilder, PATH_PROPERTY, SURVEY_PROPERTY};
pub use config::{BuildConfig, DEFAULT_MAX_SURVEY};
pub use error::{ErrorKind, PyramidError};
pub use naming::{direction_dir_name, world_file_name};
pub use report::{BuildReport, LevelRecord};
