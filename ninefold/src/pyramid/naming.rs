//! Output naming conventions.
//!
//! These names are read by existing tooling and must not change:
//! - map files: `world <mapSize>x <tileSize>.tmx`
//! - sub-directories: the single-digit direction code relative to the parent

use crate::coord::Direction;

/// File name of a level's map document.
///
/// ```
/// use ninefold::pyramid::world_file_name;
///
/// assert_eq!(world_file_name(9, 27), "world 9x 27.tmx");
/// ```
pub fn world_file_name(map_size: u32, tile_size: u32) -> String {
    format!("world {}x {}.tmx", map_size, tile_size)
}

/// Directory name of a child relative to its parent.
pub fn direction_dir_name(direction: Direction) -> String {
    direction.code().to_string()
}
