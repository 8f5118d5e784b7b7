//! The `^` object group: per-survey sizes and the global extent.
//!
//! The group holds one object per survey level, named `"0"` to `"8"`.
//! Object `"0"` describes the top map: its manual `extent` property is the
//! global extent, and its computed `=size` mirrors the map's own size.
//! Objects `"1"`..`"8"` carry a manual `size` for their level. A size is
//! written as `"<mapSize>x <tileSize>"`, e.g. `"9x 27"`.

use std::fmt;

use super::document::{Layer, MapDocument};
use super::error::MapError;

/// Name of the area/meta object group.
pub const AREA_GROUP: &str = "^";

/// Manual extent on object `^.0`.
pub const EXTENT_PROPERTY: &str = "extent";

/// Computed extent on every sized survey object.
pub const COMPUTED_EXTENT_PROPERTY: &str = "=extent";

/// Manual size on objects `^.1`..`^.8`.
pub const SIZE_PROPERTY: &str = "size";

/// Computed size on object `^.0`.
pub const COMPUTED_SIZE_PROPERTY: &str = "=size";

/// Highest survey level that can be configured.
pub const MAX_LEVEL: u32 = 8;

/// Map and tile size configured for one survey level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelSize {
    /// Map side in tiles.
    pub map_size: u32,
    /// Tile side in pixels.
    pub tile_size: u32,
}

impl LevelSize {
    pub const fn new(map_size: u32, tile_size: u32) -> Self {
        Self {
            map_size,
            tile_size,
        }
    }

    /// Map side in pixels.
    pub fn pixel_size(&self) -> u32 {
        self.map_size * self.tile_size
    }

    /// Parse `"<mapSize>x <tileSize>"`.
    pub fn parse(value: &str, survey: u32) -> Result<Self, MapError> {
        let invalid = |reason| MapError::InvalidSize {
            survey,
            value: value.to_string(),
            reason,
        };

        let parts: Vec<&str> = value.split(' ').collect();
        let [map, tile] = parts.as_slice() else {
            return Err(invalid("expected 2 values separated by a space"));
        };
        let Some(map) = map.strip_suffix('x') else {
            return Err(invalid("the map size must end with 'x'"));
        };

        let map_size: i64 = map
            .parse()
            .map_err(|_| invalid("the map size is not an integer"))?;
        let tile_size: i64 = tile
            .parse()
            .map_err(|_| invalid("the tile size is not an integer"))?;
        if map_size <= 0 {
            return Err(invalid("the map size must be greater than 0"));
        }
        if tile_size <= 0 {
            return Err(invalid("the tile size must be greater than 0"));
        }

        let map_size = u32::try_from(map_size).map_err(|_| invalid("the map size is too large"))?;
        let tile_size =
            u32::try_from(tile_size).map_err(|_| invalid("the tile size is too large"))?;
        if map_size.checked_mul(tile_size).is_none() {
            return Err(invalid("the map is too large"));
        }
        Ok(Self::new(map_size, tile_size))
    }
}

impl fmt::Display for LevelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.map_size, self.tile_size)
    }
}

/// Extent of a level: the global extent divided by 3 per survey.
pub fn level_extent(extent: f64, survey: u32) -> f64 {
    extent / 3f64.powi(survey as i32)
}

/// Format a number for a property value: integers without a fraction,
/// everything else with at most six decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let s = format!("{:.6}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl MapDocument {
    /// The `^` group, if present.
    pub fn area_group(&self) -> Option<&super::ObjectGroup> {
        self.object_group(AREA_GROUP)
    }

    /// Global extent declared on `^.0`.
    pub fn extent(&self) -> Result<f64, MapError> {
        let object = self
            .area_group()
            .and_then(|g| g.object("0"))
            .ok_or(MapError::MissingExtent)?;
        let raw = object
            .property(EXTENT_PROPERTY)
            .ok_or(MapError::MissingExtent)?;
        if raw.trim().is_empty() {
            return Err(MapError::MissingExtent);
        }

        match raw.trim().parse::<f64>() {
            Ok(e) if e > 0.0 && e.is_finite() => Ok(e),
            _ => Err(MapError::InvalidExtent(raw.to_string())),
        }
    }

    /// Size configured for a survey level.
    ///
    /// `Ok(None)` means the level is not configured: the pyramid does not
    /// extend that far. Survey 0 reads the computed `=size`, every other
    /// level the manual `size`.
    pub fn level_size(&self, survey: u32) -> Result<Option<LevelSize>, MapError> {
        if survey > MAX_LEVEL {
            return Ok(None);
        }
        let Some(object) = self
            .area_group()
            .and_then(|g| g.object(&survey.to_string()))
        else {
            return Ok(None);
        };

        let property = if survey == 0 {
            COMPUTED_SIZE_PROPERTY
        } else {
            SIZE_PROPERTY
        };
        let value = object
            .property(property)
            .ok_or(MapError::MissingSize { survey, property })?;
        LevelSize::parse(value, survey).map(Some)
    }

    /// Copy of the document with computed sizes and extents filled in.
    ///
    /// `^.0` receives `=size` (the map's own size) and every sized survey
    /// object receives `=extent`.
    pub fn with_size_and_extent(&self) -> Result<MapDocument, MapError> {
        if self.area_group().is_none() {
            return Err(MapError::MissingAreaGroup);
        }
        let extent = self.extent()?;
        let own_size = LevelSize::new(self.width, self.tile_width);

        let mut levels = Vec::new();
        for survey in 1..=MAX_LEVEL {
            levels.push(self.level_size(survey)?);
        }

        let mut document = self.clone();
        let group = document
            .layers
            .iter_mut()
            .find_map(|l| match l {
                Layer::Objects(g) if g.name == AREA_GROUP => Some(g),
                _ => None,
            })
            .ok_or(MapError::MissingAreaGroup)?;

        for object in &mut group.objects {
            let survey = match object.name.parse::<u32>() {
                Ok(n) if n <= MAX_LEVEL => n,
                _ => return Err(MapError::UnknownAreaObject(object.name.clone())),
            };

            if survey == 0 {
                object
                    .properties
                    .insert(COMPUTED_SIZE_PROPERTY.to_string(), own_size.to_string());
            } else if levels[survey as usize - 1].is_none() {
                continue;
            }
            object.properties.insert(
                COMPUTED_EXTENT_PROPERTY.to_string(),
                format_number(level_extent(extent, survey)),
            );
        }

        Ok(document)
    }
}
