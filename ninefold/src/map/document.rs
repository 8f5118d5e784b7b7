//! Map document value types.
//!
//! A document is a square grid of square tiles holding background image
//! layers and object groups. Object coordinates are map pixels with the
//! origin at the top-left corner and y pointing down.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::MapError;

/// Named string properties, kept in key order.
pub type Properties = BTreeMap<String, String>;

/// Map projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Orthogonal => "orthogonal",
            Orientation::Isometric => "isometric",
            Orientation::Staggered => "staggered",
            Orientation::Hexagonal => "hexagonal",
        };
        f.write_str(name)
    }
}

/// Geometry kind of a map object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rectangle,
    Ellipse,
    Point,
    Polygon,
    Polyline,
}

impl Shape {
    /// Whether the object's geometry lives in its point list.
    pub fn has_points(self) -> bool {
        matches!(self, Shape::Polygon | Shape::Polyline)
    }
}

/// A point in map pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A vector object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapObject {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Polygon/polyline vertices relative to `(x, y)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl MapObject {
    /// A rectangle object.
    pub fn rectangle(id: u32, name: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id,
            name: name.into(),
            shape: Shape::Rectangle,
            x,
            y,
            width: w,
            height: h,
            ..Default::default()
        }
    }

    /// A polygon or polyline object.
    pub fn with_points(id: u32, shape: Shape, x: f64, y: f64, points: Vec<Point>) -> Self {
        Self {
            id,
            shape,
            x,
            y,
            points,
            ..Default::default()
        }
    }

    /// Set a property, returning the object.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Vertices translated into map pixels.
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .map(move |p| Point::new(p.x + self.x, p.y + self.y))
    }
}

/// A background image layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLayer {
    pub name: String,
    /// Image path, relative to the document's directory unless absolute.
    pub source: PathBuf,
}

/// A layer of vector objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl ObjectGroup {
    pub fn new(name: impl Into<String>, objects: Vec<MapObject>) -> Self {
        Self {
            name: name.into(),
            objects,
            properties: Properties::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// First object with the given name.
    pub fn object(&self, name: &str) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

/// A document layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Image(ImageLayer),
    Objects(ObjectGroup),
}

/// A tile-map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub orientation: Orientation,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl MapDocument {
    /// An empty square orthogonal map.
    pub fn square(map_size: u32, tile_size: u32) -> Self {
        Self {
            orientation: Orientation::Orthogonal,
            width: map_size,
            height: map_size,
            tile_width: tile_size,
            tile_height: tile_size,
            layers: Vec::new(),
            properties: Properties::new(),
        }
    }

    /// Append a layer, returning the document.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Check that the map can be split: orthogonal, square map, square tiles.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.orientation != Orientation::Orthogonal {
            return Err(MapError::NotOrthogonal(self.orientation));
        }
        if self.width != self.height {
            return Err(MapError::NonSquareMap {
                width: self.width,
                height: self.height,
            });
        }
        if self.tile_width != self.tile_height {
            return Err(MapError::NonSquareTiles {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        if self.width.checked_mul(self.tile_width).is_none() {
            return Err(MapError::MapTooLarge {
                map_size: self.width,
                tile_size: self.tile_width,
            });
        }
        Ok(())
    }

    /// Side of the map in pixels. Only meaningful once [`validate`](Self::validate)
    /// has passed.
    pub fn pixel_size(&self) -> u32 {
        self.width * self.tile_width
    }

    pub fn image_layers(&self) -> impl Iterator<Item = &ImageLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Image(image) => Some(image),
            Layer::Objects(_) => None,
        })
    }

    pub fn object_groups(&self) -> impl Iterator<Item = &ObjectGroup> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Objects(group) => Some(group),
            Layer::Image(_) => None,
        })
    }

    /// First object group with the given name.
    pub fn object_group(&self, name: &str) -> Option<&ObjectGroup> {
        self.object_groups().find(|g| g.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_square_orthogonal() {
        assert!(MapDocument::square(9, 27).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_isometric() {
        let mut doc = MapDocument::square(9, 27);
        doc.orientation = Orientation::Isometric;
        assert!(matches!(
            doc.validate(),
            Err(MapError::NotOrthogonal(Orientation::Isometric))
        ));
    }

    #[test]
    fn test_validate_rejects_non_square() {
        let mut doc = MapDocument::square(9, 27);
        doc.height = 8;
        assert!(matches!(doc.validate(), Err(MapError::NonSquareMap { .. })));

        let mut doc = MapDocument::square(9, 27);
        doc.tile_height = 32;
        assert!(matches!(doc.validate(), Err(MapError::NonSquareTiles { .. })));
    }

    #[test]
    fn test_validate_rejects_pixel_overflow() {
        let doc = MapDocument::square(70000, 70000);
        assert!(matches!(
            doc.validate(),
            Err(MapError::MapTooLarge {
                map_size: 70000,
                tile_size: 70000
            })
        ));
    }

    #[test]
    fn test_layer_accessors() {
        let doc = MapDocument::square(9, 27)
            .with_layer(Layer::Image(ImageLayer {
                name: "background".to_string(),
                source: PathBuf::from("bg.png"),
            }))
            .with_layer(Layer::Objects(ObjectGroup::new("roads", Vec::new())));

        assert_eq!(doc.pixel_size(), 243);
        assert_eq!(doc.image_layers().count(), 1);
        assert_eq!(doc.object_groups().count(), 1);
        assert!(doc.object_group("roads").is_some());
        assert!(doc.object_group("^").is_none());
    }

    #[test]
    fn test_absolute_points() {
        let obj = MapObject::with_points(
            1,
            Shape::Polyline,
            10.0,
            20.0,
            vec![Point::new(0.0, 0.0), Point::new(5.0, -5.0)],
        );
        let points: Vec<_> = obj.absolute_points().collect();
        assert_eq!(points, vec![Point::new(10.0, 20.0), Point::new(15.0, 15.0)]);
    }

    #[test]
    fn test_json_layer_tagging() {
        let layer = Layer::Image(ImageLayer {
            name: "bg".to_string(),
            source: PathBuf::from("bg.png"),
        });
        let json = serde_json::to_string(&layer).unwrap();
        assert!(json.contains("\"type\":\"image\""));
        let back: Layer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layer);
    }
}
