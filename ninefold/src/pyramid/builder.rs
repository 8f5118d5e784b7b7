//! Recursive construction of the 3×3 map pyramid.
//!
//! The top map is validated, annotated with computed sizes and extents and
//! written together with verbatim copies of its background images. Each
//! level then derives nine children: the child's cell is cropped out of the
//! parent's background and rescaled to the size configured for the child's
//! survey, its object groups are transformed, and the child recurses in
//! turn. A survey without a configured size ends the branch silently.
//!
//! Each child reads only its parent's finished raster and document, so the
//! nine siblings of a level are independent and may run in parallel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::coord::{Direction, DirectionAddress};
use crate::map::{
    format_number, level_extent, JsonMapStore, Layer, LevelSize, MapDocument, MapStore,
    COMPUTED_EXTENT_PROPERTY,
};
use crate::objects::{transform_group, LevelTransform};
use crate::raster::{crop_and_scale, square_side, FsRasterStore, RasterStore};

use super::config::BuildConfig;
use super::error::PyramidError;
use super::naming::{direction_dir_name, world_file_name};
use super::report::{BuildReport, LevelRecord};

/// Document property holding a child's survey level.
pub const SURVEY_PROPERTY: &str = "=survey";

/// Document property holding a child's decimal path id.
pub const PATH_PROPERTY: &str = "=path";

/// A background raster carried from a level to its children.
struct Background {
    file_name: PathBuf,
    raster: RgbaImage,
}

/// A finished level, read-only while its children are derived.
struct Level {
    survey: u32,
    address: DirectionAddress,
    size: LevelSize,
    directory: PathBuf,
    document: MapDocument,
    backgrounds: Vec<Background>,
}

/// Values shared by every branch of one build.
struct BuildContext {
    /// The annotated top map; per-survey sizes are looked up here.
    top: MapDocument,
    extent: f64,
}

/// Builds a pyramid of maps from one square source map.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ninefold::pyramid::{BuildConfig, PyramidBuilder};
///
/// let builder = PyramidBuilder::new(BuildConfig::default().with_max_survey(2));
/// let report = builder
///     .build_file(Path::new("maps/world.json"), Path::new("out"))
///     .unwrap();
/// println!("{} levels written", report.levels.len());
/// ```
pub struct PyramidBuilder {
    config: BuildConfig,
    maps: Arc<dyn MapStore>,
    rasters: Arc<dyn RasterStore>,
}

impl PyramidBuilder {
    /// Builder using JSON documents and filesystem images.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_stores(config, Arc::new(JsonMapStore), Arc::new(FsRasterStore))
    }

    /// Builder using custom document and raster stores.
    pub fn with_stores(
        config: BuildConfig,
        maps: Arc<dyn MapStore>,
        rasters: Arc<dyn RasterStore>,
    ) -> Self {
        Self {
            config,
            maps,
            rasters,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Load the map at `source` and build its pyramid into `out_dir`.
    ///
    /// Relative image paths are resolved against the map's directory.
    pub fn build_file(&self, source: &Path, out_dir: &Path) -> Result<BuildReport, PyramidError> {
        let document = self.maps.load(source)?;
        let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
        self.build(&document, source_dir, out_dir)
    }

    /// Build the pyramid of `document` into `out_dir`.
    ///
    /// On error, files written by branches that already finished stay on
    /// disk.
    pub fn build(
        &self,
        document: &MapDocument,
        source_dir: &Path,
        out_dir: &Path,
    ) -> Result<BuildReport, PyramidError> {
        document.validate()?;
        let extent = document.extent()?;
        let mut top = document.with_size_and_extent()?;
        create_dir(out_dir)?;

        let mut backgrounds = Vec::new();
        for layer in &mut top.layers {
            let Layer::Image(image) = layer else {
                continue;
            };
            let file_name = image
                .source
                .file_name()
                .map(PathBuf::from)
                .ok_or_else(|| PyramidError::InvalidImageSource(image.source.clone()))?;
            let src = source_dir.join(&image.source);
            let dest = out_dir.join(&file_name);

            self.rasters.copy(&src, &dest)?;
            let raster = self.rasters.load(&dest)?;
            square_side(&raster)?;
            debug!(source = %src.display(), dest = %dest.display(), "Copied background image");

            image.source = file_name.clone();
            backgrounds.push(Background { file_name, raster });
        }

        let size = LevelSize::new(top.width, top.tile_width);
        let map_file = out_dir.join(world_file_name(size.map_size, size.tile_size));
        self.maps.save(&top, &map_file)?;
        info!(file = %map_file.display(), size = %size, extent, "Wrote top map");

        let mut report = BuildReport::default();
        report.levels.push(LevelRecord {
            survey: 0,
            address: DirectionAddress::new(),
            directory: out_dir.to_path_buf(),
            map_file,
            size,
            extent,
        });

        let root = Level {
            survey: 0,
            address: DirectionAddress::new(),
            size,
            directory: out_dir.to_path_buf(),
            document: top.clone(),
            backgrounds,
        };
        let context = BuildContext { top, extent };

        report.merge(self.descend_all(&root, &context)?);
        report.sort();

        info!(
            levels = report.levels.len(),
            pruned = report.pruned,
            deepest = report.deepest_survey(),
            "Pyramid complete"
        );
        Ok(report)
    }

    /// Derive all nine children of `parent`.
    fn descend_all(
        &self,
        parent: &Level,
        context: &BuildContext,
    ) -> Result<BuildReport, PyramidError> {
        let mut report = BuildReport::default();

        if self.config.parallel {
            let branches: Vec<BuildReport> = Direction::ALL
                .par_iter()
                .map(|&d| self.descend(parent, d, context))
                .collect::<Result<_, _>>()?;
            for branch in branches {
                report.merge(branch);
            }
        } else {
            for d in Direction::ALL {
                report.merge(self.descend(parent, d, context)?);
            }
        }

        Ok(report)
    }

    /// Derive the child of `parent` in direction `d`, then its own children.
    fn descend(
        &self,
        parent: &Level,
        d: Direction,
        context: &BuildContext,
    ) -> Result<BuildReport, PyramidError> {
        let survey = parent.survey + 1;
        let mut address = parent.address;
        address.advance(d);

        if survey > self.config.max_survey {
            return Ok(BuildReport::default());
        }
        let Some(size) = context.top.level_size(survey)? else {
            debug!(survey, address = %address, "No size configured, branch ends");
            return Ok(BuildReport::pruned_branch());
        };

        let directory = parent.directory.join(direction_dir_name(d));
        create_dir(&directory)?;

        // The front slot is the step just taken, so its area is the
        // child's cell inside the parent's raster.
        let region = address.step().area();

        let mut backgrounds = Vec::with_capacity(parent.backgrounds.len());
        for background in &parent.backgrounds {
            let side = square_side(&background.raster)?;
            let rect = region
                .pixel_rect(side)
                .map_err(|source| PyramidError::Geometry {
                    address,
                    survey,
                    source,
                })?;
            debug!(
                survey,
                address = %address,
                rect = %rect,
                parent_side = side,
                child_side = size.pixel_size(),
                "Cropping background"
            );

            let raster = crop_and_scale(
                &background.raster,
                rect,
                size.pixel_size(),
                self.config.filter,
            );
            self.rasters
                .save(&raster, &directory.join(&background.file_name))?;
            backgrounds.push(Background {
                file_name: background.file_name.clone(),
                raster,
            });
        }

        let transform = LevelTransform::new(parent.size, size, region);
        let extent = level_extent(context.extent, survey);
        let document = self.child_document(&parent.document, &transform, survey, address, extent);
        let map_file = directory.join(world_file_name(size.map_size, size.tile_size));
        self.maps.save(&document, &map_file)?;
        info!(
            survey,
            address = %address,
            path_id = address.path_id(),
            file = %map_file.display(),
            "Wrote pyramid level"
        );

        let mut report = BuildReport::default();
        report.levels.push(LevelRecord {
            survey,
            address,
            directory: directory.clone(),
            map_file,
            size,
            extent,
        });

        let level = Level {
            survey,
            address,
            size,
            directory,
            document,
            backgrounds,
        };
        report.merge(self.descend_all(&level, context)?);
        Ok(report)
    }

    /// New child document: image layers keep their file names, object
    /// groups are transformed, groups left empty are dropped.
    fn child_document(
        &self,
        parent: &MapDocument,
        transform: &LevelTransform,
        survey: u32,
        address: DirectionAddress,
        extent: f64,
    ) -> MapDocument {
        let mut child = MapDocument::square(transform.child.map_size, transform.child.tile_size);
        child.orientation = parent.orientation;

        for layer in &parent.layers {
            match layer {
                Layer::Image(image) => child.layers.push(Layer::Image(image.clone())),
                Layer::Objects(group) => {
                    let group = transform_group(group, transform, self.config.content_policy);
                    if !group.is_empty() {
                        child.layers.push(Layer::Objects(group));
                    }
                }
            }
        }

        child
            .properties
            .insert(SURVEY_PROPERTY.to_string(), survey.to_string());
        child
            .properties
            .insert(COMPUTED_EXTENT_PROPERTY.to_string(), format_number(extent));
        child
            .properties
            .insert(PATH_PROPERTY.to_string(), address.path_id().to_string());
        child
    }
}

fn create_dir(path: &Path) -> Result<(), PyramidError> {
    fs::create_dir_all(path).map_err(|source| PyramidError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{
        ImageLayer, MapObject, ObjectGroup, AREA_GROUP, EXTENT_PROPERTY, SIZE_PROPERTY,
    };
    use crate::objects::ContentPolicy;

    fn transform() -> LevelTransform {
        LevelTransform::new(
            LevelSize::new(9, 27),
            LevelSize::new(9, 9),
            DirectionAddress::from(Direction::W).area(),
        )
    }

    fn parent_document() -> MapDocument {
        MapDocument::square(9, 27)
            .with_layer(Layer::Image(ImageLayer {
                name: "background".to_string(),
                source: PathBuf::from("bg.png"),
            }))
            .with_layer(Layer::Objects(ObjectGroup::new(
                AREA_GROUP,
                vec![
                    MapObject::rectangle(1, "0", 0.0, 0.0, 243.0, 243.0)
                        .with_property(EXTENT_PROPERTY, "81"),
                    MapObject::rectangle(2, "1", 0.0, 0.0, 81.0, 81.0)
                        .with_property(SIZE_PROPERTY, "9x 9"),
                ],
            )))
            .with_layer(Layer::Objects(ObjectGroup::new("empty", Vec::new())))
    }

    #[test]
    fn test_child_document_layers_and_properties() {
        let builder = PyramidBuilder::new(BuildConfig::default());
        let address = DirectionAddress::from(Direction::W);
        let child = builder.child_document(&parent_document(), &transform(), 1, address, 27.0);

        assert_eq!(child.width, 9);
        assert_eq!(child.tile_width, 9);
        assert_eq!(child.image_layers().count(), 1);
        assert!(child.object_group("empty").is_none());
        assert_eq!(child.properties.get(SURVEY_PROPERTY).unwrap(), "1");
        assert_eq!(child.properties.get(COMPUTED_EXTENT_PROPERTY).unwrap(), "27");
        assert_eq!(child.properties.get(PATH_PROPERTY).unwrap(), "4");

        // k = 81/243, t = 27/9
        let area = child.area_group().unwrap();
        assert!((area.object("0").unwrap().width - 243.0).abs() < 1e-9);
    }

    #[test]
    fn test_child_document_respects_content_policy() {
        let parent = parent_document().with_layer(Layer::Objects(ObjectGroup::new(
            "rivers",
            vec![MapObject::with_points(
                9,
                crate::map::Shape::Polyline,
                200.0,
                200.0,
                vec![crate::map::Point::new(10.0, 10.0)],
            )],
        )));

        let pass = PyramidBuilder::new(BuildConfig::default());
        let child = pass.child_document(&parent, &transform(), 1, DirectionAddress::new(), 27.0);
        assert_eq!(child.object_group("rivers").unwrap().objects.len(), 1);

        let cull = PyramidBuilder::new(
            BuildConfig::default().with_content_policy(ContentPolicy::CullAndScale),
        );
        let child = cull.child_document(&parent, &transform(), 1, DirectionAddress::new(), 27.0);
        assert!(child.object_group("rivers").is_none());
    }
}
