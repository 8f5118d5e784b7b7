//! Rescaling and culling of object groups between two pyramid levels.

use crate::coord::{NormalizedRegion, RectF};
use crate::map::{LevelSize, MapObject, ObjectGroup, Point, Shape, AREA_GROUP};

use super::policy::ContentPolicy;

/// Geometry relating a parent level to one of its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTransform {
    pub parent: LevelSize,
    pub child: LevelSize,
    /// Area of the child inside the parent.
    pub region: NormalizedRegion,
}

impl LevelTransform {
    pub fn new(parent: LevelSize, child: LevelSize, region: NormalizedRegion) -> Self {
        Self {
            parent,
            child,
            region,
        }
    }

    /// `k * t`, where `k` is the ratio of child to parent pixel size and
    /// `t` the ratio of parent to child tile size.
    pub fn scale_factor(&self) -> f64 {
        let k = f64::from(self.child.pixel_size()) / f64::from(self.parent.pixel_size());
        let t = f64::from(self.parent.tile_size) / f64::from(self.child.tile_size);
        k * t
    }

    /// The child's area inside the parent, in parent tiles.
    pub fn cull_rect(&self) -> RectF {
        self.region.scaled_rect(f64::from(self.parent.map_size))
    }

    /// Top-left corner of the child's area inside the parent, in pixels.
    fn origin(&self) -> Point {
        let rect = self.cull_rect();
        let tile = f64::from(self.parent.tile_size);
        Point::new(rect.x * tile, rect.y * tile)
    }
}

/// Produce the child's copy of `group`.
///
/// The `^` group is always rescaled; other groups follow `policy`.
pub fn transform_group(
    group: &ObjectGroup,
    transform: &LevelTransform,
    policy: ContentPolicy,
) -> ObjectGroup {
    if group.name == AREA_GROUP {
        return scale_area_group(group, transform.scale_factor());
    }
    match policy {
        ContentPolicy::PassThrough => group.clone(),
        ContentPolicy::CullAndScale => cull_and_scale(group, transform),
    }
}

/// Multiply position and size of every object by `factor`.
pub fn scale_area_group(group: &ObjectGroup, factor: f64) -> ObjectGroup {
    let objects = group
        .objects
        .iter()
        .map(|o| MapObject {
            x: o.x * factor,
            y: o.y * factor,
            width: o.width * factor,
            height: o.height * factor,
            ..o.clone()
        })
        .collect();

    ObjectGroup {
        objects,
        ..group.clone()
    }
}

/// Whether the geometry of a polygon/polyline touches the child area.
///
/// A vertex inside the area is enough. Otherwise an edge may cross the
/// area, or a polygon may enclose it entirely. Objects without vertex
/// geometry are always kept.
pub fn intersects_child(object: &MapObject, transform: &LevelTransform) -> bool {
    if !object.shape.has_points() {
        return true;
    }
    let rect = transform.cull_rect();
    let tile = f64::from(transform.parent.tile_size);
    let points: Vec<Point> = object
        .absolute_points()
        .map(|p| Point::new(p.x / tile, p.y / tile))
        .collect();

    if points.iter().any(|p| rect.contains(p.x, p.y)) {
        return true;
    }

    let closed = object.shape == Shape::Polygon && points.len() > 2;
    let closing = closed.then(|| (points[points.len() - 1], points[0]));
    let crosses = points
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(closing)
        .any(|(a, b)| segment_hits_rect(a, b, &rect));
    if crosses {
        return true;
    }

    closed && polygon_contains(&points, Point::new(rect.x, rect.y))
}

/// Liang-Barsky clip of the segment `a..b` against `rect`.
fn segment_hits_rect(a: Point, b: Point, rect: &RectF) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, a.x - rect.x),
        (dx, rect.x + rect.width - a.x),
        (-dy, a.y - rect.y),
        (dy, rect.y + rect.height - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return false;
        }
    }
    true
}

/// Even-odd test of `p` against the closed ring `ring`.
fn polygon_contains(ring: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Drop polygons/polylines outside the child area, then move the rest into
/// child coordinates and rescale them.
///
/// Other shapes pass through unchanged.
pub fn cull_and_scale(group: &ObjectGroup, transform: &LevelTransform) -> ObjectGroup {
    let factor = transform.scale_factor();
    let origin = transform.origin();

    let objects = group
        .objects
        .iter()
        .filter(|o| intersects_child(o, transform))
        .map(|o| {
            if !o.shape.has_points() {
                return o.clone();
            }
            MapObject {
                x: (o.x - origin.x) * factor,
                y: (o.y - origin.y) * factor,
                points: o
                    .points
                    .iter()
                    .map(|p| Point::new(p.x * factor, p.y * factor))
                    .collect(),
                ..o.clone()
            }
        })
        .collect();

    ObjectGroup {
        objects,
        ..group.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{Direction, DirectionAddress};

    fn east_transform() -> LevelTransform {
        LevelTransform::new(
            LevelSize::new(9, 27),
            LevelSize::new(3, 81),
            DirectionAddress::from(Direction::E).area(),
        )
    }

    #[test]
    fn test_scale_factor() {
        // k = 243/243, t = 27/81
        let transform = east_transform();
        assert!((transform.scale_factor() - 1.0 / 3.0).abs() < 1e-12);

        let same = LevelTransform::new(
            LevelSize::new(9, 27),
            LevelSize::new(9, 27),
            NormalizedRegion::FULL,
        );
        assert_eq!(same.scale_factor(), 1.0);
    }

    #[test]
    fn test_cull_rect_in_parent_tiles() {
        let rect = east_transform().cull_rect();
        assert!((rect.x - 6.0).abs() < 1e-9);
        assert!((rect.y - 3.0).abs() < 1e-9);
        assert!((rect.width - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_group_scaled() {
        let group = ObjectGroup::new(
            AREA_GROUP,
            vec![MapObject::rectangle(1, "0", 30.0, 60.0, 243.0, 243.0)],
        );
        let scaled = transform_group(&group, &east_transform(), ContentPolicy::PassThrough);
        let o = &scaled.objects[0];
        assert!((o.x - 10.0).abs() < 1e-9);
        assert!((o.y - 20.0).abs() < 1e-9);
        assert!((o.width - 81.0).abs() < 1e-9);
        assert!((o.height - 81.0).abs() < 1e-9);
        assert_eq!(o.name, "0");
    }

    #[test]
    fn test_pass_through_leaves_content() {
        let group = ObjectGroup::new(
            "roads",
            vec![MapObject::with_points(
                1,
                Shape::Polyline,
                0.0,
                0.0,
                vec![Point::new(1.0, 1.0)],
            )],
        );
        let out = transform_group(&group, &east_transform(), ContentPolicy::PassThrough);
        assert_eq!(out, group);
    }

    #[test]
    fn test_cull_removes_outside_polyline() {
        // East cell spans x 162..243, y 81..162 in parent pixels.
        let outside = MapObject::with_points(
            1,
            Shape::Polyline,
            10.0,
            10.0,
            vec![Point::new(0.0, 0.0), Point::new(20.0, 20.0)],
        );
        let inside = MapObject::with_points(
            2,
            Shape::Polyline,
            100.0,
            100.0,
            vec![Point::new(0.0, 0.0), Point::new(90.0, 9.0)],
        );
        let group = ObjectGroup::new("rivers", vec![outside, inside]);

        let out = transform_group(&group, &east_transform(), ContentPolicy::CullAndScale);
        assert_eq!(out.objects.len(), 1);

        let kept = &out.objects[0];
        assert_eq!(kept.id, 2);
        let k = 1.0 / 3.0;
        assert!((kept.x - (100.0 - 162.0) * k).abs() < 1e-9);
        assert!((kept.y - (100.0 - 81.0) * k).abs() < 1e-9);
        assert!((kept.points[1].x - 90.0 * k).abs() < 1e-9);
        assert!((kept.points[1].y - 9.0 * k).abs() < 1e-9);
    }

    fn east_of_nine_by_nine() -> LevelTransform {
        // East cell spans x 162..243, y 81..162 in parent pixels.
        LevelTransform::new(
            LevelSize::new(9, 27),
            LevelSize::new(9, 9),
            DirectionAddress::from(Direction::E).area(),
        )
    }

    #[test]
    fn test_cull_keeps_polyline_crossing_cell() {
        let crossing = MapObject::with_points(
            5,
            Shape::Polyline,
            100.0,
            120.0,
            vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0)],
        );
        let group = ObjectGroup::new("rivers", vec![crossing]);
        let out = cull_and_scale(&group, &east_of_nine_by_nine());
        assert_eq!(out.objects.len(), 1);
        assert!((out.objects[0].x - (100.0 - 162.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cull_keeps_polygon_enclosing_cell() {
        let enclosing = MapObject::with_points(
            6,
            Shape::Polygon,
            -10.0,
            -10.0,
            vec![
                Point::new(0.0, 0.0),
                Point::new(260.0, 0.0),
                Point::new(260.0, 260.0),
                Point::new(0.0, 260.0),
            ],
        );
        let group = ObjectGroup::new("lakes", vec![enclosing]);
        let out = cull_and_scale(&group, &east_of_nine_by_nine());
        assert_eq!(out.objects.len(), 1);
    }

    #[test]
    fn test_open_polyline_around_cell_is_culled() {
        // Same outline as a ring around the cell, but left open: no edge
        // touches the cell and a polyline encloses nothing.
        let around = MapObject::with_points(
            7,
            Shape::Polyline,
            -10.0,
            -10.0,
            vec![
                Point::new(0.0, 0.0),
                Point::new(260.0, 0.0),
                Point::new(260.0, 260.0),
                Point::new(0.0, 260.0),
            ],
        );
        assert!(!intersects_child(&around, &east_of_nine_by_nine()));
    }

    #[test]
    fn test_cull_keeps_non_polygon_shapes_unscaled() {
        let rect = MapObject::rectangle(3, "house", 5.0, 5.0, 10.0, 10.0);
        let group = ObjectGroup::new("buildings", vec![rect.clone()]);
        let out = cull_and_scale(&group, &east_transform());
        assert_eq!(out.objects, vec![rect]);
    }

    #[test]
    fn test_polygon_with_single_vertex_inside_is_kept() {
        let polygon = MapObject::with_points(
            4,
            Shape::Polygon,
            0.0,
            0.0,
            vec![
                Point::new(0.0, 0.0),
                Point::new(200.0, 100.0),
                Point::new(0.0, 240.0),
            ],
        );
        assert!(intersects_child(&polygon, &east_transform()));
    }
}
