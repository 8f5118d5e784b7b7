//! Object-group transforms applied when a child level is derived.
//!
//! Every function here returns a new [`ObjectGroup`](crate::map::ObjectGroup)
//! value; the parent's groups are never modified.

mod policy;
mod transform;

pub use policy::ContentPolicy;
pub use transform::{
    cull_and_scale, intersects_child, scale_area_group, transform_group, LevelTransform,
};
