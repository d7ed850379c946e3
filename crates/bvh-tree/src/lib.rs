//! Bounding volume hierarchy (BVH) construction and visibility queries.

pub mod bvh;
mod camera;
mod triangle;
mod visibility;
mod volume;

pub use bvh::{Axis, BuildError, BvhNode, BvhTree, NodeId, Pvs, SplitPlane};
pub use camera::{Camera, VISIBILITY_EPSILON};
pub use triangle::{Triangle, TriangleId};
pub use visibility::{Visibility, classify_volume};
pub use volume::{Aabb, Sphere, Volume, VolumeKind};
