//! Binary bounding volume hierarchy over a triangle mesh.
//!
//! The tree is built once per (geometry, depth, volume kind) triple and then
//! queried repeatedly as the camera moves:
//!
//! - [`BvhTree`]: arena container and recursive construction
//! - [`BvhNode`]: per-node volume, triangle ids, and parent/child links
//! - [`Pvs`]: result of a potentially-visible-set query
//!
//! # Example
//!
//! ```ignore
//! use bvh_tree::{BvhTree, Camera, Triangle, VolumeKind};
//! use nalgebra::{Point3, Vector3};
//!
//! let triangles: Vec<Triangle> = /* load geometry */;
//! let tree = BvhTree::build(&triangles, 4, VolumeKind::Aabb)?;
//!
//! let camera = Camera::new(
//!     Point3::new(0.0, 0.0, 5.0),
//!     Vector3::new(0.0, 0.0, -1.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//! let pvs = tree.potentially_visible_set(&triangles, &camera);
//! println!(
//!     "{} visible, {} tested of {} in visited leaves",
//!     pvs.visible().len(),
//!     pvs.tested_triangles(),
//!     pvs.max_triangles_to_test(&tree),
//! );
//! ```

mod node;
mod pvs;
mod split;
mod tree;

pub use node::{BvhNode, NodeId};
pub use pvs::Pvs;
pub use split::{Axis, SplitPlane};
pub use tree::{BuildError, BvhTree};
