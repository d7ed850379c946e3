//! Split plane selection and triangle partitioning.

use log::debug;
use nalgebra::Point3;

use crate::{Aabb, Triangle, TriangleId, Volume};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns the coordinate of a point on this axis.
    #[inline]
    pub fn coord(self, point: &Point3<f32>) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

/// An axis-aligned split plane: `coord(axis) = position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub position: f32,
}

/// Chooses the split plane for a node: the axis with the largest extent of
/// the node's triangle set, split at its middle.
///
/// Tie-break order favors earlier axes: Y replaces X only when strictly
/// larger, and Z replaces the winner-so-far only when strictly larger. For
/// boxes the extents come from the corners and the position is the extent
/// midpoint; for spheres the extents are recomputed across the triangles and
/// the position is the sphere center's coordinate, which can differ slightly
/// from the box midpoint.
pub(crate) fn choose_split(
    volume: &Volume,
    ids: &[TriangleId],
    triangles: &[Triangle],
) -> SplitPlane {
    match volume {
        Volume::Aabb(aabb) => {
            let min = aabb.min();
            let max = aabb.max();
            let axis = widest_axis(max.x - min.x, max.y - min.y, max.z - min.z);
            SplitPlane {
                axis,
                position: (axis.coord(&min) + axis.coord(&max)) / 2.0,
            }
        }
        Volume::Sphere(sphere) => {
            let bounds = Aabb::from_triangles(ids, triangles);
            let min = bounds.min();
            let max = bounds.max();
            let axis = widest_axis(max.x - min.x, max.y - min.y, max.z - min.z);
            SplitPlane {
                axis,
                position: axis.coord(&sphere.center()),
            }
        }
    }
}

fn widest_axis(x: f32, y: f32, z: f32) -> Axis {
    if y > x {
        if z > y { Axis::Z } else { Axis::Y }
    } else if z > x {
        Axis::Z
    } else {
        Axis::X
    }
}

/// Partitions a node's triangles across a split plane.
///
/// A triangle goes right when any vertex lies strictly beyond the plane and
/// left when any vertex lies strictly before it; straddling triangles land
/// in both sets. A triangle with all three vertices exactly on the plane
/// lands in neither and is dropped from the subtree — a known gap of the
/// scheme, surfaced in the debug log.
pub(crate) fn partition(
    ids: &[TriangleId],
    triangles: &[Triangle],
    plane: &SplitPlane,
) -> (Vec<TriangleId>, Vec<TriangleId>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut dropped = 0usize;

    for &id in ids {
        let vertices = triangles[id.index()].vertices();
        let any_greater = vertices.iter().any(|v| plane.axis.coord(v) > plane.position);
        let any_less = vertices.iter().any(|v| plane.axis.coord(v) < plane.position);

        if any_greater {
            right.push(id);
        }
        if any_less {
            left.push(id);
        }
        if !any_greater && !any_less {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(
            "dropped {dropped} triangle(s) lying exactly on the {:?} split plane at {}",
            plane.axis, plane.position
        );
    }

    (left, right)
}
