//! Triangle representation for the bounding volume hierarchy.

use nalgebra::Point3;

/// Index of a triangle in the caller-owned geometry collection.
///
/// The hierarchy never owns triangles: nodes store `TriangleId`s into the
/// slice the tree was built from. The same id may appear in every node along
/// a root-to-leaf path, and in both children of a node when the triangle
/// straddles the split plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub(crate) usize);

impl TriangleId {
    /// Creates an id referring to `triangles[index]` of the geometry slice.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position in the geometry slice this id refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A triangle in 3D space, defined by three vertices. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_keep_construction_order() {
        let triangle = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );

        let [a, b, c] = triangle.vertices();
        assert_eq!(*a, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(*b, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(*c, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn id_round_trips_index() {
        assert_eq!(TriangleId::new(7).index(), 7);
    }

    #[test]
    fn ids_order_by_index() {
        let mut ids = vec![TriangleId::new(2), TriangleId::new(0), TriangleId::new(1)];
        ids.sort();
        assert_eq!(
            ids,
            vec![TriangleId::new(0), TriangleId::new(1), TriangleId::new(2)]
        );
    }
}
