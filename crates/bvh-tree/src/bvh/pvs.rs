//! Potentially-visible-set queries against the hierarchy.

use crate::visibility::{Visibility, classify_volume};
use crate::{Camera, Triangle, TriangleId};

use super::node::NodeId;
use super::tree::BvhTree;

/// The result of a potentially-visible-set query.
///
/// `visible` holds the ids of triangles with at least one vertex in the
/// camera half-space (sorted and deduplicated, so identical queries compare
/// equal). `visited` records every volume the traversal classified as fully
/// or partially visible, in visit order; pruned subtrees leave no trace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pvs {
    visible: Vec<TriangleId>,
    tested_triangles: usize,
    visited: Vec<NodeId>,
}

impl Pvs {
    /// Returns the potentially visible triangle ids, sorted ascending.
    #[inline]
    pub fn visible(&self) -> &[TriangleId] {
        &self.visible
    }

    /// Returns the number of triangles that went through a per-vertex test.
    /// Triangles accepted wholesale from fully visible volumes do not count.
    #[inline]
    pub fn tested_triangles(&self) -> usize {
        self.tested_triangles
    }

    /// Returns the ids of the volumes the traversal visited.
    #[inline]
    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    /// Checks whether a volume was visited by the query.
    pub fn visited_volume(&self, id: NodeId) -> bool {
        self.visited.contains(&id)
    }

    /// Resolves the visible ids against the geometry they index.
    pub fn visible_triangles<'a>(
        &'a self,
        triangles: &'a [Triangle],
    ) -> impl Iterator<Item = &'a Triangle> {
        self.visible.iter().map(|id| &triangles[id.index()])
    }

    /// Sums the triangle counts of the visited leaf volumes: the number of
    /// triangles a traversal without the wholesale-accept shortcut would
    /// have tested. Comparing this against [`Pvs::tested_triangles`] shows
    /// how much triangle-level work the hierarchy saved.
    pub fn max_triangles_to_test(&self, tree: &BvhTree) -> usize {
        self.visited
            .iter()
            .map(|&id| tree.node(id))
            .filter(|node| node.is_leaf())
            .map(|node| node.triangle_count())
            .sum()
    }
}

impl BvhTree {
    /// Returns the set of triangles possibly visible from the camera.
    ///
    /// The traversal classifies each volume against the camera half-space:
    /// hidden volumes prune their whole subtree, fully visible volumes
    /// contribute their triangles without any per-triangle work, and
    /// partially visible volumes recurse — down to leaves, where each
    /// triangle is tested vertex by vertex.
    ///
    /// `triangles` must be the same slice the tree was built from. The query
    /// is a pure function of the tree and camera: it mutates nothing and
    /// returns identical results for identical inputs.
    ///
    /// # Panics
    ///
    /// Panics if `triangles` has a different length than the geometry the
    /// tree was built over.
    pub fn potentially_visible_set(&self, triangles: &[Triangle], camera: &Camera) -> Pvs {
        assert_eq!(
            triangles.len(),
            self.triangle_count(),
            "geometry slice does not match the one the tree was built from",
        );

        let mut pvs = Pvs::default();
        self.visit(self.root(), triangles, camera, &mut pvs);
        pvs.visible.sort();
        pvs.visible.dedup();
        pvs
    }

    fn visit(&self, id: NodeId, triangles: &[Triangle], camera: &Camera, pvs: &mut Pvs) {
        let node = self.node(id);

        match classify_volume(node.volume(), camera) {
            Visibility::Hidden => {}
            Visibility::Full => {
                pvs.visited.push(id);
                pvs.visible.extend_from_slice(node.triangles());
            }
            Visibility::Partial => {
                pvs.visited.push(id);
                if node.is_leaf() {
                    for &triangle_id in node.triangles() {
                        pvs.tested_triangles += 1;
                        let vertices = triangles[triangle_id.index()].vertices();
                        if vertices.iter().any(|v| camera.sees_point(*v)) {
                            pvs.visible.push(triangle_id);
                        }
                    }
                } else {
                    if let Some(left) = node.left() {
                        self.visit(left, triangles, camera, pvs);
                    }
                    if let Some(right) = node.right() {
                        self.visit(right, triangles, camera, pvs);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::VolumeKind;

    fn triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
    }

    fn small_triangle(x: f32, y: f32, z: f32) -> Triangle {
        triangle(
            [x - 0.1, y, z],
            [x + 0.1, y, z],
            [x, y + 0.1, z + 0.05],
        )
    }

    fn camera_at(position: [f32; 3], normal: [f32; 3]) -> Camera {
        Camera::new(
            Point3::new(position[0], position[1], position[2]),
            Vector3::new(normal[0], normal[1], normal[2]),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn triangle_in_front_of_camera_is_returned_wholesale() {
        // Camera at z=5 looking toward -Z sees the whole z=0 triangle; the
        // lone leaf classifies fully visible, so nothing is tested.
        let triangles = vec![triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])];
        let tree = BvhTree::build(&triangles, 1, VolumeKind::Aabb).unwrap();
        let camera = camera_at([0.0, 0.0, 5.0], [0.0, 0.0, -1.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert_eq!(pvs.visible(), &[TriangleId::new(0)]);
        assert_eq!(pvs.tested_triangles(), 0);
        assert_eq!(pvs.visited(), &[tree.root()]);
    }

    #[test]
    fn triangle_behind_camera_is_pruned() {
        // Same triangle, camera moved behind the z=0 plane still looking
        // toward -Z: the root volume is hidden and nothing is visited.
        let triangles = vec![triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])];
        let tree = BvhTree::build(&triangles, 1, VolumeKind::Aabb).unwrap();
        let camera = camera_at([0.0, 0.0, -5.0], [0.0, 0.0, -1.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert!(pvs.visible().is_empty());
        assert_eq!(pvs.tested_triangles(), 0);
        assert!(pvs.visited().is_empty());
    }

    #[test]
    fn partial_leaf_tests_each_triangle() {
        // The camera plane at z = 0.5 cuts the leaf volume; the triangle
        // reaching below the plane passes, the one entirely above fails.
        let triangles = vec![
            triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 1.0]),
            triangle([0.0, 0.0, 0.9], [1.0, 0.0, 0.9], [0.0, 1.0, 1.0]),
        ];
        let tree = BvhTree::build(&triangles, 1, VolumeKind::Aabb).unwrap();
        let camera = camera_at([0.0, 0.0, 0.5], [0.0, 0.0, -1.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert_eq!(pvs.visible(), &[TriangleId::new(0)]);
        assert_eq!(pvs.tested_triangles(), 2);
        assert_eq!(pvs.max_triangles_to_test(&tree), 2);
    }

    #[test]
    fn hidden_subtree_is_never_descended() {
        // Two clusters on either side of x = 0; the camera plane at x = 0
        // looking toward -X hides the right cluster entirely.
        let triangles = vec![
            small_triangle(-2.0, 0.0, 0.0),
            small_triangle(2.0, 0.0, 0.0),
        ];
        let tree = BvhTree::build(&triangles, 2, VolumeKind::Aabb).unwrap();
        let camera = camera_at([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert_eq!(pvs.visible(), &[TriangleId::new(0)]);
        let root = tree.node(tree.root());
        assert!(pvs.visited_volume(root.left().unwrap()));
        assert!(!pvs.visited_volume(root.right().unwrap()));
    }

    #[test]
    fn straddling_triangle_is_deduplicated() {
        let triangles = vec![
            small_triangle(-2.0, 0.0, 0.0),
            small_triangle(2.0, 0.0, 0.0),
            triangle([-0.5, 0.0, 0.0], [0.5, 0.1, 0.0], [0.0, 0.0, 0.1]),
        ];
        let tree = BvhTree::build(&triangles, 2, VolumeKind::Aabb).unwrap();
        // Camera sees everything: both children fully visible, and the
        // straddler is contributed by both.
        let camera = camera_at([0.0, 0.0, 5.0], [0.0, 0.0, -1.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert_eq!(
            pvs.visible(),
            &[TriangleId::new(0), TriangleId::new(1), TriangleId::new(2)]
        );
    }

    #[test]
    fn every_returned_triangle_has_a_visible_vertex() {
        let triangles = vec![
            small_triangle(-3.1, 0.2, 0.4),
            small_triangle(-1.05, -0.3, 0.1),
            small_triangle(1.02, 0.6, -0.2),
            small_triangle(2.97, -0.1, 0.3),
            triangle([-0.5, 0.0, 0.0], [0.5, 0.1, 0.0], [0.0, 0.0, 0.1]),
        ];
        let tree = BvhTree::build(&triangles, 3, VolumeKind::Aabb).unwrap();
        let camera = camera_at([0.3, 0.1, 0.2], [-1.0, 0.0, 0.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert!(!pvs.visible().is_empty());
        for t in pvs.visible_triangles(&triangles) {
            assert!(t.vertices().iter().any(|v| camera.sees_point(*v)));
        }
    }

    #[test]
    fn repeated_queries_return_identical_results() {
        let triangles = vec![
            small_triangle(-3.1, 0.2, 0.4),
            small_triangle(-1.05, -0.3, 0.1),
            small_triangle(1.02, 0.6, -0.2),
            small_triangle(2.97, -0.1, 0.3),
        ];
        let tree = BvhTree::build(&triangles, 3, VolumeKind::Sphere).unwrap();
        let camera = camera_at([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);

        let first = tree.potentially_visible_set(&triangles, &camera);
        let second = tree.potentially_visible_set(&triangles, &camera);

        assert_eq!(first, second);
    }

    #[test]
    fn wholesale_accept_saves_triangle_tests() {
        let triangles = vec![
            small_triangle(-3.1, 0.2, 0.4),
            small_triangle(-1.05, -0.3, 0.1),
            small_triangle(1.02, 0.6, -0.2),
            small_triangle(2.97, -0.1, 0.3),
        ];
        let tree = BvhTree::build(&triangles, 3, VolumeKind::Aabb).unwrap();
        // Everything lies in front of the camera plane.
        let camera = camera_at([0.0, 0.0, 10.0], [0.0, 0.0, -1.0]);

        let pvs = tree.potentially_visible_set(&triangles, &camera);

        assert_eq!(pvs.visible().len(), 4);
        assert_eq!(pvs.tested_triangles(), 0);
    }

    #[test]
    #[should_panic(expected = "geometry slice does not match")]
    fn mismatched_geometry_slice_panics() {
        let triangles = vec![
            small_triangle(-2.0, 0.0, 0.0),
            small_triangle(2.0, 0.0, 0.0),
        ];
        let tree = BvhTree::build(&triangles, 2, VolumeKind::Aabb).unwrap();
        let camera = camera_at([0.0, 0.0, 5.0], [0.0, 0.0, -1.0]);

        tree.potentially_visible_set(&triangles[..1], &camera);
    }
}
