//! Hierarchy container and construction.

use log::debug;

use crate::{Triangle, TriangleId, Volume, VolumeKind};

use super::node::{BvhNode, NodeId};
use super::split::{choose_split, partition};

/// An error raised while building a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The input triangle slice was empty.
    #[error("cannot build a hierarchy over an empty triangle set")]
    EmptyGeometry,
    /// `max_depth` was zero; a tree has at least its root level.
    #[error("maximum depth must be at least 1")]
    ZeroDepth,
}

/// A binary bounding volume hierarchy over a triangle mesh.
///
/// The tree recursively halves a triangle set along the widest axis of each
/// node's bounding volume, down to a fixed depth. Triangles that straddle a
/// split plane are assigned to both children, so the hierarchy refines
/// volumes without being a strict spatial partition of the triangles.
///
/// Nodes live in an arena owned by the tree and reference each other by
/// [`NodeId`]; the triangle geometry stays owned by the caller and is
/// referenced by [`TriangleId`]. The tree is immutable after construction —
/// switching volume kinds means building a fresh tree and discarding this
/// one.
///
/// # Construction
///
/// ```ignore
/// use bvh_tree::{BvhTree, Triangle, VolumeKind};
///
/// let triangles: Vec<Triangle> = /* ... */;
/// let tree = BvhTree::build(&triangles, 4, VolumeKind::Aabb)?;
/// ```
///
/// # Queries
///
/// [`BvhTree::potentially_visible_set`] walks the tree against a camera
/// half-space and returns the triangles possibly visible from it.
#[derive(Debug, Clone)]
pub struct BvhTree {
    nodes: Vec<BvhNode>,
    kind: VolumeKind,
    triangle_count: usize,
}

impl BvhTree {
    /// Builds a hierarchy of the given volume kind over `triangles`.
    ///
    /// The root covers the whole slice; with `max_depth = d`, leaves sit at
    /// depth `d - 1` from the root (root = depth 0), except where a split
    /// produced an empty side and recursion stopped early.
    pub fn build(
        triangles: &[Triangle],
        max_depth: u32,
        kind: VolumeKind,
    ) -> Result<Self, BuildError> {
        if triangles.is_empty() {
            return Err(BuildError::EmptyGeometry);
        }
        if max_depth == 0 {
            return Err(BuildError::ZeroDepth);
        }

        let mut tree = Self {
            nodes: Vec::new(),
            kind,
            triangle_count: triangles.len(),
        };
        let ids = (0..triangles.len()).map(TriangleId::new).collect();
        tree.build_node(ids, triangles, max_depth, None);

        debug!(
            "built {kind:?} hierarchy over {} triangles: {} nodes, depth {}",
            triangles.len(),
            tree.node_count(),
            tree.depth(),
        );
        Ok(tree)
    }

    /// Recursively builds the node for `ids` and returns its arena id.
    ///
    /// `depth_left` counts the levels still allowed including this one, so
    /// `depth_left == 1` makes the node a leaf. A split with an empty side
    /// also makes the node a leaf: the triangles stay here and no empty or
    /// absent subtree is ever created.
    fn build_node(
        &mut self,
        ids: Vec<TriangleId>,
        triangles: &[Triangle],
        depth_left: u32,
        parent: Option<NodeId>,
    ) -> NodeId {
        let volume = Volume::from_triangles(self.kind, &ids, triangles);

        let halves = if depth_left > 1 {
            let plane = choose_split(&volume, &ids, triangles);
            Some(partition(&ids, triangles, &plane))
        } else {
            None
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(BvhNode::new(volume, ids, parent));

        if let Some((left_ids, right_ids)) = halves {
            if left_ids.is_empty() || right_ids.is_empty() {
                debug!(
                    "split of node {} produced an empty side; keeping it as a leaf",
                    id.index()
                );
                return id;
            }

            let left = self.build_node(left_ids, triangles, depth_left - 1, Some(id));
            let right = self.build_node(right_ids, triangles, depth_left - 1, Some(id));
            self.nodes[id.index()].set_children(left, right);
        }

        id
    }

    /// Returns the id of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this tree's arena.
    #[inline]
    pub fn node(&self, id: NodeId) -> &BvhNode {
        &self.nodes[id.index()]
    }

    /// Returns the volume kind the tree was built with.
    #[inline]
    pub fn kind(&self) -> VolumeKind {
        self.kind
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of triangles in the geometry the tree was built
    /// over (including any dropped by degenerate splits).
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Iterates over all nodes with their ids, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BvhNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Iterates over the leaf nodes with their ids.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &BvhNode)> {
        self.iter().filter(|(_, node)| node.is_leaf())
    }

    /// Returns the depth of a node, counting the root as 0, by walking the
    /// parent links.
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.node(current).parent() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Returns the number of levels in the tree (1 for a lone root).
    pub fn depth(&self) -> usize {
        self.subtree_depth(self.root())
    }

    fn subtree_depth(&self, id: NodeId) -> usize {
        let node = self.node(id);
        let left = node.left().map_or(0, |l| self.subtree_depth(l));
        let right = node.right().map_or(0, |r| self.subtree_depth(r));
        1 + left.max(right)
    }

    /// Collects the union of triangle ids across all leaves, sorted and
    /// deduplicated.
    ///
    /// For general-position input this equals the full id range; triangles
    /// degenerate on every vertex against some split plane are missing.
    pub fn leaf_coverage(&self) -> Vec<TriangleId> {
        let mut ids: Vec<TriangleId> = self
            .leaves()
            .flat_map(|(_, node)| node.triangles().iter().copied())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
