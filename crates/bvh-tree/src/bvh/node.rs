//! Arena-backed hierarchy node.

use crate::{TriangleId, Volume};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the bounding volume hierarchy.
///
/// Nodes live in the arena owned by [`BvhTree`](crate::BvhTree) and refer to
/// their parent and children by [`NodeId`]. The parent link is a non-owning
/// back-reference for navigation only; ownership flows strictly root to
/// children through the arena. Triangle ids are kept sorted and unique.
#[derive(Debug, Clone)]
pub struct BvhNode {
    volume: Volume,
    triangles: Vec<TriangleId>,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl BvhNode {
    pub(crate) fn new(volume: Volume, triangles: Vec<TriangleId>, parent: Option<NodeId>) -> Self {
        debug_assert!(triangles.windows(2).all(|w| w[0] < w[1]));
        Self {
            volume,
            triangles,
            parent,
            left: None,
            right: None,
        }
    }

    /// Returns the bounding volume of this node.
    #[inline]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Returns the triangle ids assigned to this node, sorted ascending.
    #[inline]
    pub fn triangles(&self) -> &[TriangleId] {
        &self.triangles
    }

    /// Returns the number of triangles assigned to this node.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the parent node id, if this is not the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the left child id, if any.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns the right child id, if any.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Checks if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn set_children(&mut self, left: NodeId, right: NodeId) {
        self.left = Some(left);
        self.right = Some(right);
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::Aabb;

    fn unit_volume() -> Volume {
        Volume::Aabb(Aabb::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ))
    }

    #[test]
    fn new_node_is_leaf() {
        let node = BvhNode::new(unit_volume(), vec![TriangleId::new(0)], None);

        assert!(node.is_leaf());
        assert!(node.parent().is_none());
        assert_eq!(node.triangle_count(), 1);
    }

    #[test]
    fn set_children_clears_leaf_status() {
        let mut node = BvhNode::new(unit_volume(), vec![TriangleId::new(0)], None);
        node.set_children(NodeId(1), NodeId(2));

        assert!(!node.is_leaf());
        assert_eq!(node.left(), Some(NodeId(1)));
        assert_eq!(node.right(), Some(NodeId(2)));
    }
}
