//! Hierarchy navigation for interactive visualization.

use bvh_tree::{BvhNode, BvhTree, NodeId, Pvs};
use macroquad::prelude::*;

use crate::draw_volume;

/// Interactive navigator over the node arena, mirroring the tree one level
/// at a time: Down descends into the left child, Up returns to the parent,
/// Left and Right switch between siblings.
pub struct TreeNavigator {
    current: NodeId,
}

impl TreeNavigator {
    /// Creates a navigator positioned at the tree's root.
    pub fn new(tree: &BvhTree) -> Self {
        Self {
            current: tree.root(),
        }
    }

    /// Returns the id of the node the navigator is on.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Returns the node the navigator is on.
    pub fn current_node<'a>(&self, tree: &'a BvhTree) -> &'a BvhNode {
        tree.node(self.current)
    }

    /// Handles arrow-key input. Returns true if the position changed.
    pub fn update(&mut self, tree: &BvhTree) -> bool {
        let node = tree.node(self.current);
        let mut next = self.current;

        if is_key_pressed(KeyCode::Down)
            && let Some(left) = node.left()
        {
            next = left;
        }
        if is_key_pressed(KeyCode::Up)
            && let Some(parent) = node.parent()
        {
            next = parent;
        }
        if is_key_pressed(KeyCode::Left)
            && let Some(parent) = node.parent()
            && let Some(left) = tree.node(parent).left()
        {
            next = left;
        }
        if is_key_pressed(KeyCode::Right)
            && let Some(parent) = node.parent()
            && let Some(right) = tree.node(parent).right()
        {
            next = right;
        }

        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Draws the bounding volumes of the currently displayed level: the
    /// current node and its sibling when below the root, or the root volume
    /// alone. Visited volumes are highlighted orange, the current node is
    /// green.
    pub fn render_level(&self, tree: &BvhTree, pvs: Option<&Pvs>, highlight: bool) {
        let node = tree.node(self.current);

        if let Some(parent) = node.parent() {
            let parent_node = tree.node(parent);
            for child in [parent_node.left(), parent_node.right()].into_iter().flatten() {
                self.render_volume(tree, child, pvs, highlight);
            }
        } else {
            self.render_volume(tree, self.current, pvs, highlight);
        }
    }

    fn render_volume(&self, tree: &BvhTree, id: NodeId, pvs: Option<&Pvs>, highlight: bool) {
        let color = if highlight && pvs.is_some_and(|pvs| pvs.visited_volume(id)) {
            ORANGE
        } else if id == self.current {
            GREEN
        } else {
            GRAY
        };
        draw_volume(tree.node(id).volume(), color);
    }

    /// Draws the navigation overlay: depth and triangle counts for the
    /// current node and its parent.
    pub fn draw_ui(&self, tree: &BvhTree, total_triangles: usize, y_offset: f32) {
        let node = tree.node(self.current);
        let parent_count = node
            .parent()
            .map_or(0, |parent| tree.node(parent).triangle_count());

        draw_text(
            &format!("Depth: {}", tree.depth_of(self.current)),
            10.0,
            y_offset,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!(
                "Triangles: {}, In Node: {}, In Parent: {}",
                total_triangles,
                node.triangle_count(),
                parent_count
            ),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        let kind = match (node.parent().is_none(), node.is_leaf()) {
            (true, true) => "root (leaf)",
            (true, false) => "root",
            (false, true) => "leaf",
            (false, false) => "inner",
        };
        draw_text(
            &format!("Node: {kind}"),
            10.0,
            y_offset + 40.0,
            18.0,
            if node.is_leaf() { ORANGE } else { GREEN },
        );
        draw_text(
            "Arrows: Down = left child, Up = parent, Left/Right = sibling",
            10.0,
            y_offset + 60.0,
            16.0,
            DARKGRAY,
        );
    }
}
