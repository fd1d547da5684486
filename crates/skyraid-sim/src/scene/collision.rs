//! All-pairs bounding-box collision sweep over the scene graph.
//!
//! The scene holds tens of entities, so every node is tested against every
//! other without spatial partitioning. Pairs are stored with their handles
//! in ascending order so (A, B) and (B, A) collapse into one entry.

use std::collections::BTreeSet;

use skyraid_core::types::FloatRect;

use super::graph::SceneGraph;
use super::node::NodeId;
use crate::entities;

/// Two distinct colliding nodes, smaller handle first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionPair {
    first: NodeId,
    second: NodeId,
}

impl CollisionPair {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        assert_ne!(a, b, "a node cannot collide with itself");
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    pub fn first(&self) -> NodeId {
        self.first
    }

    pub fn second(&self) -> NodeId {
        self.second
    }
}

impl SceneGraph {
    /// Collect every colliding pair drawn from the whole tree.
    pub fn collision_pairs(&self) -> BTreeSet<CollisionPair> {
        let mut pairs = BTreeSet::new();
        self.check_scene_collision(self.root(), self.root(), &mut pairs);
        pairs
    }

    /// Test every node under `a` against every node under `b`.
    pub fn check_scene_collision(
        &self,
        a: NodeId,
        b: NodeId,
        pairs: &mut BTreeSet<CollisionPair>,
    ) {
        self.check_node_collision(a, b, pairs);
        for child in self.children(b) {
            self.check_scene_collision(a, child, pairs);
        }
    }

    /// Test every node under `a` against the single node `b`.
    pub fn check_node_collision(
        &self,
        a: NodeId,
        b: NodeId,
        pairs: &mut BTreeSet<CollisionPair>,
    ) {
        if let Some(rect) = self.collision_rect(b) {
            self.check_subtree_against(a, b, &rect, pairs);
        }
    }

    fn check_subtree_against(
        &self,
        a: NodeId,
        b: NodeId,
        b_rect: &FloatRect,
        pairs: &mut BTreeSet<CollisionPair>,
    ) {
        if a != b {
            if let Some(rect) = self.collision_rect(a) {
                if rect.intersects(b_rect) {
                    pairs.insert(CollisionPair::new(a, b));
                }
            }
        }
        for child in self.children(a) {
            self.check_subtree_against(child, b, b_rect, pairs);
        }
    }

    /// World-space box of a node that can take part in collisions.
    /// Destroyed entities and nodes without bounds have none.
    fn collision_rect(&self, id: NodeId) -> Option<FloatRect> {
        if entities::is_destroyed(self, id) {
            return None;
        }
        entities::bounding_rect(self, id)
    }
}
