//! Scene graph: node storage, tree structure, traversal and collision sweep.

pub mod collision;
pub mod graph;
pub mod node;

pub use collision::CollisionPair;
pub use graph::SceneGraph;
pub use node::{Node, NodeId, NodeKind};
