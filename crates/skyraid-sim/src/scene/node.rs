//! Node handle and the tree component every node carries.

use std::cmp::Ordering;

use skyraid_core::category::Category;

/// Handle to a node in a [`SceneGraph`](super::SceneGraph).
///
/// Handles are plain copies of the underlying hecs entity. A handle whose
/// node has been removed simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) hecs::Entity);

impl NodeId {
    pub fn to_bits(self) -> u64 {
        self.0.to_bits().get()
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bits().cmp(&other.to_bits())
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Concrete variant of a node, selecting its update, draw and removal hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Grouping node with no behaviour of its own (root, layers).
    Plain,
    Sprite,
    Label,
    Aircraft,
    Projectile,
    Pickup,
    Emitter,
    ParticleSystem,
}

impl NodeKind {
    /// Kinds that carry a `Body` (hit points and velocity).
    pub fn is_entity(self) -> bool {
        matches!(self, Self::Aircraft | Self::Projectile | Self::Pickup)
    }
}

/// Tree links and classification of a node.
///
/// The parent link is only used to compose world transforms; traversal
/// always walks `children` from the root down.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) category: Category,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(category: Category, kind: NodeKind) -> Self {
        Self {
            category,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
