//! Tree of nodes stored in a hecs world.
//!
//! Every node is one hecs entity carrying a [`Node`] (category, kind, tree
//! links) and a [`Transform`]; concrete kinds add their own components. The
//! graph owns the tree shape: children are owned by their parent and
//! removing a node removes its whole subtree.

use std::time::Duration;

use glam::{Affine2, Vec2};
use hecs::{Component, DynamicBundle, EntityBuilder, World};

use skyraid_core::category::Category;
use skyraid_core::render::RenderTarget;
use skyraid_core::types::{Color, Transform};

use super::node::{Node, NodeId, NodeKind};
use crate::command::Command;
use crate::entities::{self, UpdateContext};

pub struct SceneGraph {
    world: World,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// An empty graph holding only the root node.
    pub fn new() -> Self {
        let mut world = World::new();
        let root = world.spawn((
            Node::new(Category::SCENE, NodeKind::Plain),
            Transform::default(),
        ));
        Self {
            world,
            root: NodeId(root),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached node carrying `components` alongside its tree data.
    pub fn spawn(
        &mut self,
        category: Category,
        kind: NodeKind,
        transform: Transform,
        components: impl DynamicBundle,
    ) -> NodeId {
        let mut builder = EntityBuilder::new();
        builder
            .add(Node::new(category, kind))
            .add(transform)
            .add_bundle(components);
        NodeId(self.world.spawn(builder.build()))
    }

    /// Create a detached grouping node.
    pub fn spawn_plain(&mut self, category: Category, transform: Transform) -> NodeId {
        NodeId(
            self.world
                .spawn((Node::new(category, NodeKind::Plain), transform)),
        )
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.world.contains(id.0)
    }

    /// Number of live nodes, attached or not, including the root.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Tree structure ---

    /// Give `child` to `parent`, appending it after existing children.
    ///
    /// Panics if `child` already has a parent, is the root, or is an
    /// ancestor of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(child, self.root, "the root node cannot be attached");
        let mut ancestor = Some(parent);
        while let Some(node) = ancestor {
            assert_ne!(node, child, "attaching {child:?} under {parent:?} would form a cycle");
            ancestor = self.parent(node);
        }

        let child_node = self.node_mut(child);
        assert!(
            child_node.parent.is_none(),
            "{child:?} is already attached to {:?}",
            child_node.parent
        );
        child_node.parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Take `child` away from `parent`, returning it detached.
    ///
    /// Panics if `child` is not a direct child of `parent`.
    #[must_use = "a detached node stays alive until it is attached or destroyed"]
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        let parent_node = self.node_mut(parent);
        let index = parent_node
            .children
            .iter()
            .position(|&c| c == child)
            .unwrap_or_else(|| panic!("{child:?} is not a child of {parent:?}"));
        parent_node.children.remove(index);
        self.node_mut(child).parent = None;
        child
    }

    /// Remove a node and its whole subtree. Returns the number of nodes removed.
    pub fn destroy(&mut self, id: NodeId) -> usize {
        assert_ne!(id, self.root, "the root node cannot be destroyed");
        if let Some(parent) = self.parent(id) {
            let _ = self.detach(parent, id);
        }
        self.despawn_subtree(id)
    }

    fn despawn_subtree(&mut self, id: NodeId) -> usize {
        let children = std::mem::take(&mut self.node_mut(id).children);
        let mut count = 1;
        for child in children {
            count += self.despawn_subtree(child);
        }
        let _ = self.world.despawn(id.0);
        count
    }

    // --- Node access ---

    fn node(&self, id: NodeId) -> hecs::Ref<'_, Node> {
        self.world
            .get::<&Node>(id.0)
            .unwrap_or_else(|_| panic!("{id:?} is not in the scene"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.world
            .query_one_mut::<&mut Node>(id.0)
            .unwrap_or_else(|_| panic!("{id:?} is not in the scene"))
    }

    pub fn category(&self, id: NodeId) -> Category {
        self.node(id).category
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children.clone()
    }

    /// The `index`-th child of `id`, or `None` past the end or once `id` is gone.
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        let node = self.world.get::<&Node>(id.0).ok()?;
        node.children.get(index).copied()
    }

    pub fn has<K: Component>(&self, id: NodeId) -> bool {
        self.world
            .entity(id.0)
            .map(|entity| entity.has::<K>())
            .unwrap_or(false)
    }

    pub fn get<K: Component>(&self, id: NodeId) -> Option<hecs::Ref<'_, K>> {
        self.world.get::<&K>(id.0).ok()
    }

    pub fn get_mut<K: Component>(&mut self, id: NodeId) -> Option<&mut K> {
        self.world.query_one_mut::<&mut K>(id.0).ok()
    }

    // --- Transforms ---

    pub fn transform(&self, id: NodeId) -> Transform {
        self.world
            .get::<&Transform>(id.0)
            .map(|t| *t)
            .unwrap_or_else(|_| panic!("{id:?} is not in the scene"))
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        self.world
            .query_one_mut::<&mut Transform>(id.0)
            .unwrap_or_else(|_| panic!("{id:?} is not in the scene"))
    }

    /// Local transform composed with every ancestor's, root first.
    pub fn world_transform(&self, id: NodeId) -> Affine2 {
        let mut transform = Affine2::IDENTITY;
        let mut current = Some(id);
        while let Some(node) = current {
            transform = self.transform(node).matrix() * transform;
            current = self.parent(node);
        }
        transform
    }

    pub fn world_position(&self, id: NodeId) -> Vec2 {
        self.world_transform(id).translation
    }

    // --- Traversal ---

    /// Run every node's update hook, parents before children, in child order.
    pub fn update(&mut self, dt: Duration, ctx: &mut UpdateContext<'_>) {
        let root = self.root;
        self.update_node(root, dt, ctx);
    }

    fn update_node(&mut self, id: NodeId, dt: Duration, ctx: &mut UpdateContext<'_>) {
        entities::update_current(self, id, dt, ctx);

        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.update_node(child, dt, ctx);
            index += 1;
        }
    }

    /// Offer `command` to every node. Returns how many nodes ran it.
    ///
    /// A node runs the command when its category intersects the command's;
    /// its children are visited either way.
    pub fn on_command(&mut self, command: &mut Command, dt: Duration) -> usize {
        let root = self.root;
        self.dispatch(root, command, dt)
    }

    fn dispatch(&mut self, id: NodeId, command: &mut Command, dt: Duration) -> usize {
        let mut matched = 0;
        if self.category(id).intersects(command.category()) {
            command.execute(self, id, dt);
            matched += 1;
        }

        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            matched += self.dispatch(child, command, dt);
            index += 1;
        }
        matched
    }

    /// Draw the tree pre-order so parents land beneath their children.
    pub fn draw(&self, target: &mut dyn RenderTarget, show_bounding_boxes: bool) {
        self.draw_node(self.root, Affine2::IDENTITY, target, show_bounding_boxes);
    }

    fn draw_node(
        &self,
        id: NodeId,
        parent_transform: Affine2,
        target: &mut dyn RenderTarget,
        show_bounding_boxes: bool,
    ) {
        let transform = parent_transform * self.transform(id).matrix();
        entities::draw_current(self, id, &transform, target);

        if show_bounding_boxes {
            if let Some(rect) = entities::bounding_rect(self, id) {
                target.draw_rect_outline(rect, Color::GREEN);
            }
        }

        for child in self.children(id) {
            self.draw_node(child, transform, target, show_bounding_boxes);
        }
    }

    /// Drop every subtree whose root is marked for removal.
    ///
    /// Each level is pruned before descending, so children of a removed node
    /// are never inspected. Returns the number of subtree roots removed.
    pub fn remove_wrecks(&mut self) -> usize {
        let root = self.root;
        self.remove_wrecks_below(root)
    }

    fn remove_wrecks_below(&mut self, id: NodeId) -> usize {
        let (wrecks, survivors): (Vec<NodeId>, Vec<NodeId>) = self
            .children(id)
            .into_iter()
            .partition(|&child| entities::is_marked_for_removal(self, child));

        if !wrecks.is_empty() {
            self.node_mut(id)
                .children
                .retain(|child| !wrecks.contains(child));
            for &wreck in &wrecks {
                self.despawn_subtree(wreck);
            }
        }

        let mut removed = wrecks.len();
        for child in survivors {
            removed += self.remove_wrecks_below(child);
        }
        removed
    }
}
