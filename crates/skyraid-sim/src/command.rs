//! Commands: category-filtered actions dispatched through the scene graph.
//!
//! A command pairs a [`Category`] mask with an action. The scene graph runs
//! the action on every node whose category intersects the mask. Actions
//! written against one concrete node kind go through [`Command::derived`],
//! which checks the target actually has that kind before calling in.

use std::any::type_name;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use hecs::Component;

use skyraid_core::category::Category;

use crate::scene::{NodeId, SceneGraph};

type Action = dyn FnMut(&mut SceneGraph, NodeId, Duration);

pub struct Command {
    category: Category,
    action: Box<Action>,
}

impl Command {
    /// A command acting on any node tagged with `category`.
    pub fn new(
        category: Category,
        action: impl FnMut(&mut SceneGraph, NodeId, Duration) + 'static,
    ) -> Self {
        Self {
            category,
            action: Box::new(action),
        }
    }

    /// A command acting on nodes carrying component `K`.
    ///
    /// Every node tagged with `category` must carry `K`. Dispatching to one
    /// that does not is a broken category contract and panics.
    pub fn derived<K: Component>(
        category: Category,
        mut action: impl FnMut(NodeMut<'_, K>, Duration) + 'static,
    ) -> Self {
        Self::new(category, move |scene, id, dt| {
            action(NodeMut::narrow(scene, id), dt);
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub(crate) fn execute(&mut self, scene: &mut SceneGraph, id: NodeId, dt: Duration) {
        (self.action)(scene, id, dt);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// A node already checked to carry component `K`.
pub struct NodeMut<'a, K> {
    scene: &'a mut SceneGraph,
    id: NodeId,
    _kind: PhantomData<fn() -> K>,
}

impl<'a, K: Component> NodeMut<'a, K> {
    /// Narrow `id` to kind `K`, panicking if it is something else.
    pub fn narrow(scene: &'a mut SceneGraph, id: NodeId) -> Self {
        assert!(
            scene.has::<K>(id),
            "command for {} reached {id:?}, a {:?} node",
            type_name::<K>(),
            scene.kind(id)
        );
        Self {
            scene,
            id,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn get(&mut self) -> &mut K {
        let id = self.id;
        self.scene
            .get_mut::<K>(id)
            .unwrap_or_else(|| panic!("{id:?} lost its {}", type_name::<K>()))
    }

    pub fn scene(&mut self) -> &mut SceneGraph {
        &mut *self.scene
    }
}

/// FIFO of commands waiting for the next dispatch pass.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
