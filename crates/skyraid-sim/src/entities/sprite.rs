//! Textured sprites and text labels.

use glam::{Affine2, Vec2};

use skyraid_core::category::Category;
use skyraid_core::constants::LABEL_CHARACTER_SIZE;
use skyraid_core::render::{RenderTarget, SpriteDraw, TextDraw};
use skyraid_core::resources::{FontHandle, TextureHandle};
use skyraid_core::types::{Color, FloatRect, IntRect, Transform};

use crate::scene::{NodeId, NodeKind, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub texture_rect: IntRect,
    pub color: Color,
    /// Draw around the node's origin instead of from its top-left corner.
    pub centered: bool,
}

impl Sprite {
    /// A sprite showing the whole texture.
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            texture_rect: IntRect::new(0, 0, texture.size.x as i32, texture.size.y as i32),
            color: Color::WHITE,
            centered: false,
        }
    }

    pub fn with_rect(mut self, rect: IntRect) -> Self {
        self.texture_rect = rect;
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.texture_rect.size()
    }

    fn offset(&self) -> Vec2 {
        if self.centered {
            -self.size() / 2.0
        } else {
            Vec2::ZERO
        }
    }

    /// Bounds in the owning node's local space.
    pub fn local_bounds(&self) -> FloatRect {
        let offset = self.offset();
        let size = self.size();
        FloatRect::new(offset.x, offset.y, size.x, size.y)
    }

    pub fn draw(&self, transform: &Affine2, target: &mut dyn RenderTarget) {
        target.draw_sprite(SpriteDraw {
            texture: self.texture,
            texture_rect: self.texture_rect,
            transform: *transform * Affine2::from_translation(self.offset()),
            color: self.color,
        });
    }
}

/// Text drawn at a node, such as an aircraft's hit point readout.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub font: FontHandle,
    pub text: String,
    pub character_size: u32,
}

/// A detached decoration node showing `sprite`.
pub fn spawn_sprite(scene: &mut SceneGraph, sprite: Sprite, transform: Transform) -> NodeId {
    scene.spawn(Category::NONE, NodeKind::Sprite, transform, (sprite,))
}

/// A detached, initially empty label node.
pub fn spawn_label(scene: &mut SceneGraph, font: FontHandle, transform: Transform) -> NodeId {
    let label = Label {
        font,
        text: String::new(),
        character_size: LABEL_CHARACTER_SIZE,
    };
    scene.spawn(Category::NONE, NodeKind::Label, transform, (label,))
}

pub(crate) fn draw_sprite(
    scene: &SceneGraph,
    id: NodeId,
    transform: &Affine2,
    target: &mut dyn RenderTarget,
) {
    if let Some(sprite) = scene.get::<Sprite>(id) {
        sprite.draw(transform, target);
    }
}

pub(crate) fn draw_label(
    scene: &SceneGraph,
    id: NodeId,
    transform: &Affine2,
    target: &mut dyn RenderTarget,
) {
    let Some(label) = scene.get::<Label>(id) else {
        return;
    };
    if label.text.is_empty() {
        return;
    }
    target.draw_text(TextDraw {
        font: label.font,
        text: &label.text,
        transform: *transform,
        character_size: label.character_size,
    });
}
