//! Draw interface implemented by the host.
//!
//! Every call carries the fully composed world transform of the node being
//! drawn. Calls arrive in scene order: parents before children, earlier
//! siblings before later ones.

use glam::{Affine2, Vec2};

use crate::resources::{FontHandle, TextureHandle};
use crate::types::{Color, FloatRect, IntRect};

/// A textured quad of `texture_rect.size()` at the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureHandle,
    pub texture_rect: IntRect,
    pub transform: Affine2,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextDraw<'a> {
    pub font: FontHandle,
    pub text: &'a str,
    pub transform: Affine2,
    pub character_size: u32,
}

/// One corner of a textured quad, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub tex_coords: Vec2,
    pub color: Color,
}

pub trait RenderTarget {
    /// Set the visible world rectangle for everything drawn afterwards.
    fn set_view(&mut self, view: FloatRect);

    fn draw_sprite(&mut self, sprite: SpriteDraw);

    fn draw_text(&mut self, text: TextDraw<'_>);

    /// Draw quads, four vertices each, sampling `texture`.
    fn draw_vertices(&mut self, texture: TextureHandle, vertices: &[Vertex]);

    /// Debug outline of a world-space rectangle.
    fn draw_rect_outline(&mut self, _rect: FloatRect, _color: Color) {}
}
