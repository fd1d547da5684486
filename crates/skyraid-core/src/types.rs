//! Fundamental geometric and simulation types.
//!
//! Screen space is y-down, so a positive rotation turns clockwise on screen.

use std::time::Duration;

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Local transform of a scene node.
///
/// The composed matrix applies, right to left: `-origin` offset, scale,
/// rotation (degrees), then translation to `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in degrees, kept in `[0, 360)`.
    pub rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.set_rotation(degrees);
        self
    }

    /// The local affine matrix of this transform.
    pub fn matrix(&self) -> Affine2 {
        Affine2::from_translation(self.position)
            * Affine2::from_angle(self.rotation.to_radians())
            * Affine2::from_scale(self.scale)
            * Affine2::from_translation(-self.origin)
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

/// Axis-aligned rectangle in floating-point coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when the rectangles overlap with a non-zero area.
    /// Touching edges and empty rectangles never intersect.
    pub fn intersects(&self, other: &FloatRect) -> bool {
        let left = self.left.min(self.right()).max(other.left.min(other.right()));
        let right = self.left.max(self.right()).min(other.left.max(other.right()));
        let top = self.top.min(self.bottom()).max(other.top.min(other.bottom()));
        let bottom = self.top.max(self.bottom()).min(other.top.max(other.bottom()));

        left < right && top < bottom
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom edges are not.
    pub fn contains(&self, point: Vec2) -> bool {
        let min_x = self.left.min(self.right());
        let max_x = self.left.max(self.right());
        let min_y = self.top.min(self.bottom());
        let max_y = self.top.max(self.bottom());

        point.x >= min_x && point.x < max_x && point.y >= min_y && point.y < max_y
    }

    /// Bounding box of this rectangle after applying `transform`.
    pub fn transformed(&self, transform: &Affine2) -> FloatRect {
        let corners = [
            transform.transform_point2(Vec2::new(self.left, self.top)),
            transform.transform_point2(Vec2::new(self.left, self.bottom())),
            transform.transform_point2(Vec2::new(self.right(), self.top)),
            transform.transform_point2(Vec2::new(self.right(), self.bottom())),
        ];

        let min = corners.iter().fold(corners[0], |acc, c| acc.min(*c));
        let max = corners.iter().fold(corners[0], |acc, c| acc.max(*c));
        FloatRect::from_min_max(min, max)
    }
}

/// Integer rectangle, used for texture sub-regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimTime {
    /// Number of completed update steps.
    pub tick: u64,
    /// Accumulated simulated time.
    pub elapsed: Duration,
}

impl SimTime {
    /// Advance by one step of length `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.tick += 1;
        self.elapsed += dt;
    }
}
