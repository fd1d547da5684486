//! Sprite-sheet animation, used for aircraft explosions.

use std::time::Duration;

use skyraid_core::constants::{EXPLOSION_DURATION, EXPLOSION_FRAME_COUNT, EXPLOSION_FRAME_SIZE};
use skyraid_core::resources::TextureHandle;
use skyraid_core::types::IntRect;

use super::sprite::Sprite;

/// Frames laid out left to right, top to bottom across the texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    texture: TextureHandle,
    frame_size: (i32, i32),
    num_frames: usize,
    current_frame: usize,
    duration: Duration,
    elapsed: Duration,
    repeat: bool,
}

impl Animation {
    pub fn new(
        texture: TextureHandle,
        frame_size: (i32, i32),
        num_frames: usize,
        duration: Duration,
    ) -> Self {
        assert!(num_frames > 0, "an animation needs at least one frame");
        Self {
            texture,
            frame_size,
            num_frames,
            current_frame: 0,
            duration,
            elapsed: Duration::ZERO,
            repeat: false,
        }
    }

    pub fn explosion(texture: TextureHandle) -> Self {
        Self::new(
            texture,
            EXPLOSION_FRAME_SIZE,
            EXPLOSION_FRAME_COUNT,
            EXPLOSION_DURATION,
        )
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn time_per_frame(&self) -> Duration {
        self.duration / self.num_frames as u32
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn update(&mut self, dt: Duration) {
        let per_frame = self.time_per_frame();
        if per_frame.is_zero() {
            self.current_frame = self.num_frames;
            return;
        }

        self.elapsed += dt;
        while self.elapsed >= per_frame && (self.repeat || self.current_frame < self.num_frames) {
            self.elapsed -= per_frame;
            self.current_frame = if self.repeat {
                (self.current_frame + 1) % self.num_frames
            } else {
                self.current_frame + 1
            };
        }
    }

    /// A non-repeating animation is finished once it has shown every frame.
    pub fn is_finished(&self) -> bool {
        !self.repeat && self.current_frame >= self.num_frames
    }

    pub fn frame_rect(&self) -> IntRect {
        let (width, height) = self.frame_size;
        let columns = (self.texture.size.x as i32 / width).max(1);
        let frame = self.current_frame.min(self.num_frames - 1) as i32;
        IntRect::new((frame % columns) * width, (frame / columns) * height, width, height)
    }

    /// The current frame as a sprite centred on its node.
    pub fn sprite(&self) -> Sprite {
        Sprite::new(self.texture)
            .with_rect(self.frame_rect())
            .centered()
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use skyraid_core::enums::TextureId;

    use super::*;

    fn sheet() -> TextureHandle {
        TextureHandle {
            id: TextureId::Explosion,
            size: UVec2::new(1024, 1024),
        }
    }

    #[test]
    fn explosion_finishes_after_duration() {
        let mut animation = Animation::explosion(sheet());
        animation.update(Duration::from_millis(500));
        assert_eq!(animation.current_frame(), 8);
        assert!(!animation.is_finished());

        animation.update(Duration::from_millis(500));
        assert!(animation.is_finished(), "16 frames over one second");
    }

    #[test]
    fn frames_wrap_to_next_row() {
        let mut animation = Animation::explosion(sheet());
        // Frame 5 sits in the second row of a four-column sheet.
        animation.update(animation.time_per_frame() * 5);
        assert_eq!(animation.frame_rect(), IntRect::new(256, 256, 256, 256));
    }

    #[test]
    fn repeating_animation_never_finishes() {
        let mut animation = Animation::new(sheet(), (256, 256), 4, Duration::from_millis(400))
            .with_repeat(true);
        animation.update(Duration::from_millis(500));
        assert_eq!(animation.current_frame(), 1);
        assert!(!animation.is_finished());
    }
}
