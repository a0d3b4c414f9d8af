//! View rectangle for world/screen conversion.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::spatial::Rect;

/// Visible part of the level, in world units.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Viewport {
    pub rect: Rect,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, width, height),
        }
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.rect.top_left()
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.rect.top_left()
    }

    /// Center the view on `pos`, keeping it inside `[0, map]` when the map is
    /// larger than the view.
    pub fn center_on(&mut self, pos: Vec2, map: Vec2) {
        let half = Vec2::new(self.rect.w, self.rect.h) / 2.0;
        let mut top_left = pos - half;
        let max = (map - Vec2::new(self.rect.w, self.rect.h)).max(Vec2::ZERO);
        top_left = top_left.clamp(Vec2::ZERO, max);
        self.rect.x = top_left.x;
        self.rect.y = top_left.y;
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_world_conversion_is_an_offset() {
        let mut view = Viewport::new(1344.0, 768.0);
        view.rect.y = 320.0;
        assert_eq!(view.to_world(Vec2::new(10.0, 10.0)), Vec2::new(10.0, 330.0));
        assert_eq!(view.to_screen(Vec2::new(10.0, 330.0)), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn centering_clamps_to_map() {
        let mut view = Viewport::new(100.0, 100.0);
        view.center_on(Vec2::new(500.0, 10.0), Vec2::new(1000.0, 2000.0));
        assert_eq!(view.rect.top_left(), Vec2::new(450.0, 0.0));
        view.center_on(Vec2::new(990.0, 1000.0), Vec2::new(1000.0, 2000.0));
        assert_eq!(view.rect.top_left(), Vec2::new(900.0, 950.0));
    }
}
