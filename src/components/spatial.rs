//! Axis-aligned spatial object shared by every physical entity.
//!
//! [`Spatial`] owns a top-left position, a size, the bounding [`Rect`] derived
//! from both, and a binary [`Facing`]. The rectangle is private and only
//! rebuilt through [`Spatial::set_pos`] and [`Spatial::set_size`], so it can
//! never drift from the position it was computed from.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal facing of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Polar angle in degrees of motion towards this side (y grows downwards).
    pub fn angle(self) -> f32 {
        match self {
            Facing::Left => 180.0,
            Facing::Right => 0.0,
        }
    }

    /// The opposite side.
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Axis-aligned rectangle in world units, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }
    pub fn right(&self) -> f32 {
        self.x + self.w
    }
    pub fn top(&self) -> f32 {
        self.y
    }
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Strict overlap test. Rectangles that only share an edge do not collide,
    /// and empty rectangles never collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point containment, inclusive of the top/left edges only.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Position, size, derived rectangle and facing of a physical entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    pos: Vec2,
    size: Vec2,
    rect: Rect,
    pub facing: Facing,
}

impl Spatial {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rect: Rect::new(x, y, w, h),
            facing: Facing::Right,
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move the top-left corner and rebuild the rectangle.
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.rect.x = pos.x;
        self.rect.y = pos.y;
    }

    /// Resize around the current top-left corner.
    pub fn set_size(&mut self, w: f32, h: f32) {
        self.size = Vec2::new(w, h);
        self.rect.w = w;
        self.rect.h = h;
    }

    /// Bottom-center point, where death effects are anchored.
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.rect.center_x(), self.rect.bottom())
    }

    pub fn overlaps(&self, other: &Spatial) -> bool {
        self.rect.overlaps(&other.rect)
    }
}

/// Polar vector with the angle in degrees, y axis pointing down.
pub fn polar(angle_deg: f32, magnitude: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(theta.cos() * magnitude, theta.sin() * magnitude)
}
