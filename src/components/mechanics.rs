//! Explosives.
//!
//! A placed [`Tnt`] counts its fuse on a [`Stopwatch`](super::motion::Stopwatch)
//! and, once it burns down, leaves a one-tick [`BlastRadius`] that destroys
//! overlapping weak platforms.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::spatial::Rect;

#[derive(Component, Debug, Clone, Copy)]
pub struct Tnt {
    pub fuse_ms: u64,
}

impl Tnt {
    pub fn new(fuse_ms: u64) -> Self {
        Self { fuse_ms }
    }
}

/// Square blast area reaching down and right from the detonation point.
#[derive(Component, Debug, Clone, Copy)]
pub struct BlastRadius {
    /// Detonation point, the top-left corner of the blast area.
    pub origin: Vec2,
    pub size: f32,
}

impl BlastRadius {
    pub fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.size, self.size)
    }
}
