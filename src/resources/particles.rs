//! Live particle storage.
//!
//! Particles are not entities. Generators append to [`Particles::live`] and
//! the integrator drops records whose lifetime ran out, so the renderer can
//! iterate one flat list.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::particle::{AlphaCurve, Color};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub angle: f32,
    /// Pixels per second.
    pub magnitude: f32,
    pub lifetime_ms: u32,
    pub time_remaining_ms: i64,
    pub color: Color,
    pub alpha: u8,
    pub size: u32,
    pub curve: AlphaCurve,
}

#[derive(Resource, Debug, Default)]
pub struct Particles {
    pub live: Vec<Particle>,
}

impl Particles {
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
