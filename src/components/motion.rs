//! Motion state consumed by the integrators in [`crate::systems::movement`].
//!
//! - [`Motion`] – polar velocity (degrees, pixels per second)
//! - [`LinearMotion`] – marker selecting the linear integrator
//! - [`BallisticMotion`] – analytic projectile arc driven by a [`Stopwatch`]
//! - [`Stopwatch`] – milliseconds elapsed since it was attached

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Polar velocity: `angle` in degrees (0 = right, 90 = down), `magnitude` in
/// pixels per second.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Motion {
    pub angle: f32,
    pub magnitude: f32,
}

impl Motion {
    pub fn new(angle: f32, magnitude: f32) -> Self {
        Self { angle, magnitude }
    }
}

/// Marker: integrate [`Motion`] linearly every tick.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct LinearMotion;

/// Projectile arc. `start_pos` and `time_to_travel` are captured on the first
/// integration tick and never change afterwards.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct BallisticMotion {
    pub start_pos: Option<Vec2>,
    pub time_to_travel: f32,
    pub is_jetpack: bool,
}

impl BallisticMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jetpack() -> Self {
        Self {
            is_jetpack: true,
            ..Self::default()
        }
    }
}

/// Milliseconds accumulated since the component was (re)attached.
///
/// Re-inserting a `Stopwatch` replaces the old one, which is the only way it
/// resets.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    pub elapsed_ms: u64,
}

impl Stopwatch {
    pub fn with_elapsed(elapsed_ms: u64) -> Self {
        Self { elapsed_ms }
    }
}
