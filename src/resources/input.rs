//! Player input snapshot.
//!
//! The host fills this once per tick before running the schedule. Edge
//! triggered fields are cleared by the systems that consume them.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Held: pan the free camera one grid row up.
    pub pan_up: bool,
    /// Held: pan the free camera one grid row down.
    pub pan_down: bool,
    /// Pressed this tick: track the next derpling.
    pub cycle_target: bool,
    /// Pointer in screen coordinates.
    pub pointer: Vec2,
}
