//! Debug toggle resource.
//!
//! The mere presence of this resource enables the per-tick behavior dump of
//! [`crate::systems::debug::debug_system`]. Remove it to disable it.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may print extra logs.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
