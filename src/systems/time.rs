//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta milliseconds on the `WorldTime` resource.
///
/// `delta_ms` is the unscaled tick delta. The function applies the current
/// `time_scale` and writes `elapsed_ms`, `delta_ms` and `frame_count`.
pub fn update_world_time(world: &mut World, delta_ms: u32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = (delta_ms as f32 * wt.time_scale).round().max(0.0) as u32;
    wt.delta_ms = scaled;
    wt.elapsed_ms += u64::from(scaled);
    wt.frame_count += 1;
}
