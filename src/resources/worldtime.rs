use bevy_ecs::prelude::Resource;

/// Simulation clock. Every system reads the tick's delta from here.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Total scaled milliseconds simulated so far.
    pub elapsed_ms: u64,
    /// Scaled milliseconds of the current tick.
    pub delta_ms: u32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed_ms: 0,
            delta_ms: 0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn delta(&self) -> u64 {
        u64::from(self.delta_ms)
    }
}
