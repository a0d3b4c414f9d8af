use bevy_ecs::prelude::Resource;

/// Seedable random source shared by every system that jitters values.
///
/// Seeding it through [`GameConfig::seed`](crate::resources::gameconfig::GameConfig)
/// makes particle bursts and goal-trampoline launches reproducible.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub fastrand::Rng);

impl SimRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform `f32` in `[min, max]`; a degenerate range yields `min`.
    pub fn f32_range(&mut self, min: f32, max: f32) -> f32 {
        let range = max - min;
        if range < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * range
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    pub fn i32_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.0.i32(min..=max)
    }

    pub fn u32_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.0.u32(min..=max)
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::with_seed(0)
    }
}
