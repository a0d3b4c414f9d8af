//! Animation timing registry.
//!
//! The simulation never sees image data; it only needs to know how many frames
//! each set has, how long a frame lasts, and whether the set loops, so it can
//! tell when a non-looping set (the death animation) has finished.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Central registry of animation timings keyed by set name.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Timing of one animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationResource {
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Milliseconds a frame must have been shown before advancing. Zero
    /// advances every tick.
    pub frame_ms: u64,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationStore {
    pub fn insert(&mut self, key: &str, frame_count: usize, frame_ms: u64, looped: bool) {
        self.animations.insert(
            key.to_string(),
            AnimationResource {
                frame_count,
                frame_ms,
                looped,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Stock derpling sets.
    pub fn derpling_defaults() -> Self {
        const WALK_MS: u64 = 110;
        const DEATH_MS: u64 = 150;
        let mut store = Self::default();
        store.insert("walk", 8, WALK_MS, true);
        store.insert("death", 8, DEATH_MS, false);
        store.insert("idle", 1, 0, true);
        store.insert("fall", 1, 0, true);
        store.insert("cover", 1, 0, true);
        store.insert("climb", 4, WALK_MS, true);
        store.insert("inflator", 4, WALK_MS, true);
        store.insert("deflator", 4, WALK_MS, true);
        store
    }
}
