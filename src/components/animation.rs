use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Animation playback state read by the renderer.
///
/// The simulation only picks the set and mirroring; frames are advanced by
/// [`crate::systems::animation::animation_system`] using the per-set timing in
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
#[derive(Debug, Clone, Component, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub anim_set: String,
    pub index: usize,
    pub elapsed_ms: u64,
    pub mirror: bool,
    /// Set once a non-looping set has shown its last frame.
    pub stopped: bool,
}

impl Animation {
    pub fn new(anim_set: impl Into<String>) -> Self {
        Self {
            anim_set: anim_set.into(),
            index: 0,
            elapsed_ms: 0,
            mirror: false,
            stopped: false,
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed_ms = 0;
        self.stopped = false;
    }

    /// Switch to `anim_set` and restart it from the first frame.
    pub fn change_animation(&mut self, anim_set: &str) {
        if self.anim_set != anim_set {
            self.anim_set.clear();
            self.anim_set.push_str(anim_set);
        }
        self.reset();
    }

    pub fn is(&self, anim_set: &str) -> bool {
        self.anim_set == anim_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_animation_restarts_clock() {
        let mut anim = Animation::new("walk");
        anim.index = 3;
        anim.elapsed_ms = 70;
        anim.stopped = true;
        anim.mirror = true;
        anim.change_animation("fall");
        assert!(anim.is("fall"));
        assert_eq!(anim.index, 0);
        assert_eq!(anim.elapsed_ms, 0);
        assert!(!anim.stopped);
        assert!(anim.mirror, "mirroring survives a set change");
    }

    #[test]
    fn animation_state_serializes_for_the_renderer() {
        let anim = Animation::new("climb");
        let json = serde_json::to_string(&anim).unwrap();
        let back: Animation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, anim);
    }
}
