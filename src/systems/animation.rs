//! Animation clock.
//!
//! [`animation_system`] advances every [`Animation`] by the tick delta using
//! the frame data in [`AnimationStore`]. Looping sets wrap to their first
//! frame; a non-looping set holds its last frame and raises `stopped`, which
//! the exploding system waits for.
//!
//! The renderer only reads `anim_set`, `index` and `mirror`.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::Animation;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

pub fn animation_system(
    mut query: Query<&mut Animation>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for mut anim in query.iter_mut() {
        let Some(frames) = store.get(&anim.anim_set) else {
            continue;
        };
        anim.elapsed_ms += time.delta();
        if anim.elapsed_ms <= frames.frame_ms || anim.stopped {
            continue;
        }
        anim.elapsed_ms = 0;
        if anim.index + 1 >= frames.frame_count {
            if frames.looped {
                anim.index = 0;
            } else {
                anim.stopped = true;
                trace!("animation {} finished", anim.anim_set);
            }
        } else {
            anim.index += 1;
        }
    }
}
