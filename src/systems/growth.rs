//! Inflated and deflated derplings returning to normal size.
//!
//! The size change itself happens when a walking derpling touches an inflator
//! or deflator. Here each marker runs its own window clock; when the window
//! closes the derpling reverts. A shrunk derpling still squeezed under a
//! platform keeps waiting, and one that stops walking reverts at once.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::derpling::{Derpling, Grown, Shrunk, Walking};
use crate::components::geometry::Platform;
use crate::components::spatial::{Rect, Spatial};
use crate::events::audio::{AudioCmd, cue};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::transitions::resize_keep_bottom;

const HEADROOM_OFFSET: f32 = 8.0;

type Resized<'a> = (
    Entity,
    &'a mut Spatial,
    &'a mut Animation,
    Option<&'a mut Grown>,
    Option<&'a mut Shrunk>,
    Has<Walking>,
);

/// Area above a shrunk derpling that must be free before it may grow back.
pub fn headroom_rect(rect: Rect, grid_size: f32) -> Rect {
    Rect::new(
        rect.left() - HEADROOM_OFFSET,
        rect.top() - HEADROOM_OFFSET,
        grid_size / 2.0,
        grid_size / 2.0,
    )
}

pub fn growth_system(
    mut derplings: Query<Resized, (With<Derpling>, Or<(With<Grown>, With<Shrunk>)>)>,
    platforms: Query<&Spatial, (With<Platform>, Without<Derpling>)>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut audio: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let delta = time.delta();
    for (entity, mut spatial, mut anim, grown, shrunk, walking) in derplings.iter_mut() {
        let (elapsed, is_shrunk) = match (grown, shrunk) {
            (Some(mut g), _) => {
                g.elapsed_ms += delta;
                (g.elapsed_ms, false)
            }
            (None, Some(mut s)) => {
                if !walking {
                    resize_keep_bottom(&mut spatial, config.derpling_width, config.derpling_height);
                    commands.entity(entity).remove::<Shrunk>();
                    debug!("shrunk derpling {entity} left the ground and reverted");
                    continue;
                }
                s.elapsed_ms += delta;
                (s.elapsed_ms, true)
            }
            (None, None) => continue,
        };

        if elapsed < config.growth_window_ms {
            continue;
        }

        if is_shrunk {
            let headroom = headroom_rect(spatial.rect(), config.grid_size);
            if platforms.iter().any(|p| p.rect().overlaps(&headroom)) {
                continue;
            }
            commands.entity(entity).remove::<Shrunk>();
            audio.write(AudioCmd::fx(cue::DEFLATE));
        } else {
            commands.entity(entity).remove::<Grown>();
            audio.write(AudioCmd::fx(cue::INFLATE));
        }

        resize_keep_bottom(&mut spatial, config.derpling_width, config.derpling_height);
        if walking {
            anim.change_animation("walk");
        }
        debug!("derpling {entity} back to normal size");
    }
}
