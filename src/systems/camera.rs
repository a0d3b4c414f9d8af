//! Camera rig: free panning or tracking a derpling.
//!
//! The free camera moves one grid row per tick while a pan input is held and
//! stays within the map height. Cycling the target switches to tracking mode
//! and steps through the derplings in creation order. Once every freed
//! derpling has won, the goal system owns the view and the rig stays put.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use smallvec::SmallVec;

use crate::components::camera::CameraRig;
use crate::components::derpling::Derpling;
use crate::components::spatial::Spatial;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::progress::LevelProgress;
use crate::resources::viewport::Viewport;

const TRACKING_LIFT: f32 = 8.0;

pub fn camera_system(
    mut cameras: Query<(&mut CameraRig, &mut Spatial), Without<Derpling>>,
    derplings: Query<(Entity, &Spatial), With<Derpling>>,
    mut input: ResMut<InputState>,
    mut viewport: ResMut<Viewport>,
    progress: Res<LevelProgress>,
    config: Res<GameConfig>,
) {
    if progress.ended || progress.all_victorious() {
        return;
    }
    let mut targets: SmallVec<[(Entity, Vec2); 32]> =
        derplings.iter().map(|(e, s)| (e, s.pos())).collect();
    targets.sort_by_key(|(e, _)| e.index());
    let map = Vec2::new(config.map_width, config.map_height);

    for (mut rig, mut spatial) in cameras.iter_mut() {
        if input.cycle_target {
            rig.free_cam = false;
            if !targets.is_empty() {
                rig.index = (rig.index + 1) % targets.len();
            }
            debug!("camera tracks derpling #{}", rig.index);
        }

        let pos = spatial.pos();
        if rig.free_cam {
            let mut y = pos.y;
            if input.pan_up {
                y -= config.grid_size;
            }
            if input.pan_down {
                y += config.grid_size;
            }
            if (0.0..=config.map_height).contains(&y) {
                spatial.set_pos(Vec2::new(pos.x, y));
            }
        } else if !targets.is_empty() {
            let (_, target) = targets[rig.index % targets.len()];
            spatial.set_pos(Vec2::new(target.x, target.y - TRACKING_LIFT));
        }

        viewport.center_on(spatial.pos(), map);
    }
    input.cycle_target = false;
}
