//! Placed item lifecycle.
//!
//! An inactive item follows the pointer, snapped to the screen grid. Placing
//! it moves it into world coordinates and flags it for activation; the next
//! pass snaps it to the world grid, turns it translucent and lets it start
//! affecting derplings.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::item::{Item, ItemPhase};
use crate::components::spatial::Spatial;
use crate::components::sprite::Sprite;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

pub const PLACED_ALPHA: u8 = 128;

/// Snap a position down to the grid.
pub fn snap(pos: Vec2, grid: f32) -> Vec2 {
    (pos / grid).floor() * grid
}

pub fn item_system(
    mut items: Query<(Entity, &mut Item, &mut Spatial, Option<&mut Sprite>)>,
    input: Res<InputState>,
    config: Res<GameConfig>,
) {
    let grid = config.grid_size;
    for (entity, mut item, mut spatial, sprite) in items.iter_mut() {
        if item.phase != ItemPhase::Inactive {
            continue;
        }
        if item.should_activate {
            let world_pos = snap(spatial.pos(), grid);
            spatial.set_pos(world_pos);
            if let Some(mut sprite) = sprite {
                sprite.alpha = PLACED_ALPHA;
            }
            item.should_activate = false;
            item.phase = ItemPhase::Active;
            debug!("{} {entity} placed at {world_pos:?}", item.kind.name());
        } else {
            spatial.set_pos(snap(input.pointer, grid));
        }
    }
}
