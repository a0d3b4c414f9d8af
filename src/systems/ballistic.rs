//! Derplings in flight hitting walls and platforms.
//!
//! Walls are checked first: a wall contact pushes the derpling out on the
//! nearer face and drops it. Otherwise a platform hit from below bounces it
//! down under the platform, and a hit from above lands it.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::Animation;
use crate::components::derpling::Derpling;
use crate::components::geometry::{Platform, Wall};
use crate::components::motion::{BallisticMotion, Motion};
use crate::components::spatial::Spatial;
use crate::resources::gameconfig::GameConfig;
use crate::systems::transitions::{begin_fall, begin_walk};

type Flyer<'a> = (
    Entity,
    &'a mut Spatial,
    &'a mut Derpling,
    &'a mut Motion,
    &'a mut Animation,
);

pub fn ballistic_landing_system(
    mut flyers: Query<Flyer, With<BallisticMotion>>,
    walls: Query<&Spatial, (With<Wall>, Without<Derpling>)>,
    platforms: Query<(Entity, &Spatial), (With<Platform>, Without<Derpling>)>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    for (entity, mut spatial, mut derpling, mut motion, mut anim) in flyers.iter_mut() {
        let rect = spatial.rect();

        if let Some(wall) = walls.iter().map(|w| w.rect()).find(|w| w.overlaps(&rect)) {
            let x = if rect.center_x() < wall.center_x() {
                wall.left() - rect.w
            } else {
                wall.right()
            };
            spatial.set_pos(Vec2::new(x, rect.y));
            debug!("derpling {entity} hit a wall mid-flight");
            begin_fall(
                &mut commands,
                entity,
                &mut derpling,
                &mut motion,
                &mut anim,
                config.fall_speed,
            );
            continue;
        }

        let Some((platform, platform_rect)) = platforms
            .iter()
            .map(|(e, p)| (e, p.rect()))
            .find(|(_, p)| p.overlaps(&rect))
        else {
            continue;
        };

        if platform_rect.center_y() < rect.center_y() {
            spatial.set_pos(Vec2::new(rect.x, platform_rect.bottom()));
            debug!("derpling {entity} bumped its head on {platform}");
            begin_fall(
                &mut commands,
                entity,
                &mut derpling,
                &mut motion,
                &mut anim,
                config.fall_speed,
            );
        } else {
            begin_walk(
                &mut commands,
                entity,
                &mut spatial,
                &mut derpling,
                &mut motion,
                &mut anim,
                platform,
                platform_rect,
                config.walk_speed,
            );
        }
    }
}
