//! Ladder climbing.
//!
//! A climbing derpling moves straight up (its motion is set when it grabs the
//! ladder). Once it no longer overlaps its segment it hops to the segment one
//! grid row above if it touches one, otherwise it pops off the top with a
//! small lift and starts falling.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::Animation;
use crate::components::derpling::{Derpling, OnLadder};
use crate::components::geometry::Ladder;
use crate::components::motion::Motion;
use crate::components::spatial::Spatial;
use crate::resources::gameconfig::GameConfig;
use crate::systems::transitions::begin_fall;

type Climber<'a> = (
    Entity,
    &'a mut Spatial,
    &'a mut Derpling,
    &'a mut Motion,
    &'a mut Animation,
);

pub fn ladder_system(
    mut climbers: Query<Climber, With<OnLadder>>,
    mut ladders: Query<(Entity, &Spatial, &mut Ladder), Without<Derpling>>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    for (entity, mut spatial, mut derpling, mut motion, mut anim) in climbers.iter_mut() {
        let current = derpling
            .attached_ladder
            .and_then(|l| ladders.get(l).ok())
            .map(|(e, s, _)| (e, s.rect()));

        let Some((ladder, ladder_rect)) = current else {
            debug!("derpling {entity} lost its ladder");
            begin_fall(
                &mut commands,
                entity,
                &mut derpling,
                &mut motion,
                &mut anim,
                config.fall_speed,
            );
            continue;
        };

        let rect = spatial.rect();
        if rect.overlaps(&ladder_rect) {
            continue;
        }

        let above = ladders
            .iter()
            .filter(|(_, s, _)| {
                s.rect().overlaps(&rect) && s.rect().top() == ladder_rect.top() - config.grid_size
            })
            .map(|(e, _, _)| e)
            .last();

        if let Some(next) = above {
            derpling.attached_ladder = Some(next);
            if let Ok((_, _, mut next_ladder)) = ladders.get_mut(next) {
                next_ladder.in_use = true;
            }
            if let Ok((_, _, mut old)) = ladders.get_mut(ladder) {
                old.in_use = false;
            }
            continue;
        }

        if let Ok((_, _, mut old)) = ladders.get_mut(ladder) {
            old.in_use = false;
        }
        let pos = spatial.pos();
        spatial.set_pos(Vec2::new(pos.x, pos.y - config.ladder_exit_lift));
        debug!("derpling {entity} leaves the top of ladder {ladder}");
        begin_fall(
            &mut commands,
            entity,
            &mut derpling,
            &mut motion,
            &mut anim,
            config.fall_speed,
        );
    }
}
