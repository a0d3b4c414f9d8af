//! Shared derpling state transitions.
//!
//! Several systems move a derpling into the same state (falling, walking,
//! riding an arc). Each helper swaps the markers through one
//! [`EntityCommands`] so the old and new primary markers change at the same
//! sync point, and updates the record, motion and animation in place.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::Animation;
use crate::components::derpling::{Derpling, Descending, Exploding, OnLadder, Walking};
use crate::components::motion::{BallisticMotion, LinearMotion, Motion, Stopwatch};
use crate::components::particle::{ParticleEffect, ParticleGenerator};
use crate::components::spatial::{Facing, Rect, Spatial};
use crate::events::audio::{AudioCmd, cue};

pub const FALL_ANGLE: f32 = 90.0;
pub const CLIMB_ANGLE: f32 = 270.0;

/// Start a straight fall at `speed`, leaving walking, ladder or arc.
pub fn begin_fall(
    commands: &mut Commands,
    entity: Entity,
    derpling: &mut Derpling,
    motion: &mut Motion,
    anim: &mut Animation,
    speed: f32,
) {
    commands
        .entity(entity)
        .remove::<(Walking, OnLadder, BallisticMotion)>()
        .insert((Descending, LinearMotion, Stopwatch::default()));
    derpling.attached_platform = None;
    derpling.attached_ladder = None;
    motion.angle = FALL_ANGLE;
    motion.magnitude = speed;
    anim.change_animation("fall");
    debug!("derpling {entity} falls at {speed}");
}

/// Stand on top of `platform` and walk in the facing direction.
#[allow(clippy::too_many_arguments)]
pub fn begin_walk(
    commands: &mut Commands,
    entity: Entity,
    spatial: &mut Spatial,
    derpling: &mut Derpling,
    motion: &mut Motion,
    anim: &mut Animation,
    platform: Entity,
    platform_rect: Rect,
    walk_speed: f32,
) {
    commands
        .entity(entity)
        .remove::<(Descending, BallisticMotion, Stopwatch)>()
        .insert((Walking, LinearMotion));
    let top = platform_rect.top() - spatial.height();
    spatial.set_pos(Vec2::new(spatial.pos().x, top));
    derpling.has_umbrella = false;
    derpling.attached_platform = Some(platform);
    derpling.last_facing_direction = spatial.facing;
    motion.angle = spatial.facing.angle();
    motion.magnitude = walk_speed;
    anim.change_animation("walk");
    anim.mirror = spatial.facing == Facing::Left;
    debug!("derpling {entity} lands on {platform}");
}

/// Leave the ground on a ballistic arc.
#[allow(clippy::too_many_arguments)]
pub fn begin_arc(
    commands: &mut Commands,
    entity: Entity,
    derpling: &mut Derpling,
    motion: &mut Motion,
    anim: &mut Animation,
    angle: f32,
    magnitude: f32,
    jetpack: bool,
) {
    let ballistic = if jetpack {
        BallisticMotion::jetpack()
    } else {
        BallisticMotion::new()
    };
    commands
        .entity(entity)
        .remove::<(Walking, LinearMotion)>()
        .insert((ballistic, Stopwatch::default()));
    derpling.attached_platform = None;
    motion.angle = angle;
    motion.magnitude = magnitude;
    anim.change_animation("fall");
    debug!("derpling {entity} launched at {angle}/{magnitude}");
}

/// Die on impact: play the death animation, leave effects at the feet.
pub fn begin_explode(
    commands: &mut Commands,
    audio: &mut MessageWriter<AudioCmd>,
    entity: Entity,
    spatial: &Spatial,
    derpling: &mut Derpling,
    anim: &mut Animation,
) {
    commands
        .entity(entity)
        .remove::<(Descending, Stopwatch, Motion)>()
        .insert(Exploding);
    derpling.dead = true;
    anim.change_animation("death");
    let at = spatial.bottom_center();
    commands.spawn(ParticleGenerator::effect(ParticleEffect::SmallExplosion, at));
    commands.spawn(ParticleGenerator::effect(ParticleEffect::Smoke, at));
    audio.write(AudioCmd::fx(cue::EXPLOSION));
    debug!("derpling {entity} explodes at {at:?}");
}

/// Turn around against `obstacle`, stepping out of it on the near side.
pub fn bounce_off(spatial: &mut Spatial, motion: &mut Motion, anim: &mut Animation, obstacle: Rect) {
    let y = spatial.pos().y;
    let facing = match spatial.facing {
        Facing::Right => {
            spatial.set_pos(Vec2::new(obstacle.left() - spatial.width(), y));
            Facing::Left
        }
        Facing::Left => {
            spatial.set_pos(Vec2::new(obstacle.right(), y));
            Facing::Right
        }
    };
    spatial.facing = facing;
    motion.angle = facing.angle();
    anim.mirror = facing == Facing::Left;
}

/// Resize around the bottom edge, keeping the left edge in place.
pub fn resize_keep_bottom(spatial: &mut Spatial, width: f32, height: f32) {
    let bottom = spatial.rect().bottom();
    let x = spatial.pos().x;
    spatial.set_size(width, height);
    spatial.set_pos(Vec2::new(x, bottom - height));
}
