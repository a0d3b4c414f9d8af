//! Motion integrators.
//!
//! - [`linear_motion_system`] advances every [`LinearMotion`] entity along its
//!   polar velocity, scaled by the tick delta.
//! - [`ballistic_motion_system`] places every [`BallisticMotion`] entity on an
//!   analytic projectile arc driven by its [`Stopwatch`].
//!
//! Both express speeds against the configured nominal frame rate so a level
//! plays the same at any tick rate.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::motion::{BallisticMotion, LinearMotion, Motion, Stopwatch};
use crate::components::particle::{ParticleEffect, ParticleGenerator};
use crate::components::spatial::{Facing, Spatial, polar};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Arcs are computed for this fixed frame time, independent of the real delta.
const BALLISTIC_NOMINAL_DELTA_MS: f32 = 17.0;
const BALLISTIC_LAUNCH_SCALE: f32 = 13.0;
const GRAVITY: f32 = 9.81 * 30.0;
const JETPACK_SMOKE_CUTOFF_MS: f32 = 1000.0;

/// Displacement of one linear step.
pub fn linear_step(angle: f32, magnitude: f32, fps: f32, delta_ms: u32) -> Vec2 {
    let integration = (fps / 1000.0) * delta_ms as f32;
    polar(angle, magnitude * integration) / fps
}

pub fn linear_motion_system(
    mut query: Query<(&mut Spatial, &Motion), With<LinearMotion>>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
) {
    if time.delta_ms == 0 {
        return;
    }
    let fps = config.fps();
    for (mut spatial, motion) in query.iter_mut() {
        let step = linear_step(motion.angle, motion.magnitude, fps, time.delta_ms);
        let pos = spatial.pos() + step;
        spatial.set_pos(pos);
    }
}

/// Launch speed of an arc for the given motion magnitude.
pub fn launch_speed(magnitude: f32, fps: f32) -> f32 {
    let integration = (fps / 1000.0) * BALLISTIC_NOMINAL_DELTA_MS;
    (BALLISTIC_LAUNCH_SCALE * magnitude * integration) / fps
}

/// Offset from the launch point after `t` seconds, y pointing down.
pub fn arc_offset(v0: f32, angle_deg: f32, t: f32, facing: Facing) -> Vec2 {
    let beta = angle_deg.to_radians();
    let mut x = v0 * t * beta.cos();
    let y = v0 * t * beta.sin() - 0.5 * GRAVITY * t * t;
    if facing == Facing::Left {
        x = -x;
    }
    Vec2::new(x, -y)
}

pub fn ballistic_motion_system(
    mut query: Query<(&mut BallisticMotion, &mut Spatial, &Motion, &Stopwatch)>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    let fps = config.fps();
    for (mut ballistic, mut spatial, motion, stopwatch) in query.iter_mut() {
        let v0 = launch_speed(motion.magnitude, fps);
        let start = match ballistic.start_pos {
            Some(start) => start,
            None => {
                let start = spatial.pos();
                let beta = motion.angle.to_radians();
                ballistic.start_pos = Some(start);
                ballistic.time_to_travel = (2.0 * v0 * beta.sin()) / GRAVITY * 1000.0;
                trace!(
                    "arc launched at {:?}, v0={:.1}, flight={:.0}ms",
                    start, v0, ballistic.time_to_travel
                );
                start
            }
        };

        let t = stopwatch.elapsed_ms as f32 / 1000.0;
        let pos = start + arc_offset(v0, motion.angle, t, spatial.facing);
        spatial.set_pos(pos);

        if ballistic.is_jetpack
            && pos.distance(start) % 5.0 < 4.0
            && (stopwatch.elapsed_ms as f32)
                < ballistic.time_to_travel / 2.0 - JETPACK_SMOKE_CUTOFF_MS
        {
            commands.spawn(ParticleGenerator::effect(ParticleEffect::Smoke, pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn world_with(delta_ms: u32) -> World {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(WorldTime {
            delta_ms,
            ..WorldTime::default()
        });
        world
    }

    #[test]
    fn linear_fall_moves_by_speed_times_delta() {
        let mut world = world_with(100);
        let e = world
            .spawn((
                Spatial::new(0.0, 0.0, 32.0, 64.0),
                Motion::new(90.0, 300.0),
                LinearMotion,
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(linear_motion_system);
        schedule.run(&mut world);
        let pos = world.get::<Spatial>(e).unwrap().pos();
        assert!(approx_eq(pos.x, 0.0));
        assert!(approx_eq(pos.y, 30.0), "300 px/s for 100 ms, got {}", pos.y);
    }

    #[test]
    fn linear_ignores_entities_without_marker() {
        let mut world = world_with(100);
        let e = world
            .spawn((Spatial::new(5.0, 5.0, 1.0, 1.0), Motion::new(0.0, 100.0)))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(linear_motion_system);
        schedule.run(&mut world);
        assert_eq!(world.get::<Spatial>(e).unwrap().pos(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn straight_down_zero_speed_stays_at_start() {
        let mut world = world_with(16);
        let e = world
            .spawn((
                BallisticMotion::new(),
                Spatial::new(40.0, 80.0, 32.0, 64.0),
                Motion::new(90.0, 0.0),
                Stopwatch::default(),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(ballistic_motion_system);
        schedule.run(&mut world);
        let ballistic = world.get::<BallisticMotion>(e).unwrap();
        assert_eq!(ballistic.start_pos, Some(Vec2::new(40.0, 80.0)));
        assert!(approx_eq(ballistic.time_to_travel, 0.0));
        assert_eq!(world.get::<Spatial>(e).unwrap().pos(), Vec2::new(40.0, 80.0));
    }

    #[test]
    fn arc_returns_to_launch_height_after_flight_time() {
        let v0 = launch_speed(1600.0, 60.0);
        let beta = 60f32.to_radians();
        let flight = 2.0 * v0 * beta.sin() / GRAVITY;
        let landing = arc_offset(v0, 60.0, flight, Facing::Right);
        assert!(landing.y.abs() < 0.01);
        assert!(landing.x > 0.0);
        let apex = arc_offset(v0, 60.0, flight / 2.0, Facing::Right);
        assert!(apex.y < 0.0, "apex is above the launch point");
    }

    #[test]
    fn facing_left_mirrors_horizontal_travel() {
        let v0 = launch_speed(1600.0, 60.0);
        let right = arc_offset(v0, 60.0, 0.5, Facing::Right);
        let left = arc_offset(v0, 60.0, 0.5, Facing::Left);
        assert!(approx_eq(right.x, -left.x));
        assert!(approx_eq(right.y, left.y));
    }

    #[test]
    fn start_position_is_captured_once() {
        let mut world = world_with(16);
        let e = world
            .spawn((
                BallisticMotion::new(),
                Spatial::new(0.0, 500.0, 32.0, 64.0),
                Motion::new(60.0, 1600.0),
                Stopwatch::with_elapsed(200),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(ballistic_motion_system);
        schedule.run(&mut world);
        let first = *world.get::<BallisticMotion>(e).unwrap();
        world.get_mut::<Stopwatch>(e).unwrap().elapsed_ms = 400;
        schedule.run(&mut world);
        let second = *world.get::<BallisticMotion>(e).unwrap();
        assert_eq!(first.start_pos, Some(Vec2::new(0.0, 500.0)));
        assert_eq!(first.start_pos, second.start_pos);
        assert!(approx_eq(first.time_to_travel, second.time_to_travel));
    }

    #[test]
    fn jetpack_leaves_smoke_early_in_flight() {
        let mut world = world_with(16);
        world.spawn((
            BallisticMotion::jetpack(),
            Spatial::new(0.0, 500.0, 32.0, 64.0),
            Motion::new(85.0, 3000.0),
            Stopwatch::default(),
        ));
        let mut schedule = Schedule::default();
        schedule.add_systems(ballistic_motion_system);
        schedule.run(&mut world);
        let smoke = world
            .query::<&ParticleGenerator>()
            .iter(&world)
            .filter(|g| g.effect == ParticleEffect::Smoke)
            .count();
        assert_eq!(smoke, 1, "distance 0 at launch is within the emit band");
    }
}
