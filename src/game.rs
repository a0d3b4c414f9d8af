//! Simulation setup: entity factories, world construction and the tick
//! schedule.
//!
//! [`Simulation`] owns the ECS [`World`] and the fixed [`Schedule`]. The host
//! drives it with [`Simulation::tick`], feeding input through the
//! [`InputState`] resource and player actions through [`crate::placement`].
//! Rendering and audio happen outside: the host reads positions, animation
//! state and sprites from the world and drains audio cues from the channel
//! returned by [`Simulation::attach_audio`].

use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use glam::Vec2;
use log::info;

use crate::components::animation::Animation;
use crate::components::camera::CameraRig;
use crate::components::derpling::{Derpling, Descending};
use crate::components::geometry::{
    Goal, GoalTrampoline, Ladder, NoItemZone, Platform, Wall, WeakPlatform,
};
use crate::components::item::{Item, ItemKind, Pickup};
use crate::components::motion::{LinearMotion, Motion, Stopwatch};
use crate::components::spatial::{Facing, Rect, Spatial};
use crate::components::spawner::Spawner;
use crate::components::sprite::Sprite;
use crate::components::teleporter::{PortalSide, Teleporter, Trigger};
use crate::events::audio::AudioCmd;
use crate::placement::PlacementState;
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::setup_audio;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::inventory::Inventory;
use crate::resources::particles::Particles;
use crate::resources::progress::LevelProgress;
use crate::resources::rng::SimRng;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_system;
use crate::systems::audio::{forward_audio_cmds, update_audio_cmds};
use crate::systems::ballistic::ballistic_landing_system;
use crate::systems::camera::camera_system;
use crate::systems::debug::debug_system;
use crate::systems::descending::descending_system;
use crate::systems::exploding::exploding_system;
use crate::systems::goal::{goal_system, goal_trampoline_system};
use crate::systems::growth::growth_system;
use crate::systems::item::item_system;
use crate::systems::ladder::ladder_system;
use crate::systems::mechanics::{blast_system, tnt_system};
use crate::systems::movement::{ballistic_motion_system, linear_motion_system};
use crate::systems::particles::{particle_generator_system, particle_integrator_system};
use crate::systems::spawner::{derpling_count_system, spawner_system};
use crate::systems::stopwatch::stopwatch_system;
use crate::systems::teleporter::{PORTAL_INACTIVE_ICON, teleporter_system};
use crate::systems::time::update_world_time;
use crate::systems::transitions::FALL_ANGLE;
use crate::systems::walking::walking_system;

pub const SCREEN_WIDTH: f32 = 1344.0;
pub const SCREEN_HEIGHT: f32 = 768.0;
pub const SPAWNER_WIDTH_TILES: f32 = 4.0;

/// A freshly spawned derpling: falling straight down, clock running.
pub fn derpling_bundle(
    config: &GameConfig,
    at: Vec2,
    facing: Facing,
    imprisoned: bool,
) -> impl Bundle {
    let mut anim = Animation::new("fall");
    anim.mirror = facing == Facing::Left;
    let derpling = Derpling {
        last_facing_direction: facing,
        ..Derpling::new(imprisoned)
    };
    (
        Spatial::new(at.x, at.y, config.derpling_width, config.derpling_height)
            .with_facing(facing),
        derpling,
        Descending,
        Motion::new(FALL_ANGLE, config.fall_speed),
        LinearMotion,
        Stopwatch::default(),
        anim,
    )
}

pub fn spawn_derpling(
    world: &mut World,
    at: Vec2,
    facing: Facing,
    imprisoned: bool,
) -> Entity {
    let config = world.resource::<GameConfig>().clone();
    world
        .spawn(derpling_bundle(&config, at, facing, imprisoned))
        .id()
}

fn spatial(rect: Rect) -> Spatial {
    Spatial::new(rect.x, rect.y, rect.w, rect.h)
}

pub fn spawn_platform(world: &mut World, rect: Rect, weak: bool) -> Entity {
    let mut entity = world.spawn((Platform, spatial(rect)));
    if weak {
        entity.insert(WeakPlatform);
    }
    entity.id()
}

pub fn spawn_wall(world: &mut World, rect: Rect) -> Entity {
    world.spawn((Wall, spatial(rect))).id()
}

pub fn spawn_ladder(world: &mut World, rect: Rect) -> Entity {
    world
        .spawn((Ladder::default(), spatial(rect), Sprite::new("ladder")))
        .id()
}

pub fn spawn_teleporter(
    world: &mut World,
    rect: Rect,
    tpid: u32,
    counterpart_id: u32,
    side: PortalSide,
    quota: u32,
) -> Entity {
    world
        .spawn((
            Teleporter::new(tpid, counterpart_id, side, quota),
            spatial(rect),
            Sprite::new(PORTAL_INACTIVE_ICON),
        ))
        .id()
}

pub fn spawn_trigger(world: &mut World, rect: Rect, tid: u32) -> Entity {
    world
        .spawn((Trigger::new(tid), spatial(rect), Sprite::new("trigger")))
        .id()
}

pub fn spawn_pickup(world: &mut World, rect: Rect, kind: ItemKind, amount: u32) -> Entity {
    world
        .spawn((Pickup { kind, amount }, spatial(rect), Sprite::new(kind.name())))
        .id()
}

pub fn spawn_goal(world: &mut World, rect: Rect) -> Entity {
    world.spawn((Goal, spatial(rect))).id()
}

pub fn spawn_goal_trampoline(world: &mut World, rect: Rect) -> Entity {
    world.spawn((GoalTrampoline, spatial(rect))).id()
}

pub fn spawn_no_item_zone(world: &mut World, rect: Rect) -> Entity {
    world.spawn((NoItemZone, spatial(rect))).id()
}

/// A spawner four tiles wide and one tile high with its top-left at `at`.
pub fn spawn_spawner(
    world: &mut World,
    at: Vec2,
    amount: u32,
    spawn_free: bool,
    facing: Facing,
) -> Entity {
    let config = world.resource::<GameConfig>();
    let (grid, period) = (config.grid_size, config.spawn_period_ms);
    world
        .spawn((
            Spawner::new(amount, period).with_spawn_free(spawn_free),
            Spatial::new(at.x, at.y, grid * SPAWNER_WIDTH_TILES, grid).with_facing(facing),
        ))
        .id()
}

/// An item that follows the pointer until placed.
pub fn item_bundle(kind: ItemKind, at: Vec2, grid: f32) -> impl Bundle {
    (
        Item::new(kind),
        Spatial::new(at.x, at.y, grid, grid),
        Sprite::new(kind.name()),
    )
}

pub fn spawn_camera(world: &mut World) -> Entity {
    let center = world.resource::<Viewport>().center();
    world
        .spawn((CameraRig::default(), Spatial::new(center.x, center.y, 0.0, 0.0)))
        .id()
}

/// Build a world holding every resource the schedule reads.
pub fn build_world(config: GameConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(SimRng::with_seed(config.seed));
    world.insert_resource(Inventory::new());
    world.insert_resource(LevelProgress::default());
    world.insert_resource(Particles::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    world.insert_resource(AnimationStore::derpling_defaults());
    world.insert_resource(PlacementState::default());
    world.insert_resource(Messages::<AudioCmd>::default());
    world.insert_resource(config);
    world
}

/// The fixed per-tick system order.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            (
                item_system,
                goal_system,
                camera_system,
                linear_motion_system,
                ballistic_motion_system,
                spawner_system,
                derpling_count_system,
            )
                .chain(),
            (
                teleporter_system,
                ladder_system,
                descending_system,
                ballistic_landing_system,
                growth_system,
                walking_system,
            )
                .chain(),
            (
                exploding_system,
                blast_system,
                goal_trampoline_system,
                animation_system,
                stopwatch_system,
                tnt_system,
            )
                .chain(),
            (
                particle_generator_system,
                particle_integrator_system,
                debug_system.run_if(resource_exists::<DebugMode>),
                forward_audio_cmds,
                update_audio_cmds,
            )
                .chain(),
        )
            .chain(),
    );
    schedule
}

/// A running level.
pub struct Simulation {
    pub world: World,
    pub schedule: Schedule,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let mut world = build_world(config);
        spawn_camera(&mut world);
        Self {
            world,
            schedule: build_schedule(),
        }
    }

    /// Connect an audio service; cues arrive on the returned channel.
    pub fn attach_audio(&mut self) -> Receiver<AudioCmd> {
        setup_audio(&mut self.world)
    }

    pub fn set_debug(&mut self, enabled: bool) {
        if enabled {
            self.world.insert_resource(DebugMode {});
        } else {
            self.world.remove_resource::<DebugMode>();
        }
    }

    /// Advance the simulation by `delta_ms` milliseconds.
    pub fn tick(&mut self, delta_ms: u32) {
        update_world_time(&mut self.world, delta_ms);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn progress(&self) -> &LevelProgress {
        self.world.resource::<LevelProgress>()
    }

    pub fn derpling_count(&mut self) -> usize {
        self.world.query::<&Derpling>().iter(&self.world).count()
    }

    /// Derplings that died and are still playing their death animation.
    pub fn dead_derplings(&mut self) -> Vec<Entity> {
        self.world
            .query::<(Entity, &Derpling)>()
            .iter(&self.world)
            .filter(|(_, derpling)| derpling.dead)
            .map(|(entity, _)| entity)
            .collect()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn log_summary(&mut self) {
        let count = self.derpling_count();
        let progress = self.progress();
        info!(
            "{} derplings, {} free, {} victorious{}",
            count,
            progress.free_derplings,
            progress.victorious,
            if progress.ended { ", level complete" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_runs_on_an_empty_level() {
        let mut sim = Simulation::new(GameConfig::new());
        for _ in 0..10 {
            sim.tick(16);
        }
        assert_eq!(sim.world.resource::<WorldTime>().elapsed_ms, 160);
        assert_eq!(sim.derpling_count(), 0);
    }

    #[test]
    fn spawned_derpling_is_falling_with_a_clock() {
        let mut sim = Simulation::new(GameConfig::new());
        let d = spawn_derpling(&mut sim.world, Vec2::new(10.0, 0.0), Facing::Left, true);
        let entity = sim.world.entity(d);
        assert!(entity.contains::<Descending>());
        assert!(entity.contains::<Stopwatch>());
        assert!(entity.get::<Animation>().unwrap().mirror);
        assert_eq!(entity.get::<Spatial>().unwrap().size(), Vec2::new(32.0, 64.0));
    }

    #[test]
    fn debug_mode_toggles() {
        let mut sim = Simulation::new(GameConfig::new());
        sim.set_debug(true);
        sim.tick(16);
        assert!(sim.world.contains_resource::<DebugMode>());
        sim.set_debug(false);
        sim.tick(16);
        assert!(!sim.world.contains_resource::<DebugMode>());
    }
}
