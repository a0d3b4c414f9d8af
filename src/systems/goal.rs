//! Victory handling.
//!
//! - [`goal_system`] launches derplings that reached the goal on a victory
//!   arc and ends the level once every freed derpling has made it and the
//!   last one has landed.
//! - [`goal_trampoline_system`] keeps victorious derplings bouncing around
//!   the goal area.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::animation::Animation;
use crate::components::derpling::{Derpling, ReachedGoal, Victory, Walking};
use crate::components::geometry::GoalTrampoline;
use crate::components::motion::{BallisticMotion, LinearMotion, Motion, Stopwatch};
use crate::components::spatial::Spatial;
use crate::resources::gameconfig::GameConfig;
use crate::resources::progress::LevelProgress;
use crate::resources::rng::SimRng;
use crate::resources::viewport::Viewport;
use crate::systems::transitions::begin_arc;

pub const VICTORY_ANGLE: f32 = 87.7;
pub const VICTORY_POWER: f32 = 2000.0;
pub const GOAL_BOUNCE_ANGLE: f32 = 60.0;
pub const GOAL_BOUNCE_POWER: f32 = 1600.0;

type Arrival<'a> = (
    Entity,
    &'a Spatial,
    &'a mut Derpling,
    &'a mut Motion,
    &'a mut Animation,
);

/// Launch arrivals and close the level once the last freed derpling is in.
///
/// When every freed derpling has won, the view follows the last one launched
/// and the level ends as soon as that derpling has landed and walks again.
pub fn goal_system(
    mut arrivals: Query<Arrival, With<ReachedGoal>>,
    victors: Query<(&Spatial, Has<Walking>), With<Victory>>,
    mut progress: ResMut<LevelProgress>,
    viewport: Option<ResMut<Viewport>>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    let mut arrived = 0;
    let mut last_seen = None;
    for (entity, spatial, mut derpling, mut motion, mut anim) in arrivals.iter_mut() {
        commands
            .entity(entity)
            .remove::<(Walking, ReachedGoal, LinearMotion)>()
            .insert((BallisticMotion::new(), Victory, Stopwatch::default()));
        derpling.attached_platform = None;
        motion.angle = VICTORY_ANGLE;
        motion.magnitude = VICTORY_POWER;
        anim.change_animation("fall");
        progress.focus = Some(entity);
        last_seen = Some(spatial.pos());
        // A victor landing back in the goal is relaunched, not counted again.
        if !victors.contains(entity) {
            arrived += 1;
        }
        debug!("derpling {entity} celebrates");
    }

    progress.victorious = victors.iter().count() + arrived;
    if progress.ended || !progress.all_victorious() {
        return;
    }
    let Some(focus) = progress.focus else {
        return;
    };
    let (pos, landed) = match (last_seen, victors.get(focus)) {
        (Some(pos), _) => (Some(pos), false),
        (None, Ok((spatial, walking))) => (Some(spatial.pos()), walking),
        (None, Err(_)) => (None, false),
    };
    if let (Some(mut viewport), Some(pos)) = (viewport, pos) {
        viewport.center_on(pos, Vec2::new(config.map_width, config.map_height));
    }
    if landed {
        progress.ended = true;
        info!("level complete: {} derplings saved", progress.victorious);
    }
}

pub fn goal_trampoline_system(
    mut victors: Query<Arrival, (With<Victory>, With<Walking>)>,
    trampolines: Query<&Spatial, (With<GoalTrampoline>, Without<Derpling>)>,
    mut rng: ResMut<SimRng>,
    mut commands: Commands,
) {
    for (entity, spatial, mut derpling, mut motion, mut anim) in victors.iter_mut() {
        let rect = spatial.rect();
        if !trampolines.iter().any(|t| t.rect().overlaps(&rect)) {
            continue;
        }
        let angle = GOAL_BOUNCE_ANGLE + rng.i32_inclusive(-10, 11) as f32;
        let power = GOAL_BOUNCE_POWER + rng.i32_inclusive(-400, 400) as f32;
        begin_arc(
            &mut commands,
            entity,
            &mut derpling,
            &mut motion,
            &mut anim,
            angle,
            power,
            false,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(LevelProgress::default());
        world.insert_resource(SimRng::with_seed(1));
        let mut schedule = Schedule::default();
        schedule.add_systems((goal_system, goal_trampoline_system).chain());
        (world, schedule)
    }

    fn arriving(world: &mut World) -> Entity {
        let derpling = Derpling {
            attached_platform: Some(Entity::PLACEHOLDER),
            ..Derpling::new(false)
        };
        world
            .spawn((
                Spatial::new(0.0, 0.0, 32.0, 64.0),
                derpling,
                Walking,
                ReachedGoal,
                LinearMotion,
                Motion::new(0.0, 175.0),
                Animation::new("walk"),
            ))
            .id()
    }

    #[test]
    fn arrival_launches_a_victory_arc() {
        let (mut world, mut schedule) = setup();
        world.resource_mut::<LevelProgress>().free_derplings = 2;
        let d = arriving(&mut world);
        schedule.run(&mut world);
        assert!(world.get::<Victory>(d).is_some());
        assert!(world.get::<BallisticMotion>(d).is_some());
        assert!(world.get::<Walking>(d).is_none());
        assert!(world.get::<ReachedGoal>(d).is_none());
        let motion = world.get::<Motion>(d).unwrap();
        assert_eq!((motion.angle, motion.magnitude), (87.7, 2000.0));
        let progress = world.resource::<LevelProgress>();
        assert_eq!(progress.victorious, 1);
        assert!(!progress.ended);
        assert_eq!(progress.focus, Some(d));
    }

    #[test]
    fn level_ends_once_the_last_victor_lands() {
        let (mut world, mut schedule) = setup();
        world.insert_resource(Viewport::new(200.0, 200.0));
        world.resource_mut::<LevelProgress>().free_derplings = 1;
        let d = arriving(&mut world);
        world
            .get_mut::<Spatial>(d)
            .unwrap()
            .set_pos(Vec2::new(600.0, 500.0));
        schedule.run(&mut world);
        assert!(!world.resource::<LevelProgress>().ended, "still in the air");
        assert_eq!(
            world.resource::<Viewport>().center(),
            Vec2::new(600.0, 500.0)
        );

        world
            .get_mut::<Spatial>(d)
            .unwrap()
            .set_pos(Vec2::new(640.0, 300.0));
        schedule.run(&mut world);
        assert!(!world.resource::<LevelProgress>().ended);
        assert_eq!(
            world.resource::<Viewport>().center(),
            Vec2::new(640.0, 300.0)
        );

        world
            .entity_mut(d)
            .remove::<BallisticMotion>()
            .insert((Walking, LinearMotion));
        world
            .get_mut::<Spatial>(d)
            .unwrap()
            .set_pos(Vec2::new(650.0, 420.0));
        schedule.run(&mut world);
        let progress = world.resource::<LevelProgress>();
        assert!(progress.ended);
        assert_eq!(progress.victorious, 1);
        assert_eq!(
            world.resource::<Viewport>().center(),
            Vec2::new(650.0, 420.0)
        );
    }

    #[test]
    fn landed_victors_do_not_end_the_level_early() {
        let (mut world, mut schedule) = setup();
        world.resource_mut::<LevelProgress>().free_derplings = 2;
        let first = arriving(&mut world);
        schedule.run(&mut world);
        world
            .entity_mut(first)
            .remove::<BallisticMotion>()
            .insert((Walking, LinearMotion));
        schedule.run(&mut world);
        assert!(!world.resource::<LevelProgress>().ended);

        let second = arriving(&mut world);
        schedule.run(&mut world);
        let progress = world.resource::<LevelProgress>();
        assert_eq!(progress.victorious, 2);
        assert_eq!(progress.focus, Some(second));
        assert!(!progress.ended, "waits for the second derpling to land");
    }

    #[test]
    fn victor_landing_in_the_goal_is_relaunched_once_counted() {
        let (mut world, mut schedule) = setup();
        world.resource_mut::<LevelProgress>().free_derplings = 1;
        let d = arriving(&mut world);
        schedule.run(&mut world);
        world
            .entity_mut(d)
            .remove::<BallisticMotion>()
            .insert((Walking, LinearMotion, ReachedGoal));
        schedule.run(&mut world);
        let progress = world.resource::<LevelProgress>();
        assert_eq!(progress.victorious, 1);
        assert!(!progress.ended, "relaunched before it could settle");
        assert!(world.get::<BallisticMotion>(d).is_some());
        assert!(world.get::<Walking>(d).is_none());
    }

    #[test]
    fn goal_trampoline_relaunches_victors() {
        let (mut world, mut schedule) = setup();
        world.spawn((GoalTrampoline, Spatial::new(0.0, 32.0, 64.0, 32.0)));
        let derpling = Derpling {
            attached_platform: Some(Entity::PLACEHOLDER),
            ..Derpling::new(false)
        };
        let d = world
            .spawn((
                Spatial::new(0.0, 0.0, 32.0, 64.0),
                derpling,
                Walking,
                Victory,
                LinearMotion,
                Motion::new(0.0, 175.0),
                Animation::new("walk"),
            ))
            .id();
        schedule.run(&mut world);
        assert!(world.get::<BallisticMotion>(d).is_some());
        let motion = world.get::<Motion>(d).unwrap();
        assert!((50.0..=71.0).contains(&motion.angle));
        assert!((1200.0..=2000.0).contains(&motion.magnitude));
    }
}
