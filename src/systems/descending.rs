//! Falling derplings meeting the ground.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::derpling::{Derpling, Descending, Victory};
use crate::components::geometry::Platform;
use crate::components::motion::{Motion, Stopwatch};
use crate::components::spatial::Spatial;
use crate::events::audio::AudioCmd;
use crate::resources::gameconfig::GameConfig;
use crate::systems::transitions::{begin_explode, begin_walk};

type Faller<'a> = (
    Entity,
    &'a mut Spatial,
    &'a mut Derpling,
    &'a mut Motion,
    &'a mut Animation,
    &'a Stopwatch,
    Has<Victory>,
);

/// Land every falling derpling that touches a platform.
///
/// A fall that lasted at least the configured death time kills the derpling
/// unless it carries an umbrella or has already won.
pub fn descending_system(
    mut fallers: Query<Faller, With<Descending>>,
    platforms: Query<(Entity, &Spatial), (With<Platform>, Without<Derpling>)>,
    config: Res<GameConfig>,
    mut audio: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    for (entity, mut spatial, mut derpling, mut motion, mut anim, stopwatch, victorious) in
        fallers.iter_mut()
    {
        let rect = spatial.rect();
        let Some((platform, platform_spatial)) =
            platforms.iter().find(|(_, p)| p.rect().overlaps(&rect))
        else {
            continue;
        };

        let fatal = stopwatch.elapsed_ms >= config.death_fall_time_ms
            && !derpling.has_umbrella
            && !victorious;
        if fatal {
            debug!(
                "derpling {entity} fell for {} ms onto {platform}",
                stopwatch.elapsed_ms
            );
            begin_explode(
                &mut commands,
                &mut audio,
                entity,
                &spatial,
                &mut derpling,
                &mut anim,
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
                platform_spatial.rect(),
                config.walk_speed,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::derpling::{Exploding, Walking};
    use crate::components::motion::LinearMotion;
    use crate::components::particle::ParticleGenerator;
    use glam::Vec2;

    fn setup() -> (World, Schedule, Entity) {
        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        world.insert_resource(Messages::<AudioCmd>::default());
        let platform = world
            .spawn((Platform, Spatial::new(0.0, 200.0, 320.0, 32.0)))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(descending_system);
        (world, schedule, platform)
    }

    fn faller(world: &mut World, y: f32, fallen_ms: u64) -> Entity {
        world
            .spawn((
                Spatial::new(100.0, y, 32.0, 64.0),
                Derpling::new(true),
                Descending,
                Motion::new(90.0, 300.0),
                LinearMotion,
                Stopwatch::with_elapsed(fallen_ms),
                Animation::new("fall"),
            ))
            .id()
    }

    #[test]
    fn short_fall_lands_on_top() {
        let (mut world, mut schedule, platform) = setup();
        let d = faller(&mut world, 140.0, 400);
        schedule.run(&mut world);
        let spatial = world.get::<Spatial>(d).unwrap();
        assert_eq!(spatial.pos(), Vec2::new(100.0, 136.0));
        assert_eq!(spatial.rect().bottom(), 200.0);
        assert!(world.get::<Walking>(d).is_some());
        assert!(world.get::<Descending>(d).is_none());
        assert!(world.get::<Stopwatch>(d).is_none());
        assert_eq!(
            world.get::<Derpling>(d).unwrap().attached_platform,
            Some(platform)
        );
        assert_eq!(world.get::<Motion>(d).unwrap().magnitude, 175.0);
        assert!(world.get::<Animation>(d).unwrap().is("walk"));
    }

    #[test]
    fn long_fall_explodes_at_the_feet() {
        let (mut world, mut schedule, _) = setup();
        let d = faller(&mut world, 140.0, 1000);
        schedule.run(&mut world);
        assert!(world.get::<Exploding>(d).is_some());
        assert!(world.get::<Motion>(d).is_none());
        assert!(world.get::<Derpling>(d).unwrap().dead);
        assert!(world.get::<Animation>(d).unwrap().is("death"));
        let origins: Vec<Vec2> = world
            .query::<&ParticleGenerator>()
            .iter(&world)
            .map(|g| g.origin)
            .collect();
        assert_eq!(origins, vec![Vec2::new(116.0, 204.0); 2]);
        let cues = world.resource::<Messages<AudioCmd>>().len();
        assert_eq!(cues, 1);
    }

    #[test]
    fn umbrella_and_victory_survive_long_falls() {
        let (mut world, mut schedule, _) = setup();
        let umbrella = faller(&mut world, 140.0, 5000);
        world.get_mut::<Derpling>(umbrella).unwrap().has_umbrella = true;
        let victor = faller(&mut world, 140.0, 5000);
        world.entity_mut(victor).insert(Victory);
        schedule.run(&mut world);
        assert!(world.get::<Walking>(umbrella).is_some());
        assert!(!world.get::<Derpling>(umbrella).unwrap().has_umbrella);
        assert!(world.get::<Walking>(victor).is_some());
    }

    #[test]
    fn no_contact_keeps_falling() {
        let (mut world, mut schedule, _) = setup();
        let d = faller(&mut world, 0.0, 2000);
        schedule.run(&mut world);
        assert!(world.get::<Descending>(d).is_some());
    }
}
