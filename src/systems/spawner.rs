//! Derpling sources and the freed-derpling head count.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::derpling::Derpling;
use crate::components::spatial::Spatial;
use crate::components::spawner::Spawner;
use crate::game::derpling_bundle;
use crate::resources::gameconfig::GameConfig;
use crate::resources::progress::LevelProgress;
use crate::resources::worldtime::WorldTime;

/// Emit one derpling per elapsed period from every active spawner.
///
/// Spawned derplings appear horizontally centered on the spawner's top edge,
/// falling, and imprisoned unless the spawner frees them.
pub fn spawner_system(
    mut spawners: Query<(Entity, &mut Spawner, &Spatial)>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    for (entity, mut spawner, spatial) in spawners.iter_mut() {
        if !spawner.active || spawner.exhausted() {
            continue;
        }
        spawner.elapsed_ms += time.delta();
        if spawner.elapsed_ms <= spawner.period_ms {
            continue;
        }
        spawner.elapsed_ms = 0;

        let rect = spatial.rect();
        let at = Vec2::new(
            rect.x + rect.w / 2.0 - config.derpling_width / 2.0,
            rect.y,
        );
        commands.spawn(derpling_bundle(&config, at, spatial.facing, !spawner.spawn_free));
        spawner.current += 1;
        debug!(
            "spawner {entity} emitted derpling {}/{} at {at:?}",
            spawner.current, spawner.amount
        );
        if spawner.exhausted() {
            info!("spawner {entity} exhausted after {} derplings", spawner.amount);
        }
    }
}

/// Publish how many derplings are out of prison and alive.
pub fn derpling_count_system(derplings: Query<&Derpling>, mut progress: ResMut<LevelProgress>) {
    let free = derplings
        .iter()
        .filter(|d| !d.imprisoned && !d.dead)
        .count();
    if progress.free_derplings != free {
        progress.free_derplings = free;
    }
}
