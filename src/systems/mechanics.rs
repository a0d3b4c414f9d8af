//! TNT fuses and the blasts they leave behind.

use bevy_ecs::prelude::*;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::geometry::WeakPlatform;
use crate::components::mechanics::{BlastRadius, Tnt};
use crate::components::motion::Stopwatch;
use crate::components::particle::{ParticleEffect, ParticleGenerator};
use crate::components::spatial::Spatial;
use crate::events::audio::{AudioCmd, cue};
use crate::resources::gameconfig::GameConfig;

/// Detonate every TNT whose fuse has burnt down.
pub fn tnt_system(
    query: Query<(Entity, &Tnt, &Stopwatch, &Spatial)>,
    config: Res<GameConfig>,
    mut audio: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    for (entity, tnt, stopwatch, spatial) in query.iter() {
        if stopwatch.elapsed_ms < tnt.fuse_ms {
            continue;
        }
        let center = spatial.rect().center();
        commands.entity(entity).despawn();
        commands.spawn(ParticleGenerator::effect(ParticleEffect::MediumExplosion, center));
        commands.spawn(ParticleGenerator::effect(ParticleEffect::Smoke, center));
        commands.spawn(BlastRadius::new(center, config.blast_size));
        audio.write(AudioCmd::fx(cue::EXPLOSION));
        info!("tnt {entity} detonated at {center:?}");
    }
}

/// Destroy weak platforms caught in a blast. A blast lasts one pass.
pub fn blast_system(
    blasts: Query<(Entity, &BlastRadius)>,
    platforms: Query<(Entity, &Spatial), With<WeakPlatform>>,
    mut commands: Commands,
) {
    let mut destroyed: SmallVec<[Entity; 8]> = SmallVec::new();
    for (blast, radius) in blasts.iter() {
        let area = radius.rect();
        for (platform, spatial) in platforms.iter() {
            if !destroyed.contains(&platform) && spatial.rect().overlaps(&area) {
                destroyed.push(platform);
                commands.entity(platform).despawn();
                debug!("weak platform {platform} destroyed by blast {blast}");
            }
        }
        commands.entity(blast).despawn();
    }
}
