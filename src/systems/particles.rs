//! Particle emission and integration.
//!
//! - [`particle_generator_system`] emits batches from every
//!   [`ParticleGenerator`] into the [`Particles`] pool and despawns generators
//!   that have emitted their budget.
//! - [`particle_integrator_system`] moves live particles, fades them along
//!   their alpha curve and drops the expired ones.
//!
//! Particles are pure visuals: they live in a resource, not as entities, and
//! never interact with the simulation.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::particle::{AlphaCurve, Color, ParticleGenerator};
use crate::resources::gameconfig::GameConfig;
use crate::resources::particles::{Particle, Particles};
use crate::resources::rng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::movement::linear_step;

pub fn particle_generator_system(
    mut generators: Query<(Entity, &mut ParticleGenerator)>,
    mut particles: ResMut<Particles>,
    mut rng: ResMut<SimRng>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut generator) in generators.iter_mut() {
        generator.time_since_emit_ms += time.delta_ms;
        if generator.time_since_emit_ms >= generator.emit_frequency_ms && !generator.exhausted() {
            generator.time_since_emit_ms = 0;
            let batch = generator.batch_size();
            for _ in 0..batch {
                particles.live.push(spawn_particle(&generator, &mut rng));
            }
            generator.particles_emitted += batch;
            trace!("{:?} emitted {batch} particles", generator.effect);
        }
        if generator.exhausted() {
            commands.entity(entity).despawn();
        }
    }
}

fn spawn_particle(generator: &ParticleGenerator, rng: &mut SimRng) -> Particle {
    let lifetime_ms = rng.u32_inclusive(generator.min_duration_ms, generator.max_duration_ms);
    let color_index = rng.0.usize(..generator.colors.len().max(1));
    let color = generator
        .colors
        .get(color_index)
        .copied()
        .unwrap_or(Color::WHITE);
    let curve = AlphaCurve {
        start: generator.alpha_start,
        end: generator.alpha_end,
        duration_ms: lifetime_ms as f32,
        easing: generator.alpha_easing,
    };
    Particle {
        pos: generator.origin,
        angle: rng.f32_range(generator.min_angle, generator.max_angle),
        magnitude: rng.f32_range(generator.min_magnitude, generator.max_magnitude),
        lifetime_ms,
        time_remaining_ms: i64::from(lifetime_ms),
        color,
        alpha: curve.at(lifetime_ms as f32),
        size: rng.u32_inclusive(generator.min_particle_size, generator.max_particle_size),
        curve,
    }
}

pub fn particle_integrator_system(
    mut particles: ResMut<Particles>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
) {
    let fps = config.fps();
    let delta = time.delta_ms;
    particles.live.retain_mut(|p| {
        p.time_remaining_ms -= i64::from(delta);
        if p.time_remaining_ms <= 0 {
            return false;
        }
        p.pos += linear_step(p.angle, p.magnitude, fps, delta);
        p.alpha = p.curve.at(p.time_remaining_ms as f32);
        true
    });
}
