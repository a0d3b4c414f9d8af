//! Particle generator component and effect presets.
//!
//! A [`ParticleGenerator`] is an entity; the particles it emits are not. They
//! live in the [`Particles`](crate::resources::particles::Particles) resource
//! and are moved by [`crate::systems::particles::particle_integrator_system`].
//!
//! # How It Works
//!
//! 1. An explosion or jetpack spawns a generator with a preset from
//!    [`ParticleEffect`] at a fixed origin.
//! 2. Every tick the generator accumulates `time_since_emit`. Once it reaches
//!    `emit_frequency` a batch of `particles_per_emit` particles is emitted
//!    (`-1` emits the whole budget at once).
//! 3. The generator destroys itself once `particles_emitted` reaches
//!    `num_particles`.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::easing::{Easing, ease, lerp_f32};

/// Opaque RGB color handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE_RED_4: Color = Color::rgb(139, 37, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const GREY: Color = Color::rgb(190, 190, 190);
    pub const DARK_GREY: Color = Color::rgb(169, 169, 169);
    pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(160, 32, 240);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
}

const FIRE: &[Color] = &[
    Color::RED,
    Color::ORANGE_RED_4,
    Color::YELLOW,
    Color::ORANGE,
    Color::WHITE,
];
const SMOKE: &[Color] = &[Color::WHITE, Color::GREY, Color::DARK_GREY, Color::LIGHT_GREY];
const WATER: &[Color] = &[Color::LIGHT_BLUE, Color::BLUE];
const PARTY: &[Color] = &[
    Color::RED,
    Color::WHITE,
    Color::BLUE,
    Color::ORANGE,
    Color::PURPLE,
    Color::GREEN,
];

/// Alpha fade evaluated against a particle's remaining lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaCurve {
    pub start: f32,
    pub end: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl AlphaCurve {
    /// Alpha at `time_ms` into the curve, clamped to `[0, 255]`.
    pub fn at(&self, time_ms: f32) -> u8 {
        let t = if self.duration_ms > 0.0 {
            time_ms / self.duration_ms
        } else {
            1.0
        };
        lerp_f32(self.start, self.end, ease(self.easing, t))
            .abs()
            .clamp(0.0, 255.0) as u8
    }
}

/// Named particle presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleEffect {
    Default,
    SmallExplosion,
    MediumExplosion,
    LargeExplosion,
    Smoke,
    Confetti,
}

/// Timed particle source at a fixed origin.
#[derive(Component, Debug, Clone)]
pub struct ParticleGenerator {
    pub effect: ParticleEffect,
    pub origin: Vec2,
    pub colors: &'static [Color],
    pub min_particle_size: u32,
    pub max_particle_size: u32,
    pub alpha_start: f32,
    pub alpha_end: f32,
    pub alpha_easing: Easing,
    /// Pixels per second.
    pub min_magnitude: f32,
    pub max_magnitude: f32,
    pub num_particles: u32,
    /// Particle lifetime range in milliseconds.
    pub min_duration_ms: u32,
    pub max_duration_ms: u32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub particles_emitted: u32,
    pub emit_frequency_ms: u32,
    pub time_since_emit_ms: u32,
    /// Particles per batch, `-1` for the whole budget at once.
    pub particles_per_emit: i32,
}

impl ParticleGenerator {
    fn base(effect: ParticleEffect, origin: Vec2) -> Self {
        Self {
            effect,
            origin,
            colors: WATER,
            min_particle_size: 1,
            max_particle_size: 3,
            alpha_start: 0.0,
            alpha_end: 255.0,
            alpha_easing: Easing::CubicOut,
            min_magnitude: 10.0,
            max_magnitude: 1000.0,
            num_particles: 100,
            min_duration_ms: 100,
            max_duration_ms: 300,
            min_angle: 0.0,
            max_angle: 359.0,
            particles_emitted: 0,
            emit_frequency_ms: 100,
            time_since_emit_ms: 0,
            particles_per_emit: -1,
        }
    }

    /// Generator configured with the preset `effect`, anchored at `origin`.
    pub fn effect(effect: ParticleEffect, origin: Vec2) -> Self {
        let base = Self::base(effect, origin);
        match effect {
            ParticleEffect::Default => base,
            ParticleEffect::SmallExplosion => Self {
                colors: FIRE,
                min_magnitude: 800.0,
                max_magnitude: 2000.0,
                min_duration_ms: 50,
                max_duration_ms: 250,
                num_particles: 500,
                ..base
            },
            ParticleEffect::MediumExplosion => Self {
                colors: FIRE,
                max_particle_size: 4,
                min_magnitude: 300.0,
                max_magnitude: 400.0,
                particles_per_emit: 100,
                min_duration_ms: 150,
                max_duration_ms: 250,
                num_particles: 200,
                ..base
            },
            ParticleEffect::LargeExplosion => Self {
                colors: FIRE,
                min_particle_size: 2,
                max_particle_size: 5,
                min_magnitude: 300.0,
                max_magnitude: 400.0,
                particles_per_emit: 100,
                min_duration_ms: 250,
                max_duration_ms: 500,
                num_particles: 400,
                ..base
            },
            ParticleEffect::Smoke => Self {
                colors: SMOKE,
                alpha_easing: Easing::SineOut,
                alpha_start: 128.0,
                alpha_end: 0.0,
                min_particle_size: 3,
                max_particle_size: 10,
                min_magnitude: 10.0,
                max_magnitude: 50.0,
                min_duration_ms: 500,
                max_duration_ms: 1000,
                min_angle: 220.0,
                max_angle: 320.0,
                num_particles: 3,
                ..base
            },
            ParticleEffect::Confetti => Self {
                colors: PARTY,
                alpha_easing: Easing::BounceInOut,
                alpha_start: 100.0,
                alpha_end: 255.0,
                max_duration_ms: 1000,
                min_angle: 45.0,
                max_angle: 135.0,
                ..base
            },
        }
    }

    /// Size of the next batch, never more than what is left of the budget.
    pub fn batch_size(&self) -> u32 {
        let remaining = self.num_particles.saturating_sub(self.particles_emitted);
        if self.particles_per_emit < 0 {
            remaining
        } else {
            (self.particles_per_emit as u32).min(remaining)
        }
    }

    pub fn exhausted(&self) -> bool {
        self.particles_emitted >= self.num_particles
    }
}
