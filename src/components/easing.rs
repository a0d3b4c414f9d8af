//! Easing curves for scalar interpolation.
//!
//! Used by particle alpha fades. Each curve maps a normalized `t` in
//! `[0.0, 1.0]` to a progress value, `0.0` at the start and `1.0` at the end.

use std::f32::consts::FRAC_PI_2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Starts fast, decelerates along a quarter sine wave.
    SineOut,
    /// Bounces at both ends.
    BounceInOut,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] before the curve is applied.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::SineOut => (t * FRAC_PI_2).sin(),
        Easing::BounceInOut => {
            if t < 0.5 {
                0.5 * (1.0 - bounce_out(1.0 - 2.0 * t))
            } else {
                0.5 * bounce_out(2.0 * t - 1.0) + 0.5
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    if t < 4.0 / 11.0 {
        121.0 * t * t / 16.0
    } else if t < 8.0 / 11.0 {
        363.0 / 40.0 * t * t - 99.0 / 10.0 * t + 17.0 / 5.0
    } else if t < 9.0 / 10.0 {
        4356.0 / 361.0 * t * t - 35442.0 / 1805.0 * t + 16061.0 / 1805.0
    } else {
        54.0 / 5.0 * t * t - 513.0 / 25.0 * t + 268.0 / 25.0
    }
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
