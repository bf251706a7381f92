//! Numeric helpers shared by the integrator and every zone-reactive system.
//!
//! All smoothing in the crate goes through these few functions so the
//! renderers agree on what "approach a target at rate r" means.

use bevy::prelude::*;

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`.  Not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `x` from `[a1, a2]` onto `[b1, b2]`.  Not clamped.
#[inline]
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Per-frame blend factor for a first-order smoother running at `rate` 1/s.
///
/// Clamped to `[0, 1]` so a long frame lands on the target instead of
/// overshooting it.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by one frame of a rate-`rate` smoother.
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    lerp(current, target, smoothing_factor(rate, dt))
}

/// Exact exponential approach with time constant `tau` seconds.
///
/// `target + (current - target) * e^(-dt/tau)`: the closed form of a
/// set-target-at-time parameter glide, so the result does not depend on how
/// `dt` is sliced into frames.
#[inline]
pub fn exp_approach(current: f32, target: f32, tau: f32, dt: f32) -> f32 {
    if tau <= 0.0 {
        return target;
    }
    target + (current - target) * (-dt / tau).exp()
}

/// Parse a `#rrggbb` token, falling back to mid grey on malformed input.
pub fn hex_color(token: &str) -> Srgba {
    Srgba::hex(token).unwrap_or(Srgba::rgb(0.5, 0.5, 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_linear_hits_endpoints_and_midpoint() {
        assert_eq!(map_linear(800.0, 800.0, 6000.0, 2.0, 0.5), 2.0);
        assert_eq!(map_linear(6000.0, 800.0, 6000.0, 2.0, 0.5), 0.5);
        assert!((map_linear(3400.0, 800.0, 6000.0, 2.0, 0.5) - 1.25).abs() < 1e-5);
    }

    #[test]
    fn smoothing_factor_is_clamped() {
        assert_eq!(smoothing_factor(2.0, 10.0), 1.0);
        assert_eq!(smoothing_factor(2.0, -1.0), 0.0);
        assert!((smoothing_factor(0.5, 0.1) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn exp_approach_is_frame_rate_independent() {
        let one_step = exp_approach(0.0, 1.0, 0.1, 0.2);
        let mut many = 0.0;
        for _ in 0..20 {
            many = exp_approach(many, 1.0, 0.1, 0.01);
        }
        assert!((one_step - many).abs() < 1e-5);
        // One time constant covers ~63% of the distance.
        assert!((exp_approach(0.0, 1.0, 0.1, 0.1) - 0.632_12).abs() < 1e-4);
    }

    #[test]
    fn hex_color_parses_and_falls_back() {
        let c = hex_color("#ffffff");
        assert_eq!(c, Srgba::WHITE);
        assert_eq!(hex_color("not-a-colour"), Srgba::rgb(0.5, 0.5, 0.5));
    }
}
