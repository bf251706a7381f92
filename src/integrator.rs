//! Per-frame altitude integration and camera placement.
//!
//! Each frame `altitude` moves toward `target_altitude` by
//!
//! ```text
//! altitude' = lerp(altitude, target, clamp(dt * rate(altitude), 0, 1))
//! ```
//!
//! where `rate` falls linearly from 2.0/s at the bottom of the range to 0.5/s
//! at the top, so the climb feels brisk low down and heavy near the summit.
//! With the factor clamped to `[0, 1]` the step is a convex combination: the
//! altitude can land on the target but never cross it.
//!
//! The new value is committed only when it moved by more than
//! `commit_epsilon`, so an altitude at rest produces no state changes.

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::interp::{lerp, map_linear, smoothing_factor};
use bevy::prelude::*;

/// Marker for the single scene camera driven by the altitude.
#[derive(Component)]
pub struct AscentCamera;

/// Smoothing rate (1/s) for the current altitude.
pub fn smoothing_rate(altitude: f32, config: &AscentConfig) -> f32 {
    let a = altitude.clamp(config.min_altitude, config.max_altitude);
    map_linear(
        a,
        config.min_altitude,
        config.max_altitude,
        config.smoothing_rate_low,
        config.smoothing_rate_high,
    )
}

/// One integration step; returns the smoothed altitude.
pub fn integrate(altitude: f32, target: f32, dt: f32, config: &AscentConfig) -> f32 {
    let factor = smoothing_factor(smoothing_rate(altitude, config), dt);
    lerp(altitude, target, factor)
}

/// Camera transform for `altitude`: raised to `altitude * world_scale`, held
/// at a fixed distance, looking straight ahead at the same height.
pub fn camera_transform(altitude: f32, config: &AscentConfig) -> Transform {
    let y = altitude * config.world_scale;
    Transform::from_xyz(0.0, y, config.camera_z).looking_at(Vec3::new(0.0, y, 0.0), Vec3::Y)
}

/// Advance `altitude` toward the target and move the camera with it.
pub fn altitude_integrator_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    mut state: ResMut<AltitudeState>,
    mut camera: Query<&mut Transform, With<AscentCamera>>,
) {
    let current = state.altitude();
    let smoothed = integrate(current, state.target_altitude(), time.delta_secs(), &config);

    if (smoothed - current).abs() > config.commit_epsilon {
        state.set_altitude(smoothed);
    }

    if let Ok(mut transform) = camera.single_mut() {
        *transform = camera_transform(smoothed, &config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rate_falls_from_bottom_to_top() {
        let cfg = AscentConfig::default();
        assert_eq!(smoothing_rate(800.0, &cfg), 2.0);
        assert_eq!(smoothing_rate(6000.0, &cfg), 0.5);
        assert!((smoothing_rate(3400.0, &cfg) - 1.25).abs() < 1e-5);
        // Outside the range the rate holds at the end value.
        assert_eq!(smoothing_rate(9000.0, &cfg), 0.5);
    }

    #[test]
    fn climbing_is_monotonic_and_never_overshoots() {
        let cfg = AscentConfig::default();
        let target = 5500.0;
        let mut a = 800.0;
        for _ in 0..2000 {
            let next = integrate(a, target, 1.0 / 60.0, &cfg);
            assert!(next >= a, "altitude went backwards: {a} -> {next}");
            assert!(next <= target, "overshot target: {next}");
            a = next;
        }
        assert!((target - a).abs() < 1.0);
    }

    #[test]
    fn descending_is_monotonic_and_never_undershoots() {
        let cfg = AscentConfig::default();
        let mut a = 6000.0;
        for _ in 0..500 {
            let next = integrate(a, 900.0, 0.05, &cfg);
            assert!(next <= a && next >= 900.0);
            a = next;
        }
    }

    #[test]
    fn huge_frame_lands_exactly_on_target() {
        let cfg = AscentConfig::default();
        assert_eq!(integrate(800.0, 3000.0, 10.0, &cfg), 3000.0);
    }

    #[test]
    fn camera_tracks_scaled_altitude() {
        let cfg = AscentConfig::default();
        let t = camera_transform(2000.0, &cfg);
        assert!((t.translation - Vec3::new(0.0, 200.0, 10.0)).length() < 1e-4);
        // Looking down -Z, level with the horizon.
        assert!((t.forward().as_vec3() - Vec3::NEG_Z).length() < 1e-4);
    }

    fn run_frame(world: &mut World, dt: Duration) {
        world.resource_mut::<Time>().advance_by(dt);
        let mut schedule = Schedule::default();
        schedule.add_systems(altitude_integrator_system);
        schedule.run(world);
    }

    #[test]
    fn system_commits_progress_and_moves_camera() {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(AscentConfig::default());
        let mut state = AltitudeState::default();
        state.set_target_altitude(1800.0);
        world.insert_resource(state);
        let camera = world.spawn((AscentCamera, Transform::default())).id();

        run_frame(&mut world, Duration::from_millis(100));

        // rate 2.0 at 800 m → factor 0.2 → 800 + 1000 * 0.2
        let a = world.resource::<AltitudeState>().altitude();
        assert!((a - 1000.0).abs() < 1e-3, "altitude {a}");
        let y = world.get::<Transform>(camera).unwrap().translation.y;
        assert!((y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn system_skips_sub_epsilon_steps() {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(AscentConfig::default());
        let mut state = AltitudeState::default();
        state.set_target_altitude(800.04);
        world.insert_resource(state);

        run_frame(&mut world, Duration::from_millis(16));

        assert_eq!(world.resource::<AltitudeState>().altitude(), 800.0);
    }
}
