//! The one piece of shared mutable state: where the climber is, and where the
//! input wants them to be.
//!
//! ## Ownership
//!
//! | Field             | Sole writer                                   |
//! |-------------------|-----------------------------------------------|
//! | `target_altitude` | [`crate::input`] (clamped before the write)   |
//! | `altitude`        | [`crate::integrator`] (smoothed every frame)  |
//!
//! Every other system reads through `Res<AltitudeState>`.  The mutators store
//! their argument verbatim: range enforcement belongs to the writer, which is
//! what lets the integrator commit fractional values without a clamp.

use crate::config::AscentConfig;
use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AltitudeState {
    altitude: f32,
    target_altitude: f32,
}

impl Default for AltitudeState {
    fn default() -> Self {
        Self::at(crate::constants::START_ALTITUDE)
    }
}

impl AltitudeState {
    /// A state at rest at `altitude`.
    pub fn at(altitude: f32) -> Self {
        Self {
            altitude,
            target_altitude: altitude,
        }
    }

    /// Rendered altitude (m).
    #[inline]
    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    /// Input-driven goal (m).
    #[inline]
    pub fn target_altitude(&self) -> f32 {
        self.target_altitude
    }

    pub fn set_target_altitude(&mut self, value: f32) {
        self.target_altitude = value;
    }

    pub fn set_altitude(&mut self, value: f32) {
        self.altitude = value;
    }
}

/// Startup system: place the climber at the configured start altitude.
///
/// Runs after [`crate::config::load_ascent_config`] so a TOML override of
/// `start_altitude` takes effect.
pub fn reset_altitude_state(mut state: ResMut<AltitudeState>, config: Res<AscentConfig>) {
    *state = AltitudeState::at(config.clamp_altitude(config.start_altitude));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest_at_the_bottom() {
        let state = AltitudeState::default();
        assert_eq!(state.altitude(), 800.0);
        assert_eq!(state.target_altitude(), 800.0);
    }

    #[test]
    fn mutators_store_verbatim() {
        let mut state = AltitudeState::default();
        state.set_altitude(1500.0);
        state.set_target_altitude(2000.0);
        assert_eq!(state.altitude(), 1500.0);
        assert_eq!(state.target_altitude(), 2000.0);

        // No clamping inside the record itself.
        state.set_target_altitude(9000.0);
        assert_eq!(state.target_altitude(), 9000.0);
    }

    #[test]
    fn reset_uses_configured_start() {
        let mut world = World::new();
        world.insert_resource(AltitudeState::at(4000.0));
        world.insert_resource(AscentConfig {
            start_altitude: 2200.0,
            ..default()
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(reset_altitude_state);
        schedule.run(&mut world);

        assert_eq!(*world.resource::<AltitudeState>(), AltitudeState::at(2200.0));
    }
}
