//! Distance fog that follows the current zone.
//!
//! [`FogState`] holds the displayed fog colour and density.  Each frame it
//! eases toward the current zone's fog parameters at `fog_smoothing_rate`,
//! then [`apply_fog_system`] copies it onto the camera's [`DistanceFog`].

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::integrator::AscentCamera;
use crate::interp::{smooth_toward, smoothing_factor};
use crate::zones::resolve_zone;
use bevy::color::Mix;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FogState {
    pub color: LinearRgba,
    /// Exponential-squared density (per world unit).
    pub density: f32,
}

impl Default for FogState {
    fn default() -> Self {
        Self::settled_at(crate::constants::START_ALTITUDE)
    }
}

impl FogState {
    /// Fog already matching the zone at `altitude`.
    pub fn settled_at(altitude: f32) -> Self {
        let (color, density) = fog_target(altitude);
        Self { color, density }
    }

    /// Ease toward the zone fog at `altitude` by one frame.
    pub fn step(&mut self, altitude: f32, rate: f32, dt: f32) {
        let (color, density) = fog_target(altitude);
        self.color = self.color.mix(&color, smoothing_factor(rate, dt));
        self.density = smooth_toward(self.density, density, rate, dt);
    }

    pub fn to_distance_fog(&self) -> DistanceFog {
        DistanceFog {
            color: Color::LinearRgba(self.color),
            falloff: FogFalloff::ExponentialSquared {
                density: self.density,
            },
            ..default()
        }
    }
}

/// Fog colour and density the zone at `altitude` asks for.
pub fn fog_target(altitude: f32) -> (LinearRgba, f32) {
    let zone = resolve_zone(altitude);
    (LinearRgba::from(zone.fog_srgba()), zone.fog_density)
}

/// Startup system: settle the fog on the starting zone before the first frame.
pub fn init_fog_state(mut fog: ResMut<FogState>, state: Res<AltitudeState>) {
    *fog = FogState::settled_at(state.altitude());
}

pub fn fog_smoothing_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut fog: ResMut<FogState>,
) {
    fog.step(state.altitude(), config.fog_smoothing_rate, time.delta_secs());
}

/// Copy [`FogState`] onto the camera's fog component.
pub fn apply_fog_system(fog: Res<FogState>, mut query: Query<&mut DistanceFog, With<AscentCamera>>) {
    for mut distance_fog in query.iter_mut() {
        distance_fog.color = Color::LinearRgba(fog.color);
        distance_fog.falloff = FogFalloff::ExponentialSquared {
            density: fog.density,
        };
    }
}
