//! Runtime configuration loaded from `assets/ascent.toml`.
//!
//! [`AscentConfig`] is a Bevy [`Resource`] that mirrors the tunables in
//! [`crate::constants`].  At startup, [`load_ascent_config`] reads
//! `assets/ascent.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! wheel_sensitivity = 1.0
//! idle_fade_ms = 5000
//! audio_enabled = false
//! ```
//!
//! A file that parses but fails [`AscentConfig::validate`] is rejected as a
//! whole; the defaults stay in place.

use crate::constants::*;
use crate::error::{validate_positive, validate_range, AscentError, AscentResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

pub const CONFIG_PATH: &str = "assets/ascent.toml";

/// Runtime-tunable configuration for the climb.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AscentConfig {
    // ── Altitude Range ───────────────────────────────────────────────────────
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub start_altitude: f32,

    // ── Input ────────────────────────────────────────────────────────────────
    pub wheel_sensitivity: f32,
    pub touch_sensitivity: f32,
    pub wheel_line_pixels: f32,

    // ── Integrator ───────────────────────────────────────────────────────────
    pub smoothing_rate_low: f32,
    pub smoothing_rate_high: f32,
    pub commit_epsilon: f32,

    // ── Camera ───────────────────────────────────────────────────────────────
    pub world_scale: f32,
    pub camera_z: f32,
    pub camera_fov_degrees: f32,

    // ── Environment ──────────────────────────────────────────────────────────
    pub fog_smoothing_rate: f32,
    pub sky_smoothing_rate: f32,
    pub star_smoothing_rate: f32,
    pub particle_smoothing_rate: f32,
    pub particle_tint_rate: f32,
    pub particle_count: u32,
    pub particle_radius: f32,
    pub star_count: u32,

    // ── Audio ────────────────────────────────────────────────────────────────
    pub audio_enabled: bool,
    pub audio_master_gain: f32,
    pub audio_ramp_time_constant: f32,

    // ── HUD ──────────────────────────────────────────────────────────────────
    pub idle_fade_ms: u64,
    pub zone_crossfade_ms: u64,
    pub summit_reveal_ms: u64,
    pub summit_text_altitude: f32,
    pub scroll_hint_altitude: f32,
    pub label_fade_secs: f32,
    pub hud_font_size: f32,
}

impl Default for AscentConfig {
    fn default() -> Self {
        Self {
            min_altitude: MIN_ALTITUDE,
            max_altitude: MAX_ALTITUDE,
            start_altitude: START_ALTITUDE,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            touch_sensitivity: TOUCH_SENSITIVITY,
            wheel_line_pixels: WHEEL_LINE_PIXELS,
            smoothing_rate_low: SMOOTHING_RATE_LOW,
            smoothing_rate_high: SMOOTHING_RATE_HIGH,
            commit_epsilon: COMMIT_EPSILON,
            world_scale: WORLD_SCALE,
            camera_z: CAMERA_Z,
            camera_fov_degrees: CAMERA_FOV_DEGREES,
            fog_smoothing_rate: FOG_SMOOTHING_RATE,
            sky_smoothing_rate: SKY_SMOOTHING_RATE,
            star_smoothing_rate: STAR_SMOOTHING_RATE,
            particle_smoothing_rate: PARTICLE_SMOOTHING_RATE,
            particle_tint_rate: PARTICLE_TINT_RATE,
            particle_count: PARTICLE_COUNT,
            particle_radius: PARTICLE_RADIUS,
            star_count: STAR_COUNT,
            audio_enabled: true,
            audio_master_gain: AUDIO_MASTER_GAIN,
            audio_ramp_time_constant: AUDIO_RAMP_TIME_CONSTANT,
            idle_fade_ms: IDLE_FADE_MS,
            zone_crossfade_ms: ZONE_CROSSFADE_MS,
            summit_reveal_ms: SUMMIT_REVEAL_MS,
            summit_text_altitude: SUMMIT_TEXT_ALTITUDE,
            scroll_hint_altitude: SCROLL_HINT_ALTITUDE,
            label_fade_secs: LABEL_FADE_SECS,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl AscentConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> AscentResult<()> {
        validate_range("altitude", self.min_altitude, self.max_altitude)?;
        validate_positive("wheel_sensitivity", self.wheel_sensitivity)?;
        validate_positive("touch_sensitivity", self.touch_sensitivity)?;
        validate_positive("wheel_line_pixels", self.wheel_line_pixels)?;
        validate_positive("smoothing_rate_low", self.smoothing_rate_low)?;
        validate_positive("smoothing_rate_high", self.smoothing_rate_high)?;
        validate_positive("world_scale", self.world_scale)?;
        validate_positive("fog_smoothing_rate", self.fog_smoothing_rate)?;
        validate_positive("sky_smoothing_rate", self.sky_smoothing_rate)?;
        validate_positive("star_smoothing_rate", self.star_smoothing_rate)?;
        validate_positive("particle_smoothing_rate", self.particle_smoothing_rate)?;
        validate_positive("particle_tint_rate", self.particle_tint_rate)?;
        validate_positive("particle_radius", self.particle_radius)?;
        validate_positive("audio_ramp_time_constant", self.audio_ramp_time_constant)?;
        validate_positive("label_fade_secs", self.label_fade_secs)?;
        Ok(())
    }

    /// Clamp `value` into the reachable altitude range.
    #[inline]
    pub fn clamp_altitude(&self, value: f32) -> f32 {
        value.clamp(self.min_altitude, self.max_altitude)
    }

    pub fn idle_fade(&self) -> Duration {
        Duration::from_millis(self.idle_fade_ms)
    }

    pub fn zone_crossfade(&self) -> Duration {
        Duration::from_millis(self.zone_crossfade_ms)
    }

    pub fn summit_reveal(&self) -> Duration {
        Duration::from_millis(self.summit_reveal_ms)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> AscentResult<Self> {
        let loaded: AscentConfig = toml::from_str(contents).map_err(|e| AscentError::Parse {
            message: e.to_string(),
        })?;
        loaded.validate()?;
        Ok(loaded)
    }
}

/// Startup system: attempt to load `assets/ascent.toml` and overwrite the
/// `AscentConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged and the defaults kept.  A missing
/// file is not an error.
pub fn load_ascent_config(mut config: ResMut<AscentConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match AscentConfig::from_toml(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("[config] Loaded {CONFIG_PATH}");
            }
            Err(e) => warn!("[config] Rejected {CONFIG_PATH}: {e}; using defaults"),
        },
        Err(_) => info!("[config] No {CONFIG_PATH} found; using compiled defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AscentConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = AscentConfig::from_toml("wheel_sensitivity = 1.5\nidle_fade_ms = 5000\n")
            .expect("partial config should load");
        assert_eq!(cfg.wheel_sensitivity, 1.5);
        assert_eq!(cfg.idle_fade(), Duration::from_millis(5000));
        assert_eq!(cfg.touch_sensitivity, TOUCH_SENSITIVITY);
        assert_eq!(cfg.max_altitude, MAX_ALTITUDE);
    }

    #[test]
    fn inverted_altitude_range_is_rejected() {
        let err = AscentConfig::from_toml("min_altitude = 7000.0\n").unwrap_err();
        assert!(
            matches!(err, AscentError::InvalidRange { name: "altitude", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = AscentConfig::from_toml("wheel_sensitivity = \"fast\"").unwrap_err();
        assert!(matches!(err, AscentError::Parse { .. }), "unexpected error: {err}");
    }

    #[test]
    fn empty_particle_volume_is_rejected() {
        for radius in ["0.0", "-5.0"] {
            let err = AscentConfig::from_toml(&format!("particle_radius = {radius}\n")).unwrap_err();
            assert!(
                matches!(err, AscentError::UnsafeConstant { name: "particle_radius", .. }),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn zero_tint_rate_is_rejected() {
        let err = AscentConfig::from_toml("particle_tint_rate = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            AscentError::UnsafeConstant { name: "particle_tint_rate", .. }
        ));
    }

    #[test]
    fn clamp_altitude_respects_range() {
        let cfg = AscentConfig::default();
        assert_eq!(cfg.clamp_altitude(1e9), 6000.0);
        assert_eq!(cfg.clamp_altitude(-1e9), 800.0);
        assert_eq!(cfg.clamp_altitude(2500.0), 2500.0);
    }
}
