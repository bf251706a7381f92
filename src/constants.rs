//! Centralised tuning constants for the ascent.
//!
//! Every value here is the compiled default for the matching field in
//! [`crate::config::AscentConfig`].  Edit `assets/ascent.toml` to override at
//! runtime; edit this file to change what ships.

// ── Altitude Range ────────────────────────────────────────────────────────────

/// Lowest reachable altitude (m).  Also the start of the first zone.
pub const MIN_ALTITUDE: f32 = 800.0;

/// Highest reachable altitude (m).  Also the end of the last zone.
pub const MAX_ALTITUDE: f32 = 6000.0;

/// Altitude the climb starts at (m).
pub const START_ALTITUDE: f32 = MIN_ALTITUDE;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Metres of target altitude per pixel of wheel delta.
pub const WHEEL_SENSITIVITY: f32 = 0.5;

/// Metres of target altitude per pixel of vertical touch drag.
pub const TOUCH_SENSITIVITY: f32 = 2.0;

/// Pixel delta reported for one notch of a line-based mouse wheel.
///
/// Browsers report roughly 100 px per notch; native wheels report lines, so
/// line deltas are converted before the wheel sensitivity is applied.
pub const WHEEL_LINE_PIXELS: f32 = 100.0;

// ── Integrator ────────────────────────────────────────────────────────────────

/// Smoothing rate (1/s) at the bottom of the mountain.
pub const SMOOTHING_RATE_LOW: f32 = 2.0;

/// Smoothing rate (1/s) at the top of the mountain.
pub const SMOOTHING_RATE_HIGH: f32 = 0.5;

/// Minimum per-frame altitude change (m) that is committed to the state.
pub const COMMIT_EPSILON: f32 = 0.01;

// ── Camera / World ────────────────────────────────────────────────────────────

/// World units per metre of altitude.
pub const WORLD_SCALE: f32 = 0.1;

/// Fixed camera distance from the mountain axis (world units).
pub const CAMERA_Z: f32 = 10.0;

/// Vertical field of view (degrees).
pub const CAMERA_FOV_DEGREES: f32 = 45.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;

// ── Environment Smoothing ─────────────────────────────────────────────────────

/// Fog colour/density smoothing rate (1/s).
pub const FOG_SMOOTHING_RATE: f32 = 1.0;

/// Sky gradient smoothing rate (1/s).
pub const SKY_SMOOTHING_RATE: f32 = 0.5;

/// Star opacity smoothing rate (1/s).
pub const STAR_SMOOTHING_RATE: f32 = 0.5;

/// Particle opacity/size smoothing rate (1/s).
pub const PARTICLE_SMOOTHING_RATE: f32 = 2.0;

/// Particle colour tint rate toward the zone fog colour (1/s).
pub const PARTICLE_TINT_RATE: f32 = 1.0;

// ── Sky ───────────────────────────────────────────────────────────────────────

/// Altitudes at which the sky's zenith colour steps darker.
pub const SKY_THRESHOLDS: [f32; 4] = [1800.0, 2800.0, 4000.0, 5000.0];

/// Zenith colours: one per band below each threshold, plus one above the last.
pub const SKY_TOP_COLORS: [&str; 5] = ["#4CA1AF", "#2C3E50", "#1a2a6c", "#0f0c29", "#000000"];

pub const SKY_DOME_RADIUS: f32 = 1000.0;
pub const SKY_DOME_OFFSET: f32 = 100.0;
pub const SKY_DOME_EXPONENT: f32 = 0.6;

/// Stars begin to appear at this altitude (m).
pub const STAR_FADE_START: f32 = 3500.0;

/// Stars are fully visible at this altitude (m).
pub const STAR_FADE_END: f32 = 5500.0;

pub const STAR_COUNT: u32 = 2000;
pub const STAR_SHELL_RADIUS: f32 = 900.0;
pub const STAR_SIZE: f32 = 1.6;

/// Star-field spin about the Y axis (rad/s).
pub const STAR_ROTATION_SPEED: f32 = 0.01;

// ── Particles ─────────────────────────────────────────────────────────────────

pub const PARTICLE_COUNT: u32 = 1000;

/// Half-extent of the particle cube around the camera (world units).
pub const PARTICLE_RADIUS: f32 = 20.0;

pub const PARTICLE_INITIAL_SIZE: f32 = 0.05;
pub const PARTICLE_INITIAL_OPACITY: f32 = 0.5;

// ── Audio ─────────────────────────────────────────────────────────────────────

pub const AUDIO_MASTER_GAIN: f32 = 0.5;

/// Time constant (s) of the gain glide applied to every layer.
pub const AUDIO_RAMP_TIME_CONSTANT: f32 = 0.1;

/// Per-layer output weights: low, mid, high, summit.
pub const AUDIO_LAYER_WEIGHTS: [f32; 4] = [0.5, 0.4, 0.3, 0.15];

pub const AUDIO_SAMPLE_RATE: u32 = 44_100;

// ── HUD Timing ────────────────────────────────────────────────────────────────

/// Inactivity before the overlay fades out (ms).
pub const IDLE_FADE_MS: u64 = 3000;

/// Delay between zone-label fade-out and the label swap (ms).
pub const ZONE_CROSSFADE_MS: u64 = 1000;

/// Pause before the summit narrative appears (ms).
pub const SUMMIT_REVEAL_MS: u64 = 1000;

/// Altitude at which the summit narrative is revealed (m).
///
/// Deliberately above the summit zone's lower bound: the zone drives ambient
/// rendering from 5000 m, the narrative waits for the peak itself.
pub const SUMMIT_TEXT_ALTITUDE: f32 = 5890.0;

/// The scroll hint shows while the rounded altitude is below this (m).
pub const SCROLL_HINT_ALTITUDE: f32 = 850.0;

/// Seconds for a HUD element to fade fully in or out.
pub const LABEL_FADE_SECS: f32 = 1.0;

pub const HUD_FONT_SIZE: f32 = 36.0;
