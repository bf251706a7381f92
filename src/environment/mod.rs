//! Zone-reactive renderers: everything that follows the smoothed altitude.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`atmosphere`] | Distance fog colour and density per zone |
//! | [`sky`] | Gradient sky dome and the star field above 3500 m |
//! | [`particles`] | Pollen, rain, grit, dust, and snow around the camera |
//! | [`audio`] | Four procedural ambient layers crossfaded by altitude |
//!
//! Every renderer only reads [`crate::altitude::AltitudeState`] and keeps its
//! own smoothed state in a resource, so a camera jump or a zone change never
//! produces a visual or audible step.

pub mod atmosphere;
pub mod audio;
pub mod particles;
pub mod sky;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use atmosphere::{apply_fog_system, fog_smoothing_system, init_fog_state, FogState};
pub use audio::{
    apply_mixer_volumes_system, audio_mixer_system, init_audio_mixer, layer_gains,
    spawn_ambient_layers, AmbientChannel, AmbientLayer, AudioMixer,
};
pub use particles::{
    particle_field_system, seed_particle_field, spawn_particle_entities,
    sync_particle_entities_system, ParticleField,
};
pub use sky::{
    sky_gradient_system, spawn_sky_dome, spawn_star_field, star_field_system,
    sync_sky_dome_system, sync_star_field_system, SkyGradient, StarFieldState,
};
