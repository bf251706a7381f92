//! Ascent: a scroll-driven climb up Kilimanjaro.
//!
//! One number drives everything: the climber's altitude in metres.  Scroll and
//! touch input move a *target* altitude; a per-frame integrator eases the
//! rendered altitude toward it; fog, sky, stars, particles, ambient audio, and
//! the HUD all react to the zone that altitude falls in.
//!
//! ## Frame order
//!
//! | Set                     | Systems                                              |
//! |-------------------------|------------------------------------------------------|
//! | [`AscentSet::Input`]    | wheel and touch → `target_altitude`                  |
//! | [`AscentSet::Integrate`]| smoothing step → `altitude`, camera placement        |
//! | [`AscentSet::React`]    | fog, sky, stars, particles, audio mixer, HUD timing  |
//! | [`AscentSet::Present`]  | copy smoothed state onto meshes, sinks, and UI nodes |
//!
//! [`AscentCorePlugin`] carries everything up to `React` and runs headless
//! under `MinimalPlugins`.  [`AscentPlugin`] adds the scene, the audio
//! sources, and the UI on top and expects `DefaultPlugins`.

pub mod altitude;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod hud;
pub mod input;
pub mod integrator;
pub mod interp;
pub mod scenery;
pub mod zones;

use bevy::audio::AddAudioSource;
use bevy::input::mouse::MouseWheel;
use bevy::input::touch::TouchInput;
use bevy::prelude::*;

use altitude::AltitudeState;
use config::AscentConfig;
use environment::{AmbientLayer, AudioMixer, FogState, ParticleField, SkyGradient, StarFieldState};
use hud::HudTiming;
use input::TouchTracker;

// ── System sets ───────────────────────────────────────────────────────────────

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AscentSet {
    Input,
    Integrate,
    React,
    Present,
}

/// Startup work that must finish before anything is spawned.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoreStartup;

// ── Plugins ───────────────────────────────────────────────────────────────────

/// Altitude state, input, integration, and every smoothed renderer state.
pub struct AscentCorePlugin {
    /// Read `assets/ascent.toml` at startup.  Off in tests so a local config
    /// file cannot change the results.
    pub load_config: bool,
}

impl Default for AscentCorePlugin {
    fn default() -> Self {
        Self { load_config: true }
    }
}

impl Plugin for AscentCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AscentConfig>()
            .init_resource::<AltitudeState>()
            .init_resource::<TouchTracker>()
            .init_resource::<FogState>()
            .init_resource::<SkyGradient>()
            .init_resource::<StarFieldState>()
            .init_resource::<ParticleField>()
            .init_resource::<AudioMixer>()
            .init_resource::<HudTiming>()
            .add_message::<MouseWheel>()
            .add_message::<TouchInput>();

        if self.load_config {
            app.add_systems(Startup, config::load_ascent_config.before(CoreStartup));
        }

        app.add_systems(
            Startup,
            (
                zones::check_zone_table,
                altitude::reset_altitude_state,
                (
                    environment::init_fog_state,
                    hud::init_hud_timing,
                    environment::init_audio_mixer,
                    environment::seed_particle_field,
                ),
            )
                .chain()
                .in_set(CoreStartup),
        )
        .configure_sets(
            Update,
            (
                AscentSet::Input,
                AscentSet::Integrate,
                AscentSet::React,
                AscentSet::Present,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                (input::wheel_input_system, input::touch_input_system).in_set(AscentSet::Input),
                integrator::altitude_integrator_system.in_set(AscentSet::Integrate),
                (
                    environment::fog_smoothing_system,
                    environment::sky_gradient_system,
                    environment::star_field_system,
                    environment::particle_field_system,
                    environment::audio_mixer_system,
                    hud::hud_timing_system,
                    zones::log_zone_transition_system,
                )
                    .in_set(AscentSet::React),
            ),
        );
    }
}

/// The full experience: core logic plus scene, audio, and HUD.
pub struct AscentPlugin;

impl Plugin for AscentPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AscentCorePlugin::default())
            .add_audio_source::<AmbientLayer>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(
                Startup,
                (
                    scenery::spawn_camera,
                    scenery::spawn_scenery,
                    environment::spawn_sky_dome,
                    environment::spawn_star_field,
                    environment::spawn_particle_entities,
                    environment::spawn_ambient_layers,
                    hud::spawn_hud,
                )
                    .after(CoreStartup),
            )
            .add_systems(
                Update,
                (
                    environment::apply_fog_system,
                    environment::sync_sky_dome_system,
                    environment::sync_star_field_system,
                    environment::sync_particle_entities_system,
                    environment::apply_mixer_volumes_system,
                    hud::sync_hud_system,
                )
                    .in_set(AscentSet::Present),
            );
    }
}
