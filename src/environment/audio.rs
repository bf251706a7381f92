//! Four-layer ambient soundscape mixed by altitude.
//!
//! ## Layers
//!
//! | Channel  | Source                              | Weight |
//! |----------|-------------------------------------|--------|
//! | `Low`    | white noise → lowpass 300 Hz        | 0.5    |
//! | `Mid`    | white noise → bandpass 600 Hz, Q 0.5| 0.4    |
//! | `High`   | white noise → highpass 2 kHz        | 0.3    |
//! | `Summit` | 220 Hz + 222 Hz sines (slow beat)   | 0.15   |
//!
//! All layers play under a master gain.  Their levels follow five bands named
//! after the zones, with linear crossfades inside each band (see
//! [`layer_gains`]).  The targets are continuous at every band edge except
//! 2800 m, where the low layer drops out.
//!
//! Levels never jump: [`AudioMixer`] glides each layer toward its target with
//! a 0.1 s exponential time constant, in closed form so the glide does not
//! depend on the frame rate.  The sources are procedural [`Decodable`] assets,
//! so no audio files ship with the crate.

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::constants::{AUDIO_LAYER_WEIGHTS, AUDIO_SAMPLE_RATE};
use crate::interp::{exp_approach, map_linear};
use bevy::audio::{AudioSinkPlayback, Decodable, Source, Volume};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// ── Mixing ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbientChannel {
    Low,
    Mid,
    High,
    Summit,
}

impl AmbientChannel {
    pub const ALL: [AmbientChannel; 4] = [Self::Low, Self::Mid, Self::High, Self::Summit];

    pub fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Mid => 1,
            Self::High => 2,
            Self::Summit => 3,
        }
    }

    pub fn voice(self) -> LayerVoice {
        match self {
            Self::Low => LayerVoice::Noise(FilterKind::Lowpass { freq: 300.0, q: 1.0 }),
            Self::Mid => LayerVoice::Noise(FilterKind::Bandpass { freq: 600.0, q: 0.5 }),
            Self::High => LayerVoice::Noise(FilterKind::Highpass { freq: 2000.0, q: 1.0 }),
            Self::Summit => LayerVoice::Chord([220.0, 222.0]),
        }
    }
}

/// Unweighted layer levels in `[0, 1]`, indexed by [`AmbientChannel::index`].
pub fn layer_gains(altitude: f32) -> [f32; 4] {
    let (mut low, mut mid, mut high, mut summit) = (0.0, 0.0, 0.0, 0.0);

    if altitude < 1800.0 {
        // Cultivation: low dominant
        low = map_linear(altitude, 800.0, 1800.0, 1.0, 0.8);
        mid = map_linear(altitude, 800.0, 1800.0, 0.0, 0.2);
    } else if altitude < 2800.0 {
        // Rainforest: low hands over to mid
        low = map_linear(altitude, 1800.0, 2800.0, 0.8, 0.2);
        mid = map_linear(altitude, 1800.0, 2800.0, 0.2, 0.8);
    } else if altitude < 4000.0 {
        // Moorland: mid dominant, high enters
        mid = map_linear(altitude, 2800.0, 4000.0, 0.8, 0.6);
        high = map_linear(altitude, 2800.0, 4000.0, 0.0, 0.4);
    } else if altitude < 5000.0 {
        // Alpine: high dominant, summit enters
        mid = map_linear(altitude, 4000.0, 5000.0, 0.6, 0.0);
        high = map_linear(altitude, 4000.0, 5000.0, 0.4, 0.8);
        summit = map_linear(altitude, 4000.0, 5000.0, 0.0, 0.2);
    } else {
        // Summit: thin air and the singing tone
        high = map_linear(altitude, 5000.0, 6000.0, 0.8, 0.3);
        summit = map_linear(altitude, 5000.0, 6000.0, 0.2, 0.8);
    }

    [low, mid, high, summit]
}

/// Weighted per-layer volumes the mixer should settle on (before master gain).
pub fn layer_targets(altitude: f32) -> [f32; 4] {
    let gains = layer_gains(altitude);
    std::array::from_fn(|i| gains[i] * AUDIO_LAYER_WEIGHTS[i])
}

/// Current layer volumes, gliding toward [`layer_targets`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AudioMixer {
    pub enabled: bool,
    /// Weighted layer volumes; every layer starts silent.
    pub levels: [f32; 4],
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self {
            enabled: true,
            levels: [0.0; 4],
        }
    }
}

impl AudioMixer {
    pub fn step(&mut self, altitude: f32, tau: f32, dt: f32) {
        let targets = layer_targets(altitude);
        for (level, target) in self.levels.iter_mut().zip(targets) {
            *level = exp_approach(*level, target, tau, dt);
        }
    }

    /// Output volume for `channel` after the master gain.
    pub fn volume(&self, channel: AmbientChannel, master: f32) -> f32 {
        self.levels[channel.index()] * master
    }
}

// ── Procedural sources ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    Lowpass { freq: f32, q: f32 },
    Bandpass { freq: f32, q: f32 },
    Highpass { freq: f32, q: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerVoice {
    Noise(FilterKind),
    Chord([f32; 2]),
}

/// Second-order IIR section (RBJ cookbook coefficients, normalised by `a0`).
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    pub fn new(kind: FilterKind, sample_rate: f32) -> Self {
        let (freq, q) = match kind {
            FilterKind::Lowpass { freq, q }
            | FilterKind::Bandpass { freq, q }
            | FilterKind::Highpass { freq, q } => (freq, q),
        };
        let w0 = std::f32::consts::TAU * freq / sample_rate;
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * q);

        let (b0, b1, b2) = match kind {
            FilterKind::Lowpass { .. } => ((1.0 - cos) / 2.0, 1.0 - cos, (1.0 - cos) / 2.0),
            FilterKind::Highpass { .. } => ((1.0 + cos) / 2.0, -(1.0 + cos), (1.0 + cos) / 2.0),
            FilterKind::Bandpass { .. } => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: -2.0 * cos / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Looping ambient layer asset, decoded on the audio thread.
#[derive(Asset, TypePath, Debug, Clone)]
pub struct AmbientLayer {
    pub voice: LayerVoice,
}

/// Endless mono sample stream for one [`AmbientLayer`].
pub struct AmbientDecoder {
    voice: LayerVoice,
    sample_rate: u32,
    rng: StdRng,
    filter: Option<Biquad>,
    phases: [f32; 2],
}

impl AmbientDecoder {
    pub fn new(voice: LayerVoice, sample_rate: u32, seed: u64) -> Self {
        let filter = match voice {
            LayerVoice::Noise(kind) => Some(Biquad::new(kind, sample_rate as f32)),
            LayerVoice::Chord(_) => None,
        };
        Self {
            voice,
            sample_rate,
            rng: StdRng::seed_from_u64(seed),
            filter,
            phases: [0.0; 2],
        }
    }
}

impl Iterator for AmbientDecoder {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self.voice {
            LayerVoice::Noise(_) => {
                let white: f32 = self.rng.gen_range(-1.0..1.0);
                Some(match self.filter.as_mut() {
                    Some(filter) => filter.process(white),
                    None => white,
                })
            }
            LayerVoice::Chord(freqs) => {
                let mut sample = 0.0;
                for (phase, freq) in self.phases.iter_mut().zip(freqs) {
                    sample += (*phase * std::f32::consts::TAU).sin();
                    *phase = (*phase + freq / self.sample_rate as f32).fract();
                }
                Some(sample)
            }
        }
    }
}

impl Source for AmbientDecoder {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

impl Decodable for AmbientLayer {
    type DecoderItem = <AmbientDecoder as Iterator>::Item;
    type Decoder = AmbientDecoder;

    fn decoder(&self) -> Self::Decoder {
        AmbientDecoder::new(self.voice, AUDIO_SAMPLE_RATE, rand::thread_rng().gen())
    }
}

// ── Systems ──────────────────────────────────────────────────────────────────

/// Tags the playing entity of one ambient layer.
#[derive(Component, Debug, Clone, Copy)]
pub struct AmbientLayerPlayer(pub AmbientChannel);

pub fn init_audio_mixer(mut mixer: ResMut<AudioMixer>, config: Res<AscentConfig>) {
    mixer.enabled = config.audio_enabled;
    if !mixer.enabled {
        info!("[audio] Ambient audio disabled by config");
    }
}

/// Spawn one silent looping player per layer.
pub fn spawn_ambient_layers(
    mut commands: Commands,
    mut layers: ResMut<Assets<AmbientLayer>>,
    mixer: Res<AudioMixer>,
) {
    if !mixer.enabled {
        return;
    }
    for channel in AmbientChannel::ALL {
        let handle = layers.add(AmbientLayer {
            voice: channel.voice(),
        });
        commands.spawn((
            AudioPlayer(handle),
            PlaybackSettings::LOOP.with_volume(Volume::SILENT),
            AmbientLayerPlayer(channel),
        ));
    }
}

pub fn audio_mixer_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut mixer: ResMut<AudioMixer>,
) {
    if !mixer.enabled {
        return;
    }
    mixer.step(
        state.altitude(),
        config.audio_ramp_time_constant,
        time.delta_secs(),
    );
}

/// Push the mixer levels onto the playing sinks.
pub fn apply_mixer_volumes_system(
    mixer: Res<AudioMixer>,
    config: Res<AscentConfig>,
    mut sinks: Query<(&AmbientLayerPlayer, &mut AudioSink)>,
) {
    for (player, mut sink) in sinks.iter_mut() {
        sink.set_volume(Volume::Linear(mixer.volume(player.0, config.audio_master_gain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn bottom_of_mountain_is_pure_low_layer() {
        assert_eq!(layer_gains(800.0), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn crossfades_are_continuous_at_band_edges() {
        for edge in [1800.0_f32, 4000.0, 5000.0] {
            let below = layer_gains(edge - 0.001);
            let at = layer_gains(edge);
            for i in 0..4 {
                assert!(
                    (below[i] - at[i]).abs() < 1e-3,
                    "layer {i} jumps at {edge}: {} -> {}",
                    below[i],
                    at[i]
                );
            }
        }
    }

    #[test]
    fn low_layer_drops_out_at_moorland() {
        assert!((layer_gains(2799.9)[0] - 0.2).abs() < 1e-3);
        assert_eq!(layer_gains(2800.0)[0], 0.0);
    }

    #[test]
    fn summit_band_values() {
        let g = layer_gains(5500.0);
        assert!(close(g[2], 0.55));
        assert!(close(g[3], 0.5));
        assert_eq!(g[0], 0.0);
        assert_eq!(g[1], 0.0);
    }

    #[test]
    fn targets_apply_layer_weights() {
        let t = layer_targets(800.0);
        assert!(close(t[0], 0.5));
        let t = layer_targets(6000.0);
        assert!(close(t[3], 0.8 * 0.15));
    }

    #[test]
    fn mixer_glides_instead_of_jumping() {
        let mut mixer = AudioMixer::default();
        mixer.step(800.0, 0.1, 0.1);
        // One time constant: ~63% of the 0.5 target.
        assert!((mixer.levels[0] - 0.5 * 0.632_12).abs() < 1e-4);
        for _ in 0..100 {
            mixer.step(800.0, 0.1, 0.016);
        }
        assert!(close(mixer.levels[0], 0.5));
        assert!(close(mixer.volume(AmbientChannel::Low, 0.5), 0.25));
    }

    #[test]
    fn lowpass_passes_dc_and_highpass_blocks_it() {
        let mut low = Biquad::new(FilterKind::Lowpass { freq: 300.0, q: 1.0 }, 44_100.0);
        let mut high = Biquad::new(FilterKind::Highpass { freq: 2000.0, q: 1.0 }, 44_100.0);
        let (mut l, mut h) = (0.0, 0.0);
        for _ in 0..20_000 {
            l = low.process(1.0);
            h = high.process(1.0);
        }
        assert!((l - 1.0).abs() < 1e-3);
        assert!(h.abs() < 1e-3);
    }

    #[test]
    fn decoders_stay_bounded() {
        let mut chord = AmbientDecoder::new(AmbientChannel::Summit.voice(), 44_100, 1);
        assert!(chord.by_ref().take(44_100).all(|s| s.abs() <= 2.0));
        let mut noise = AmbientDecoder::new(AmbientChannel::Mid.voice(), 44_100, 1);
        assert!(noise.by_ref().take(44_100).all(|s| s.is_finite() && s.abs() < 4.0));
    }
}
