//! HUD timing: idle fade, zone-label crossfade, and the summit reveal.
//!
//! ## State machines
//!
//! | Machine          | Trigger                         | Effect                                  |
//! |------------------|---------------------------------|-----------------------------------------|
//! | [`IdleFade`]     | any altitude change             | show now, hide after `idle_fade_ms`     |
//! | [`ZoneCrossfade`]| resolved zone ≠ displayed zone  | fade out, swap after `zone_crossfade_ms`|
//! | [`SummitReveal`] | altitude crosses 5890 m         | show after `summit_reveal_ms`, hide now |
//!
//! All three run on [`Delay`], a one-shot countdown advanced by frame time,
//! so the whole HUD can be stepped deterministically in tests.  A new
//! schedule always replaces the pending one: at most one transition per
//! machine is ever in flight.

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::zones::{resolve_zone, ZoneId};
use bevy::prelude::*;
use std::time::Duration;

// ── Delay ─────────────────────────────────────────────────────────────────────

/// One-shot countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delay {
    remaining: Option<Duration>,
}

impl Delay {
    /// Arm the delay, replacing any pending countdown.
    pub fn schedule(&mut self, after: Duration) {
        self.remaining = Some(after);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt`; returns `true` exactly once, on the tick that expires it.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left.saturating_sub(dt);
                if left.is_zero() {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

// ── Idle fade ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleFade {
    pub visible: bool,
    timer: Delay,
}

impl IdleFade {
    /// Visible, with the inactivity countdown already running.
    pub fn new(timeout: Duration) -> Self {
        let mut timer = Delay::default();
        timer.schedule(timeout);
        Self {
            visible: true,
            timer,
        }
    }

    pub fn activity(&mut self, timeout: Duration) {
        self.visible = true;
        self.timer.schedule(timeout);
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.timer.tick(dt) {
            self.visible = false;
        }
    }
}

// ── Zone crossfade ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneCrossfade {
    /// Zone whose name and quote are on screen.
    pub displayed: ZoneId,
    /// `false` while the label is fading out ahead of a swap.
    pub fade_in: bool,
    pending: Option<ZoneId>,
    last_resolved: ZoneId,
    delay: Delay,
}

impl ZoneCrossfade {
    pub fn new(zone: ZoneId) -> Self {
        Self {
            displayed: zone,
            fade_in: true,
            pending: None,
            last_resolved: zone,
            delay: Delay::default(),
        }
    }

    /// Feed the zone resolved this frame.  Only a change of the resolved zone
    /// (re)starts a transition; returning to the displayed zone cancels it.
    pub fn observe(&mut self, resolved: ZoneId, delay: Duration) {
        if resolved == self.last_resolved {
            return;
        }
        self.last_resolved = resolved;

        if resolved == self.displayed {
            self.pending = None;
            self.delay.cancel();
            self.fade_in = true;
        } else {
            self.pending = Some(resolved);
            self.fade_in = false;
            self.delay.schedule(delay);
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.delay.tick(dt) {
            if let Some(zone) = self.pending.take() {
                self.displayed = zone;
            }
            self.fade_in = true;
        }
    }

    pub fn in_flight(&self) -> bool {
        self.delay.is_pending()
    }
}

// ── Summit reveal ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummitReveal {
    /// Altitude is at or above the summit text threshold.
    pub reached: bool,
    /// Summit overlay is on screen.
    pub shown: bool,
    delay: Delay,
}

impl SummitReveal {
    pub fn observe(&mut self, altitude: f32, threshold: f32, reveal_after: Duration) {
        let reached = altitude >= threshold;
        if reached == self.reached {
            return;
        }
        self.reached = reached;

        if reached {
            self.delay.schedule(reveal_after);
        } else {
            self.delay.cancel();
            self.shown = false;
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.delay.tick(dt) {
            self.shown = true;
        }
    }
}

// ── Opacity ───────────────────────────────────────────────────────────────────

/// Opacity moving linearly toward 0 or 1 over a fixed fade time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityFade {
    pub value: f32,
}

impl OpacityFade {
    pub fn new(visible: bool) -> Self {
        Self {
            value: if visible { 1.0 } else { 0.0 },
        }
    }

    pub fn step(&mut self, visible: bool, fade_secs: f32, dt: f32) {
        let target = if visible { 1.0 } else { 0.0 };
        if fade_secs <= 0.0 {
            self.value = target;
            return;
        }
        let max_step = dt / fade_secs;
        self.value += (target - self.value).clamp(-max_step, max_step);
    }
}

// ── Resource ──────────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudTiming {
    pub idle: IdleFade,
    pub zone: ZoneCrossfade,
    pub summit: SummitReveal,
    pub overlay_opacity: OpacityFade,
    pub label_opacity: OpacityFade,
    pub summit_opacity: OpacityFade,
    last_altitude: f32,
}

impl Default for HudTiming {
    fn default() -> Self {
        Self::new(crate::constants::START_ALTITUDE, &AscentConfig::default())
    }
}

impl HudTiming {
    pub fn new(altitude: f32, config: &AscentConfig) -> Self {
        Self {
            idle: IdleFade::new(config.idle_fade()),
            zone: ZoneCrossfade::new(label_zone(altitude)),
            summit: SummitReveal::default(),
            overlay_opacity: OpacityFade::new(true),
            label_opacity: OpacityFade::new(true),
            summit_opacity: OpacityFade::new(false),
            last_altitude: altitude,
        }
    }

    /// Advance one frame.  Pending timers fire first, then this frame's
    /// altitude is observed.
    pub fn update(&mut self, altitude: f32, dt: Duration, config: &AscentConfig) {
        self.idle.tick(dt);
        self.zone.tick(dt);
        self.summit.tick(dt);

        if altitude != self.last_altitude {
            self.last_altitude = altitude;
            self.idle.activity(config.idle_fade());
        }
        self.zone
            .observe(label_zone(altitude), config.zone_crossfade());
        self.summit.observe(
            altitude,
            config.summit_text_altitude,
            config.summit_reveal(),
        );

        let secs = dt.as_secs_f32();
        self.overlay_opacity
            .step(self.idle.visible, config.label_fade_secs, secs);
        self.label_opacity
            .step(self.zone.fade_in, config.label_fade_secs, secs);
        self.summit_opacity
            .step(self.summit.shown, config.label_fade_secs, secs);
    }

    /// The general overlay is unmounted while the summit text is up.
    pub fn overlay_mounted(&self) -> bool {
        !self.summit.shown
    }
}

/// Zone shown by the label: resolved from the rounded altitude.
pub fn label_zone(altitude: f32) -> ZoneId {
    resolve_zone(altitude.round()).id
}

pub fn altitude_text(altitude: f32) -> String {
    format!("{}m", altitude.round() as i64)
}

pub fn show_scroll_hint(altitude: f32, below: f32) -> bool {
    altitude.round() < below
}

// ── Systems ───────────────────────────────────────────────────────────────────

pub fn init_hud_timing(
    mut timing: ResMut<HudTiming>,
    state: Res<AltitudeState>,
    config: Res<AscentConfig>,
) {
    *timing = HudTiming::new(state.altitude(), &config);
}

pub fn hud_timing_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut timing: ResMut<HudTiming>,
) {
    timing.update(state.altitude(), time.delta(), &config);
}
