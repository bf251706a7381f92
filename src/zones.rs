//! The five ecological zones of the climb.
//!
//! The table is static and ordered by altitude.  Each band is half-open,
//! `[min_altitude, max_altitude)`, and adjacent bands share their boundary, so
//! every altitude in `[800, 6000)` belongs to exactly one zone.  Altitudes
//! outside that span fall back to the last zone, which makes
//! [`resolve_zone`] total.

use crate::error::{AscentError, AscentResult};
use crate::interp::hex_color;
use bevy::prelude::*;

/// Stable identity of a zone; renderers key their per-zone behaviour on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneId {
    Cultivation,
    Rainforest,
    Moorland,
    Alpine,
    Summit,
}

/// One altitude band with its display metadata and fog parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: &'static str,
    /// Inclusive lower bound (m).
    pub min_altitude: f32,
    /// Exclusive upper bound (m).
    pub max_altitude: f32,
    /// Ground/flora colour token (`#rrggbb`).
    pub color: &'static str,
    /// Fog and sky-horizon colour token (`#rrggbb`).
    pub fog_color: &'static str,
    /// Exponential-squared fog density (per world unit).
    pub fog_density: f32,
    pub quote: &'static str,
}

impl Zone {
    /// `true` when `altitude` lies in this zone's half-open band.
    #[inline]
    pub fn contains(&self, altitude: f32) -> bool {
        altitude >= self.min_altitude && altitude < self.max_altitude
    }

    pub fn fog_srgba(&self) -> Srgba {
        hex_color(self.fog_color)
    }

    pub fn srgba(&self) -> Srgba {
        hex_color(self.color)
    }
}

pub static ZONES: [Zone; 5] = [
    Zone {
        id: ZoneId::Cultivation,
        name: "Cultivation Zone",
        min_altitude: 800.0,
        max_altitude: 1800.0,
        color: "#e6c229",
        fog_color: "#d4a76a",
        fog_density: 0.02,
        quote: "You begin where life already exists.",
    },
    Zone {
        id: ZoneId::Rainforest,
        name: "Rainforest Zone",
        min_altitude: 1800.0,
        max_altitude: 2800.0,
        color: "#2d5a27",
        fog_color: "#1a3c18",
        fog_density: 0.04,
        quote: "Lush, enveloping, damp silence.",
    },
    Zone {
        id: ZoneId::Moorland,
        name: "Moorland Zone",
        min_altitude: 2800.0,
        max_altitude: 4000.0,
        color: "#6b4c35",
        fog_color: "#583e2f",
        fog_density: 0.03,
        quote: "Alien calm, thinning air.",
    },
    Zone {
        id: ZoneId::Alpine,
        name: "Alpine Desert",
        min_altitude: 4000.0,
        max_altitude: 5000.0,
        color: "#8c8c8c",
        fog_color: "#a6a6a6",
        fog_density: 0.02,
        quote: "Vast, exposed, quiet.",
    },
    Zone {
        id: ZoneId::Summit,
        name: "Arctic Summit",
        min_altitude: 5000.0,
        max_altitude: 6000.0,
        color: "#ffffff",
        fog_color: "#e6f7ff",
        fog_density: 0.015,
        quote: "You are standing above weather.",
    },
];

/// Return the zone containing `altitude`, or the last zone if none does.
pub fn resolve_zone(altitude: f32) -> &'static Zone {
    ZONES
        .iter()
        .find(|z| z.contains(altitude))
        .unwrap_or(&ZONES[ZONES.len() - 1])
}

/// Look up a zone by identity.
pub fn zone(id: ZoneId) -> &'static Zone {
    ZONES
        .iter()
        .find(|z| z.id == id)
        .unwrap_or(&ZONES[ZONES.len() - 1])
}

/// Check that `zones` is non-empty, ordered, contiguous, and that every
/// colour token parses.
pub fn validate_zone_table(zones: &[Zone]) -> AscentResult<()> {
    for z in zones {
        crate::error::validate_range(z.name, z.min_altitude, z.max_altitude)?;
        for token in [z.color, z.fog_color] {
            if Srgba::hex(token).is_err() {
                return Err(AscentError::InvalidColor {
                    token: token.to_string(),
                });
            }
        }
    }
    for pair in zones.windows(2) {
        if pair[0].max_altitude != pair[1].min_altitude {
            return Err(AscentError::ZoneGap {
                after: pair[0].name,
                max_altitude: pair[0].max_altitude,
                next_min_altitude: pair[1].min_altitude,
            });
        }
    }
    Ok(())
}

/// Startup system: validate the built-in table once and log the outcome.
pub fn check_zone_table() {
    match validate_zone_table(&ZONES) {
        Ok(()) => info!(
            "[zones] {} zones spanning {}–{} m",
            ZONES.len(),
            ZONES[0].min_altitude,
            ZONES[ZONES.len() - 1].max_altitude
        ),
        Err(e) => warn!("[zones] zone table is inconsistent: {e}"),
    }
}

/// Log each zone the climber enters.
pub fn log_zone_transition_system(
    state: Res<crate::altitude::AltitudeState>,
    mut last: Local<Option<ZoneId>>,
) {
    let current = resolve_zone(state.altitude());
    if *last != Some(current.id) {
        if last.is_some() {
            info!(
                "[zones] Entered {} at {:.0} m",
                current.name,
                state.altitude()
            );
        }
        *last = Some(current.id);
    }
}
