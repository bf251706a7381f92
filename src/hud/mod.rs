//! Heads-up display: altitude readout, zone label, and the summit text.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`timing`] | Idle fade, zone crossfade, and summit reveal state machines |
//! | [`overlay`] | UI nodes and the system that copies timing state onto them |

pub mod overlay;
pub mod timing;

pub use overlay::{spawn_hud, sync_hud_system, HudPanel, HudText};
pub use timing::{hud_timing_system, init_hud_timing, HudTiming};
