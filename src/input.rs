//! Input driver: wheel and touch gestures → `target_altitude`.
//!
//! Both gestures reduce to a stream of signed pixel deltas where a positive
//! delta means "climb".  Each delta is scaled by its sensitivity, added to the
//! *current* target (read fresh per event), clamped to the altitude range and
//! written back.  This is the only place `target_altitude` is written.
//!
//! | Gesture       | Delta                                   | Sensitivity |
//! |---------------|-----------------------------------------|-------------|
//! | Wheel         | scroll toward the user = positive       | 0.5 m/px    |
//! | Touch drag    | `previous_y - current_y` (swipe up > 0) | 2.0 m/px    |

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;

/// Finger currently driving the climb, and where it was last sampled.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct TouchTracker {
    active: Option<(u64, f32)>,
}

impl TouchTracker {
    /// Begin tracking a finger at window-space `y`.
    pub fn start(&mut self, id: u64, y: f32) {
        self.active = Some((id, y));
    }

    /// Record a move and return the climb delta in pixels.
    ///
    /// Window coordinates grow downward, so moving the finger up yields a
    /// positive delta.  Moves from untracked fingers return `None`.
    pub fn moved(&mut self, id: u64, y: f32) -> Option<f32> {
        match self.active {
            Some((active_id, last_y)) if active_id == id => {
                self.active = Some((id, y));
                Some(last_y - y)
            }
            _ => None,
        }
    }

    pub fn end(&mut self, id: u64) {
        if matches!(self.active, Some((active_id, _)) if active_id == id) {
            self.active = None;
        }
    }
}

/// Apply one scaled delta to `current_target`, clamped to the altitude range.
#[inline]
pub fn step_target(current_target: f32, delta: f32, sensitivity: f32, config: &AscentConfig) -> f32 {
    config.clamp_altitude(current_target + delta * sensitivity)
}

/// Convert a wheel message into a browser-style pixel delta (positive = climb).
pub fn wheel_delta_pixels(event: &MouseWheel, line_pixels: f32) -> f32 {
    let per_unit = match event.unit {
        MouseScrollUnit::Line => line_pixels,
        MouseScrollUnit::Pixel => 1.0,
    };
    -event.y * per_unit
}

pub fn wheel_input_system(
    mut wheel: MessageReader<MouseWheel>,
    mut state: ResMut<AltitudeState>,
    config: Res<AscentConfig>,
) {
    for event in wheel.read() {
        let delta = wheel_delta_pixels(event, config.wheel_line_pixels);
        if delta == 0.0 {
            continue;
        }
        let next = step_target(state.target_altitude(), delta, config.wheel_sensitivity, &config);
        state.set_target_altitude(next);
    }
}

pub fn touch_input_system(
    mut touches: MessageReader<TouchInput>,
    mut tracker: ResMut<TouchTracker>,
    mut state: ResMut<AltitudeState>,
    config: Res<AscentConfig>,
) {
    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => tracker.start(touch.id, touch.position.y),
            TouchPhase::Moved => {
                let Some(delta) = tracker.moved(touch.id, touch.position.y) else {
                    continue;
                };
                let next =
                    step_target(state.target_altitude(), delta, config.touch_sensitivity, &config);
                state.set_target_altitude(next);
            }
            TouchPhase::Ended | TouchPhase::Canceled => tracker.end(touch.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(unit: MouseScrollUnit, y: f32) -> MouseWheel {
        MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    #[test]
    fn huge_deltas_clamp_to_range_ends() {
        let cfg = AscentConfig::default();
        assert_eq!(step_target(800.0, 1e9, 1.0, &cfg), 6000.0);
        assert_eq!(step_target(6000.0, -1e9, 1.0, &cfg), 800.0);
    }

    #[test]
    fn wheel_scroll_toward_user_climbs() {
        // Bevy reports scrolling toward the user as negative y.
        assert_eq!(wheel_delta_pixels(&wheel(MouseScrollUnit::Pixel, -40.0), 100.0), 40.0);
        assert_eq!(wheel_delta_pixels(&wheel(MouseScrollUnit::Line, -1.0), 100.0), 100.0);
        assert_eq!(wheel_delta_pixels(&wheel(MouseScrollUnit::Line, 2.0), 100.0), -200.0);
    }

    #[test]
    fn touch_swipe_up_is_positive_and_incremental() {
        let mut tracker = TouchTracker::default();
        tracker.start(7, 500.0);
        assert_eq!(tracker.moved(7, 450.0), Some(50.0));
        assert_eq!(tracker.moved(7, 470.0), Some(-20.0));
        // Other fingers are ignored.
        assert_eq!(tracker.moved(8, 100.0), None);
        tracker.end(7);
        assert_eq!(tracker.moved(7, 400.0), None);
    }

    #[test]
    fn wheel_system_applies_sensitivity_per_event() {
        let mut world = World::new();
        world.insert_resource(AscentConfig::default());
        world.insert_resource(AltitudeState::default());
        world.init_resource::<Messages<MouseWheel>>();
        world.write_message(wheel(MouseScrollUnit::Pixel, -100.0));
        world.write_message(wheel(MouseScrollUnit::Pixel, -300.0));

        let mut schedule = Schedule::default();
        schedule.add_systems(wheel_input_system);
        schedule.run(&mut world);

        let state = world.resource::<AltitudeState>();
        assert_eq!(state.target_altitude(), 800.0 + 400.0 * 0.5);
        // Only the target moves; the integrator owns `altitude`.
        assert_eq!(state.altitude(), 800.0);
    }

    #[test]
    fn touch_system_scales_drag_by_touch_sensitivity() {
        let mut world = World::new();
        world.insert_resource(AscentConfig::default());
        world.insert_resource(AltitudeState::default());
        world.init_resource::<TouchTracker>();
        world.init_resource::<Messages<TouchInput>>();
        for (phase, y) in [(TouchPhase::Started, 600.0), (TouchPhase::Moved, 500.0)] {
            world.write_message(TouchInput {
                phase,
                position: Vec2::new(200.0, y),
                window: Entity::PLACEHOLDER,
                force: None,
                id: 1,
            });
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(touch_input_system);
        schedule.run(&mut world);

        assert_eq!(world.resource::<AltitudeState>().target_altitude(), 1000.0);
    }
}
