//! HUD widgets and the system that projects [`HudTiming`] onto them.
//!
//! Layout:
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ALTITUDE                                    │
//! │ 2740m                                       │
//! │                                             │
//! │              RAINFOREST ZONE                │
//! │      "Lush, enveloping, damp silence."      │
//! │               SCROLL TO ASCEND              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The summit overlay is a separate root that replaces the whole layout once
//! the summit text is revealed.

use super::timing::{altitude_text, show_scroll_hint, HudTiming};
use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::zones::{zone, ZoneId};
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Which top-level layout a root node belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudPanel {
    Overlay,
    Summit,
}

/// Role of a HUD text node.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Caption,
    Altitude,
    ZoneName,
    ZoneQuote,
    ScrollHint,
    SummitHeading,
    SummitQuote,
}

impl HudText {
    /// Resting alpha before any fade is applied.
    fn base_alpha(self) -> f32 {
        match self {
            Self::Caption | Self::ScrollHint => 0.5,
            Self::ZoneQuote => 0.7,
            _ => 1.0,
        }
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn hud_white(alpha: f32) -> Color {
    Color::srgba(1.0, 1.0, 1.0, alpha)
}

fn summit_gold(alpha: f32) -> Color {
    Color::srgba(0.98, 0.90, 0.62, alpha)
}

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn spawn_hud(mut commands: Commands, config: Res<AscentConfig>, state: Res<AltitudeState>) {
    let font_size = config.hud_font_size;
    let altitude = state.altitude();
    let start_zone = zone(super::timing::label_zone(altitude));
    let summit = zone(ZoneId::Summit);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(32.0)),
                ..default()
            },
            HudPanel::Overlay,
        ))
        .with_children(|root| {
            // ── Altitude readout ──────────────────────────────────────────────
            root.spawn(Node {
                flex_direction: FlexDirection::Column,
                ..default()
            })
            .with_children(|col| {
                col.spawn((
                    Text::new("ALTITUDE"),
                    TextFont {
                        font_size: font_size * 0.33,
                        ..default()
                    },
                    TextColor(hud_white(HudText::Caption.base_alpha())),
                    HudText::Caption,
                ));
                col.spawn((
                    Text::new(altitude_text(altitude)),
                    TextFont {
                        font_size,
                        ..default()
                    },
                    TextColor(hud_white(1.0)),
                    HudText::Altitude,
                ));
            });

            // ── Zone label + hint ─────────────────────────────────────────────
            root.spawn(Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            })
            .with_children(|col| {
                col.spawn((
                    Text::new(start_zone.name.to_uppercase()),
                    TextFont {
                        font_size: font_size * 0.6,
                        ..default()
                    },
                    TextColor(hud_white(1.0)),
                    HudText::ZoneName,
                ));
                col.spawn((
                    Text::new(format!("\"{}\"", start_zone.quote)),
                    TextFont {
                        font_size: font_size * 0.4,
                        ..default()
                    },
                    TextColor(hud_white(HudText::ZoneQuote.base_alpha())),
                    HudText::ZoneQuote,
                ));
                col.spawn((
                    Text::new("SCROLL TO ASCEND"),
                    TextFont {
                        font_size: font_size * 0.33,
                        ..default()
                    },
                    TextColor(hud_white(HudText::ScrollHint.base_alpha())),
                    Node {
                        margin: UiRect::top(Val::Px(24.0)),
                        ..default()
                    },
                    HudText::ScrollHint,
                ));
            });
        });

    // ── Summit overlay ────────────────────────────────────────────────────────
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            Visibility::Hidden,
            HudPanel::Summit,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("UHURU PEAK"),
                TextFont {
                    font_size: font_size * 1.5,
                    ..default()
                },
                TextColor(summit_gold(0.0)),
                HudText::SummitHeading,
            ));
            root.spawn((
                Text::new(format!("\"{}\"", summit.quote)),
                TextFont {
                    font_size: font_size * 0.5,
                    ..default()
                },
                TextColor(hud_white(0.0)),
                HudText::SummitQuote,
            ));
        });

    info!("[hud] Spawned overlay at {}", altitude_text(altitude));
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Copy text, fades, and panel visibility from [`HudTiming`] onto the widgets.
pub fn sync_hud_system(
    timing: Res<HudTiming>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut panels: Query<(&HudPanel, &mut Visibility)>,
    mut texts: Query<(&HudText, &mut Text, &mut TextColor)>,
) {
    let altitude = state.altitude();
    let displayed = zone(timing.zone.displayed);

    for (panel, mut visibility) in panels.iter_mut() {
        let shown = match panel {
            HudPanel::Overlay => timing.overlay_mounted(),
            HudPanel::Summit => timing.summit.shown,
        };
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    let overlay = timing.overlay_opacity.value;
    let label = overlay * timing.label_opacity.value;
    let summit = timing.summit_opacity.value;

    for (role, mut text, mut color) in texts.iter_mut() {
        let alpha = role.base_alpha();
        match role {
            HudText::Caption => color.0 = hud_white(alpha * overlay),
            HudText::Altitude => {
                let s = altitude_text(altitude);
                if text.0 != s {
                    *text = Text::new(s);
                }
                color.0 = hud_white(alpha * overlay);
            }
            HudText::ZoneName => {
                let s = displayed.name.to_uppercase();
                if text.0 != s {
                    *text = Text::new(s);
                }
                color.0 = hud_white(alpha * label);
            }
            HudText::ZoneQuote => {
                let s = format!("\"{}\"", displayed.quote);
                if text.0 != s {
                    *text = Text::new(s);
                }
                color.0 = hud_white(alpha * label);
            }
            HudText::ScrollHint => {
                let hint = show_scroll_hint(altitude, config.scroll_hint_altitude);
                let a = if hint { alpha * overlay } else { 0.0 };
                color.0 = hud_white(a);
            }
            HudText::SummitHeading => color.0 = summit_gold(alpha * summit),
            HudText::SummitQuote => color.0 = hud_white(0.8 * summit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn hud_world(altitude: f32) -> World {
        let mut world = World::new();
        let config = AscentConfig::default();
        world.insert_resource(HudTiming::new(altitude, &config));
        world.insert_resource(config);
        world.insert_resource(AltitudeState::at(altitude));
        world
    }

    fn spawn_text(world: &mut World, role: HudText) -> Entity {
        world
            .spawn((role, Text::new(""), TextColor(Color::WHITE)))
            .id()
    }

    fn sync(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(sync_hud_system);
        schedule.run(world);
    }

    #[test]
    fn altitude_and_zone_text_follow_state() {
        let mut world = hud_world(2740.4);
        let alt = spawn_text(&mut world, HudText::Altitude);
        let name = spawn_text(&mut world, HudText::ZoneName);
        sync(&mut world);

        assert_eq!(world.get::<Text>(alt).unwrap().0, "2740m");
        assert_eq!(world.get::<Text>(name).unwrap().0, "RAINFOREST ZONE");
    }

    #[test]
    fn scroll_hint_disappears_above_850() {
        let mut world = hud_world(800.0);
        let hint = spawn_text(&mut world, HudText::ScrollHint);
        sync(&mut world);
        assert!(world.get::<TextColor>(hint).unwrap().0.alpha() > 0.0);

        world.insert_resource(AltitudeState::at(900.0));
        sync(&mut world);
        assert_eq!(world.get::<TextColor>(hint).unwrap().0.alpha(), 0.0);
    }

    #[test]
    fn summit_overlay_replaces_general_overlay() {
        let mut world = hud_world(5950.0);
        let overlay = world.spawn((HudPanel::Overlay, Visibility::Inherited)).id();
        let summit = world.spawn((HudPanel::Summit, Visibility::Hidden)).id();

        let config = AscentConfig::default();
        {
            let mut timing = world.resource_mut::<HudTiming>();
            timing.update(5950.0, Duration::from_millis(16), &config);
            timing.update(5950.0, Duration::from_millis(1000), &config);
        }
        sync(&mut world);

        assert_eq!(*world.get::<Visibility>(overlay).unwrap(), Visibility::Hidden);
        assert_eq!(*world.get::<Visibility>(summit).unwrap(), Visibility::Inherited);
    }
}
