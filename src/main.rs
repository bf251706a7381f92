use ascent::AscentPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ascent".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        // AscentPlugin loads assets/ascent.toml (if present) before any other
        // startup system, so every spawn sees the final config.
        .add_plugins(AscentPlugin)
        .run();
}
