//! Procedural hex landscape viewer.
//!
//! Mouse wheel zooms, left-drag pans, R regenerates with the next seed, Tab
//! toggles the world inspector and Esc quits.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hex_landscape::GameState;
use hex_landscape::camera::{CameraConfig, CameraPlugin};
use hex_landscape::daylight::{DaylightConfig, DaylightPlugin};
use hex_landscape::terrain::{TerrainConfig, TerrainPlugin};

fn main() {
    #[allow(unused_mut)]
    let mut terrain = TerrainConfig::default();
    #[cfg(feature = "native")]
    {
        use clap::Parser;
        hex_landscape::cli::Args::parse().apply(&mut terrain);
    }
    if let Err(err) = terrain.validate() {
        eprintln!("invalid configuration: {err}");
        std::process::exit(2);
    }

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Hex Landscape".into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "info,hex_landscape=debug".into(),
                ..default()
            }),
    )
    .register_type::<GameState>()
    .init_state::<GameState>();

    #[cfg(feature = "native")]
    app.add_plugins(bevy::remote::RemotePlugin::default())
        .add_plugins(bevy::remote::http::RemoteHttpPlugin::default());

    app.add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(TerrainPlugin(terrain))
        .add_plugins(CameraPlugin(CameraConfig::default()))
        .add_plugins(DaylightPlugin(DaylightConfig::default()))
        .add_systems(Update, exit_on_esc)
        .add_systems(Update, toggle_inspector)
        .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Inspecting)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Inspecting,
            GameState::Inspecting => GameState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
