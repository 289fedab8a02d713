use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::view::Hdr;
use bevy::window::PrimaryWindow;

use super::CameraConfig;
use super::entities::{CameraRig, TerrainCamera};
use crate::math;

/// Spawns the Camera3d entity at the rig's start position.
pub fn spawn_camera(mut commands: Commands, rig: Res<CameraRig>, cfg: Res<CameraConfig>) {
    commands.spawn((
        Name::new("TerrainCamera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Projection::Perspective(PerspectiveProjection {
            fov: cfg.fov_degrees.to_radians(),
            ..default()
        }),
        rig.transform(),
        TerrainCamera,
    ));
}

/// Mouse wheel moves the eye closer to or further from the ground.
pub fn zoom(
    mut scroll: MessageReader<MouseWheel>,
    cfg: Res<CameraConfig>,
    mut rig: ResMut<CameraRig>,
) {
    for ev in scroll.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        };
        rig.zoom(lines * cfg.zoom_sensitivity);
    }
}

/// Left-drag keeps the ground point under the cursor pinned to it.
///
/// The previous and current cursor positions are both cast onto the ground
/// plane; the rig moves by the difference.
pub fn pan(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<TerrainCamera>>,
    mut rig: ResMut<CameraRig>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let (Some(cursor), true) = (cursor, buttons.pressed(MouseButton::Left)) else {
        *last_cursor = None;
        return;
    };
    let Some(previous) = last_cursor.replace(cursor) else {
        return;
    };
    if previous == cursor {
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };

    let ground = |screen: Vec2| {
        let ray = camera.viewport_to_world(cam_gt, screen).ok()?;
        math::intersect_ground(ray.origin, *ray.direction).map(math::from_render_space)
    };
    if let (Some(from), Some(to)) = (ground(previous), ground(cursor)) {
        rig.pan((from - to).truncate());
    }
}

/// Copies the rig onto the camera transform when it changed.
pub fn apply_rig(rig: Res<CameraRig>, mut query: Query<&mut Transform, With<TerrainCamera>>) {
    if !rig.is_changed() {
        return;
    }
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    *transform = rig.transform();
}
