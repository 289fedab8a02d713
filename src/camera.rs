//! Top-down pan/zoom camera.
//!
//! The rig hovers `scale` units above a ground point and looks a few units
//! north of it. Mouse wheel zooms; dragging with the left button grabs the
//! ground under the cursor and drags the landscape along.

mod entities;
mod systems;

pub use entities::{CameraRig, TerrainCamera};

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for the terrain camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Initial ground position under the camera, in terrain coordinates.
    pub start: Vec2,
    /// Initial eye height.
    pub start_scale: f32,
    /// Lowest eye height.
    pub min_scale: f32,
    /// Highest eye height.
    pub max_scale: f32,
    /// How far north of the ground position the camera looks.
    pub look_ahead: f32,
    /// Eye height change per scroll line.
    pub zoom_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(2.0, -4.0),
            start_scale: 5.0,
            min_scale: 2.0,
            max_scale: 20.0,
            look_ahead: 3.0,
            zoom_sensitivity: 0.15,
            fov_degrees: 45.0,
        }
    }
}

/// Top-down camera with mouse-wheel zoom and left-drag panning.
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TerrainCamera>()
            .register_type::<CameraConfig>()
            .register_type::<CameraRig>()
            .insert_resource(self.0.clone())
            .insert_resource(CameraRig::new(&self.0))
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                (systems::zoom, systems::pan)
                    .chain()
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(Update, systems::apply_rig.after(systems::pan));
    }
}
