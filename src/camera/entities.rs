use bevy::prelude::*;

use super::CameraConfig;
use crate::math;

/// Marker component for the terrain camera entity.
#[derive(Component, Reflect)]
pub struct TerrainCamera;

/// Ground position and height of the camera, in terrain (Z-up) coordinates.
///
/// Systems mutate the rig; [`super::systems::apply_rig`] copies it onto the
/// camera transform.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraRig {
    /// Ground point the camera hovers over.
    pub position: Vec2,
    /// Eye height above the ground plane.
    pub scale: f32,
    min_scale: f32,
    max_scale: f32,
    look_ahead: f32,
}

impl CameraRig {
    /// Rig at the configured start, with the scale clamped into range.
    pub fn new(cfg: &CameraConfig) -> Self {
        Self {
            position: cfg.start,
            scale: cfg.start_scale.clamp(cfg.min_scale, cfg.max_scale),
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
            look_ahead: cfg.look_ahead,
        }
    }

    /// Lowers the eye by `amount` (raises it when negative), within limits.
    pub fn zoom(&mut self, amount: f32) {
        self.scale = (self.scale - amount).clamp(self.min_scale, self.max_scale);
    }

    /// Moves the ground point by `offset`.
    pub fn pan(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Eye position in terrain coordinates.
    pub fn eye(&self) -> Vec3 {
        self.position.extend(self.scale)
    }

    /// Look-at point on the ground plane in terrain coordinates.
    pub fn target(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y + self.look_ahead, 0.0)
    }

    /// Render-space camera transform for the rig.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(math::to_render_space(self.eye()))
            .looking_at(math::to_render_space(self.target()), Vec3::Y)
    }
}
