//! Day/night cycle.
//!
//! A single directional light orbits the landscape in the X/Z plane of the
//! terrain. Over each half-cycle it rises, passes overhead and sets; its tint
//! shifts from sunrise to sunset colors by day and from moonrise to moonset
//! by night.

mod entities;
mod systems;

pub use entities::{DayCycle, LightSample, Sun};

use bevy::prelude::*;

/// Per-plugin configuration for the day/night light.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct DaylightConfig {
    /// Length of one day (or one night) in milliseconds.
    pub half_day_ms: u32,
    /// Directional light illuminance at unit attenuation, in lux.
    pub illuminance: f32,
    /// Multiplier applied to real time before it reaches the cycle.
    pub time_scale: f32,
}

impl Default for DaylightConfig {
    fn default() -> Self {
        Self {
            half_day_ms: 12 * 60 * 1000,
            illuminance: 10_000.0,
            time_scale: 1.0,
        }
    }
}

/// Spawns the orbiting light and advances the [`DayCycle`] every frame.
pub struct DaylightPlugin(pub DaylightConfig);

impl Plugin for DaylightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DaylightConfig>()
            .register_type::<DayCycle>()
            .register_type::<Sun>()
            .insert_resource(self.0.clone())
            .insert_resource(DayCycle::new(self.0.half_day_ms))
            .add_systems(Startup, systems::spawn_sun)
            .add_systems(Update, (systems::advance_cycle, systems::place_sun).chain());
    }
}
