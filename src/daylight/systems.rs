use bevy::prelude::*;

use super::DaylightConfig;
use super::entities::{DayCycle, Sun};
use crate::math;
use crate::terrain::Landscape;

/// Spawns the directional light that [`place_sun`] moves around.
pub fn spawn_sun(mut commands: Commands, cfg: Res<DaylightConfig>) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: cfg.illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        Sun,
    ));
}

/// Feeds scaled frame time into the [`DayCycle`] in whole milliseconds,
/// carrying the fractional remainder to the next frame.
pub fn advance_cycle(
    time: Res<Time>,
    cfg: Res<DaylightConfig>,
    mut cycle: ResMut<DayCycle>,
    mut carry_ms: Local<f32>,
) {
    *carry_ms += time.delta_secs() * 1000.0 * cfg.time_scale.max(0.0);
    let whole = carry_ms.floor();
    if whole < 1.0 {
        return;
    }
    *carry_ms -= whole;
    cycle.tick(whole as u32);
}

/// Moves and tints the [`Sun`] for the current point of the cycle, orbiting
/// the center of the landscape.
pub fn place_sun(
    cycle: Res<DayCycle>,
    cfg: Res<DaylightConfig>,
    landscape_q: Query<&Landscape>,
    mut sun_q: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) {
    let Ok(landscape) = landscape_q.single() else {
        return;
    };
    let Ok((mut light, mut transform)) = sun_q.single_mut() else {
        return;
    };

    let grid = &landscape.grid;
    let center = grid.world_center();
    let radius = 2.0 * grid.width() as f32 * grid.cell_size();
    let sample = cycle.sample(center, radius);

    light.color = sample.color;
    light.illuminance = cfg.illuminance / sample.attenuation;
    *transform = Transform::from_translation(math::to_render_space(sample.position))
        .looking_at(math::to_render_space(center.extend(0.0)), Vec3::NEG_Z);
}
