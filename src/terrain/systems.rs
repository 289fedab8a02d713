use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use bevy_egui::egui;

use super::TerrainConfig;
use super::entities::{HexCellView, Landscape, LandscapeMaterial, RebuildMesh};
use super::startup_systems::{build_grid, cell_transform, spawn_landscape};
use super::triangle::Triangle;
use crate::camera::TerrainCamera;
use crate::math;

// ── Update: meshing ────────────────────────────────────────────────

/// Builds a [`Mesh3d`] for every cell flagged with [`RebuildMesh`] from the
/// [`Landscape`] cache, then clears the flag.
pub fn rebuild_cell_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut landscape_q: Query<&mut Landscape>,
    cells: Query<(Entity, &HexCellView, &ChildOf), With<RebuildMesh>>,
) {
    let mut rebuilt = 0;
    for (entity, view, child_of) in &cells {
        let Ok(mut landscape) = landscape_q.get_mut(child_of.parent()) else {
            continue;
        };
        let mesh = triangles_to_mesh(landscape.mesh(view.id));
        commands
            .entity(entity)
            .insert(Mesh3d(meshes.add(mesh)))
            .remove::<RebuildMesh>();
        rebuilt += 1;
    }
    debug!(rebuilt, "rebuilt cell meshes");
}

// ── Update: regeneration ───────────────────────────────────────────

/// Regenerates the landscape with the next seed when R is pressed.
///
/// With unchanged dimensions the existing cell entities are moved to their new
/// heights and flagged for a mesh rebuild. If the grid was resized in the
/// inspector, the whole landscape is despawned and spawned again.
pub fn regenerate_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut cfg: ResMut<TerrainConfig>,
    material: Res<LandscapeMaterial>,
    mut landscape_q: Query<(Entity, &mut Landscape)>,
    mut cells: Query<(Entity, &mut HexCellView, &mut Transform)>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    let Ok((landscape_entity, mut landscape)) = landscape_q.single_mut() else {
        return;
    };
    if let Err(err) = cfg.validate() {
        warn!(%err, "not regenerating from an invalid config");
        return;
    }

    cfg.relief.seed = cfg.relief.seed.wrapping_add(1);
    let grid = build_grid(&cfg);
    info!(seed = cfg.relief.seed, "regenerating landscape");

    if grid.len() != landscape.grid.len() {
        commands.entity(landscape_entity).despawn();
        spawn_landscape(&mut commands, grid, &material.0);
        return;
    }

    for (entity, mut view, mut transform) in &mut cells {
        *view = HexCellView::new(&grid, view.id);
        *transform = cell_transform(&grid, view.id);
        commands.entity(entity).insert(RebuildMesh);
    }
    landscape.replace(grid);
}

// ── Update: debug overlay ──────────────────────────────────────────

/// Draws `L<level> <ground>` over every cell near the camera as a
/// screen-projected egui label.
pub fn draw_cell_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<TerrainCamera>>,
    cells: Query<(&GlobalTransform, &HexCellView)>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let cam_pos = cam_gt.translation();

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for (cell_gt, view) in &cells {
        let world_pos = cell_gt.translation();
        if cam_pos.distance(world_pos) > 10.0 {
            continue;
        }
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, world_pos) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                view.label(),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }
}

// ── Pure helpers ───────────────────────────────────────────────────

/// Converts cell-local Z-up triangles into a render-space triangle list with
/// per-vertex normals and linear vertex colors.
pub fn triangles_to_mesh(triangles: &[Triangle]) -> Mesh {
    let count = triangles.len() * 3;
    let mut positions = Vec::with_capacity(count);
    let mut normals = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for tri in triangles {
        for i in 0..3 {
            positions.push(math::to_render_space(tri.points[i]).to_array());
            normals.push(math::to_render_space(tri.normal.at(i)).to_array());
            colors.push(LinearRgba::from(tri.color.at(i)).to_f32_array());
        }
    }
    let indices = (0..count as u32).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}
