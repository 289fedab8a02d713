use bevy::prelude::*;

use super::TerrainConfig;
use super::entities::{HexCellView, Landscape, LandscapeMaterial, RebuildMesh};
use super::generator::TerrainGenerator;
use super::hex_grid::{CellId, HexGrid};
use super::random::SeededRandom;
use crate::math;

// ── Startup ─────────────────────────────────────────────────────────

/// Builds and generates a grid from `cfg`.
///
/// Sculpting and generation draw from one source seeded with
/// `cfg.relief.seed`, so the same config always yields the same landscape.
pub fn build_grid(cfg: &TerrainConfig) -> HexGrid {
    let mut rng = SeededRandom::new(cfg.relief.seed);
    let mut grid = HexGrid::new(&cfg.grid, &cfg.shape, &mut rng);
    TerrainGenerator::new(&cfg.relief).generate(&mut grid, &mut rng);
    grid
}

/// Render-space placement of a cell entity.
pub(super) fn cell_transform(grid: &HexGrid, id: CellId) -> Transform {
    Transform::from_translation(math::to_render_space(grid.center(id)))
}

/// Creates the shared cell material and spawns the initial landscape.
pub fn generate_landscape(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<TerrainConfig>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    commands.insert_resource(LandscapeMaterial(material.clone()));

    let grid = build_grid(&cfg);
    info!(
        width = grid.width(),
        height = grid.height(),
        seed = cfg.relief.seed,
        "spawning landscape"
    );
    spawn_landscape(&mut commands, grid, &material);
}

/// Spawns a [`Landscape`] parent for `grid` with one child per cell, each
/// flagged with [`RebuildMesh`] so its mesh is built on the next update.
pub(super) fn spawn_landscape(
    commands: &mut Commands,
    grid: HexGrid,
    material: &Handle<StandardMaterial>,
) {
    let cells: Vec<(HexCellView, Transform)> = grid
        .ids()
        .map(|id| (HexCellView::new(&grid, id), cell_transform(&grid, id)))
        .collect();

    let landscape_entity = commands
        .spawn((
            Name::new("Landscape"),
            Landscape::new(grid),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for (view, transform) in cells {
        let entity = commands
            .spawn((
                Name::new(format!("HexCell({},{})", view.col, view.row)),
                view,
                transform,
                Visibility::default(),
                MeshMaterial3d(material.clone()),
                RebuildMesh,
            ))
            .id();
        commands.entity(landscape_entity).add_child(entity);
    }
}
