use bevy::prelude::*;

use super::cell_mesh::CellMeshes;
use super::ground::GroundType;
use super::hex_grid::{CellId, HexGrid};
use super::triangle::Triangle;

/// Central component holding the generated grid and its mesh cache.
///
/// Spawned as a single entity that parents all [`HexCellView`] entities.
#[derive(Component)]
pub struct Landscape {
    /// Cells with their levels, grounds and wedges.
    pub grid: HexGrid,
    /// Lazily built cell triangles.
    pub meshes: CellMeshes,
}

impl Landscape {
    /// Wraps a generated grid with an empty mesh cache.
    pub fn new(grid: HexGrid) -> Self {
        let meshes = CellMeshes::new(grid.len());
        Self { grid, meshes }
    }

    /// Triangles of `id`, built on first access.
    pub fn mesh(&mut self, id: CellId) -> &[Triangle] {
        self.meshes.mesh(&self.grid, id)
    }

    /// Swaps in a freshly generated grid and drops every cached mesh.
    pub fn replace(&mut self, grid: HexGrid) {
        self.meshes = CellMeshes::new(grid.len());
        self.grid = grid;
    }
}

/// Inspector-facing snapshot of one cell, on the entity that renders it.
#[derive(Component, Reflect, Clone, Debug)]
pub struct HexCellView {
    /// Arena index in [`Landscape::grid`].
    pub id: CellId,
    /// Grid column.
    pub col: usize,
    /// Grid row.
    pub row: usize,
    /// Elevation in levels.
    pub level: i32,
    /// Surface material.
    pub ground: GroundType,
}

impl HexCellView {
    /// Snapshot of `id` as currently generated in `grid`.
    pub fn new(grid: &HexGrid, id: CellId) -> Self {
        let (col, row) = grid.coords(id);
        let cell = grid.cell(id);
        Self {
            id,
            col,
            row,
            level: cell.level(),
            ground: cell.ground(),
        }
    }

    /// Short label drawn over the cell in the inspector overlay.
    pub fn label(&self) -> String {
        format!("L{} {:?}", self.level, self.ground)
    }
}

/// Marker: the cell's [`Mesh3d`] is stale and must be rebuilt from the
/// [`Landscape`] cache.
#[derive(Component, Reflect, Default)]
pub struct RebuildMesh;

/// Shared vertex-colored material used by every cell.
#[derive(Resource)]
pub struct LandscapeMaterial(pub Handle<StandardMaterial>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::random::SeededRandom;
    use crate::terrain::{GridSettings, ShapeSettings};

    fn landscape() -> Landscape {
        let settings = GridSettings {
            width: 3,
            height: 2,
            cell_size: 1.0,
        };
        let grid = HexGrid::new(&settings, &ShapeSettings::default(), &mut SeededRandom::new(1));
        Landscape::new(grid)
    }

    #[test]
    fn view_mirrors_the_cell() {
        let mut l = landscape();
        let id = l.grid.id(2, 1).unwrap();
        l.grid.cell_mut(id).set_level(-4);
        l.grid.cell_mut(id).set_ground(GroundType::Sand);
        let view = HexCellView::new(&l.grid, id);
        assert_eq!((view.col, view.row, view.level), (2, 1, -4));
        assert_eq!(view.label(), "L-4 Sand");
    }

    #[test]
    fn replace_drops_cached_meshes() {
        let mut l = landscape();
        let id = l.grid.id(0, 0).unwrap();
        assert!(!l.mesh(id).is_empty());
        assert!(l.meshes.is_cached(id));
        let fresh = l.grid.clone();
        l.replace(fresh);
        assert!(!l.meshes.is_cached(id));
    }
}
