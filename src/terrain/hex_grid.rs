use bevy::prelude::*;

use super::ground::GroundType;
use super::hex_direction::HexDirection;
use super::random::RandomSource;
use super::{GridSettings, ShapeSettings};

/// Index of a cell inside its [`HexGrid`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct CellId(usize);

impl CellId {
    /// Position in the grid's row-major cell storage.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One sixth of a cell's interior: two triangles fanning out from the center
/// towards a direction.
///
/// `triangles[0]` is `(center, rim(α-30°), mid(α))` and `triangles[1]` is
/// `(center, mid(α), rim(α+30°))`, all relative to the cell center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wedge {
    /// The two fan triangles.
    pub triangles: [[Vec3; 3]; 2],
}

impl Wedge {
    /// Same wedge with every point moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            triangles: self.triangles.map(|tri| tri.map(|p| p + offset)),
        }
    }
}

/// A single terrain cell.
#[derive(Clone, Debug)]
pub struct HexCell {
    position: Vec2,
    level: i32,
    ground: GroundType,
    neighbors: [Option<CellId>; 6],
    wedges: [Wedge; 6],
}

impl HexCell {
    /// Center on the ground plane.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Elevation in discrete steps.
    pub fn level(&self) -> i32 {
        self.level
    }

    /// Surface material.
    pub fn ground(&self) -> GroundType {
        self.ground
    }

    /// Neighbour in `dir`, if any.
    pub fn neighbor(&self, dir: HexDirection) -> Option<CellId> {
        self.neighbors[dir.index()]
    }

    /// Interior geometry facing `dir`, relative to the cell center.
    pub fn wedge(&self, dir: HexDirection) -> &Wedge {
        &self.wedges[dir.index()]
    }

    pub(crate) fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub(crate) fn set_ground(&mut self, ground: GroundType) {
        self.ground = ground;
    }
}

/// Rectangular offset-coordinate hex grid stored as a dense arena.
///
/// Even rows are shifted half a cell to the east. Cells are stored row-major,
/// so `(col, row)` lives at `row * width + col`.
#[derive(Clone, Debug)]
pub struct HexGrid {
    width: usize,
    height: usize,
    cell_size: f32,
    level_step: f32,
    cells: Vec<HexCell>,
}

impl HexGrid {
    /// Lays out `width × height` cells, sculpts each cell's wedges from `rng`
    /// and wires the neighbour links.
    ///
    /// Every cell starts at level 0 covered in grass.
    pub fn new(grid: &GridSettings, shape: &ShapeSettings, rng: &mut impl RandomSource) -> Self {
        let width = grid.width as usize;
        let height = grid.height as usize;
        let s = grid.cell_size;
        let dx = s * 3f32.sqrt() / 2.0;
        let dy = 0.75 * s;

        let mut chisel = Chisel::new(grid, shape, rng);
        let mut cells = Vec::with_capacity(width * height);
        for j in 0..height {
            let shift = if j % 2 == 0 { dx / 2.0 } else { 0.0 };
            for i in 0..width {
                cells.push(HexCell {
                    position: Vec2::new(i as f32 * dx + shift, j as f32 * dy),
                    level: 0,
                    ground: GroundType::default(),
                    neighbors: [None; 6],
                    wedges: chisel.sculpt(),
                });
            }
        }

        let mut grid = Self {
            width,
            height,
            cell_size: s,
            level_step: shape.level_step,
            cells,
        };
        grid.wire();
        grid
    }

    fn wire(&mut self) {
        for j in 0..self.height {
            let even = j % 2 == 0;
            for i in 0..self.width {
                let Some(here) = self.id(i, j) else { continue };
                if let Some(east) = self.id(i + 1, j) {
                    self.set_neighbour(here, HexDirection::E, east);
                }
                let ne = if even { i + 1 } else { i };
                if let Some(ne) = self.id(ne, j + 1) {
                    self.set_neighbour(here, HexDirection::NE, ne);
                }
                let nw = if even { Some(i) } else { i.checked_sub(1) };
                if let Some(nw) = nw.and_then(|c| self.id(c, j + 1)) {
                    self.set_neighbour(here, HexDirection::NW, nw);
                }
            }
        }
    }

    /// Links `b` as `a`'s neighbour in `dir` and `a` as `b`'s neighbour in the
    /// opposite direction. Linking a cell to itself is ignored.
    pub fn set_neighbour(&mut self, a: CellId, dir: HexDirection, b: CellId) {
        if a == b {
            return;
        }
        self.cells[a.0].neighbors[dir.index()] = Some(b);
        self.cells[b.0].neighbors[dir.opposite().index()] = Some(a);
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance between opposite corners of a cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a grid without cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell id in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cells.len()).map(CellId)
    }

    /// Cell at column `col`, row `row`.
    pub fn id(&self, col: usize, row: usize) -> Option<CellId> {
        if col < self.width && row < self.height {
            Some(CellId(row * self.width + col))
        } else {
            None
        }
    }

    /// `(col, row)` of a cell.
    pub fn coords(&self, id: CellId) -> (usize, usize) {
        (id.0 % self.width, id.0 / self.width)
    }

    /// Borrow a cell.
    pub fn cell(&self, id: CellId) -> &HexCell {
        &self.cells[id.0]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut HexCell {
        &mut self.cells[id.0]
    }

    /// Neighbour of `id` in `dir`, if any.
    pub fn neighbor(&self, id: CellId, dir: HexDirection) -> Option<CellId> {
        self.cells[id.0].neighbor(dir)
    }

    /// World center of a cell, Z-up, with the height taken from its level.
    pub fn center(&self, id: CellId) -> Vec3 {
        let cell = &self.cells[id.0];
        cell.position.extend(cell.level as f32 * self.level_step)
    }

    /// Level difference between two cells.
    pub fn steps_between(&self, a: CellId, b: CellId) -> u32 {
        self.cells[a.0].level.abs_diff(self.cells[b.0].level)
    }

    /// Middle of the ground-plane bounding box of all cell centers.
    pub fn world_center(&self) -> Vec2 {
        let (min, max) = self.cells.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), c| (min.min(c.position), max.max(c.position)),
        );
        if self.cells.is_empty() {
            Vec2::ZERO
        } else {
            (min + max) / 2.0
        }
    }
}

/// Draws the jittered interior vertices of a cell.
struct Chisel<'r, R> {
    rng: &'r mut R,
    radius: f32,
    noise: f32,
    z_noise: f32,
}

impl<'r, R: RandomSource> Chisel<'r, R> {
    fn new(grid: &GridSettings, shape: &ShapeSettings, rng: &'r mut R) -> Self {
        Self {
            rng,
            radius: shape.inner_area_ratio * grid.cell_size / 2.0,
            noise: shape.noise_level,
            z_noise: (1.0 - shape.noise_level) * shape.level_step,
        }
    }

    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.next_double() as f32 * (max - min)
    }

    fn height(&mut self) -> f32 {
        self.uniform(-self.z_noise, self.z_noise)
    }

    fn vertex(&mut self, angle_degrees: f32, min_scale: f32) -> Vec3 {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let x = self.radius * cos * self.uniform(min_scale, 1.0);
        let y = self.radius * sin * self.uniform(min_scale, 1.0);
        Vec3::new(x, y, self.height())
    }

    fn sculpt(&mut self) -> [Wedge; 6] {
        let center = Vec3::new(0.0, 0.0, self.height());
        let first = self.vertex(-30.0, self.noise);
        let mut start = first;
        let mut wedges = [Wedge::default(); 6];
        for (i, wedge) in wedges.iter_mut().enumerate() {
            let alpha = 60.0 * i as f32;
            let end = if i == 5 {
                first
            } else {
                self.vertex(alpha + 30.0, self.noise)
            };
            let mid = self.vertex(alpha, self.noise * self.noise);
            wedge.triangles = [[center, start, mid], [center, mid, end]];
            start = end;
        }
        wedges
    }
}
