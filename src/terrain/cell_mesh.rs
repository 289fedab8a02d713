use bevy::prelude::*;

use super::gradient::stepped_gradient;
use super::hex_direction::HexDirection;
use super::hex_grid::{CellId, HexGrid};
use super::triangle::Triangle;
use crate::math::bevel_path;

/// Builds the triangles of one cell: its six interior wedges plus the seams
/// and corners it owns towards its forward neighbours.
///
/// Seams towards W, SW and SE belong to the neighbour on the other side, so
/// every gap in the grid is filled exactly once.
pub struct CellMeshBuilder<'a> {
    grid: &'a HexGrid,
}

impl<'a> CellMeshBuilder<'a> {
    /// Builder reading levels, grounds and wedges from `grid`.
    pub fn new(grid: &'a HexGrid) -> Self {
        Self { grid }
    }

    /// Cell-local triangles for `id`, relative to [`HexGrid::center`].
    pub fn build(&self, id: CellId) -> Vec<Triangle> {
        let cell = self.grid.cell(id);
        let color = cell.ground().color();
        let mut triangles = Vec::new();

        for dir in HexDirection::ALL {
            triangles.extend(
                cell.wedge(dir)
                    .triangles
                    .iter()
                    .map(|&points| Triangle::flat(points, color)),
            );
            if dir.is_forward() {
                self.stitch(id, dir, &mut triangles);
            }
        }
        triangles
    }

    fn stitch(&self, id: CellId, dir: HexDirection, out: &mut Vec<Triangle>) {
        let grid = self.grid;
        let Some(n1) = grid.neighbor(id, dir) else {
            return;
        };
        let here = grid.center(id);
        let own = grid.cell(id).wedge(dir).triangles;
        let other = grid
            .cell(n1)
            .wedge(dir.opposite())
            .translated(grid.center(n1) - here)
            .triangles;
        let steps01 = grid.steps_between(id, n1);
        let c0 = grid.cell(id).ground().color();
        let c1 = grid.cell(n1).ground().color();

        for (near, far) in [(own[1], other[0]), (own[0], other[1])] {
            out.extend(bevel_strip(steps01, [near[1], near[2]], [far[2], far[1]], c0, c1));
        }

        let side = dir.next(1);
        let Some(n2) = grid.neighbor(id, side) else {
            return;
        };
        let p2 = grid.cell(n2).wedge(side.opposite()).triangles[1][2] - here + grid.center(n2);
        out.extend(corner(
            [own[1][2], other[0][1], p2],
            [steps01, grid.steps_between(id, n2), grid.steps_between(n1, n2)],
            [c0, c1, grid.cell(n2).ground().color()],
        ));
    }
}

/// Quad strip between the edge `near` of one cell and the facing edge `far`
/// of its neighbour, stepped down or up `steps` levels.
fn bevel_strip(steps: u32, near: [Vec3; 2], far: [Vec3; 2], c0: Srgba, c1: Srgba) -> Vec<Triangle> {
    let b1 = bevel_path(near[0], far[0], steps);
    let b2 = bevel_path(near[1], far[1], steps);
    let colors = (c0 != c1).then(|| stepped_gradient(c0, c1, steps));

    let mut out = Vec::with_capacity(2 * (b1.len() - 1));
    for i in 0..b1.len() - 1 {
        let first = [b1[i], b1[i + 1], b2[i]];
        let second = [b2[i], b1[i + 1], b2[i + 1]];
        match &colors {
            Some(g) => {
                out.push(Triangle::shaded(first, [g[i], g[i + 1], g[i]]));
                out.push(Triangle::shaded(second, [g[i], g[i + 1], g[i + 1]]));
            }
            None => {
                out.push(Triangle::flat(first, c0));
                out.push(Triangle::flat(second, c0));
            }
        }
    }
    out
}

/// Fills the triangular gap where three cells meet.
///
/// `steps` are the level differences along the edges `p0-p1`, `p0-p2` and
/// `p1-p2`. The points wind counter-clockwise seen from above.
fn corner(points: [Vec3; 3], steps: [u32; 3], colors: [Srgba; 3]) -> Vec<Triangle> {
    let [p0, p1, p2] = points;
    let [s01, s02, s12] = steps;
    let [c0, c1, c2] = colors;

    if s01 == 0 && s02 == 0 && s12 == 0 {
        return vec![Triangle::shaded(points, colors)];
    }

    // One flat edge: the two level cells share a terrace towards the third.
    if s01 == 0 && s02 == s12 {
        return flat_corner([p2, p0, p1], s02, [c2, c0, c1]);
    }
    if s02 == 0 && s01 == s12 {
        return flat_corner([p1, p2, p0], s01, [c1, c2, c0]);
    }
    if s12 == 0 && s01 == s02 {
        return flat_corner(points, s01, colors);
    }

    // Three distinct levels: the longest edge runs past the middle cell.
    if s01 > s02 && s01 > s12 {
        return stepped_corner(points, [s01, s02, s12], colors);
    }
    if s02 > s01 && s02 > s12 {
        return stepped_corner([p2, p0, p1], [s02, s12, s01], [c2, c0, c1]);
    }
    stepped_corner([p1, p2, p0], [s12, s01, s02], [c1, c2, c0])
}

/// Corner where `p1` and `p2` share a level and `p0` is `steps` away from both.
fn flat_corner(points: [Vec3; 3], steps: u32, colors: [Srgba; 3]) -> Vec<Triangle> {
    let [p0, p1, p2] = points;
    let [c0, c1, c2] = colors;
    let b1 = bevel_path(p0, p1, steps);
    let b2 = bevel_path(p0, p2, steps);
    let g1 = stepped_gradient(c0, c1, steps);
    let g2 = stepped_gradient(c0, c2, steps);

    let mut out = Vec::with_capacity(2 * b1.len() - 3);
    out.push(Triangle::shaded([p0, b1[1], b2[1]], [c0, g1[1], g2[1]]));
    for i in 1..b1.len() - 1 {
        out.push(Triangle::shaded(
            [b1[i], b1[i + 1], b2[i]],
            [g1[i], g1[i + 1], g2[i]],
        ));
        out.push(Triangle::shaded(
            [b2[i], b1[i + 1], b2[i + 1]],
            [g2[i], g1[i + 1], g2[i + 1]],
        ));
    }
    out
}

/// Corner over three distinct levels, `p2` lying between `p0` and `p1`.
///
/// The long staircase `p0 → p1` is zipped first against `p0 → p2`, then,
/// after a pivot triangle at `p2`, against `p2 → p1`.
fn stepped_corner(points: [Vec3; 3], steps: [u32; 3], colors: [Srgba; 3]) -> Vec<Triangle> {
    let [p0, p1, p2] = points;
    let [s01, s02, s12] = steps;
    let [c0, c1, c2] = colors;
    debug_assert_eq!(s01, s02 + s12, "corner levels must be ordered");

    let b01 = bevel_path(p0, p1, s01);
    let b02 = bevel_path(p0, p2, s02);
    let b12 = bevel_path(p2, p1, s12);
    let g01 = stepped_gradient(c0, c1, s01);
    let g02 = stepped_gradient(c0, c2, s02);
    let g12 = stepped_gradient(c2, c1, s12);

    let mut out = Vec::with_capacity(2 * (b02.len() - 1) + 2 * (b12.len() - 2) + 1);
    let mut i01 = 0;
    for i02 in 0..b02.len() - 1 {
        out.push(Triangle::shaded(
            [b01[i01], b01[i01 + 1], b02[i02]],
            [g01[i01], g01[i01 + 1], g02[i02]],
        ));
        out.push(Triangle::shaded(
            [b02[i02], b01[i01 + 1], b02[i02 + 1]],
            [g02[i02], g01[i01 + 1], g02[i02 + 1]],
        ));
        i01 += 1;
    }

    out.push(Triangle::shaded([p2, b01[i01], b12[1]], [c2, g01[i01], g12[1]]));

    for i12 in 1..b12.len() - 1 {
        out.push(Triangle::shaded(
            [b01[i01], b01[i01 + 1], b12[i12]],
            [g01[i01], g01[i01 + 1], g12[i12]],
        ));
        out.push(Triangle::shaded(
            [b12[i12], b01[i01 + 1], b12[i12 + 1]],
            [g12[i12], g01[i01 + 1], g12[i12 + 1]],
        ));
        i01 += 1;
    }
    out
}

/// Lazily built, cached cell meshes for one [`HexGrid`].
///
/// A slot holding `None` is dirty and gets rebuilt on the next [`Self::mesh`].
#[derive(Clone, Debug, Default)]
pub struct CellMeshes {
    meshes: Vec<Option<Vec<Triangle>>>,
}

impl CellMeshes {
    /// Empty cache for a grid of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            meshes: vec![None; len],
        }
    }

    /// Triangles of `id`, building them first if the slot is dirty.
    pub fn mesh(&mut self, grid: &HexGrid, id: CellId) -> &[Triangle] {
        self.meshes[id.index()].get_or_insert_with(|| CellMeshBuilder::new(grid).build(id))
    }

    /// Marks one cell dirty.
    pub fn invalidate(&mut self, id: CellId) {
        self.meshes[id.index()] = None;
    }

    /// Marks a cell and every neighbour whose seams face it dirty.
    pub fn invalidate_around(&mut self, grid: &HexGrid, id: CellId) {
        self.invalidate(id);
        for dir in HexDirection::ALL {
            if let Some(n) = grid.neighbor(id, dir) {
                self.invalidate(n);
            }
        }
    }

    /// Marks every cell dirty.
    pub fn invalidate_all(&mut self) {
        self.meshes.iter_mut().for_each(|m| *m = None);
    }

    /// True when `id` has a built mesh.
    pub fn is_cached(&self, id: CellId) -> bool {
        self.meshes[id.index()].is_some()
    }
}
