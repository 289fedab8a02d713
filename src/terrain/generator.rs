use std::collections::VecDeque;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::ReliefSettings;
use super::ground::GroundType;
use super::hex_direction::HexDirection;
use super::hex_grid::{CellId, HexGrid};
use super::random::RandomSource;

/// Elevation feature grown by a single flood fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    /// Snow-capped peak descending to zero level.
    Mountain,
    /// Sandy basin rising towards the shore.
    Lake,
}

/// Raises mountains and carves lakes into a [`HexGrid`].
///
/// All randomness comes from the caller's [`RandomSource`], so a seeded source
/// reproduces the same landscape.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    min_level: i32,
    max_level: i32,
    zero_level: i32,
    frequency: u32,
    dip_percent: i32,
}

impl TerrainGenerator {
    /// Generator for the given relief settings.
    pub fn new(relief: &ReliefSettings) -> Self {
        Self {
            min_level: relief.min_level,
            max_level: relief.max_level,
            zero_level: relief.zero_level,
            frequency: relief.landscape_frequency,
            dip_percent: relief.base_dip_percent,
        }
    }

    /// Lays the noisy base and then grows `landscape_frequency` features.
    pub fn generate(&self, grid: &mut HexGrid, rng: &mut impl RandomSource) {
        self.lay_base(grid, rng);

        let (mut mountains, mut lakes) = (0, 0);
        for _ in 0..self.frequency {
            let (feature, touched) = match rng.next_int(2) {
                0 => (Feature::Lake, self.grow_lake(grid, rng)),
                _ => (Feature::Mountain, self.grow_mountain(grid, rng)),
            };
            match feature {
                Feature::Lake => lakes += 1,
                Feature::Mountain => mountains += 1,
            }
            debug!(?feature, touched, "grew feature");
        }

        info!(cells = grid.len(), mountains, lakes, "generated landscape");
    }

    /// Resets every cell to grass at zero level, dipping a random share of
    /// them one level below.
    pub fn lay_base(&self, grid: &mut HexGrid, rng: &mut impl RandomSource) {
        for id in grid.ids() {
            let dip = rng.next_int(100) < self.dip_percent;
            let cell = grid.cell_mut(id);
            cell.set_level(if dip { self.zero_level - 1 } else { self.zero_level });
            cell.set_ground(GroundType::Grass);
        }
    }

    fn delta(&self) -> i32 {
        self.max_level - self.min_level
    }

    fn lake_velocity(&self, rng: &mut impl RandomSource) -> i32 {
        let max = (self.delta() / 3).max(3);
        let min = (self.delta() / 8).max(max - 1);
        rng.next_range(min, max)
    }

    fn mountain_velocity(&self, rng: &mut impl RandomSource) -> i32 {
        let max = (self.delta() / 2).max(3);
        let min = (self.delta() / 4).max(max - 1);
        rng.next_range(min, max)
    }

    /// Grows one mountain from a random peak. Returns the number of cells
    /// whose level was set.
    ///
    /// The fill spreads breadth-first in every direction, each hop losing a
    /// random number of levels, until it reaches zero level. A cell already
    /// higher than the incoming level keeps its height.
    pub fn grow_mountain(&self, grid: &mut HexGrid, rng: &mut impl RandomSource) -> usize {
        let velocity = self.mountain_velocity(rng);
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        let x = rng.next_range(2, w - 1).clamp(0, w - 1);
        let y = rng.next_range(2, h - 1).clamp(0, h - 1);
        let Some(peak) = grid.id(x as usize, y as usize) else {
            return 0;
        };

        let top = self.max_level;
        let mut queue = VecDeque::from([(peak, top)]);
        let mut visited: HashSet<CellId> = HashSet::new();
        visited.insert(peak);
        let mut touched = 0;

        while let Some((id, desired)) = queue.pop_front() {
            if grid.cell(id).level() > desired {
                continue;
            }
            let snow_line = top - rng.next_range(1, 3);
            let cell = grid.cell_mut(id);
            cell.set_level(desired.max(self.zero_level));
            cell.set_ground(if desired >= snow_line {
                GroundType::Snow
            } else {
                GroundType::Rock
            });
            touched += 1;

            if desired > self.zero_level {
                for dir in HexDirection::ALL {
                    let Some(n) = grid.neighbor(id, dir) else { continue };
                    if visited.insert(n) {
                        queue.push_back((n, desired - rng.next_int(velocity)));
                    }
                }
            }
        }
        touched
    }

    /// Carves one lake from a random bottom cell. Returns the number of cells
    /// whose level was set.
    ///
    /// The fill walks along a meandering heading and its reverse, each hop
    /// rising a random number of levels, until it climbs to just below zero
    /// level.
    pub fn grow_lake(&self, grid: &mut HexGrid, rng: &mut impl RandomSource) -> usize {
        let velocity = self.lake_velocity(rng);
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        let x = rng.next_range(w / 4, w * 3 / 4);
        let y = rng.next_range(h / 4, h * 3 / 4);
        let Some(bottom) = grid.id(x as usize, y as usize) else {
            return 0;
        };
        let heading = HexDirection::E.next(rng.next_int(10));

        let mut queue = VecDeque::from([(bottom, self.min_level, heading)]);
        let mut visited: HashSet<CellId> = HashSet::new();
        visited.insert(bottom);
        let mut touched = 0;
        let shore = self.min_level + (self.zero_level - self.min_level) / 2;

        while let Some((id, level, heading)) = queue.pop_front() {
            if level >= self.zero_level - 1 {
                continue;
            }
            let cell = grid.cell_mut(id);
            cell.set_level(level);
            cell.set_ground(if level <= shore {
                GroundType::Sand
            } else {
                GroundType::Dirt
            });
            touched += 1;

            let drift = heading.next(rng.next_range(-1, 2));
            if let Some(n) = grid.neighbor(id, heading).filter(|&n| visited.insert(n)) {
                queue.push_back((n, level + rng.next_int(velocity), drift));
            }

            let back = heading.opposite();
            let back_drift = back.next(rng.next_range(-1, 2));
            if let Some(n) = grid.neighbor(id, back).filter(|&n| visited.insert(n)) {
                queue.push_back((n, level + rng.next_int(velocity), back_drift));
            }
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::random::{SeededRandom, ZeroRandom};
    use crate::terrain::{GridSettings, ShapeSettings};

    fn relief(features: u32) -> ReliefSettings {
        ReliefSettings {
            landscape_frequency: features,
            ..ReliefSettings::default()
        }
    }

    fn grid(width: u32, height: u32, rng: &mut impl RandomSource) -> HexGrid {
        let settings = GridSettings {
            width,
            height,
            cell_size: 1.0,
        };
        HexGrid::new(&settings, &ShapeSettings::default(), rng)
    }

    fn level_at(g: &HexGrid, col: usize, row: usize) -> (i32, GroundType) {
        let cell = g.cell(g.id(col, row).unwrap());
        (cell.level(), cell.ground())
    }

    // ── base pass ──

    #[test]
    fn zero_source_dips_every_cell() {
        let mut g = grid(4, 4, &mut ZeroRandom);
        TerrainGenerator::new(&relief(0)).generate(&mut g, &mut ZeroRandom);
        for id in g.ids() {
            assert_eq!(g.cell(id).level(), -1);
            assert_eq!(g.cell(id).ground(), GroundType::Grass);
        }
    }

    #[test]
    fn base_pass_stays_within_one_level() {
        let mut rng = SeededRandom::new(11);
        let mut g = grid(20, 20, &mut rng);
        TerrainGenerator::new(&relief(0)).generate(&mut g, &mut rng);
        let dips = g.ids().filter(|&id| g.cell(id).level() == -1).count();
        assert!(g.ids().all(|id| matches!(g.cell(id).level(), -1 | 0)));
        assert!((60..=220).contains(&dips), "{dips} of 400 dipped");
    }

    // ── lakes ──

    #[test]
    fn zero_source_lake_meanders_clockwise() {
        let mut g = grid(5, 5, &mut ZeroRandom);
        TerrainGenerator::new(&relief(1)).generate(&mut g, &mut ZeroRandom);

        let lake = (-5, GroundType::Sand);
        let base = (-1, GroundType::Grass);
        assert_eq!(level_at(&g, 1, 1), lake);
        assert_eq!(level_at(&g, 2, 1), lake, "E");
        assert_eq!(level_at(&g, 1, 2), lake, "NE");
        assert_eq!(level_at(&g, 0, 1), lake, "W");
        assert_eq!(level_at(&g, 0, 0), lake, "SW");
        assert_eq!(level_at(&g, 0, 2), base, "NW");
        assert_eq!(level_at(&g, 1, 0), base, "SE");

        let rows: Vec<Vec<i32>> = (0..5)
            .rev()
            .map(|r| (0..5).map(|c| level_at(&g, c, r).0).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![-5, -1, -5, -1, -1],
                vec![-5, -5, -5, -5, -5],
                vec![-1, -5, -1, -5, -1],
                vec![-5, -5, -5, -5, -5],
                vec![-5, -1, -5, -1, -5],
            ]
        );
    }

    #[test]
    fn lakes_stay_below_zero() {
        let generator = TerrainGenerator::new(&relief(0));
        for seed in 0..20 {
            let mut rng = SeededRandom::new(seed);
            let mut g = grid(12, 12, &mut rng);
            generator.lay_base(&mut g, &mut rng);
            let before: Vec<i32> = g.ids().map(|id| g.cell(id).level()).collect();
            let touched = generator.grow_lake(&mut g, &mut rng);
            assert!(touched >= 1, "seed {seed}: the bottom cell is always carved");
            for id in g.ids() {
                let cell = g.cell(id);
                if matches!(cell.ground(), GroundType::Sand | GroundType::Dirt) {
                    assert!((-5..-1).contains(&cell.level()), "seed {seed}");
                } else {
                    assert_eq!(cell.level(), before[id.index()]);
                }
            }
        }
    }

    #[test]
    fn shore_turns_to_dirt() {
        let mut g = grid(3, 3, &mut ZeroRandom);
        let generator = TerrainGenerator::new(&ReliefSettings {
            min_level: -6,
            ..relief(0)
        });
        // shore line at -6 + 6/2 = -3
        let mut rng = SeededRandom::new(5);
        generator.grow_lake(&mut g, &mut rng);
        for id in g.ids() {
            let cell = g.cell(id);
            match cell.ground() {
                GroundType::Sand => assert!(cell.level() <= -3),
                GroundType::Dirt => assert!(cell.level() > -3),
                _ => {}
            }
        }
    }

    // ── mountains ──

    #[test]
    fn zero_source_mountain_floods_the_grid() {
        let mut g = grid(5, 5, &mut ZeroRandom);
        let generator = TerrainGenerator::new(&relief(0));
        generator.lay_base(&mut g, &mut ZeroRandom);
        let touched = generator.grow_mountain(&mut g, &mut ZeroRandom);
        assert_eq!(touched, 25);
        for id in g.ids() {
            assert_eq!(g.cell(id).level(), 5);
            assert_eq!(g.cell(id).ground(), GroundType::Snow);
        }
    }

    #[test]
    fn mountains_never_dig_below_zero() {
        let generator = TerrainGenerator::new(&relief(0));
        for seed in 0..20 {
            let mut rng = SeededRandom::new(seed);
            let mut g = grid(15, 15, &mut rng);
            generator.lay_base(&mut g, &mut rng);
            generator.grow_mountain(&mut g, &mut rng);
            for id in g.ids() {
                let cell = g.cell(id);
                if matches!(cell.ground(), GroundType::Rock | GroundType::Snow) {
                    assert!((0..=5).contains(&cell.level()), "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn higher_cells_dominate() {
        let mut rng = SeededRandom::new(3);
        let mut g = grid(9, 9, &mut rng);
        let generator = TerrainGenerator::new(&relief(0));
        generator.lay_base(&mut g, &mut rng);
        for id in g.ids() {
            g.cell_mut(id).set_level(7);
        }
        assert_eq!(generator.grow_mountain(&mut g, &mut rng), 0);
        assert!(g.ids().all(|id| g.cell(id).level() == 7));
    }

    #[test]
    fn peak_is_snow_capped() {
        let mut rng = SeededRandom::new(8);
        let mut g = grid(10, 10, &mut rng);
        let generator = TerrainGenerator::new(&relief(0));
        generator.lay_base(&mut g, &mut rng);
        generator.grow_mountain(&mut g, &mut rng);
        let peaks: Vec<_> = g.ids().filter(|&id| g.cell(id).level() == 5).collect();
        assert!(!peaks.is_empty());
        assert!(peaks.iter().all(|&id| g.cell(id).ground() == GroundType::Snow));
    }

    // ── whole runs ──

    #[test]
    fn generation_terminates_and_respects_bounds() {
        for (w, h) in [(3, 3), (3, 8), (7, 4), (16, 16)] {
            for seed in 0..10 {
                let mut rng = SeededRandom::new(seed);
                let mut g = grid(w, h, &mut rng);
                TerrainGenerator::new(&relief(8)).generate(&mut g, &mut rng);
                for id in g.ids() {
                    let level = g.cell(id).level();
                    assert!((-5..=5).contains(&level), "{w}x{h} seed {seed}: {level}");
                }
            }
        }
    }

    #[test]
    fn tiny_grids_do_not_panic() {
        for (w, h) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            let mut rng = SeededRandom::new(1);
            let mut g = grid(w, h, &mut rng);
            TerrainGenerator::new(&relief(6)).generate(&mut g, &mut rng);
        }
    }

    #[test]
    fn same_seed_same_landscape() {
        let build = || {
            let mut rng = SeededRandom::new(99);
            let mut g = grid(12, 9, &mut rng);
            TerrainGenerator::new(&relief(4)).generate(&mut g, &mut rng);
            g.ids().map(|id| (g.cell(id).level(), g.cell(id).ground())).collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
