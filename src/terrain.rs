//! Hex landscape: grid layout, relief generation and per-cell meshing.
//!
//! The core types ([`HexGrid`], [`TerrainGenerator`], [`CellMeshBuilder`]) are
//! plain Rust and know nothing about the ECS. [`TerrainPlugin`] wraps them: it
//! builds the landscape at startup, turns cached cell triangles into Bevy
//! meshes on demand and regenerates on request.

mod cell_mesh;
mod entities;
mod generator;
mod gradient;
mod ground;
mod hex_direction;
mod hex_grid;
mod random;
mod startup_systems;
mod systems;
mod triangle;

pub use cell_mesh::{CellMeshBuilder, CellMeshes};
pub use entities::{HexCellView, Landscape, RebuildMesh};
pub use generator::{Feature, TerrainGenerator};
pub use gradient::stepped_gradient;
pub use ground::GroundType;
pub use hex_direction::HexDirection;
pub use hex_grid::{CellId, HexCell, HexGrid, Wedge};
pub use random::{RandomSource, SeededRandom};
pub use startup_systems::build_grid;
pub use systems::triangles_to_mesh;
pub use triangle::{Triangle, VertexAttr};

use bevy::prelude::*;
use thiserror::Error;

use crate::GameState;

/// Nested configuration for the terrain subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TerrainConfig {
    /// Grid dimensions.
    pub grid: GridSettings,
    /// Elevation range and feature growth.
    pub relief: ReliefSettings,
    /// Per-cell geometry.
    pub shape: ShapeSettings,
    /// Background clear color.
    pub clear_color: Color,
}

/// Grid dimensions.
#[derive(Clone, Debug, Reflect)]
pub struct GridSettings {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Distance between opposite corners of a cell, in world units.
    pub cell_size: f32,
}

/// Elevation range and feature growth parameters.
#[derive(Clone, Debug, Reflect)]
pub struct ReliefSettings {
    /// Seed for every random draw of grid sculpting and generation.
    pub seed: u64,
    /// Lake bottom level.
    pub min_level: i32,
    /// Mountain top level.
    pub max_level: i32,
    /// Level of undisturbed ground.
    pub zero_level: i32,
    /// Number of lakes plus mountains to grow.
    pub landscape_frequency: u32,
    /// Chance in percent that a base cell dips one level below zero.
    pub base_dip_percent: i32,
}

/// Cell geometry parameters.
#[derive(Clone, Debug, Reflect)]
pub struct ShapeSettings {
    /// World height of one level.
    pub level_step: f32,
    /// Share of the cell radius covered by the flat interior; the rest is seam.
    pub inner_area_ratio: f32,
    /// Lower bound of the radial jitter scale; `1.0` disables jitter.
    pub noise_level: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            cell_size: 1.0,
        }
    }
}

impl Default for ReliefSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            min_level: -5,
            max_level: 5,
            zero_level: 0,
            landscape_frequency: 50 / 3,
            base_dip_percent: 35,
        }
    }
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            level_step: 0.1,
            inner_area_ratio: 0.8,
            noise_level: 0.65,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            relief: ReliefSettings::default(),
            shape: ShapeSettings::default(),
            clear_color: Color::srgb(0.2, 0.3, 0.3),
        }
    }
}

/// Rejected [`TerrainConfig`] values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid {
        /// Configured columns.
        width: u32,
        /// Configured rows.
        height: u32,
    },
    /// Cell size is zero, negative or not finite.
    #[error("cell size must be positive, got {0}")]
    CellSize(f32),
    /// Level step is zero, negative or not finite.
    #[error("level step must be positive, got {0}")]
    LevelStep(f32),
    /// Zero level lies outside `[min, max]`.
    #[error("levels must satisfy min <= zero <= max, got {min} / {zero} / {max}")]
    LevelOrder {
        /// Configured lake bottom.
        min: i32,
        /// Configured ground level.
        zero: i32,
        /// Configured mountain top.
        max: i32,
    },
    /// A shape ratio lies outside `(0, 1]`.
    #[error("{name} must lie in (0, 1], got {value}")]
    Ratio {
        /// Which setting.
        name: &'static str,
        /// Its value.
        value: f32,
    },
    /// Base dip chance is not a percentage.
    #[error("base dip must be a percentage, got {0}")]
    DipPercent(i32),
}

impl TerrainConfig {
    /// Checks that the configuration describes a buildable landscape.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSettings {
            width,
            height,
            cell_size,
        } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(ConfigError::CellSize(cell_size));
        }
        if self.shape.level_step <= 0.0 || !self.shape.level_step.is_finite() {
            return Err(ConfigError::LevelStep(self.shape.level_step));
        }

        let r = &self.relief;
        if r.min_level > r.zero_level || r.zero_level > r.max_level {
            return Err(ConfigError::LevelOrder {
                min: r.min_level,
                zero: r.zero_level,
                max: r.max_level,
            });
        }
        if !(0..=100).contains(&r.base_dip_percent) {
            return Err(ConfigError::DipPercent(r.base_dip_percent));
        }

        for (name, value) in [
            ("inner area ratio", self.shape.inner_area_ratio),
            ("noise level", self.shape.noise_level),
        ] {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::Ratio { name, value });
            }
        }
        Ok(())
    }
}

/// Terrain plugin: landscape generation at startup, lazy cell meshing and
/// regeneration at runtime.
pub struct TerrainPlugin(pub TerrainConfig);

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TerrainConfig>()
            .register_type::<HexCellView>()
            .register_type::<RebuildMesh>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(Startup, startup_systems::generate_landscape)
            .add_systems(
                Update,
                systems::regenerate_on_key
                    .run_if(any_with_component::<Landscape>)
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(
                Update,
                systems::rebuild_cell_meshes
                    .after(systems::regenerate_on_key)
                    .run_if(any_with_component::<RebuildMesh>),
            );

        app.add_systems(
            Update,
            systems::draw_cell_labels.run_if(in_state(GameState::Inspecting)),
        );
    }
}
