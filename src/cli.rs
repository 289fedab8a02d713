//! Command-line overrides for the terrain configuration.

use clap::Parser;

use crate::terrain::TerrainConfig;

/// Command-line arguments. Every flag overrides the matching
/// [`TerrainConfig`] default.
#[derive(Parser, Debug, Default)]
#[command(name = "hex-landscape")]
#[command(about = "Procedural hex landscape viewer")]
pub struct Args {
    /// Seed for grid sculpting and relief generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of lakes plus mountains [default: width / 3]
    #[arg(long)]
    pub features: Option<u32>,

    /// Lake bottom level
    #[arg(long, allow_hyphen_values = true)]
    pub min_level: Option<i32>,

    /// Mountain top level
    #[arg(long, allow_hyphen_values = true)]
    pub max_level: Option<i32>,
}

impl Args {
    /// Writes the given overrides into `cfg`.
    ///
    /// A new width without an explicit `--features` rescales the feature
    /// count to a third of the width.
    pub fn apply(&self, cfg: &mut TerrainConfig) {
        if let Some(seed) = self.seed {
            cfg.relief.seed = seed;
        }
        if let Some(width) = self.width {
            cfg.grid.width = width;
            cfg.relief.landscape_frequency = width / 3;
        }
        if let Some(height) = self.height {
            cfg.grid.height = height;
        }
        if let Some(features) = self.features {
            cfg.relief.landscape_frequency = features;
        }
        if let Some(min) = self.min_level {
            cfg.relief.min_level = min;
        }
        if let Some(max) = self.max_level {
            cfg.relief.max_level = max;
        }
    }
}
