#![warn(missing_docs)]
//! Procedural hex landscape.
//!
//! Builds a rectangular hex grid, grows mountains and lakes over it with
//! randomized flood-fill, and meshes every cell with stepped bevels that stitch
//! it to its neighbours. The Bevy plugins in this crate wire the core into a
//! viewer with a pan/zoom camera and a day/night light.

pub mod camera;
#[cfg(feature = "native")]
pub mod cli;
pub mod daylight;
pub mod math;
pub mod terrain;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal viewing: camera controls and regeneration are live.
    #[default]
    Running,
    /// World inspector and cell labels shown (Tab to toggle).
    Inspecting,
}
