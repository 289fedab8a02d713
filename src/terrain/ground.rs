use bevy::prelude::*;

/// Surface material of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum GroundType {
    /// Lake bed.
    Sand,
    /// Default lowland cover.
    #[default]
    Grass,
    /// Shallow lake shore.
    Dirt,
    /// Mountain flank.
    Rock,
    /// Mountain top.
    Snow,
}

impl GroundType {
    /// Fixed surface color.
    pub fn color(self) -> Srgba {
        match self {
            Self::Sand => Srgba::rgba_u8(240, 219, 125, 255),
            Self::Grass => Srgba::rgba_u8(63, 155, 11, 255),
            Self::Dirt => Srgba::rgba_u8(162, 101, 62, 255),
            Self::Rock => Srgba::rgba_u8(122, 122, 122, 255),
            Self::Snow => Srgba::rgba_u8(238, 233, 233, 255),
        }
    }
}
