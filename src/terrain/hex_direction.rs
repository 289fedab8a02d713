use bevy::prelude::*;

/// One of the six neighbour directions, 60° apart, counter-clockwise from east.
///
/// The discriminant doubles as the index into per-direction arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum HexDirection {
    /// Right (0°).
    E,
    /// Top right (60°).
    NE,
    /// Top left (120°).
    NW,
    /// Left (180°).
    W,
    /// Bottom left (240°).
    SW,
    /// Bottom right (300°).
    SE,
}

impl HexDirection {
    /// All six directions in angular order.
    pub const ALL: [Self; 6] = [Self::E, Self::NE, Self::NW, Self::W, Self::SW, Self::SE];

    /// The three directions a cell stitches itself towards.
    ///
    /// The remaining three are covered by the neighbour's own forward pass.
    pub const FORWARD: [Self; 3] = [Self::E, Self::NE, Self::NW];

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction with the given index, wrapping modulo 6.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        self.next(3)
    }

    /// Rotates by `count` sixths of a turn; negative counts turn clockwise.
    pub const fn next(self, count: i32) -> Self {
        Self::ALL[(self as i32 + count).rem_euclid(6) as usize]
    }

    /// Direction closest to `angle` degrees (ties round to even sixths).
    pub fn from_angle_degrees(angle: i32) -> Self {
        let sixth = (angle as f32 / 60.0).round_ties_even() as i32;
        Self::ALL[sixth.rem_euclid(6) as usize]
    }

    /// Angle of this direction in degrees.
    pub const fn angle_degrees(self) -> i32 {
        self as i32 * 60
    }

    /// True for E, NE and NW.
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::NW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for d in HexDirection::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn opposite_pairs() {
        assert_eq!(HexDirection::E.opposite(), HexDirection::W);
        assert_eq!(HexDirection::NE.opposite(), HexDirection::SW);
        assert_eq!(HexDirection::NW.opposite(), HexDirection::SE);
    }

    #[test]
    fn full_turn_is_identity() {
        for d in HexDirection::ALL {
            assert_eq!(d.next(6), d);
            assert_eq!(d.next(-6), d);
            assert_eq!(d.next(0), d);
        }
    }

    #[test]
    fn negative_drift_wraps_clockwise() {
        assert_eq!(HexDirection::E.next(-1), HexDirection::SE);
        assert_eq!(HexDirection::SE.next(1), HexDirection::E);
        assert_eq!(HexDirection::E.next(9), HexDirection::W);
    }

    #[test]
    fn canonical_angles_roundtrip() {
        for d in HexDirection::ALL {
            assert_eq!(HexDirection::from_angle_degrees(d.angle_degrees()), d);
        }
        assert_eq!(HexDirection::from_angle_degrees(360), HexDirection::E);
        assert_eq!(HexDirection::from_angle_degrees(-60), HexDirection::SE);
    }

    #[test]
    fn angles_snap_to_nearest_sixth() {
        assert_eq!(HexDirection::from_angle_degrees(25), HexDirection::E);
        assert_eq!(HexDirection::from_angle_degrees(35), HexDirection::NE);
        // 30° sits exactly between E and NE; ties go to the even sixth.
        assert_eq!(HexDirection::from_angle_degrees(30), HexDirection::E);
        assert_eq!(HexDirection::from_angle_degrees(90), HexDirection::NW);
    }

    #[test]
    fn index_matches_position() {
        for (i, d) in HexDirection::ALL.into_iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(HexDirection::from_index(i), d);
        }
    }

    #[test]
    fn forward_directions() {
        let forward: Vec<_> = HexDirection::ALL.into_iter().filter(|d| d.is_forward()).collect();
        assert_eq!(forward, HexDirection::FORWARD);
    }
}
