use bevy::color::ColorToPacked;
use bevy::prelude::*;

/// Stepped color gradient matching a [`bevel_path`](crate::math::bevel_path) of
/// the same `steps`, sample for point.
///
/// `steps == 0` yields exactly `[start, end]`. Otherwise there are
/// `2 * steps + 2` samples: `start`, `2 * steps` intermediates advancing by
/// `0.5 / steps` of the channel distance each (truncated to whole 8-bit
/// channel values), and `end`.
pub fn stepped_gradient(start: Srgba, end: Srgba, steps: u32) -> Vec<Srgba> {
    if steps == 0 {
        return vec![start, end];
    }

    let from = start.to_u8_array();
    let to = end.to_u8_array();
    let dc = 0.5 / steps as f32;
    let delta: [f32; 4] = std::array::from_fn(|k| (to[k] as f32 - from[k] as f32) * dc);

    let mut samples = Vec::with_capacity(2 * steps as usize + 2);
    samples.push(start);
    samples.extend((1..=2 * steps).map(|i| {
        let channel = |k: usize| (from[k] as f32 + i as f32 * delta[k]) as u8;
        Srgba::rgba_u8(channel(0), channel(1), channel(2), channel(3))
    }));
    samples.push(end);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::GroundType;

    #[test]
    fn zero_steps_is_just_the_endpoints() {
        let (a, b) = (GroundType::Sand.color(), GroundType::Rock.color());
        assert_eq!(stepped_gradient(a, b, 0), vec![a, b]);
    }

    #[test]
    fn sample_count_and_endpoints() {
        let (a, b) = (GroundType::Grass.color(), GroundType::Snow.color());
        for steps in 1..8 {
            let g = stepped_gradient(a, b, steps);
            assert_eq!(g.len(), 2 * steps as usize + 2);
            assert_eq!(g[0], a);
            assert_eq!(*g.last().unwrap(), b);
        }
    }

    #[test]
    fn midpoint_is_halfway() {
        let a = Srgba::rgba_u8(0, 100, 200, 255);
        let b = Srgba::rgba_u8(100, 200, 0, 255);
        // steps = 1: samples at 0, 1/2, 2/2 of the distance, then `end`.
        let g = stepped_gradient(a, b, 1);
        assert_eq!(g[1].to_u8_array(), [50, 150, 100, 255]);
        assert_eq!(g[2].to_u8_array(), [100, 200, 0, 255]);
    }

    #[test]
    fn intermediates_truncate() {
        let a = Srgba::rgba_u8(0, 0, 0, 255);
        let b = Srgba::rgba_u8(10, 10, 10, 255);
        // steps = 3: half-step of 10/6 per sample
        let g = stepped_gradient(a, b, 3);
        let reds: Vec<u8> = g.iter().map(|c| c.to_u8_array()[0]).collect();
        assert_eq!(reds, vec![0, 1, 3, 5, 6, 8, 10, 10]);
    }

    #[test]
    fn identical_endpoints_stay_constant() {
        let c = GroundType::Dirt.color();
        assert!(stepped_gradient(c, c, 4).iter().all(|&s| s == c));
    }
}
