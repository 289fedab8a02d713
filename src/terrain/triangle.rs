use bevy::prelude::*;

use crate::math;

/// A per-triangle attribute: one value shared by all corners, or one per corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexAttr<T> {
    /// Same value at every corner.
    Flat(T),
    /// Individual value per corner, in point order.
    PerVertex([T; 3]),
}

impl<T: Copy> VertexAttr<T> {
    /// Value at corner `i` (0..3).
    pub fn at(&self, i: usize) -> T {
        match self {
            Self::Flat(v) => *v,
            Self::PerVertex(vs) => vs[i],
        }
    }
}

/// Renderable triangle in cell-local, Z-up coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Corner positions.
    pub points: [Vec3; 3],
    /// Face normal or per-corner normals.
    pub normal: VertexAttr<Vec3>,
    /// Flat color or per-corner gradient.
    pub color: VertexAttr<Srgba>,
}

impl Triangle {
    /// Flat-shaded triangle in a single color.
    pub fn flat(points: [Vec3; 3], color: Srgba) -> Self {
        Self {
            points,
            normal: VertexAttr::Flat(face_normal(points)),
            color: VertexAttr::Flat(color),
        }
    }

    /// Flat-normal triangle with a color per corner.
    pub fn shaded(points: [Vec3; 3], colors: [Srgba; 3]) -> Self {
        Self {
            points,
            normal: VertexAttr::Flat(face_normal(points)),
            color: VertexAttr::PerVertex(colors),
        }
    }
}

fn face_normal([p0, p1, p2]: [Vec3; 3]) -> Vec3 {
    math::compute_normal(p0, p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_clockwise_faces_up() {
        let t = Triangle::flat([Vec3::ZERO, Vec3::X, Vec3::Y], Srgba::rgb(1.0, 1.0, 1.0));
        assert_eq!(t.normal, VertexAttr::Flat(Vec3::Z));
    }

    #[test]
    fn flat_color_repeats_at_every_corner() {
        let t = Triangle::flat([Vec3::ZERO, Vec3::X, Vec3::Y], Srgba::rgb(1.0, 0.0, 0.0));
        for i in 0..3 {
            assert_eq!(t.color.at(i), Srgba::rgb(1.0, 0.0, 0.0));
            assert_eq!(t.normal.at(i), Vec3::Z);
        }
    }

    #[test]
    fn shaded_keeps_corner_order() {
        let colors = [
            Srgba::rgb(1.0, 0.0, 0.0),
            Srgba::rgb(0.0, 1.0, 0.0),
            Srgba::rgb(0.0, 0.0, 1.0),
        ];
        let t = Triangle::shaded([Vec3::ZERO, Vec3::X, Vec3::Y], colors);
        for (i, c) in colors.into_iter().enumerate() {
            assert_eq!(t.color.at(i), c);
        }
    }
}
