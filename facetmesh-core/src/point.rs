//! Point types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Build a point from a packed `[x, y, z]` slice of a facet coordinate array.
#[inline]
pub(crate) fn point_at(coords: &[f32; 9], corner: usize) -> Point3f {
    let base = corner * 3;
    Point3f::new(coords[base], coords[base + 1], coords[base + 2])
}

/// Bit pattern of a point suitable for hashing.
///
/// Exact equality treats `-0.0` and `0.0` as the same coordinate, so the sign
/// of zero is normalized away before the bits are taken.
#[inline]
pub(crate) fn point_bits(p: &Point3f) -> [u32; 3] {
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at() {
        let coords = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(point_at(&coords, 0), Point3f::new(0.0, 1.0, 2.0));
        assert_eq!(point_at(&coords, 2), Point3f::new(6.0, 7.0, 8.0));
    }

    #[test]
    fn test_signed_zero_bits_match() {
        let a = Point3f::new(0.0, -0.0, 1.0);
        let b = Point3f::new(-0.0, 0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(point_bits(&a), point_bits(&b));
    }
}
