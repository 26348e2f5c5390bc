//! Geometry primitives shared by the mesh store and the simplifier
//!
//! All comparisons are exact. Facet coordinates come from integer grid
//! positions, so coplanarity and degeneracy can be decided without tolerances.

use crate::point::{Point3f, Vector3f};

/// Are two points the same location
#[inline]
pub fn points_equal(p0: &Point3f, p1: &Point3f) -> bool {
    p0.x == p1.x && p0.y == p1.y && p0.z == p1.z
}

/// Are two points different locations
#[inline]
pub fn points_differ(p0: &Point3f, p1: &Point3f) -> bool {
    !points_equal(p0, p1)
}

/// Surface normal `(v1 - v0) x (v2 - v0)` of a triangle.
///
/// The normal is not normalized. The returned flag is `true` when the triangle
/// is degenerate, i.e. the normal is the zero vector.
#[inline]
pub fn triangle_normal(v0: &Point3f, v1: &Point3f, v2: &Point3f) -> (Vector3f, bool) {
    let a = v1 - v0;
    let b = v2 - v0;
    let n = a.cross(&b);
    (n, is_zero(&n))
}

/// Check whether three corners form a zero-area triangle
#[inline]
pub fn is_degenerate(v0: &Point3f, v1: &Point3f, v2: &Point3f) -> bool {
    triangle_normal(v0, v1, v2).1
}

/// Check if two normals are parallel and point the same way.
///
/// Magnitude is ignored: `(1, 0, 0)` and `(2, 0, 0)` share an orientation.
#[inline]
pub fn same_orientation(n1: &Vector3f, n2: &Vector3f) -> bool {
    if n1.dot(n2) < 0.0 {
        return false;
    }
    is_zero(&n1.cross(n2))
}

#[inline]
fn is_zero(v: &Vector3f) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_equal() {
        let a = Point3f::new(1.0, 2.0, 3.0);
        let b = Point3f::new(1.0, 2.0, 3.0);
        let c = Point3f::new(1.0, 2.0, 3.5);
        assert!(points_equal(&a, &b));
        assert!(!points_differ(&a, &b));
        assert!(points_differ(&a, &c));
    }

    #[test]
    fn test_triangle_normal() {
        let (n, degenerate) = triangle_normal(
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(1.0, 0.0, 0.0),
            &Point3f::new(0.0, 1.0, 0.0),
        );
        assert!(!degenerate);
        assert_eq!(n, Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_degenerate_triangles() {
        // coincident corners
        assert!(is_degenerate(
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(1.0, 0.0, 0.0),
        ));
        // collinear corners
        assert!(is_degenerate(
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(1.0, 1.0, 1.0),
            &Point3f::new(2.0, 2.0, 2.0),
        ));
    }

    #[test]
    fn test_same_orientation() {
        let x = Vector3f::new(1.0, 0.0, 0.0);
        assert!(same_orientation(&x, &x));
        assert!(!same_orientation(&x, &Vector3f::new(-1.0, 0.0, 0.0)));
        assert!(same_orientation(&x, &Vector3f::new(2.0, 0.0, 0.0)));
        assert!(!same_orientation(&x, &Vector3f::new(1.0, 1.0, 0.0)));
        assert!(!same_orientation(&x, &Vector3f::new(0.0, 1.0, 0.0)));
    }
}
