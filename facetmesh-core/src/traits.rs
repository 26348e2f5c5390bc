//! Core traits for facetmesh

use crate::{mesh::Mesh, point::*, triangle_mesh::TriangleMesh};

/// Trait for objects with spatial extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

fn bounds<'a>(mut points: impl Iterator<Item = &'a Point3f>) -> (Point3f, Point3f) {
    let first = match points.next() {
        Some(p) => *p,
        None => return (Point3f::origin(), Point3f::origin()),
    };

    let mut min = first;
    let mut max = first;
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    (min, max)
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds(self.vertices.iter())
    }
}

/// Bounds of the live facet corners; merged-away vertices are ignored
impl Drawable for Mesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds(self.facets().iter().flat_map(|f| f.corners().iter()))
    }
}
