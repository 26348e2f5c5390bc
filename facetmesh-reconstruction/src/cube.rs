//! Blocky generator emitting axis-aligned cube faces

use facetmesh_core::{Mesh, Point3f, Result, Vector3f};

use crate::face::FaceMask;
use crate::grid::MeshGenerator;

/// Corner offsets of each face as (i, j, k) unit steps, wound so the
/// triangles (0, 1, 2) and (0, 2, 3) face outward
const FACES: [(FaceMask, [[u8; 3]; 4]); 6] = [
    (FaceMask::NEG_X, [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]]),
    (FaceMask::POS_X, [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]]),
    (FaceMask::NEG_Y, [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]]),
    (FaceMask::POS_Y, [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]]),
    (FaceMask::NEG_Z, [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]]),
    (FaceMask::POS_Z, [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]]),
];

/// Two triangles per selected face of the cell
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeGenerator;

impl CubeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl MeshGenerator for CubeGenerator {
    fn generate(
        &self,
        mesh: &mut Mesh,
        origin: Point3f,
        size: Vector3f,
        faces: FaceMask,
    ) -> Result<usize> {
        let corner = |[i, j, k]: [u8; 3]| {
            Point3f::new(
                origin.x + f32::from(i) * size.x,
                origin.y + f32::from(j) * size.y,
                origin.z + f32::from(k) * size.z,
            )
        };

        let mut added = 0;
        for (face, quad) in FACES.iter().filter(|(face, _)| faces.contains(*face)) {
            let [a, b, c, d] = (*quad).map(corner);
            for (v1, v2) in [(b, c), (c, d)] {
                if mesh.add_facet(a, v1, v2)?.is_some() {
                    added += 1;
                }
            }
            tracing::trace!(?face, "Emitted cube face");
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use facetmesh_core::Drawable;

    fn unit() -> Vector3f {
        Vector3f::new(1.0, 1.0, 1.0)
    }

    #[test]
    fn test_full_cube() {
        let mut mesh = Mesh::new();
        let added = CubeGenerator
            .generate(&mut mesh, Point3f::origin(), unit(), FaceMask::all())
            .unwrap();
        assert_eq!(added, 12);
        assert_eq!(mesh.facet_count(), 12);

        let (min, max) = mesh.bounding_box();
        assert_eq!(min, Point3f::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3f::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_normals_point_outward() {
        let centre = Point3f::new(0.5, 0.5, 0.5);
        let mut mesh = Mesh::new();
        CubeGenerator
            .generate(&mut mesh, Point3f::origin(), unit(), FaceMask::all())
            .unwrap();

        for facet in mesh.facets() {
            let outward = facet.centroid() - centre;
            assert!(facet.normal().dot(&outward) > 0.0);
        }
    }

    #[test]
    fn test_face_subset_and_scale() {
        let mut mesh = Mesh::new();
        let added = CubeGenerator
            .generate(
                &mut mesh,
                Point3f::new(2.0, -1.0, 0.0),
                Vector3f::new(0.5, 0.5, 2.0),
                FaceMask::POS_Z,
            )
            .unwrap();
        assert_eq!(added, 2);
        for facet in mesh.facets() {
            for corner in facet.corners() {
                assert_relative_eq!(corner.z, 2.0);
            }
            assert!(facet.normal().z > 0.0);
        }
    }

    #[test]
    fn test_empty_mask() {
        let mut mesh = Mesh::new();
        let added = CubeGenerator
            .generate(&mut mesh, Point3f::origin(), unit(), FaceMask::empty())
            .unwrap();
        assert_eq!(added, 0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_indexed_mesh_rejected() {
        let mut mesh = Mesh::new();
        mesh.build_index(1).unwrap();
        assert!(CubeGenerator
            .generate(&mut mesh, Point3f::origin(), unit(), FaceMask::POS_X)
            .is_err());
    }
}
