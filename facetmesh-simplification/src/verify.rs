//! Structural checks run after simplification
//!
//! Nothing here repairs the mesh; anomalies are logged and returned so the
//! caller can decide whether the approximate model is acceptable.

use facetmesh_core::{points_equal, Mesh, Point3f};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A structural problem found on a live facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anomaly {
    /// All three corner indices are the same vertex
    NoSurfaceArea { position: usize },
    /// Two corner indices refer to the same vertex
    DuplicateIndex { position: usize },
    /// Two corner coordinates coincide
    CoincidentCorners { position: usize },
}

impl Anomaly {
    /// Array position of the offending facet at the time of the check
    pub fn position(&self) -> usize {
        match *self {
            Anomaly::NoSurfaceArea { position }
            | Anomaly::DuplicateIndex { position }
            | Anomaly::CoincidentCorners { position } => position,
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::NoSurfaceArea { position } => {
                write!(f, "Indexed facet {} has no surface area", position)
            }
            Anomaly::DuplicateIndex { position } => {
                write!(f, "Indexed facet {} is degenerate", position)
            }
            Anomaly::CoincidentCorners { position } => {
                write!(f, "Facet {} is degenerate", position)
            }
        }
    }
}

/// Anomalies of a single facet given its corner indices and coordinates
pub fn facet_anomalies(
    position: usize,
    indices: Option<[usize; 3]>,
    corners: &[Point3f; 3],
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if let Some([i0, i1, i2]) = indices {
        if i0 == i1 && i1 == i2 {
            anomalies.push(Anomaly::NoSurfaceArea { position });
        }
        if i0 == i1 || i1 == i2 || i2 == i0 {
            anomalies.push(Anomaly::DuplicateIndex { position });
        }
    }

    let [c0, c1, c2] = corners;
    if points_equal(c0, c1) || points_equal(c1, c2) || points_equal(c2, c0) {
        anomalies.push(Anomaly::CoincidentCorners { position });
    }

    anomalies
}

/// Scan every live facet for repeated indices and coincident corners.
///
/// Index checks are skipped on a mesh that has not been indexed.
pub fn verify_mesh(mesh: &Mesh) -> Vec<Anomaly> {
    let indexed = mesh.is_indexed();
    let anomalies: Vec<Anomaly> = mesh
        .facets()
        .iter()
        .enumerate()
        .flat_map(|(position, facet)| {
            let indices = indexed.then(|| facet.indices());
            facet_anomalies(position, indices, facet.corners())
        })
        .collect();

    for anomaly in &anomalies {
        warn!(position = anomaly.position(), "{}", anomaly);
    }

    anomalies
}
