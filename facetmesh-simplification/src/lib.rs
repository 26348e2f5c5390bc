//! Mesh simplification for facetmesh
//!
//! Vertices whose surrounding facets all face the same way are merged into a
//! neighbour, removing the facets along the collapsed edge. The result keeps
//! the visible shape of the mesh with fewer facets:
//! - Flat-region edge collapse
//! - Cursor-driven single pass over the vertices
//! - Post-pass structural verification
//! - Optional HTML trace of every merge

pub mod config;
pub mod dump;
pub mod edge_collapse;
pub mod scan;
pub mod simplifier;
pub mod verify;

pub use config::*;
pub use dump::*;
pub use edge_collapse::*;
pub use scan::*;
pub use simplifier::*;
pub use verify::*;

use facetmesh_core::{Mesh, Result};

/// Reduce the facet count of a mesh in place
pub trait MeshSimplifier {
    fn simplify(&self, mesh: &mut Mesh) -> Result<SimplifyReport>;
}

/// Simplify with default settings and the given deduplication complexity
pub fn simplify(mesh: &mut Mesh, dedup_complexity: u32) -> Result<SimplifyReport> {
    FlatRegionSimplifier::new(SimplifyConfig::new().with_dedup_complexity(dedup_complexity))
        .simplify(mesh)
}
