//! # facetmesh
//!
//! Turn a triangle soup into an indexed mesh and shrink it by collapsing
//! edges inside flat regions.
//!
//! This is the umbrella crate that provides convenient access to all facetmesh
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: facet store, exact geometry predicates, point deduplication
//! - **Simplification**: flat-region edge collapse with an optional HTML trace
//! - **Reconstruction**: triangle soup generation from voxel grids
//!
//! ## Quick Start
//!
//! ```rust
//! use facetmesh::prelude::*;
//!
//! let grid = VoxelGrid::solid(3, 3, 1);
//! let config = GridConfig::new().with_finish(Finish::Blocky);
//! let mut mesh = Mesh::new();
//! build_from_grid(&mut mesh, &grid, &config, &Generators::uniform(&CubeGenerator))?;
//!
//! let report = FlatRegionSimplifier::default().simplify(&mut mesh)?;
//! assert!(report.final_facets < report.initial_facets);
//! # Ok::<(), facetmesh::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables simplification and reconstruction
//! - `simplification`: Flat-region simplification
//! - `reconstruction`: Grid-driven soup generation
//! - `all`: Enables all features

// Re-export core functionality
pub use facetmesh_core::*;

// Re-export sub-crates
#[cfg(feature = "simplification")]
pub use facetmesh_simplification as simplification;

#[cfg(feature = "reconstruction")]
pub use facetmesh_reconstruction as reconstruction;

/// Convenient imports for common use cases
pub mod prelude {
    pub use facetmesh_core::{
        Drawable, Error, Facet, FacetId, Mesh, Point3f, Result, TriangleMesh, Vector3f, Vertex,
        DEFAULT_DEDUP_COMPLEXITY, MAX_VALENCE,
    };

    #[cfg(feature = "simplification")]
    pub use facetmesh_simplification::{
        DebugDump, FlatRegionSimplifier, MeshSimplifier, SimplifyConfig, SimplifyReport,
    };

    #[cfg(feature = "reconstruction")]
    pub use facetmesh_reconstruction::{
        build_from_grid, CubeGenerator, FaceMask, FaceSource, Finish, Generators, GridConfig,
        MeshGenerator, VoxelGrid,
    };
}
