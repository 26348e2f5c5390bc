//! Grid-driven triangle soup generation for facetmesh
//!
//! This crate feeds a [`Mesh`](facetmesh_core::Mesh) from a sampled grid:
//! a face source decides which voxel faces exist, a generator turns each
//! cell into triangles, and the configuration picks the generator.

pub mod config;
pub mod cube;
pub mod face;
pub mod grid;
pub mod voxel;

// Re-export commonly used items
pub use config::*;
pub use cube::*;
pub use face::*;
pub use grid::*;
pub use voxel::*;
