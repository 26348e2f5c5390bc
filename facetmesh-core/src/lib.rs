//! Core data structures for facetmesh
//!
//! This crate provides the facet store that turns a triangle soup into an
//! indexed mesh, the exact geometry predicates the simplifier relies on and
//! the bloom-filtered point deduplication used while indexing.

pub mod dedup;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod point;
pub mod traits;
pub mod triangle_mesh;

pub use dedup::*;
pub use error::*;
pub use geometry::*;
pub use mesh::*;
pub use point::{Point3f, Vector3f};
pub use traits::*;
pub use triangle_mesh::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

/// Default deduplication filter complexity
pub const DEFAULT_DEDUP_COMPLEXITY: u32 = 2;
