//! Error types for facetmesh

use crate::mesh::FacetId;
use thiserror::Error;

/// Main error type for facetmesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Mesh is already indexed")]
    AlreadyIndexed,

    #[error("Mesh has not been indexed")]
    NotIndexed,

    #[error("Vertex {vertex} would exceed the maximum valence of {limit} facets")]
    ValenceExceeded { vertex: usize, limit: usize },

    #[error("Unknown or removed facet {0}")]
    UnknownFacet(FacetId),

    #[error("Facet {facet} missing from incidence list of vertex {vertex}")]
    IncidenceMismatch { facet: FacetId, vertex: usize },

    #[error("Vertex {vertex} is not a corner of facet {facet}")]
    NotACorner { facet: FacetId, vertex: usize },

    #[error("Facet {0} became degenerate")]
    DegenerateFacet(FacetId),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for facetmesh operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ValenceExceeded { vertex: 7, limit: 32 };
        assert_eq!(
            err.to_string(),
            "Vertex 7 would exceed the maximum valence of 32 facets"
        );

        let err = Error::NotACorner { facet: FacetId::new(3), vertex: 9 };
        assert!(err.to_string().contains("f3"));
    }
}
