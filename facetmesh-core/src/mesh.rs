//! Indexed facet store
//!
//! The store owns every [`Facet`] in a dense array whose first
//! [`Mesh::facet_count`] entries are the live facets. Removal swaps the last
//! facet into the freed slot, so array positions are not stable; facets are
//! identified by a [`FacetId`] handle instead, and vertex incidence lists
//! hold handles rather than positions.
//!
//! A mesh starts as a triangle soup (facets carrying only coordinates) and is
//! turned into an indexed mesh once by [`Mesh::build_index`]. The vertex array
//! keeps its length from then on: vertices whose incidence list empties during
//! simplification stay in place with a valence of zero.

use std::fmt;

use smallvec::SmallVec;
use tracing::{info, warn};

use crate::dedup::{DedupStats, PointIndex};
use crate::error::{Error, Result};
use crate::geometry::triangle_normal;
use crate::point::{point_at, Point3f, Vector3f};
use crate::triangle_mesh::TriangleMesh;

/// Maximum number of facets that may share one vertex
pub const MAX_VALENCE: usize = 32;

/// Facet storage grows by this many entries at a time
pub const FACET_CHUNK: usize = 1000;

const INVALID: usize = usize::MAX;

/// Stable handle to a facet, valid until that facet is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacetId(usize);

impl FacetId {
    pub(crate) const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Raw handle value, for logging and diagnostics
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A triangle with cached corner coordinates and surface normal
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    id: FacetId,
    corners: [Point3f; 3],
    indices: [usize; 3],
    normal: Vector3f,
}

impl Facet {
    pub fn id(&self) -> FacetId {
        self.id
    }

    /// Corner coordinates, kept in sync with the referenced vertices
    pub fn corners(&self) -> &[Point3f; 3] {
        &self.corners
    }

    /// Vertex indices of the three corners; meaningless before indexing
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Cached, unnormalized surface normal
    pub fn normal(&self) -> &Vector3f {
        &self.normal
    }

    /// Which corner (0, 1 or 2) refers to `vertex`
    pub fn corner_slot(&self, vertex: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == vertex)
    }

    pub fn has_vertex(&self, vertex: usize) -> bool {
        self.corner_slot(vertex).is_some()
    }

    pub fn centroid(&self) -> Point3f {
        let [a, b, c] = self.corners;
        Point3f::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Recompute the cached normal, returning `true` if the facet is degenerate
    fn refresh_normal(&mut self) -> bool {
        let (normal, degenerate) =
            triangle_normal(&self.corners[0], &self.corners[1], &self.corners[2]);
        self.normal = normal;
        degenerate
    }
}

/// Incidence list of a vertex
pub type Incidence = SmallVec<[FacetId; 8]>;

/// A unique point position and the facets touching it
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    position: Point3f,
    facets: Incidence,
}

impl Vertex {
    fn new(position: Point3f) -> Self {
        Self {
            position,
            facets: Incidence::new(),
        }
    }

    pub fn position(&self) -> &Point3f {
        &self.position
    }

    /// Facets incident on this vertex, in insertion order
    pub fn facets(&self) -> &[FacetId] {
        &self.facets
    }

    /// Number of incident facets
    pub fn valence(&self) -> usize {
        self.facets.len()
    }

    /// A vertex with no facets has been merged away
    pub fn is_live(&self) -> bool {
        !self.facets.is_empty()
    }

    pub fn contains(&self, facet: FacetId) -> bool {
        self.facets.contains(&facet)
    }

    /// Checked insertion honouring [`MAX_VALENCE`]
    fn attach(&mut self, index: usize, facet: FacetId) -> Result<()> {
        if self.facets.len() >= MAX_VALENCE {
            return Err(Error::ValenceExceeded {
                vertex: index,
                limit: MAX_VALENCE,
            });
        }
        self.facets.push(facet);
        Ok(())
    }

    /// Order-preserving removal; `false` if the facet was not listed
    fn detach(&mut self, facet: FacetId) -> bool {
        match self.facets.iter().position(|&f| f == facet) {
            Some(i) => {
                self.facets.remove(i);
                true
            }
            None => false,
        }
    }

    /// Move a listed facet to the end of the incidence list
    fn move_to_back(&mut self, facet: FacetId) -> bool {
        if self.detach(facet) {
            self.facets.push(facet);
            true
        } else {
            false
        }
    }
}

/// Triangle soup that becomes an indexed mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    facets: Vec<Facet>,
    /// Dense position of each handle, `INVALID` once removed
    slots: Vec<usize>,
    vertices: Vec<Vertex>,
    indexed: bool,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a soup from an indexed triangle mesh, dropping degenerate faces
    pub fn from_triangle_mesh(mesh: &TriangleMesh) -> Result<Self> {
        let mut soup = Self::new();
        for (fi, face) in mesh.faces.iter().enumerate() {
            let corner = |k: usize| {
                mesh.vertices.get(face[k]).copied().ok_or_else(|| {
                    Error::InvalidData(format!(
                        "Face {} references vertex {} of {}",
                        fi,
                        face[k],
                        mesh.vertices.len()
                    ))
                })
            };
            soup.add_facet(corner(0)?, corner(1)?, corner(2)?)?;
        }
        Ok(soup)
    }

    /// Append a triangle to the soup.
    ///
    /// Degenerate triangles are not stored and yield `Ok(None)`. Facets can
    /// only be appended before the mesh is indexed.
    pub fn add_facet(
        &mut self,
        v0: Point3f,
        v1: Point3f,
        v2: Point3f,
    ) -> Result<Option<FacetId>> {
        if self.indexed {
            return Err(Error::AlreadyIndexed);
        }

        let (normal, degenerate) = triangle_normal(&v0, &v1, &v2);
        if degenerate {
            return Ok(None);
        }

        if self.facets.len() == self.facets.capacity() {
            self.facets.reserve_exact(FACET_CHUNK);
        }

        let id = FacetId(self.slots.len());
        self.slots.push(self.facets.len());
        self.facets.push(Facet {
            id,
            corners: [v0, v1, v2],
            indices: [INVALID; 3],
            normal,
        });
        Ok(Some(id))
    }

    /// Append a triangle given as `[x0, y0, z0, x1, y1, z1, x2, y2, z2]`
    pub fn add_facet_coords(&mut self, coords: [f32; 9]) -> Result<Option<FacetId>> {
        self.add_facet(
            point_at(&coords, 0),
            point_at(&coords, 1),
            point_at(&coords, 2),
        )
    }

    /// Deduplicate facet corners into shared vertices.
    ///
    /// `complexity` sizes the deduplication filter (see
    /// [`BloomFilter::for_facets`](crate::dedup::BloomFilter::for_facets)).
    /// The mesh is only modified if indexing succeeds.
    pub fn build_index(&mut self, complexity: u32) -> Result<DedupStats> {
        if self.indexed {
            return Err(Error::AlreadyIndexed);
        }

        let mut index = PointIndex::new(self.facets.len(), complexity)?;
        let assignments: Vec<[usize; 3]> = self
            .facets
            .iter()
            .map(|facet| facet.corners.map(|corner| index.insert(&corner)))
            .collect();
        let (points, stats) = index.into_parts();

        let mut vertices: Vec<Vertex> = points.into_iter().map(Vertex::new).collect();
        for (facet, indices) in self.facets.iter().zip(&assignments) {
            for &v in indices {
                vertices[v].attach(v, facet.id)?;
            }
        }

        for (facet, indices) in self.facets.iter_mut().zip(assignments) {
            facet.indices = indices;
        }
        self.vertices = vertices;
        self.indexed = true;

        info!(
            lookups = stats.lookups,
            searches_saved = stats.searches_saved(),
            saved_percent = format_args!("{:.0}", stats.searches_saved_percent()),
            false_positives = stats.false_positives,
            average_scan_cost = format_args!("{:.1}", stats.average_scan_cost()),
            vertices = stats.vertices,
            "Indexed mesh"
        );

        Ok(stats)
    }

    /// Remove a facet from the mesh.
    ///
    /// The facet is detached from its vertices and the last live facet takes
    /// its array position. An incidence list that did not contain the facet
    /// is reported as [`Error::IncidenceMismatch`] after the removal has been
    /// completed.
    pub fn remove_facet(&mut self, id: FacetId) -> Result<()> {
        let pos = self.position_of(id).ok_or(Error::UnknownFacet(id))?;
        let mut outcome = Ok(());

        if self.indexed {
            for v in self.facets[pos].indices {
                if !self.vertices[v].detach(id) {
                    warn!(facet = %id, vertex = v, "Failed to remove facet from vertex");
                    outcome = Err(Error::IncidenceMismatch { facet: id, vertex: v });
                }
            }
        }

        self.facets.swap_remove(pos);
        self.slots[id.0] = INVALID;

        if let Some(moved) = self.facets.get(pos) {
            let moved_id = moved.id;
            let moved_indices = moved.indices;
            self.slots[moved_id.0] = pos;
            if self.indexed {
                for v in moved_indices {
                    if !self.vertices[v].move_to_back(moved_id) {
                        warn!(facet = %moved_id, vertex = v, "Moved facet missing from vertex");
                        outcome = Err(Error::IncidenceMismatch {
                            facet: moved_id,
                            vertex: v,
                        });
                    }
                }
            }
        }

        outcome
    }

    /// Retarget the corner of `id` that refers to `from` so it refers to `to`.
    ///
    /// The corner coordinate and cached normal are updated. A degenerate
    /// result is applied but reported as [`Error::DegenerateFacet`]; the
    /// facet's geometry should not be trusted afterwards.
    pub fn move_facet_corner(&mut self, id: FacetId, from: usize, to: usize) -> Result<()> {
        if !self.indexed {
            return Err(Error::NotIndexed);
        }
        if to >= self.vertices.len() {
            return Err(Error::InvalidData(format!(
                "Vertex {} out of range for {} vertices",
                to,
                self.vertices.len()
            )));
        }

        let pos = self.position_of(id).ok_or(Error::UnknownFacet(id))?;
        let slot = self.facets[pos]
            .corner_slot(from)
            .ok_or(Error::NotACorner { facet: id, vertex: from })?;
        if self.facets[pos].has_vertex(to) {
            return Err(Error::InvalidData(format!(
                "Vertex {} is already a corner of facet {}",
                to, id
            )));
        }

        self.vertices[to].attach(to, id)?;

        let position = self.vertices[to].position;
        let facet = &mut self.facets[pos];
        facet.indices[slot] = to;
        facet.corners[slot] = position;
        let degenerate = facet.refresh_normal();

        if !self.vertices[from].detach(id) {
            warn!(facet = %id, vertex = from, "Failed to remove facet from vertex");
            return Err(Error::IncidenceMismatch { facet: id, vertex: from });
        }
        if degenerate {
            warn!(facet = %id, position = pos, "Degenerate facet on vertex move");
            return Err(Error::DegenerateFacet(id));
        }

        Ok(())
    }

    /// Live facets, in array order
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn facet(&self, id: FacetId) -> Option<&Facet> {
        self.position_of(id).map(|pos| &self.facets[pos])
    }

    /// Current array position of a facet; changes whenever a facet is removed
    pub fn position_of(&self, id: FacetId) -> Option<usize> {
        match self.slots.get(id.0) {
            Some(&pos) if pos != INVALID => Some(pos),
            _ => None,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Does `vertex` list `facet` among its incident facets
    pub fn facet_on_vertex(&self, facet: FacetId, vertex: usize) -> bool {
        self.vertices
            .get(vertex)
            .is_some_and(|v| v.contains(facet))
    }

    /// Number of live facets
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Length of the vertex array, including merged-away vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices that still have at least one facet
    pub fn live_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_live()).count()
    }

    /// Allocated facet storage
    pub fn capacity(&self) -> usize {
        self.facets.capacity()
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Compact live vertices and facets into a plain indexed triangle mesh
    pub fn to_triangle_mesh(&self) -> Result<TriangleMesh> {
        if !self.indexed {
            return Err(Error::NotIndexed);
        }

        let mut remap = vec![INVALID; self.vertices.len()];
        let mut vertices = Vec::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            if vertex.is_live() {
                remap[i] = vertices.len();
                vertices.push(vertex.position);
            }
        }

        let faces = self
            .facets
            .iter()
            .map(|facet| facet.indices.map(|v| remap[v]))
            .collect();

        Ok(TriangleMesh::from_vertices_and_faces(vertices, faces))
    }
}
