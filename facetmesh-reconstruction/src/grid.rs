//! Grid-driven triangle soup construction
//!
//! A [`FaceSource`] decides which faces of each grid cell exist and a
//! [`MeshGenerator`] turns a cell and its faces into triangles appended to
//! the mesh. Rows run down the y axis, so cell `(x, y, z)` sits at
//! `(x, -y, z)` in world space.

use facetmesh_core::{Mesh, Point3f, Result, Vector3f};
use tracing::{debug, info};

use crate::config::{GeneratorKind, GridConfig};
use crate::face::FaceMask;

/// Supplies the faces present at each grid location
pub trait FaceSource {
    /// Columns in the grid
    fn width(&self) -> usize;

    /// Rows in the grid
    fn height(&self) -> usize;

    fn faces(&self, x: usize, y: usize, z: usize, config: &GridConfig) -> FaceMask;
}

/// Emits triangles for a single grid cell
pub trait MeshGenerator {
    /// Append the triangles for the cell at `origin` with the given `size`,
    /// returning the number of facets added. Degenerate triangles are not
    /// counted.
    fn generate(
        &self,
        mesh: &mut Mesh,
        origin: Point3f,
        size: Vector3f,
        faces: FaceMask,
    ) -> Result<usize>;
}

/// The generators a configuration can select between
#[derive(Clone, Copy)]
pub struct Generators<'a> {
    pub smooth: &'a dyn MeshGenerator,
    pub blocky: &'a dyn MeshGenerator,
}

impl<'a> Generators<'a> {
    pub fn new(smooth: &'a dyn MeshGenerator, blocky: &'a dyn MeshGenerator) -> Self {
        Self { smooth, blocky }
    }

    /// Use the same generator for every finish
    pub fn uniform(generator: &'a dyn MeshGenerator) -> Self {
        Self::new(generator, generator)
    }

    pub fn select(&self, kind: GeneratorKind) -> &'a dyn MeshGenerator {
        match kind {
            GeneratorKind::Smooth => self.smooth,
            GeneratorKind::Blocky => self.blocky,
        }
    }
}

/// Fill `mesh` from every level, row and column of `source`.
///
/// Returns the number of facets appended.
pub fn build_from_grid<S: FaceSource + ?Sized>(
    mesh: &mut Mesh,
    source: &S,
    config: &GridConfig,
    generators: &Generators<'_>,
) -> Result<usize> {
    let kind = config.generator_kind();
    let generator = generators.select(kind);
    debug!(?kind, levels = config.levels, "Selected mesh generator");

    let size = Vector3f::new(1.0, 1.0, 1.0);
    let mut added = 0;
    for z in 0..config.levels as usize {
        for y in 0..source.height() {
            for x in 0..source.width() {
                let faces = source.faces(x, y, z, config);
                if faces.is_empty() {
                    continue;
                }
                let origin = Point3f::new(x as f32, -(y as f32), z as f32);
                added += generator.generate(mesh, origin, size, faces)?;
            }
        }
    }

    info!(
        width = source.width(),
        height = source.height(),
        levels = config.levels,
        facets = added,
        "Built mesh from grid"
    );
    Ok(added)
}
