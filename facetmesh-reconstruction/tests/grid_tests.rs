//! Voxel grids turned into closed triangle surfaces

use anyhow::Result;
use facetmesh_core::{Drawable, Mesh, Point3f};
use facetmesh_reconstruction::{
    build_from_grid, CubeGenerator, FaceMask, FaceSource, Finish, Generators, GridConfig, VoxelGrid,
};
use std::collections::HashMap;

fn blocky() -> GridConfig {
    GridConfig::new().with_finish(Finish::Blocky)
}

/// Undirected edge use counts over the indexed facets
fn edge_uses(mesh: &Mesh) -> HashMap<(usize, usize), usize> {
    let mut uses = HashMap::new();
    for facet in mesh.facets() {
        let [a, b, c] = facet.indices();
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *uses.entry((u.min(v), u.max(v))).or_insert(0) += 1;
        }
    }
    uses
}

#[test]
fn test_single_voxel() -> Result<()> {
    let grid = VoxelGrid::solid(1, 1, 1);
    let mut mesh = Mesh::new();
    let added = build_from_grid(&mut mesh, &grid, &blocky(), &Generators::uniform(&CubeGenerator))?;
    assert_eq!(added, 12);

    mesh.build_index(2)?;
    assert_eq!(mesh.vertex_count(), 8);
    assert!(edge_uses(&mesh).values().all(|&n| n == 2));
    Ok(())
}

#[test]
fn test_l_shape_is_closed() -> Result<()> {
    // cells (0, 0), (1, 0) and (0, 1)
    let mut grid = VoxelGrid::new(2, 2, 1);
    grid.set(0, 0, 0, true)?;
    grid.set(1, 0, 0, true)?;
    grid.set(0, 1, 0, true)?;

    let exposed: usize = (0..2)
        .flat_map(|y| (0..2).map(move |x| (x, y)))
        .map(|(x, y)| grid.faces(x, y, 0, &blocky()).face_count())
        .sum();
    assert_eq!(exposed, 14);

    let mut mesh = Mesh::new();
    let added = build_from_grid(&mut mesh, &grid, &blocky(), &Generators::uniform(&CubeGenerator))?;
    assert_eq!(added, 2 * exposed);

    mesh.build_index(2)?;
    let uses = edge_uses(&mesh);
    assert!(uses.values().all(|&n| n == 2));

    // genus zero: V - E + F = 2
    let (v, e, f) = (mesh.vertex_count(), uses.len(), mesh.facet_count());
    assert_eq!(v as i64 - e as i64 + f as i64, 2);
    assert_eq!(v, 16);
    Ok(())
}

#[test]
fn test_rows_extend_down_y() -> Result<()> {
    let grid = VoxelGrid::solid(3, 2, 1);
    let mut mesh = Mesh::new();
    build_from_grid(&mut mesh, &grid, &blocky(), &Generators::uniform(&CubeGenerator))?;

    let (min, max) = mesh.bounding_box();
    assert_eq!(min, Point3f::new(0.0, -1.0, 0.0));
    assert_eq!(max, Point3f::new(3.0, 1.0, 1.0));
    Ok(())
}

#[test]
fn test_levels_stack_voxels() -> Result<()> {
    let grid = VoxelGrid::solid(1, 1, 4);
    let mut mesh = Mesh::new();
    let config = blocky().with_levels(3);
    let added = build_from_grid(&mut mesh, &grid, &config, &Generators::uniform(&CubeGenerator))?;

    // a 1x1x3 column: four sides of three faces plus two caps
    assert_eq!(added, 2 * (4 * 3 + 2));
    let (_, max) = mesh.bounding_box();
    assert_eq!(max.z, 3.0);
    Ok(())
}

#[test]
fn test_top_faces_only() -> Result<()> {
    struct Tops;

    impl FaceSource for Tops {
        fn width(&self) -> usize {
            2
        }

        fn height(&self) -> usize {
            2
        }

        fn faces(&self, _x: usize, _y: usize, _z: usize, _config: &GridConfig) -> FaceMask {
            FaceMask::POS_Z
        }
    }

    let mut mesh = Mesh::new();
    let added = build_from_grid(&mut mesh, &Tops, &GridConfig::default(), &Generators::uniform(&CubeGenerator))?;
    assert_eq!(added, 8);
    assert!(mesh.facets().iter().all(|f| f.normal().z > 0.0));
    Ok(())
}
