use anyhow::Result;
use facetmesh::prelude::*;

#[test]
fn test_soup_to_simplified_mesh() -> Result<()> {
    let mut mesh = Mesh::new();
    let grid = VoxelGrid::solid(4, 2, 1);
    let generators = Generators::uniform(&CubeGenerator);
    build_from_grid(&mut mesh, &grid, &GridConfig::new().with_finish(Finish::Blocky), &generators)?;

    let config = SimplifyConfig::new().with_dedup_complexity(DEFAULT_DEDUP_COMPLEXITY);
    let report = FlatRegionSimplifier::new(config).simplify(&mut mesh)?;
    assert!(report.dedup.is_some());
    assert_eq!(report.final_facets, mesh.facet_count());

    let exported: TriangleMesh = mesh.to_triangle_mesh()?;
    assert_eq!(exported.face_count(), report.final_facets);
    Ok(())
}

#[test]
fn test_free_simplify_function() -> Result<()> {
    let mut mesh = Mesh::new();
    mesh.add_facet_coords([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])?;
    let report = facetmesh::simplification::simplify(&mut mesh, 1)?;
    assert_eq!(report.initial_facets, 1);
    assert!(mesh.is_indexed());
    Ok(())
}
