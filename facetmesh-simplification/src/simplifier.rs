//! Flat-region simplifier and its report

use std::fmt;
use std::io::{self, Write};

use facetmesh_core::{DedupStats, Mesh, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SimplifyConfig;
use crate::dump::DebugDump;
use crate::edge_collapse::{find_merge_target, is_candidate, merge_edge};
use crate::scan::{run_scan, MergeOracle};
use crate::verify::{verify_mesh, Anomaly};
use crate::MeshSimplifier;

/// Outcome of a simplification pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifyReport {
    /// Live facets before the pass
    pub initial_facets: usize,
    /// Live facets after the pass
    pub final_facets: usize,
    /// Length of the vertex array, dead slots included
    pub vertices: usize,
    /// Vertices still referenced by a facet
    pub live_vertices: usize,
    /// Edge merges that changed the mesh
    pub merges: usize,
    pub facets_removed: usize,
    /// Store operations that failed during merges
    pub merge_failures: usize,
    /// Indexing statistics, present when the pass had to index the mesh
    pub dedup: Option<DedupStats>,
    pub anomalies: Vec<Anomaly>,
}

impl SimplifyReport {
    /// Final facet count over initial facet count
    pub fn reduction_ratio(&self) -> f64 {
        if self.initial_facets == 0 {
            1.0
        } else {
            self.final_facets as f64 / self.initial_facets as f64
        }
    }

    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    pub fn was_simplified(&self) -> bool {
        self.merges > 0
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty() && self.merge_failures == 0
    }
}

impl fmt::Display for SimplifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simplify: {} → {} facets ({:.1}% reduction, {} merges, {} of {} vertices live)",
            self.initial_facets,
            self.final_facets,
            self.reduction_percent(),
            self.merges,
            self.live_vertices,
            self.vertices
        )?;
        if !self.anomalies.is_empty() {
            write!(f, ", {} anomalies", self.anomalies.len())?;
        }
        Ok(())
    }
}

/// Oracle performing real merges on a mesh
struct MeshOracle<'a, W: Write> {
    mesh: &'a mut Mesh,
    dump: Option<&'a mut DebugDump<W>>,
    facets_removed: usize,
    failures: usize,
}

impl<W: Write> MergeOracle for MeshOracle<'_, W> {
    fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    fn find_merge(&mut self, vertex: usize) -> Option<usize> {
        if is_candidate(self.mesh, vertex) {
            find_merge_target(self.mesh, vertex)
        } else {
            None
        }
    }

    fn merge(&mut self, start: usize, end: usize) -> bool {
        if let Some(dump) = self.dump.as_deref_mut() {
            dump.before_merge(self.mesh, start, end);
        }

        let summary = merge_edge(self.mesh, start, end);
        self.facets_removed += summary.facets_removed;
        self.failures += summary.failures;

        if let Some(dump) = self.dump.as_deref_mut() {
            dump.after_merge(self.mesh, start);
        }

        summary.facets_removed > 0
    }
}

/// Collapses edges inside flat regions until no vertex ahead of the cursor
/// can be merged.
///
/// A single forward pass over the vertices; a vertex that only becomes
/// mergeable after a later merge is left alone.
#[derive(Debug, Clone, Default)]
pub struct FlatRegionSimplifier {
    config: SimplifyConfig,
}

impl FlatRegionSimplifier {
    pub fn new(config: SimplifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimplifyConfig {
        &self.config
    }

    /// Simplify while recording every merge into `dump`.
    ///
    /// The dump is left open so the caller decides when to
    /// [`finish`](DebugDump::finish) it.
    pub fn simplify_traced<W: Write>(
        &self,
        mesh: &mut Mesh,
        dump: &mut DebugDump<W>,
    ) -> Result<SimplifyReport> {
        self.run(mesh, Some(dump))
    }

    fn run<W: Write>(
        &self,
        mesh: &mut Mesh,
        mut dump: Option<&mut DebugDump<W>>,
    ) -> Result<SimplifyReport> {
        self.config.validate()?;

        let dedup = if mesh.is_indexed() {
            None
        } else {
            Some(mesh.build_index(self.config.dedup_complexity)?)
        };

        let initial_facets = mesh.facet_count();
        info!(
            facets = initial_facets,
            vertices = mesh.vertex_count(),
            "Simplifying mesh"
        );

        if let Some(dump) = dump.as_deref_mut() {
            dump.begin_simplify(mesh);
        }

        let mut oracle = MeshOracle {
            mesh: &mut *mesh,
            dump: dump.as_deref_mut(),
            facets_removed: 0,
            failures: 0,
        };
        let merges = run_scan(&mut oracle);
        let facets_removed = oracle.facets_removed;
        let merge_failures = oracle.failures;

        if let Some(dump) = dump {
            dump.end_simplify();
        }

        let anomalies = verify_mesh(mesh);
        let report = SimplifyReport {
            initial_facets,
            final_facets: mesh.facet_count(),
            vertices: mesh.vertex_count(),
            live_vertices: mesh.live_vertex_count(),
            merges,
            facets_removed,
            merge_failures,
            dedup,
            anomalies,
        };

        if merge_failures > 0 {
            warn!(failures = merge_failures, "Store operations failed during merges");
        }
        info!("{}", report);
        Ok(report)
    }
}

impl MeshSimplifier for FlatRegionSimplifier {
    fn simplify(&self, mesh: &mut Mesh) -> Result<SimplifyReport> {
        let Some(path) = self.config.dump_path.as_ref() else {
            return self.run(mesh, None::<&mut DebugDump<io::Sink>>);
        };

        let mut dump = match DebugDump::create(path) {
            Ok(dump) => dump,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not open debug dump");
                return self.run(mesh, None::<&mut DebugDump<io::Sink>>);
            }
        };

        let report = self.run(mesh, Some(&mut dump))?;
        match dump.finish(mesh) {
            Ok(_) => debug!(path = %path.display(), "Wrote debug dump"),
            Err(e) => warn!(path = %path.display(), error = %e, "Debug dump incomplete"),
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facetmesh_core::Point3f;

    fn p(x: f32, y: f32) -> Point3f {
        Point3f::new(x, y, 0.0)
    }

    /// Open flat grid, unindexed. Its boundary erodes, so only bookkeeping is
    /// checked here; shape preservation is covered by the closed-solid tests.
    fn grid(size: usize) -> Mesh {
        let mut mesh = Mesh::new();
        for y in 0..size {
            for x in 0..size {
                let (x0, y0) = (x as f32, y as f32);
                let (x1, y1) = (x0 + 1.0, y0 + 1.0);
                mesh.add_facet(p(x0, y0), p(x1, y0), p(x1, y1)).unwrap();
                mesh.add_facet(p(x0, y0), p(x1, y1), p(x0, y1)).unwrap();
            }
        }
        mesh
    }

    #[test]
    fn test_indexes_unindexed_mesh() {
        let mut mesh = grid(2);
        let report = FlatRegionSimplifier::default().simplify(&mut mesh).unwrap();

        assert!(mesh.is_indexed());
        let dedup = report.dedup.expect("pass indexed the mesh");
        assert_eq!(dedup.vertices, 9);
        assert_eq!(report.initial_facets, 8);
        assert_eq!(report.vertices, 9);
    }

    #[test]
    fn test_report_bookkeeping() {
        let mut mesh = grid(3);
        let report = FlatRegionSimplifier::default().simplify(&mut mesh).unwrap();

        assert!(report.was_simplified());
        assert_eq!(report.final_facets, mesh.facet_count());
        assert_eq!(report.initial_facets - report.final_facets, report.facets_removed);
        assert_eq!(report.live_vertices, mesh.live_vertex_count());
        assert_eq!(report.merge_failures, 0);
    }

    #[test]
    fn test_already_indexed_skips_dedup() {
        let mut mesh = grid(1);
        mesh.build_index(1).unwrap();
        let report = FlatRegionSimplifier::default().simplify(&mut mesh).unwrap();
        assert!(report.dedup.is_none());
    }

    #[test]
    fn test_zero_complexity_rejected() {
        let mut mesh = grid(1);
        let simplifier =
            FlatRegionSimplifier::new(SimplifyConfig::new().with_dedup_complexity(0));
        assert!(simplifier.simplify(&mut mesh).is_err());
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn test_empty_mesh() {
        let mut mesh = Mesh::new();
        let report = FlatRegionSimplifier::default().simplify(&mut mesh).unwrap();
        assert_eq!(report.merges, 0);
        assert_eq!(report.final_facets, 0);
        assert_eq!(report.reduction_ratio(), 1.0);
    }

    #[test]
    fn test_traced_run_records_merges() {
        let mut mesh = grid(2);
        let mut dump = DebugDump::new(Vec::new()).unwrap();
        let report = FlatRegionSimplifier::default()
            .simplify_traced(&mut mesh, &mut dump)
            .unwrap();

        assert_eq!(dump.operations(), report.merges);
        let html = String::from_utf8(dump.finish(&mesh).unwrap()).unwrap();
        assert!(html.contains("Starting with 8 facets and 9 vertexes"));
        assert_eq!(html.matches("<tr>").count(), report.merges);
    }

    #[test]
    fn test_display() {
        let report = SimplifyReport {
            initial_facets: 100,
            final_facets: 40,
            vertices: 60,
            live_vertices: 22,
            merges: 30,
            facets_removed: 60,
            merge_failures: 0,
            dedup: None,
            anomalies: Vec::new(),
        };
        let text = report.to_string();
        assert!(text.contains("100 → 40 facets"));
        assert!(text.contains("60.0% reduction"));
        assert!(text.contains("30 merges"));
        assert!(report.is_clean());
    }
}
