//! Flat-region edge collapse
//!
//! A vertex whose incident facets all share one orientation lies inside a
//! flat patch of the surface. Collapsing an edge between two such vertices
//! removes the facets along the edge and leaves the visible shape unchanged,
//! provided none of the relocated facets flips or folds.

use facetmesh_core::{
    points_differ, same_orientation, triangle_normal, FacetId, Mesh, Vertex, MAX_VALENCE,
};
use itertools::Itertools;
use tracing::{debug, warn};

/// Does every facet around `vertex` share one orientation.
///
/// Consecutive incidence-list entries are compared; orientation equality is
/// transitive for non-zero normals, so this covers every pair. A vertex with
/// zero or one facet is trivially a candidate.
pub fn is_candidate(mesh: &Mesh, vertex: usize) -> bool {
    let Some(v) = mesh.vertex(vertex) else {
        return false;
    };
    v.facets()
        .iter()
        .filter_map(|&id| mesh.facet(id))
        .map(|facet| facet.normal())
        .tuple_windows()
        .all(|(a, b)| same_orientation(a, b))
}

/// Would moving every facet corner at `from` onto `to` keep the surface intact.
///
/// Each relocated facet must either keep its orientation or collapse into a
/// doubled edge (two coincident corners). Any fold or flip rejects the move.
pub fn check_move_safe(mesh: &Mesh, from: usize, to: usize) -> bool {
    let (Some(from_vertex), Some(to_vertex)) = (mesh.vertex(from), mesh.vertex(to)) else {
        return false;
    };
    let target = *to_vertex.position();

    from_vertex.facets().iter().all(|&id| {
        let Some(facet) = mesh.facet(id) else {
            warn!(facet = %id, vertex = from, "Vertex lists a removed facet");
            return false;
        };
        let Some(slot) = facet.corner_slot(from) else {
            warn!(facet = %id, vertex = from, "None of the facet corners is the from vertex");
            return false;
        };

        let mut corners = *facet.corners();
        corners[slot] = target;
        let [v0, v1, v2] = corners;
        let (normal, degenerate) = triangle_normal(&v0, &v1, &v2);

        if degenerate {
            // only a collapse onto a shared corner is acceptable
            !(points_differ(&v0, &v1) && points_differ(&v1, &v2) && points_differ(&v2, &v0))
        } else {
            same_orientation(&normal, facet.normal())
        }
    })
}

/// Find a neighbour of `vertex` that can be merged into it.
///
/// The first neighbour that is itself a candidate, keeps the merged valence
/// within [`MAX_VALENCE`] and passes [`check_move_safe`] wins.
pub fn find_merge_target(mesh: &Mesh, vertex: usize) -> Option<usize> {
    let v = mesh.vertex(vertex)?;

    for &id in v.facets() {
        let Some(facet) = mesh.facet(id) else {
            continue;
        };
        for neighbour in facet.indices() {
            if neighbour == vertex || !is_candidate(mesh, neighbour) {
                continue;
            }

            // the two facets along the collapsing edge disappear
            let merged = (v.valence() + mesh.vertex(neighbour).map_or(0, Vertex::valence))
                .saturating_sub(2);
            if merged > MAX_VALENCE {
                continue;
            }

            if check_move_safe(mesh, neighbour, vertex) {
                return Some(neighbour);
            }
        }
    }

    None
}

/// What a single [`merge_edge`] call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Facets deleted because they spanned the collapsed edge
    pub facets_removed: usize,
    /// Facets whose corner was moved from `end` to `start`
    pub facets_moved: usize,
    /// Store operations that reported an inconsistency
    pub failures: usize,
    /// `end` was left without any incident facet
    pub complete: bool,
}

/// Collapse the edge `start`-`end` by moving every facet on `end` to `start`.
///
/// Facets already touching `start` would become zero-area duplicates and are
/// removed instead. They are removed before any facet is moved, so `start`
/// never holds more than `valence(start) + valence(end) - 2` facets, the
/// bound [`find_merge_target`] checks. Callers are expected to have validated
/// the move with [`check_move_safe`]; failures here indicate a broken
/// invariant and are logged rather than returned.
pub fn merge_edge(mesh: &mut Mesh, start: usize, end: usize) -> MergeSummary {
    let mut summary = MergeSummary::default();
    let facets_before = mesh.facet_count();

    let Some(vertex) = mesh.vertex(end) else {
        warn!(vertex = end, "Merge end vertex out of range");
        return summary;
    };
    let (shared, moving): (Vec<FacetId>, Vec<FacetId>) = vertex
        .facets()
        .iter()
        .copied()
        .partition(|&id| mesh.facet_on_vertex(id, start));

    for facet in shared {
        if let Err(e) = mesh.remove_facet(facet) {
            warn!(facet = %facet, error = %e, "Failed to remove collapsed facet");
            summary.failures += 1;
        }
    }

    for facet in moving {
        match mesh.move_facet_corner(facet, end, start) {
            Ok(()) => summary.facets_moved += 1,
            Err(e) => {
                warn!(facet = %facet, from = end, to = start, error = %e, "Failed to move facet");
                summary.failures += 1;
            }
        }
    }

    summary.complete = mesh.vertex(end).is_some_and(|v| !v.is_live());
    if !summary.complete {
        warn!(start, end, "Edge merge left facets on the end vertex");
    }
    summary.facets_removed = facets_before - mesh.facet_count();
    debug!(
        start,
        end,
        removed = summary.facets_removed,
        moved = summary.facets_moved,
        "Merged edge"
    );
    summary
}
