//! Integration grids merging curve knots with contract boundaries.
//!
//! The protection and accrual integrals are exact between consecutive nodes
//! as long as both curves are log-linear there, so the integration grid is
//! the union of the interval boundaries with every curve knot that falls
//! strictly inside the interval.

/// Two grid times closer than this count as the same node.
pub const TOLERANCE: f64 = 1e-10;

fn inside(t: f64, start: f64, end: f64) -> bool {
    t - start > TOLERANCE && end - t > TOLERANCE
}

/// Builds the sorted, deduplicated integration grid for `[start, end]`.
///
/// The result always begins with `start` and ends with `end`; between them
/// sit all yield-curve and credit-curve knots strictly inside the interval,
/// each appearing once. Requires `start < end`.
#[must_use]
pub fn integration_nodes(
    start: f64,
    end: f64,
    yield_knots: &[f64],
    credit_knots: &[f64],
) -> Vec<f64> {
    let mut interior: Vec<f64> = yield_knots
        .iter()
        .chain(credit_knots)
        .copied()
        .filter(|&t| inside(t, start, end))
        .collect();
    interior.sort_by(f64::total_cmp);

    let mut nodes = Vec::with_capacity(interior.len() + 2);
    nodes.push(start);
    for t in interior {
        let last = nodes[nodes.len() - 1];
        if t - last > TOLERANCE {
            nodes.push(t);
        }
    }
    nodes.push(end);
    nodes
}

/// Restricts a sorted grid to `[lo, hi]`, keeping the boundaries.
///
/// Points strictly inside the window survive; `lo` and `hi` themselves are
/// prepended/appended so the result always spans the full window. A
/// degenerate window (`lo ≥ hi` up to tolerance) collapses to a single
/// node, which integration loops treat as an empty contribution.
#[must_use]
pub fn truncate_inclusive(lo: f64, hi: f64, points: &[f64]) -> Vec<f64> {
    if hi - lo <= TOLERANCE {
        return vec![lo];
    }
    let mut nodes = Vec::with_capacity(points.len() + 2);
    nodes.push(lo);
    nodes.extend(points.iter().copied().filter(|&t| inside(t, lo, hi)));
    nodes.push(hi);
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_interior_knots() {
        let nodes = integration_nodes(0.0, 5.0, &[7.0, 10.0], &[6.0]);
        assert_eq!(nodes, vec![0.0, 5.0]);
    }

    #[test]
    fn test_merges_and_sorts_both_knot_sets() {
        let nodes = integration_nodes(0.0, 5.0, &[0.5, 2.0, 4.0], &[1.0, 3.0]);
        assert_eq!(nodes, vec![0.0, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_duplicate_knots_appear_once() {
        let nodes = integration_nodes(0.0, 5.0, &[1.0, 2.0], &[2.0, 3.0]);
        assert_eq!(nodes, vec![0.0, 1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_knots_near_boundaries_are_absorbed() {
        let nodes = integration_nodes(0.0, 5.0, &[5e-11, 5.0 - 5e-11], &[2.0]);
        assert_eq!(nodes, vec![0.0, 2.0, 5.0]);
    }

    #[test]
    fn test_near_coincident_interior_knots_collapse() {
        let nodes = integration_nodes(0.0, 5.0, &[2.0], &[2.0 + 5e-11]);
        assert_eq!(nodes, vec![0.0, 2.0, 5.0]);
    }

    #[test]
    fn test_truncate_keeps_interior_and_boundaries() {
        let grid = vec![0.0, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0];
        let nodes = truncate_inclusive(0.75, 3.5, &grid);
        assert_eq!(nodes, vec![0.75, 1.0, 2.0, 3.0, 3.5]);
    }

    #[test]
    fn test_truncate_with_matching_boundaries() {
        let grid = vec![0.0, 1.0, 2.0, 3.0];
        let nodes = truncate_inclusive(1.0, 3.0, &grid);
        assert_eq!(nodes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_truncate_degenerate_window() {
        let grid = vec![0.0, 1.0, 2.0];
        assert_eq!(truncate_inclusive(1.5, 1.5, &grid).len(), 1);
        assert_eq!(truncate_inclusive(2.0, 1.0, &grid).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_nodes_span_interval_sorted_and_deduplicated(
            start in 0.0f64..5.0,
            span in 0.1f64..30.0,
            yield_knots in proptest::collection::vec(0.0f64..40.0, 0..12),
            credit_knots in proptest::collection::vec(0.0f64..40.0, 0..12),
        ) {
            let end = start + span;
            let nodes = integration_nodes(start, end, &yield_knots, &credit_knots);
            prop_assert_eq!(nodes[0], start);
            prop_assert_eq!(*nodes.last().unwrap(), end);
            for pair in nodes.windows(2) {
                prop_assert!(pair[1] - pair[0] > TOLERANCE);
            }
        }

        #[test]
        fn prop_truncation_never_widens(
            lo in 0.0f64..10.0,
            width in 0.001f64..10.0,
            points in proptest::collection::vec(0.0f64..20.0, 0..16),
        ) {
            let hi = lo + width;
            let mut sorted = points;
            sorted.sort_by(f64::total_cmp);
            let nodes = truncate_inclusive(lo, hi, &sorted);
            prop_assert_eq!(nodes[0], lo);
            for &t in &nodes {
                prop_assert!(t >= lo && t <= hi);
            }
        }
    }
}
