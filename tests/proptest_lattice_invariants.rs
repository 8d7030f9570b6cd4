//! Property-based invariant tests for the color lattice.
//!
//! Verifies:
//! 1. Coordinate mapping: axis -> spatial -> axis is the identity
//! 2. Bounds: every in-domain query lies between two distinct samples
//! 3. Exactness: querying a lattice point returns its stored color
//! 4. Edits: every visible edit lands on its lattice point unchanged
//! 5. Merge: merging the same edits twice changes nothing
//! 6. Constant lattices interpolate to the same constant
//! 7. Every in-domain query succeeds
//! 8. Documents survive a JSON round trip

use color_space_lattice::{
    build_lattice, find_bounds, merge_edits, query_color, to_axis, to_spatial, AxisCoord,
    ColorSpaceDocument, Domain, EditPoint, EditSet, Lattice, LatticePoint, Rgb,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn arb_in_domain() -> impl Strategy<Value = AxisCoord> {
    (-100.0..=100.0f64, -100.0..=100.0f64, -100.0..=100.0f64)
        .prop_map(|(p, c, s)| AxisCoord::new(p, c, s))
}

/// A coordinate on the level 2 grid (step 50)
fn arb_grid_coord() -> impl Strategy<Value = AxisCoord> {
    (0u32..=4, 0u32..=4, 0u32..=4).prop_map(|(p, c, s)| {
        AxisCoord::new(
            -100.0 + p as f64 * 50.0,
            -100.0 + c as f64 * 50.0,
            -100.0 + s as f64 * 50.0,
        )
    })
}

fn arb_edits() -> impl Strategy<Value = EditSet> {
    prop::collection::vec((arb_grid_coord(), arb_rgb()), 0..8).prop_map(|points| {
        points
            .into_iter()
            .map(|(coord, color)| EditPoint::new(coord, color))
            .collect()
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Coordinate mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coord_roundtrip(coord in arb_in_domain()) {
        let spatial = to_spatial(coord);
        prop_assert_eq!(spatial.x, coord.c);
        prop_assert_eq!(spatial.y, coord.p);
        prop_assert_eq!(to_axis(spatial), coord);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounds_enclose_query(level in 1u32..=5, query in -100.0..=100.0f64) {
        let domain = Domain::default();
        let samples = domain.samples(level);
        let (lower, upper) = find_bounds(query, &samples);

        prop_assert!(lower <= query && query <= upper, "{} not in [{}, {}]", query, lower, upper);
        prop_assert!(lower < upper);
        prop_assert!(upper - lower <= domain.step(level) + 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 - 5, 7. Lattice points, edits, merge, queries
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn lattice_points_are_exact(level in 1u32..=3, edits in arb_edits()) {
        let lattice = build_lattice(level, &edits).unwrap();
        for point in lattice.iter() {
            let color = query_color(&point.axis, &lattice).unwrap();
            prop_assert_eq!(color, point.color, "at {}", point.axis);
        }
    }

    #[test]
    fn visible_edits_are_merged(level in 1u32..=3, edits in arb_edits()) {
        let domain = Domain::default();
        let lattice = build_lattice(level, &edits).unwrap();
        for edit in edits.iter() {
            if domain.is_on_grid(&edit.coord, level) {
                prop_assert_eq!(lattice.color_at(&edit.coord), Some(edit.color));
            } else {
                prop_assert!(lattice.get(&edit.coord).is_none());
            }
        }
    }

    #[test]
    fn merge_is_idempotent(level in 1u32..=3, edits in arb_edits()) {
        let lattice = build_lattice(level, &edits).unwrap();
        let merged = merge_edits(lattice.clone(), &edits, level);
        prop_assert_eq!(merged, lattice);
    }

    #[test]
    fn queries_in_domain_succeed(edits in arb_edits(), queries in prop::collection::vec(arb_in_domain(), 1..32)) {
        let lattice = build_lattice(2, &edits).unwrap();
        for query in queries {
            prop_assert!(query_color(&query, &lattice).is_ok(), "query {}", query);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Constant lattices
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn constant_lattice_interpolates_constant(color in arb_rgb(), query in arb_in_domain()) {
        let domain = Domain::default();
        let points = domain.grid(1).unwrap().into_iter().map(|coord| LatticePoint::new(coord, color));
        let lattice = Lattice::from_points(domain, 1, points);
        prop_assert_eq!(query_color(&query, &lattice).unwrap(), color);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Documents
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn document_json_roundtrip(edits in arb_edits()) {
        let lattice = build_lattice(1, &edits).unwrap();
        let document = ColorSpaceDocument::new(&lattice, &edits);
        let json = document.to_json().unwrap();
        let back = ColorSpaceDocument::from_json(&json).unwrap();

        prop_assert_eq!(&back, &document);
        prop_assert_eq!(back.edits(), edits);
    }
}
