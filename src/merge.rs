//! Overlaying edit points onto a generated lattice

use crate::edit::EditSet;
use crate::lattice::Lattice;
use tracing::trace;

/// Overwrite lattice colors with the edits visible at `level`
///
/// An edit is visible when every component lands on a sample of `level`.
/// Visible edits recolor the point at the same coordinate; edits with no
/// matching point are skipped. No points are added or removed. Returns the
/// number of points recolored.
pub fn merge_into(lattice: &mut Lattice, edits: &EditSet, level: u32) -> usize {
    let domain = *lattice.domain();
    let mut visible = 0;
    let mut applied = 0;

    for edit in edits.visible_at(&domain, level) {
        visible += 1;
        if lattice.set_color(&edit.coord, edit.color) {
            applied += 1;
        }
    }

    trace!(level, visible, applied, total = edits.len(), "merged edit points");
    applied
}

/// Owned form of [`merge_into`]
pub fn merge_edits(mut lattice: Lattice, edits: &EditSet, level: u32) -> Lattice {
    merge_into(&mut lattice, edits, level);
    lattice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::coord::AxisCoord;
    use crate::domain::Domain;
    use crate::edit::EditPoint;
    use crate::lattice::LatticePoint;

    fn black_lattice(level: u32) -> Lattice {
        let domain = Domain::default();
        let points = domain
            .grid(level)
            .unwrap()
            .into_iter()
            .map(|coord| LatticePoint::new(coord, Rgb::BLACK));
        Lattice::from_points(domain, level, points)
    }

    #[test]
    fn test_visible_edit_recolors_point() {
        let edits = EditSet::from_points([EditPoint::new(
            AxisCoord::new(0.0, -100.0, 100.0),
            Rgb::new(0, 200, 0),
        )]);

        let lattice = merge_edits(black_lattice(1), &edits, 1);
        assert_eq!(lattice.len(), 27);
        assert_eq!(lattice.color_at(&AxisCoord::new(0.0, -100.0, 100.0)), Some(Rgb::new(0, 200, 0)));
    }

    #[test]
    fn test_invisible_edit_is_skipped() {
        let edits = EditSet::from_points([EditPoint::new(
            AxisCoord::new(50.0, 0.0, 0.0),
            Rgb::new(9, 9, 9),
        )]);

        let mut lattice = black_lattice(1);
        assert_eq!(merge_into(&mut lattice, &edits, 1), 0);
        assert!(lattice.iter().all(|pt| pt.color == Rgb::BLACK));

        let mut finer = black_lattice(2);
        assert_eq!(merge_into(&mut finer, &edits, 2), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let edits = EditSet::from_points([
            EditPoint::new(AxisCoord::new(100.0, 0.0, 0.0), Rgb::new(255, 0, 0)),
            EditPoint::new(AxisCoord::new(-50.0, 50.0, 0.0), Rgb::new(1, 2, 3)),
        ]);

        let once = merge_edits(black_lattice(2), &edits, 2);
        let twice = merge_edits(once.clone(), &edits, 2);
        assert_eq!(once, twice);
    }
}
