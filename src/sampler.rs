//! Trilinear interpolation over a resolved region

use crate::color::{ColorSum, Rgb};
use crate::coord::AxisCoord;
use crate::edit::EditSet;
use crate::error::Result;
use crate::lattice::Lattice;
use crate::region::{resolve, Region};

/// Interpolate the color at `query` from the corners of `region`
///
/// Each corner is weighted by the volume of the sub-cell opposite to it,
/// normalized by the cell volume: the product over the three axes of
/// `(length - distance) / length`.
///
/// On an axis with zero length the factor is 1 for the lower-bound corner
/// and 0 for its upper-bound duplicate, so weights still sum to 1.
pub fn sample(query: &AxisCoord, region: &Region) -> Rgb {
    let target = query.to_spatial().to_array();
    let lengths = region.axis_lengths();
    let mut sum = ColorSum::new();

    for (index, corner) in region.corners().iter().enumerate() {
        let position = corner.spatial.to_array();
        let mut weight = 1.0;

        for axis in 0..3 {
            let length = lengths[axis];
            weight *= if length == 0.0 {
                if Region::is_upper(index, axis) {
                    0.0
                } else {
                    1.0
                }
            } else {
                let distance = (target[axis] - position[axis]).abs();
                (length - distance) / length
            };
        }

        if weight != 0.0 {
            sum.add_weighted(corner.color, weight);
        }
    }

    sum.finish()
}

/// Resolve the enclosing region in `lattice` and interpolate `query`
pub fn query_color(query: &AxisCoord, lattice: &Lattice) -> Result<Rgb> {
    query_color_with_edits(query, lattice, &EditSet::new())
}

/// Like [`query_color`], with `edits` taking priority over lattice corners
pub fn query_color_with_edits(query: &AxisCoord, lattice: &Lattice, edits: &EditSet) -> Result<Rgb> {
    let region = resolve(query, lattice, edits)?;
    Ok(sample(query, &region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::lattice::LatticePoint;

    /// Level 1 lattice whose red channel grows with `p`: p=-100 -> 0, 0 -> 100, 100 -> 200
    fn gradient_lattice() -> Lattice {
        let domain = Domain::default();
        let points = domain.grid(1).unwrap().into_iter().map(|coord| {
            let red = (coord.p + 100.0) as u8;
            LatticePoint::new(coord, Rgb::new(red, 0, 0))
        });
        Lattice::from_points(domain, 1, points)
    }

    #[test]
    fn test_exact_at_samples() {
        let lattice = gradient_lattice();
        for point in lattice.iter() {
            assert_eq!(query_color(&point.axis, &lattice).unwrap(), point.color);
        }
    }

    #[test]
    fn test_linear_along_gradient() {
        let lattice = gradient_lattice();
        let color = query_color(&AxisCoord::new(50.0, 10.0, -20.0), &lattice).unwrap();
        assert_eq!(color, Rgb::new(150, 0, 0));

        let color = query_color(&AxisCoord::new(-75.0, 0.0, 0.0), &lattice).unwrap();
        assert_eq!(color, Rgb::new(25, 0, 0));
    }

    #[test]
    fn test_cell_center_blends_corners() {
        let domain = Domain::default();
        // only the top corner of the (+,+,+) octant is lit
        let points = domain.grid(1).unwrap().into_iter().map(|coord| {
            let lit = coord == AxisCoord::new(100.0, 100.0, 100.0);
            LatticePoint::new(coord, if lit { Rgb::new(200, 80, 8) } else { Rgb::BLACK })
        });
        let lattice = Lattice::from_points(domain, 1, points);

        // center of the cell: every corner weighs 1/8
        let color = query_color(&AxisCoord::new(50.0, 50.0, 50.0), &lattice).unwrap();
        assert_eq!(color, Rgb::new(25, 10, 1));
    }

    #[test]
    fn test_degenerate_axis_does_not_double_count() {
        let lattice = gradient_lattice();
        // c beyond the domain collapses the x axis of the cell
        let color = query_color(&AxisCoord::new(50.0, 140.0, 0.0), &lattice).unwrap();
        assert_eq!(color, Rgb::new(150, 0, 0));
    }

    #[test]
    fn test_query_with_edits_prefers_edit_colors() {
        let lattice = gradient_lattice();
        let edits = EditSet::from_points([crate::edit::EditPoint::new(
            AxisCoord::new(100.0, 0.0, 0.0),
            Rgb::new(0, 0, 250),
        )]);

        let color = query_color_with_edits(&AxisCoord::new(100.0, 0.0, 0.0), &lattice, &edits).unwrap();
        assert_eq!(color, Rgb::new(0, 0, 250));
    }
}
