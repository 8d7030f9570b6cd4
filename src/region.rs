//! Locating the lattice cell that encloses a query coordinate
//!
//! A region is the 8 corners of the smallest lattice cell containing the
//! query. Corners are addressed by a 3-bit index; a set bit means the lower
//! bound on that spatial axis:
//!
//! | index | x | y | z |
//! |-------|---|---|---|
//! | 0     | + | + | + |
//! | 1     | + | + | - |
//! | 2     | + | - | + |
//! | ...   |   |   |   |
//! | 7     | - | - | - |

use crate::color::Rgb;
use crate::coord::{AxisCoord, SpatialCoord};
use crate::edit::EditSet;
use crate::error::{LatticeError, Result};
use crate::lattice::Lattice;
use tracing::warn;

/// Where a region corner's color came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PointSource {
    Edit,
    #[default]
    Lattice,
}

/// One corner of a resolved region
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionPoint {
    pub spatial: SpatialCoord,
    pub color: Rgb,
    pub source: PointSource,
}

impl RegionPoint {
    pub fn axis(&self) -> AxisCoord {
        self.spatial.to_axis()
    }
}

/// The 8 corners around a query plus the cell extent on each spatial axis
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    corners: [RegionPoint; 8],
    lower: SpatialCoord,
    upper: SpatialCoord,
    axis_lengths: [f64; 3],
}

impl Region {
    pub const CORNERS: usize = 8;

    pub fn corners(&self) -> &[RegionPoint; 8] {
        &self.corners
    }

    /// Lower bound on each spatial axis
    pub fn lower(&self) -> SpatialCoord {
        self.lower
    }

    /// Upper bound on each spatial axis
    pub fn upper(&self) -> SpatialCoord {
        self.upper
    }

    /// `upper - lower` along x, y and z
    pub fn axis_lengths(&self) -> [f64; 3] {
        self.axis_lengths
    }

    /// Whether the cell has zero extent along spatial axis `axis` (0 = x)
    pub fn is_degenerate(&self, axis: usize) -> bool {
        self.axis_lengths[axis] == 0.0
    }

    /// Whether corner `index` sits on the upper bound of spatial axis `axis`
    pub fn is_upper(index: usize, axis: usize) -> bool {
        index & (4 >> axis) == 0
    }
}

/// Find the 8 points enclosing `query`
///
/// Bounds come from the lattice's distinct samples on each spatial axis.
/// Each corner is looked up in `edits` first and in `lattice` second. A
/// corner missing from both is a [`LatticeError::LookupMiss`], meaning the
/// lattice does not cover its own sample grid.
pub fn resolve(query: &AxisCoord, lattice: &Lattice, edits: &EditSet) -> Result<Region> {
    let target = query.to_spatial();
    let [xs, ys, zs] = lattice.axis_samples();

    let (x_lower, x_upper) = xs.bounds(target.x);
    let (y_lower, y_upper) = ys.bounds(target.y);
    let (z_lower, z_upper) = zs.bounds(target.z);

    let lower = SpatialCoord::new(x_lower, y_lower, z_lower);
    let upper = SpatialCoord::new(x_upper, y_upper, z_upper);

    let mut corners = [RegionPoint::default(); Region::CORNERS];
    for (index, corner) in corners.iter_mut().enumerate() {
        let pick = |axis: usize, low: f64, high: f64| {
            if Region::is_upper(index, axis) {
                high
            } else {
                low
            }
        };
        let spatial = SpatialCoord::new(
            pick(0, x_lower, x_upper),
            pick(1, y_lower, y_upper),
            pick(2, z_lower, z_upper),
        );
        *corner = lookup(&spatial, lattice, edits)?;
    }

    Ok(Region {
        corners,
        lower,
        upper,
        axis_lengths: [x_upper - x_lower, y_upper - y_lower, z_upper - z_lower],
    })
}

fn lookup(spatial: &SpatialCoord, lattice: &Lattice, edits: &EditSet) -> Result<RegionPoint> {
    if let Some(edit) = edits.get_spatial(spatial) {
        return Ok(RegionPoint {
            spatial: *spatial,
            color: edit.color,
            source: PointSource::Edit,
        });
    }

    match lattice.get_spatial(spatial) {
        Some(point) => Ok(RegionPoint {
            spatial: *spatial,
            color: point.color,
            source: PointSource::Lattice,
        }),
        None => {
            warn!(coord = %spatial, level = lattice.level(), "region corner missing from lattice");
            Err(LatticeError::LookupMiss { coord: *spatial })
        }
    }
}
