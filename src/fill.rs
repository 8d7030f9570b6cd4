//! Bulk sampling of the color space on a regular fill grid
//!
//! The fill grid is independent of the lattice resolution: it is a finer
//! (or coarser) regular grid whose every cell is colored by querying the
//! current lattice. Per-axis slices restrict the volume that gets sampled.

use crate::color::Rgb;
use crate::coord::AxisCoord;
use crate::domain::Domain;
use crate::edit::EditSet;
use crate::error::{LatticeError, Result};
use crate::lattice::Lattice;
use crate::sampler::query_color_with_edits;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::time::Instant;
use tracing::debug;

/// Which part of the space to fill and how densely
#[derive(Debug, Clone, PartialEq)]
pub struct FillSpec {
    pub resolution: u32,
    pub slice_p: RangeInclusive<f64>,
    pub slice_c: RangeInclusive<f64>,
    pub slice_s: RangeInclusive<f64>,
}

impl FillSpec {
    /// Fill the whole domain at `resolution`
    pub fn whole(domain: &Domain, resolution: u32) -> Self {
        let full = domain.min()..=domain.max();
        Self {
            resolution,
            slice_p: full.clone(),
            slice_c: full.clone(),
            slice_s: full,
        }
    }

    pub fn with_slice_p(mut self, slice: RangeInclusive<f64>) -> Self {
        self.slice_p = slice;
        self
    }

    pub fn with_slice_c(mut self, slice: RangeInclusive<f64>) -> Self {
        self.slice_c = slice;
        self
    }

    pub fn with_slice_s(mut self, slice: RangeInclusive<f64>) -> Self {
        self.slice_s = slice;
        self
    }

    /// Whether `coord` lies inside all three slices
    pub fn contains(&self, coord: &AxisCoord) -> bool {
        self.slice_p.contains(&coord.p)
            && self.slice_c.contains(&coord.c)
            && self.slice_s.contains(&coord.s)
    }
}

/// Spacing of the fill grid: a tenth of the domain at resolution 1, halved per level
pub fn fill_step(domain: &Domain, resolution: u32) -> f64 {
    domain.length() / (10.0 * 2f64.powi(resolution as i32 - 1))
}

/// One colored cell of the fill grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSample {
    pub coord: AxisCoord,
    pub color: Rgb,
}

/// Colored fill grid, p-major then c then s
#[derive(Debug, Clone, PartialEq)]
pub struct FillGrid {
    pub step: f64,
    pub samples: Vec<FillSample>,
}

impl FillGrid {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Color every fill-grid coordinate inside the slices of `spec`
///
/// `spec.resolution` must be in `1..=max_level`.
pub fn fill_grid(
    lattice: &Lattice,
    edits: &EditSet,
    spec: &FillSpec,
    max_level: u32,
) -> Result<FillGrid> {
    if spec.resolution == 0 || spec.resolution > max_level {
        return Err(LatticeError::InvalidLevel {
            level: spec.resolution,
            max: max_level,
        });
    }

    let start = Instant::now();
    let domain = lattice.domain();
    let step = fill_step(domain, spec.resolution);
    let axis = domain.samples_with_step(step);

    let pick = |slice: &RangeInclusive<f64>| -> Vec<f64> {
        axis.iter().copied().filter(|v| slice.contains(v)).collect()
    };
    let (ps, cs, ss) = (pick(&spec.slice_p), pick(&spec.slice_c), pick(&spec.slice_s));

    let mut coords = Vec::with_capacity(ps.len() * cs.len() * ss.len());
    for &p in &ps {
        for &c in &cs {
            for &s in &ss {
                coords.push(AxisCoord::new(p, c, s));
            }
        }
    }

    let samples = coords
        .par_iter()
        .map(|coord| {
            let color = query_color_with_edits(coord, lattice, edits)?;
            Ok(FillSample {
                coord: *coord,
                color,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        resolution = spec.resolution,
        level = lattice.level(),
        samples = samples.len(),
        elapsed = ?start.elapsed(),
        "filled color space"
    );

    Ok(FillGrid { step, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_lattice;
    use crate::config::DEFAULT_MAX_LEVEL;

    #[test]
    fn test_fill_step() {
        let domain = Domain::default();
        assert_eq!(fill_step(&domain, 1), 20.0);
        assert_eq!(fill_step(&domain, 2), 10.0);
        assert_eq!(fill_step(&domain, 5), 1.25);
    }

    #[test]
    fn test_whole_fill_size() {
        let lattice = build_lattice(1, &EditSet::new()).unwrap();
        let spec = FillSpec::whole(lattice.domain(), 1);
        let grid = fill_grid(&lattice, &EditSet::new(), &spec, DEFAULT_MAX_LEVEL).unwrap();

        assert_eq!(grid.step, 20.0);
        assert_eq!(grid.len(), 11 * 11 * 11);
        assert!(grid.samples.iter().all(|sample| sample.color == Rgb::BLACK));
    }

    #[test]
    fn test_slices_restrict_samples() {
        let lattice = build_lattice(1, &EditSet::new()).unwrap();
        let spec = FillSpec::whole(lattice.domain(), 1)
            .with_slice_p(0.0..=100.0)
            .with_slice_s(-20.0..=20.0);
        let grid = fill_grid(&lattice, &EditSet::new(), &spec, DEFAULT_MAX_LEVEL).unwrap();

        assert_eq!(grid.len(), 6 * 11 * 3);
        assert!(grid.samples.iter().all(|sample| spec.contains(&sample.coord)));
        assert_eq!(grid.samples[0].coord, AxisCoord::new(0.0, -100.0, -20.0));
    }

    #[test]
    fn test_resolution_out_of_range() {
        let lattice = build_lattice(1, &EditSet::new()).unwrap();
        let spec = FillSpec::whole(lattice.domain(), 0);
        assert!(matches!(
            fill_grid(&lattice, &EditSet::new(), &spec, DEFAULT_MAX_LEVEL),
            Err(LatticeError::InvalidLevel { level: 0, .. })
        ));
    }
}
