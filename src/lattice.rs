//! Lattice points and the per-level lattice container
//!
//! A [`Lattice`] keeps its points in generation order (p-major, then c,
//! then s) and indexes them by spatial coordinate so region lookups are
//! constant time. The distinct sample values along each spatial axis are
//! computed once when the lattice is assembled.

use crate::bounds::AxisSamples;
use crate::color::Rgb;
use crate::coord::{AxisCoord, SpatialCoord};
use crate::domain::Domain;
use std::collections::HashMap;

/// A generated sample point with its derived color
///
/// # Example
///
/// ```
/// use color_space_lattice::{AxisCoord, LatticePoint, Rgb};
///
/// let point = LatticePoint::new(AxisCoord::new(100.0, 0.0, 0.0), Rgb::new(255, 0, 0));
/// assert_eq!(point.spatial.x, 0.0);
/// assert_eq!(point.spatial.y, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint {
    pub axis: AxisCoord,
    pub spatial: SpatialCoord,
    pub color: Rgb,
}

impl LatticePoint {
    /// Create a point, deriving the spatial coordinate from `axis`
    pub fn new(axis: AxisCoord, color: Rgb) -> Self {
        Self {
            axis,
            spatial: axis.to_spatial(),
            color,
        }
    }
}

/// All sample points of one resolution level
#[derive(Debug, Clone, Default)]
pub struct Lattice {
    domain: Domain,
    level: u32,
    points: Vec<LatticePoint>,
    index: HashMap<SpatialCoord, usize>,
    samples: [AxisSamples; 3],
}

impl Lattice {
    /// Assemble a lattice from points
    ///
    /// Points sharing a coordinate collapse into one entry at the position
    /// of the first occurrence, carrying the color of the last.
    pub fn from_points<I: IntoIterator<Item = LatticePoint>>(
        domain: Domain,
        level: u32,
        points: I,
    ) -> Self {
        let iter = points.into_iter();
        let mut unique: Vec<LatticePoint> = Vec::with_capacity(iter.size_hint().0);
        let mut index = HashMap::with_capacity(iter.size_hint().0);

        for point in iter {
            match index.get(&point.spatial) {
                Some(&i) => unique[i] = point,
                None => {
                    index.insert(point.spatial, unique.len());
                    unique.push(point);
                }
            }
        }

        let samples = [
            AxisSamples::from_values(unique.iter().map(|pt| pt.spatial.x)),
            AxisSamples::from_values(unique.iter().map(|pt| pt.spatial.y)),
            AxisSamples::from_values(unique.iter().map(|pt| pt.spatial.z)),
        ];

        Self {
            domain,
            level,
            points: unique,
            index,
            samples,
        }
    }

    /// Domain the lattice samples
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Resolution level this lattice was generated at
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LatticePoint> {
        self.points.iter()
    }

    /// Point at an exact axis coordinate
    pub fn get(&self, coord: &AxisCoord) -> Option<&LatticePoint> {
        self.get_spatial(&coord.to_spatial())
    }

    /// Point at an exact spatial coordinate
    pub fn get_spatial(&self, coord: &SpatialCoord) -> Option<&LatticePoint> {
        self.index.get(coord).map(|&i| &self.points[i])
    }

    pub fn color_at(&self, coord: &AxisCoord) -> Option<Rgb> {
        self.get(coord).map(|pt| pt.color)
    }

    /// Distinct sample values along x, y and z
    pub fn axis_samples(&self) -> &[AxisSamples; 3] {
        &self.samples
    }

    /// Overwrite the color of an existing point, returning whether it exists
    ///
    /// Never adds points, so the sample sets stay valid.
    pub(crate) fn set_color(&mut self, coord: &AxisCoord, color: Rgb) -> bool {
        match self.index.get(&coord.to_spatial()) {
            Some(&i) => {
                self.points[i].color = color;
                true
            }
            None => false,
        }
    }
}

impl PartialEq for Lattice {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain && self.level == other.level && self.points == other.points
    }
}

impl<'a> IntoIterator for &'a Lattice {
    type Item = &'a LatticePoint;
    type IntoIter = std::slice::Iter<'a, LatticePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
