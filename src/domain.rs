//! The bounded cube the color mapping is defined over
//!
//! Every axis spans the same `[min, max]` interval. Resolution level `r`
//! samples each axis at `min + k * length / 2^r` for `k` in `0..=2^r`.

use crate::coord::AxisCoord;
use crate::error::{LatticeError, Result};
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Deepest level any domain will generate
///
/// Level 10 already holds `1025^3`, about 1.08e9 points.
pub const MAX_SUPPORTED_LEVEL: u32 = 10;

/// One of the three native axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    P,
    C,
    S,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::P, Axis::C, Axis::S];

    /// Component of `coord` along this axis
    pub fn component(self, coord: &AxisCoord) -> f64 {
        match self {
            Axis::P => coord.p,
            Axis::C => coord.c,
            Axis::S => coord.s,
        }
    }
}

/// Which extreme of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    Min,
    Max,
}

/// A pure-axis end: one axis at an extreme, the other two at the midpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisEnd {
    pub axis: Axis,
    pub end: End,
}

impl AxisEnd {
    pub const fn new(axis: Axis, end: End) -> Self {
        Self { axis, end }
    }

    /// All six ends, in `(P, C, S) x (Min, Max)` order
    pub fn all() -> [AxisEnd; 6] {
        [
            AxisEnd::new(Axis::P, End::Min),
            AxisEnd::new(Axis::P, End::Max),
            AxisEnd::new(Axis::C, End::Min),
            AxisEnd::new(Axis::C, End::Max),
            AxisEnd::new(Axis::S, End::Min),
            AxisEnd::new(Axis::S, End::Max),
        ]
    }
}

/// Symmetric cubic domain shared by all three axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: -100.0,
            max: 100.0,
        }
    }
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(LatticeError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0 + 0.0
    }

    /// Sample spacing at `level`
    pub fn step(&self, level: u32) -> f64 {
        self.length() / 2f64.powi(level as i32)
    }

    /// Samples along one axis at `level`, ascending, both ends included
    pub fn samples(&self, level: u32) -> Vec<f64> {
        self.samples_with_step(self.step(level))
    }

    pub(crate) fn samples_with_step(&self, step: f64) -> Vec<f64> {
        let count = (self.length() / step).round() as usize;
        (0..=count)
            .map(|k| {
                if k == count {
                    self.max
                } else {
                    self.min + k as f64 * step + 0.0
                }
            })
            .collect()
    }

    /// Every grid coordinate at `level`, p-major then c then s
    ///
    /// Fails with [`LatticeError::InvalidLevel`] above [`MAX_SUPPORTED_LEVEL`].
    pub fn grid(&self, level: u32) -> Result<Vec<AxisCoord>> {
        let invalid = LatticeError::InvalidLevel {
            level,
            max: MAX_SUPPORTED_LEVEL,
        };
        if level > MAX_SUPPORTED_LEVEL {
            return Err(invalid);
        }
        let samples = self.samples(level);
        let capacity = samples.len().checked_pow(3).ok_or(invalid)?;
        let mut coords = Vec::with_capacity(capacity);
        for &p in &samples {
            for &c in &samples {
                for &s in &samples {
                    coords.push(AxisCoord::new(p, c, s));
                }
            }
        }
        Ok(coords)
    }

    /// Whether every component of `coord` falls on a sample at `level`
    pub fn is_on_grid(&self, coord: &AxisCoord, level: u32) -> bool {
        let step = self.step(level);
        [coord.p, coord.c, coord.s].iter().all(|&v| {
            v >= self.min && v <= self.max && ((v - self.min) % step) == 0.0
        })
    }

    /// Whether `coord` is on the level 1 grid (components in `{min, mid, max}`)
    ///
    /// These 27 points are recomposed from the axis ends at every level
    /// instead of being interpolated.
    pub fn is_base_point(&self, coord: &AxisCoord) -> bool {
        let mid = self.midpoint();
        [coord.p, coord.c, coord.s]
            .iter()
            .all(|&v| v == self.min || v == mid || v == self.max)
    }

    pub fn balance_point(&self) -> AxisCoord {
        let mid = self.midpoint();
        AxisCoord::new(mid, mid, mid)
    }

    pub fn is_balance_point(&self, coord: &AxisCoord) -> bool {
        *coord == self.balance_point()
    }

    /// Coordinate of a pure-axis end
    pub fn axis_end_coord(&self, end: AxisEnd) -> AxisCoord {
        let mid = self.midpoint();
        let extreme = match end.end {
            End::Min => self.min,
            End::Max => self.max,
        };
        match end.axis {
            Axis::P => AxisCoord::new(extreme, mid, mid),
            Axis::C => AxisCoord::new(mid, extreme, mid),
            Axis::S => AxisCoord::new(mid, mid, extreme),
        }
    }

    /// The pure-axis end at `coord`, if it is one
    pub fn axis_end_at(&self, coord: &AxisCoord) -> Option<AxisEnd> {
        AxisEnd::all()
            .into_iter()
            .find(|&end| self.axis_end_coord(end) == *coord)
    }

    /// Axis ends whose colors compose into the base point `coord`
    ///
    /// A base point receives one contribution per axis sitting at an
    /// extreme: face centers get one, edge midpoints two, cube corners three.
    /// Non-base points get none.
    pub fn contributing_ends(&self, coord: &AxisCoord) -> ArrayVec<AxisEnd, 3> {
        let mut ends = ArrayVec::new();
        if !self.is_base_point(coord) {
            return ends;
        }
        for axis in Axis::ALL {
            let value = axis.component(coord);
            if value == self.max {
                ends.push(AxisEnd::new(axis, End::Max));
            } else if value == self.min {
                ends.push(AxisEnd::new(axis, End::Min));
            }
        }
        ends
    }
}
