//! Coordinate types and the mapping between the axis and spatial systems
//!
//! Points are authored in the native `(p, c, s)` axis system. Geometry
//! (cell bounds, distances, volumes) is computed in an orthogonal `(x, y, z)`
//! spatial system with the convention `x = c`, `y = p`, `z = -s`.
//!
//! Both types compare and hash exactly. Lattice samples sit on dyadic
//! fractions of the domain, so exact equality is what grid alignment means;
//! no epsilon is involved anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Negate a component so that zero always maps to positive zero
#[inline]
fn flip(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        -value
    }
}

/// Collapse `-0.0` into `0.0` so hashing agrees with `==`
#[inline]
fn canonical_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// A point in the native axis system
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AxisCoord {
    pub p: f64,
    pub c: f64,
    pub s: f64,
}

/// The same point in the orthogonal spatial system
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpatialCoord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisCoord {
    /// Whether all three components are finite
    pub fn is_finite(&self) -> bool {
        self.p.is_finite() && self.c.is_finite() && self.s.is_finite()
    }

    /// Create an axis coordinate, normalizing negative zero components
    pub fn new(p: f64, c: f64, s: f64) -> Self {
        Self {
            p: p + 0.0,
            c: c + 0.0,
            s: s + 0.0,
        }
    }

    /// Build from a `[p, c, s]` triple
    pub fn from_array(pcs: [f64; 3]) -> Self {
        Self::new(pcs[0], pcs[1], pcs[2])
    }

    /// Components as a `[p, c, s]` triple
    pub fn to_array(self) -> [f64; 3] {
        [self.p, self.c, self.s]
    }

    /// Map into the spatial system
    pub fn to_spatial(self) -> SpatialCoord {
        SpatialCoord::new(self.c, self.p, flip(self.s))
    }
}

impl SpatialCoord {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: x + 0.0,
            y: y + 0.0,
            z: z + 0.0,
        }
    }

    pub fn from_array(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Map back into the axis system
    pub fn to_axis(self) -> AxisCoord {
        AxisCoord::new(self.y, self.x, flip(self.z))
    }
}

/// Free-function form of [`AxisCoord::to_spatial`]
pub fn to_spatial(coord: AxisCoord) -> SpatialCoord {
    coord.to_spatial()
}

/// Free-function form of [`SpatialCoord::to_axis`]
pub fn to_axis(coord: SpatialCoord) -> AxisCoord {
    coord.to_axis()
}

impl PartialEq for AxisCoord {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.c == other.c && self.s == other.s
    }
}

impl Eq for AxisCoord {}

impl Hash for AxisCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.p).hash(state);
        canonical_bits(self.c).hash(state);
        canonical_bits(self.s).hash(state);
    }
}

impl PartialEq for SpatialCoord {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Eq for SpatialCoord {}

impl Hash for SpatialCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.x).hash(state);
        canonical_bits(self.y).hash(state);
        canonical_bits(self.z).hash(state);
    }
}

impl fmt::Display for AxisCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(p={}, c={}, s={})", self.p, self.c, self.s)
    }
}

impl fmt::Display for SpatialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={}, y={}, z={})", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for AxisCoord {
    fn from(pcs: [f64; 3]) -> Self {
        Self::from_array(pcs)
    }
}
