//! Error types for lattice construction and queries

use crate::coord::SpatialCoord;
use thiserror::Error;

/// Errors surfaced at the engine boundary
///
/// None of these are retried or defaulted internally: substituting a color
/// for a missing corner would silently corrupt the mapping.
#[derive(Debug, Error)]
pub enum LatticeError {
    /// A computed cell corner has no point in either the edits or the lattice
    #[error("no lattice or edit point at spatial coordinate {coord}")]
    LookupMiss { coord: SpatialCoord },

    /// Requested resolution level is outside `1..=max`
    #[error("resolution level {level} is outside 1..={max}")]
    InvalidLevel { level: u32, max: u32 },

    /// Domain bounds do not describe a non-empty interval
    #[error("invalid domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    /// A level above 1 was built without the merged level directly below it
    #[error("resolution level {level} needs the merged level below it as its source, got {found:?}")]
    MissingSourceLevel { level: u32, found: Option<u32> },

    /// Edit coordinate has a NaN or infinite component
    #[error("edit coordinate {coord} is not finite")]
    NonFiniteCoord { coord: crate::coord::AxisCoord },

    /// Tried to remove an edit that is not in the edit set
    #[error("no edit point at {coord}")]
    UnknownEditPoint { coord: crate::coord::AxisCoord },

    /// Exchange document could not be parsed or written
    #[error("color space document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
