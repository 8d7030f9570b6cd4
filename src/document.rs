//! Exchange format for saving and loading a color space
//!
//! ```json
//! {
//!   "colorSpace": [{ "pcs": [-100, -100, -100], "color": [0, 0, 0] }, ...],
//!   "editPoints": [{ "pcs": [100, 0, 0], "color": [255, 0, 0] }]
//! }
//! ```
//!
//! Spatial coordinates are not stored; they are derived on load.

use crate::color::Rgb;
use crate::coord::AxisCoord;
use crate::edit::{EditPoint, EditSet};
use crate::error::Result;
use crate::lattice::{Lattice, LatticePoint};
use serde::{Deserialize, Serialize};

/// A coordinate and its color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub pcs: [f64; 3],
    pub color: Rgb,
}

impl PointRecord {
    pub fn coord(&self) -> AxisCoord {
        AxisCoord::from_array(self.pcs)
    }
}

impl From<&LatticePoint> for PointRecord {
    fn from(point: &LatticePoint) -> Self {
        Self {
            pcs: point.axis.to_array(),
            color: point.color,
        }
    }
}

impl From<&EditPoint> for PointRecord {
    fn from(edit: &EditPoint) -> Self {
        Self {
            pcs: edit.coord.to_array(),
            color: edit.color,
        }
    }
}

impl From<PointRecord> for EditPoint {
    fn from(record: PointRecord) -> Self {
        EditPoint::new(record.coord(), record.color)
    }
}

impl From<PointRecord> for LatticePoint {
    fn from(record: PointRecord) -> Self {
        LatticePoint::new(record.coord(), record.color)
    }
}

/// Saved lattice and edits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSpaceDocument {
    #[serde(default)]
    pub color_space: Vec<PointRecord>,
    #[serde(default)]
    pub edit_points: Vec<PointRecord>,
}

impl ColorSpaceDocument {
    pub fn new(lattice: &Lattice, edits: &EditSet) -> Self {
        Self {
            color_space: lattice.iter().map(PointRecord::from).collect(),
            edit_points: edits.iter().map(PointRecord::from).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn edits(&self) -> EditSet {
        self.edit_points.iter().copied().map(EditPoint::from).collect()
    }
}
