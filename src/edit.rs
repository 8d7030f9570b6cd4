//! User-authored color overrides

use crate::color::Rgb;
use crate::coord::{AxisCoord, SpatialCoord};
use crate::domain::Domain;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A color the user pinned at an exact coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditPoint {
    pub coord: AxisCoord,
    pub color: Rgb,
}

impl EditPoint {
    pub fn new(coord: AxisCoord, color: Rgb) -> Self {
        Self { coord, color }
    }

    pub fn spatial(&self) -> SpatialCoord {
        self.coord.to_spatial()
    }
}

/// Ordered set of edit points, unique by coordinate
///
/// Insertion order is kept so exported documents are stable; lookups go
/// through a spatial index.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    points: Vec<EditPoint>,
    index: HashMap<SpatialCoord, usize>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence, later entries overriding earlier ones
    pub fn from_points<I: IntoIterator<Item = EditPoint>>(points: I) -> Self {
        let mut set = Self::new();
        for point in points {
            set.upsert(point);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[EditPoint] {
        &self.points
    }

    pub fn get(&self, coord: &AxisCoord) -> Option<&EditPoint> {
        self.get_spatial(&coord.to_spatial())
    }

    pub fn get_spatial(&self, coord: &SpatialCoord) -> Option<&EditPoint> {
        self.index.get(coord).map(|&i| &self.points[i])
    }

    pub fn contains(&self, coord: &AxisCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Color of the edit at `coord`, if any
    pub fn color_of(&self, coord: &AxisCoord) -> Option<Rgb> {
        self.get(coord).map(|edit| edit.color)
    }

    /// Insert an edit or recolor the existing one, returning the old color
    pub fn upsert(&mut self, edit: EditPoint) -> Option<Rgb> {
        let key = edit.spatial();
        match self.index.get(&key) {
            Some(&i) => {
                let previous = self.points[i].color;
                self.points[i].color = edit.color;
                Some(previous)
            }
            None => {
                self.index.insert(key, self.points.len());
                self.points.push(edit);
                None
            }
        }
    }

    /// Remove the edit at `coord`
    pub fn remove(&mut self, coord: &AxisCoord) -> Option<EditPoint> {
        let i = self.index.remove(&coord.to_spatial())?;
        let removed = self.points.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Edits lying on a lattice sample at `level`
    pub fn visible_at<'a>(
        &'a self,
        domain: &'a Domain,
        level: u32,
    ) -> impl Iterator<Item = &'a EditPoint> + 'a {
        self.points
            .iter()
            .filter(move |edit| domain.is_on_grid(&edit.coord, level))
    }
}

impl PartialEq for EditSet {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl FromIterator<EditPoint> for EditSet {
    fn from_iter<I: IntoIterator<Item = EditPoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<'a> IntoIterator for &'a EditSet {
    type Item = &'a EditPoint;
    type IntoIter = std::slice::Iter<'a, EditPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
