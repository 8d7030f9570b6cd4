//! Multi-resolution lattice construction
//!
//! Level 1 is composed from the six axis-end colors alone. Every finer
//! level regenerates the full grid: the 27 base points are recomposed from
//! the axis ends, and every other sample is interpolated from the fully
//! merged level below. Each level is merged with the edits visible at its
//! resolution before it becomes the source for the next one.
//!
//! Levels are kept as immutable `Arc` snapshots in a [`LatticeStack`], so
//! readers of an older level are never affected by a build in progress.

use crate::color::{ColorSum, Rgb};
use crate::config::DEFAULT_MAX_LEVEL;
use crate::coord::AxisCoord;
use crate::domain::{Axis, AxisEnd, Domain, End, MAX_SUPPORTED_LEVEL};
use crate::edit::EditSet;
use crate::error::{LatticeError, Result};
use crate::lattice::{Lattice, LatticePoint};
use crate::merge::merge_into;
use crate::region::resolve;
use crate::sampler::sample;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Colors of the six pure-axis ends, black unless edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisEndColors {
    colors: [Rgb; 6],
}

impl AxisEndColors {
    pub fn from_edits(domain: &Domain, edits: &EditSet) -> Self {
        let mut colors = [Rgb::BLACK; 6];
        for (slot, end) in colors.iter_mut().zip(AxisEnd::all()) {
            if let Some(color) = edits.color_of(&domain.axis_end_coord(end)) {
                *slot = color;
            }
        }
        Self { colors }
    }

    pub fn get(&self, end: AxisEnd) -> Rgb {
        let axis = match end.axis {
            Axis::P => 0,
            Axis::C => 2,
            Axis::S => 4,
        };
        let side = match end.end {
            End::Min => 0,
            End::Max => 1,
        };
        self.colors[axis + side]
    }

    /// Color of the balance point
    ///
    /// Each channel averages the two ends of a fixed axis: red from the
    /// `s` ends, green from the `c` ends, blue from the `p` ends.
    pub fn balance(&self) -> Rgb {
        let average = |axis: Axis, channel: usize| {
            let min = self.get(AxisEnd::new(axis, End::Min)).channels()[channel];
            let max = self.get(AxisEnd::new(axis, End::Max)).channels()[channel];
            (min + max) / 2.0
        };

        ColorSum::from_channels([
            average(Axis::S, 0),
            average(Axis::C, 1),
            average(Axis::P, 2),
        ])
        .finish()
    }
}

/// Arena of merged lattices, one per level starting at level 1
#[derive(Debug, Clone, Default)]
pub struct LatticeStack {
    levels: Vec<Arc<Lattice>>,
}

impl LatticeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finest level present, 0 when empty
    pub fn finest_level(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Snapshot of `level`, if built
    pub fn get(&self, level: u32) -> Option<&Arc<Lattice>> {
        let index = (level as usize).checked_sub(1)?;
        self.levels.get(index)
    }

    pub fn finest(&self) -> Option<&Arc<Lattice>> {
        self.levels.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Lattice>> {
        self.levels.iter()
    }

    /// Drop every level above `level`
    pub fn truncate(&mut self, level: u32) {
        self.levels.truncate(level as usize);
    }

    pub(crate) fn into_finest(mut self) -> Option<Arc<Lattice>> {
        self.levels.pop()
    }

    pub(crate) fn push(&mut self, lattice: Lattice) {
        self.levels.push(Arc::new(lattice));
    }
}

/// Builds lattices over a domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeBuilder {
    domain: Domain,
    max_level: u32,
}

impl Default for LatticeBuilder {
    fn default() -> Self {
        Self::new(Domain::default())
    }
}

impl LatticeBuilder {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Raise or lower the deepest level this builder accepts
    ///
    /// Levels above [`MAX_SUPPORTED_LEVEL`] are refused regardless.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Deepest level [`build`](Self::build) accepts
    pub fn max_level(&self) -> u32 {
        self.max_level.min(MAX_SUPPORTED_LEVEL)
    }

    pub fn check_level(&self, level: u32) -> Result<()> {
        let max = self.max_level();
        if level == 0 || level > max {
            return Err(LatticeError::InvalidLevel { level, max });
        }
        Ok(())
    }

    /// Build the merged lattice for `level`
    pub fn build(&self, level: u32, edits: &EditSet) -> Result<Lattice> {
        let stack = self.build_stack(level, edits)?;
        match stack.into_finest() {
            Some(lattice) => Ok(Arc::unwrap_or_clone(lattice)),
            None => Err(LatticeError::InvalidLevel {
                level,
                max: self.max_level(),
            }),
        }
    }

    /// Build every level from 1 through `level`
    pub fn build_stack(&self, level: u32, edits: &EditSet) -> Result<LatticeStack> {
        let mut stack = LatticeStack::new();
        self.extend(&mut stack, level, edits)?;
        Ok(stack)
    }

    /// Build the levels missing from `stack` up to `level`
    ///
    /// The existing levels must have been built from the same `edits`.
    pub fn extend(&self, stack: &mut LatticeStack, level: u32, edits: &EditSet) -> Result<()> {
        self.check_level(level)?;
        while stack.finest_level() < level {
            let next = stack.finest_level() + 1;
            let lattice = self.build_level(next, stack.finest().map(Arc::as_ref), edits)?;
            stack.push(lattice);
        }
        Ok(())
    }

    /// Generate and merge one level from the merged level below it
    ///
    /// Level 1 needs no source. Every finer level needs `previous` to be the
    /// merged `level - 1` lattice over the same domain.
    pub fn build_level(
        &self,
        level: u32,
        previous: Option<&Lattice>,
        edits: &EditSet,
    ) -> Result<Lattice> {
        self.check_level(level)?;
        let source = self.source_level(level, previous)?;
        let start = Instant::now();
        let ends = AxisEndColors::from_edits(&self.domain, edits);
        let grid = self.domain.grid(level)?;

        let points: Vec<LatticePoint> = grid
            .par_iter()
            .map(|coord| {
                let color = self.point_color(level, coord, source, edits, &ends)?;
                Ok(LatticePoint::new(*coord, color))
            })
            .collect::<Result<_>>()?;

        let mut lattice = Lattice::from_points(self.domain, level, points);
        let applied = merge_into(&mut lattice, edits, level);

        debug!(
            level,
            points = lattice.len(),
            edits_applied = applied,
            elapsed = ?start.elapsed(),
            "built lattice level"
        );
        Ok(lattice)
    }

    fn source_level<'a>(
        &self,
        level: u32,
        previous: Option<&'a Lattice>,
    ) -> Result<Option<&'a Lattice>> {
        if level == 1 {
            return Ok(None);
        }
        match previous {
            Some(source) if source.level() + 1 == level && source.domain() == &self.domain => {
                Ok(Some(source))
            }
            _ => Err(LatticeError::MissingSourceLevel {
                level,
                found: previous.map(Lattice::level),
            }),
        }
    }

    fn point_color(
        &self,
        level: u32,
        coord: &AxisCoord,
        previous: Option<&Lattice>,
        edits: &EditSet,
        ends: &AxisEndColors,
    ) -> Result<Rgb> {
        if self.domain.is_balance_point(coord) {
            return Ok(ends.balance());
        }

        if !self.domain.is_base_point(coord) {
            return match previous {
                Some(source) => {
                    let region = resolve(coord, source, edits)?;
                    Ok(sample(coord, &region))
                }
                None => Err(LatticeError::MissingSourceLevel { level, found: None }),
            };
        }

        let mut sum = ColorSum::new();
        for end in self.domain.contributing_ends(coord) {
            sum.add(ends.get(end));
        }
        Ok(sum.finish())
    }
}

/// Build the merged lattice for `level` over the default domain
pub fn build_lattice(level: u32, edits: &EditSet) -> Result<Lattice> {
    LatticeBuilder::default().build(level, edits)
}
