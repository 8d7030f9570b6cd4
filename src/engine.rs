//! Session object owning the edit set and the lattice levels
//!
//! Every mutation builds a complete new state off to the side and swaps it
//! in only on success, so the engine never exposes a partially built or
//! partially merged lattice. [`Snapshot`]s handed out earlier keep pointing
//! at the lattice they were taken from.

use crate::builder::{LatticeBuilder, LatticeStack};
use crate::color::Rgb;
use crate::config::EngineConfig;
use crate::coord::AxisCoord;
use crate::document::ColorSpaceDocument;
use crate::domain::Domain;
use crate::edit::{EditPoint, EditSet};
use crate::error::{LatticeError, Result};
use crate::fill::{fill_grid, FillGrid, FillSpec};
use crate::lattice::{Lattice, LatticePoint};
use crate::region::{resolve, Region};
use crate::sampler::{query_color_with_edits, sample};
use std::sync::Arc;
use tracing::{debug, info};

/// How a lattice point should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// One of the six pure-axis ends, not edited
    AxisEnd,
    /// Carries a user edit (takes precedence over `AxisEnd`)
    Edited,
    Regular,
}

/// Immutable view of one lattice and the edits it was built with
#[derive(Debug, Clone)]
pub struct Snapshot {
    lattice: Arc<Lattice>,
    edits: Arc<EditSet>,
}

impl Snapshot {
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn edits(&self) -> &EditSet {
        &self.edits
    }

    pub fn query_color(&self, coord: &AxisCoord) -> Result<Rgb> {
        query_color_with_edits(coord, &self.lattice, &self.edits)
    }
}

/// A color space being edited
#[derive(Debug, Clone)]
pub struct ColorSpaceEngine {
    config: EngineConfig,
    builder: LatticeBuilder,
    edits: Arc<EditSet>,
    stack: LatticeStack,
    current: Arc<Lattice>,
}

impl ColorSpaceEngine {
    /// Start with no edits at level 1
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_edits(config, EditSet::new(), 1)
    }

    /// Start from an edit set at `level`
    pub fn with_edits(config: EngineConfig, edits: EditSet, level: u32) -> Result<Self> {
        let domain = config.validate()?;
        check_finite(&edits)?;
        let builder = LatticeBuilder::new(domain).with_max_level(config.max_level);
        let stack = builder.build_stack(level, &edits)?;
        let current = current_of(&stack, level, config.max_level)?;

        Ok(Self {
            config,
            builder,
            edits: Arc::new(edits),
            stack,
            current,
        })
    }

    /// Restore a saved color space at `level`
    ///
    /// Edits come from `editPoints`. The lattice at `level` is taken from the
    /// `colorSpace` records as saved and must cover exactly the grid of
    /// `level`. Coarser levels are rebuilt from the edits.
    pub fn from_document(
        document: &ColorSpaceDocument,
        level: u32,
        config: EngineConfig,
    ) -> Result<Self> {
        let domain = config.validate()?;
        let builder = LatticeBuilder::new(domain).with_max_level(config.max_level);
        builder.check_level(level)?;

        let edits = document.edits();
        let mut stack = if level > 1 {
            builder.build_stack(level - 1, &edits)?
        } else {
            LatticeStack::new()
        };

        let lattice = Lattice::from_points(
            domain,
            level,
            document.color_space.iter().copied().map(LatticePoint::from),
        );
        check_grid(&lattice, &domain, level)?;
        stack.push(lattice);
        let current = current_of(&stack, level, config.max_level)?;

        info!(
            level,
            points = current.len(),
            edits = edits.len(),
            "restored color space"
        );
        Ok(Self {
            config,
            builder,
            edits: Arc::new(edits),
            stack,
            current,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn domain(&self) -> &Domain {
        self.builder.domain()
    }

    /// Current resolution level
    pub fn level(&self) -> u32 {
        self.current.level()
    }

    pub fn edits(&self) -> &EditSet {
        &self.edits
    }

    /// Merged lattice at the current level
    pub fn lattice(&self) -> &Lattice {
        &self.current
    }

    /// All built levels
    pub fn levels(&self) -> &LatticeStack {
        &self.stack
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lattice: Arc::clone(&self.current),
            edits: Arc::clone(&self.edits),
        }
    }

    /// Switch to `level`, building any missing finer levels
    pub fn set_resolution(&mut self, level: u32) -> Result<()> {
        self.builder.check_level(level)?;
        if level > self.stack.finest_level() {
            let mut stack = self.stack.clone();
            self.builder.extend(&mut stack, level, &self.edits)?;
            self.stack = stack;
        }
        self.current = current_of(&self.stack, level, self.config.max_level)?;
        debug!(level, cached = self.stack.finest_level(), "resolution changed");
        Ok(())
    }

    /// Add an edit or recolor an existing one
    ///
    /// Coordinates with a NaN or infinite component are refused, since they
    /// could never be looked up or removed again.
    pub fn set_edit(&mut self, coord: AxisCoord, color: Rgb) -> Result<()> {
        if !coord.is_finite() {
            return Err(LatticeError::NonFiniteCoord { coord });
        }
        let mut edits = (*self.edits).clone();
        edits.upsert(EditPoint::new(coord, color));
        self.commit(edits, "edit set")
    }

    /// Remove the edit at `coord`
    pub fn remove_edit(&mut self, coord: &AxisCoord) -> Result<EditPoint> {
        let mut edits = (*self.edits).clone();
        let removed = edits
            .remove(coord)
            .ok_or(LatticeError::UnknownEditPoint { coord: *coord })?;
        self.commit(edits, "edit removed")?;
        Ok(removed)
    }

    /// Replace the whole edit set, e.g. when loading a preset
    pub fn replace_edits(&mut self, edits: EditSet) -> Result<()> {
        check_finite(&edits)?;
        self.commit(edits, "edits replaced")
    }

    /// Set the HSV saturation and brightness (`0..=100`) of the color at a
    /// lattice point, storing the result as an edit
    pub fn adjust_edit(&mut self, coord: AxisCoord, saturation: f64, brightness: f64) -> Result<Rgb> {
        let base = match self.edits.color_of(&coord) {
            Some(color) => color,
            None => self
                .current
                .color_at(&coord)
                .ok_or(LatticeError::LookupMiss {
                    coord: coord.to_spatial(),
                })?,
        };
        let adjusted = base.with_saturation_brightness(saturation, brightness);
        self.set_edit(coord, adjusted)?;
        Ok(adjusted)
    }

    /// Interpolated color at any coordinate in the domain
    pub fn query_color(&self, coord: &AxisCoord) -> Result<Rgb> {
        query_color_with_edits(coord, &self.current, &self.edits)
    }

    /// The cell around `coord` together with its interpolated color
    pub fn region_at(&self, coord: &AxisCoord) -> Result<(Region, Rgb)> {
        let region = resolve(coord, &self.current, &self.edits)?;
        let color = sample(coord, &region);
        Ok((region, color))
    }

    /// Sample the fill grid described by `spec`
    pub fn fill(&self, spec: &FillSpec) -> Result<FillGrid> {
        fill_grid(&self.current, &self.edits, spec, self.config.max_level)
    }

    /// Sample the whole domain at the configured fill resolution
    pub fn fill_all(&self) -> Result<FillGrid> {
        self.fill(&FillSpec::whole(self.domain(), self.config.fill_resolution))
    }

    pub fn point_kind(&self, coord: &AxisCoord) -> PointKind {
        if self.edits.contains(coord) {
            PointKind::Edited
        } else if self.domain().axis_end_at(coord).is_some() {
            PointKind::AxisEnd
        } else {
            PointKind::Regular
        }
    }

    /// Whether `coord` is a lattice sample at the current level
    pub fn is_visible(&self, coord: &AxisCoord) -> bool {
        self.domain().is_on_grid(coord, self.level())
    }

    pub fn to_document(&self) -> ColorSpaceDocument {
        ColorSpaceDocument::new(&self.current, &self.edits)
    }

    /// Rebuild every level up to the current one from `edits` and swap in
    fn commit(&mut self, edits: EditSet, reason: &'static str) -> Result<()> {
        let level = self.level();
        let stack = self.builder.build_stack(level, &edits)?;
        let current = current_of(&stack, level, self.config.max_level)?;

        self.edits = Arc::new(edits);
        self.stack = stack;
        self.current = current;
        debug!(reason, level, edits = self.edits.len(), "rebuilt lattice");
        Ok(())
    }
}

fn current_of(stack: &LatticeStack, level: u32, max: u32) -> Result<Arc<Lattice>> {
    stack
        .get(level)
        .cloned()
        .ok_or(LatticeError::InvalidLevel { level, max })
}

fn check_finite(edits: &EditSet) -> Result<()> {
    match edits.iter().find(|edit| !edit.coord.is_finite()) {
        Some(edit) => Err(LatticeError::NonFiniteCoord { coord: edit.coord }),
        None => Ok(()),
    }
}

/// Every grid coordinate of `level` present and nothing else
fn check_grid(lattice: &Lattice, domain: &Domain, level: u32) -> Result<()> {
    for coord in domain.grid(level)? {
        if lattice.get(&coord).is_none() {
            return Err(LatticeError::LookupMiss {
                coord: coord.to_spatial(),
            });
        }
    }
    if let Some(stray) = lattice.iter().find(|pt| !domain.is_on_grid(&pt.axis, level)) {
        return Err(LatticeError::LookupMiss {
            coord: stray.spatial,
        });
    }
    Ok(())
}
