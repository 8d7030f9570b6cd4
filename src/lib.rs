//! # color-space-lattice
//!
//! A multi-resolution color lattice over a bounded 3D coordinate space.
//!
//! Colors are authored at a sparse set of **edit points**; every other
//! coordinate gets its color by trilinear interpolation over a recursively
//! refined grid of **lattice points**.
//!
//! ## Coordinates
//!
//! Points are addressed in the native `(p, c, s)` axis system, each axis
//! spanning the same domain (`[-100, 100]` by default). Geometry runs in an
//! orthogonal `(x, y, z)` spatial system with `x = c`, `y = p`, `z = -s`.
//! Zero always maps to positive zero, so coordinates compare and hash
//! exactly.
//!
//! ## How colors are derived
//!
//! 1. **Axis ends**: the six points with one axis at an extreme and the other
//!    two at the midpoint carry their edit color, or black.
//! 2. **Composition**: the other points of the level 1 grid (face centers,
//!    edge midpoints, corners) are the channel-wise *sum* of the axis ends
//!    they touch, clamped to 255 after summing.
//! 3. **Balance point**: the domain center averages axis-end pairs across
//!    channels: red from the `s` ends, green from the `c` ends, blue from
//!    the `p` ends.
//! 4. **Refinement**: level `r` samples every `length / 2^r`. New samples are
//!    interpolated from the merged level `r - 1`.
//! 5. **Edit overlay**: after each level is generated, edits that land on one
//!    of its samples overwrite that sample's color.
//!
//! | Level | Samples per axis | Lattice points |
//! |-------|------------------|----------------|
//! | 1     | 3                | 27             |
//! | 2     | 5                | 125            |
//! | 3     | 9                | 729            |
//! | 4     | 17               | 4 913          |
//! | 5     | 33               | 35 937         |
//!
//! ## Examples
//!
//! ### One-shot functions
//!
//! ```
//! use color_space_lattice::{build_lattice, query_color, AxisCoord, EditPoint, EditSet, Rgb};
//!
//! let edits = EditSet::from_points([
//!     EditPoint::new(AxisCoord::new(100.0, 0.0, 0.0), Rgb::new(255, 0, 0)),
//! ]);
//!
//! let lattice = build_lattice(2, &edits).unwrap();
//! assert_eq!(lattice.len(), 125);
//!
//! let color = query_color(&AxisCoord::new(50.0, 0.0, 0.0), &lattice).unwrap();
//! assert_eq!(color, Rgb::new(128, 0, 0));
//! ```
//!
//! ### Editing session
//!
//! ```
//! use color_space_lattice::{AxisCoord, ColorSpaceEngine, EngineConfig, Rgb};
//!
//! let mut engine = ColorSpaceEngine::new(EngineConfig::default()).unwrap();
//! engine.set_edit(AxisCoord::new(0.0, 100.0, 0.0), Rgb::new(0, 255, 0)).unwrap();
//! engine.set_resolution(3).unwrap();
//!
//! // bulk colors for a fill view
//! let grid = engine.fill_all().unwrap();
//! assert_eq!(grid.len(), 21 * 21 * 21);
//!
//! // save and restore
//! let json = engine.to_document().to_json().unwrap();
//! # let _ = json;
//! ```
//!
//! ## Concurrency
//!
//! Building a level and filling a grid fan out over Rayon's thread pool;
//! each sample only reads the previous, immutable level. Results are
//! collected in grid order, so they are identical to a sequential run.
//! Levels are shared as `Arc` snapshots: a [`Snapshot`] taken from the
//! engine keeps answering queries against the lattice it was taken from
//! while the engine rebuilds.

mod bounds;
mod builder;
mod color;
mod config;
mod coord;
mod document;
mod domain;
mod edit;
mod engine;
mod error;
mod fill;
mod lattice;
mod merge;
mod region;
mod sampler;

pub use bounds::{find_bounds, AxisSamples};
pub use builder::{build_lattice, AxisEndColors, LatticeBuilder, LatticeStack};
pub use color::{ColorSum, Rgb};
pub use config::{EngineConfig, DEFAULT_FILL_RESOLUTION, DEFAULT_MAX_LEVEL};
pub use coord::{to_axis, to_spatial, AxisCoord, SpatialCoord};
pub use document::{ColorSpaceDocument, PointRecord};
pub use domain::{Axis, AxisEnd, Domain, End, MAX_SUPPORTED_LEVEL};
pub use edit::{EditPoint, EditSet};
pub use engine::{ColorSpaceEngine, PointKind, Snapshot};
pub use error::{LatticeError, Result};
pub use fill::{fill_grid, fill_step, FillGrid, FillSample, FillSpec};
pub use lattice::{Lattice, LatticePoint};
pub use merge::{merge_edits, merge_into};
pub use region::{resolve, PointSource, Region, RegionPoint};
pub use sampler::{query_color, query_color_with_edits, sample};
