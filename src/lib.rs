#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Chaos game renderer
//!
//! The chaos game is the simplest way there is to draw a fractal.
//! Pick the corners of a regular polygon and drop a point anywhere on
//! the canvas.  Now, over and over, pick one of the corners at random
//! and jump some fraction of the way toward it, plotting wherever you
//! land.  The first few points wander, but the walk is very quickly
//! captured by the polygon's attractor, and the plotted points trace it
//! out: the Sierpinski gasket for a triangle with a halfway jump,
//! pentaflakes and hexaflakes for the larger polygons.
//!
//! The pieces, leaves first: `polygon` lays out the corners, `rules`
//! defines the jumps, `sampler` walks, `raster` plots, `session` ties
//! one run together and `driver` animates it a batch per tick.

pub mod config;
pub mod driver;
pub mod error;
pub mod planes;
pub mod polygon;
pub mod raster;
pub mod rules;
pub mod sampler;
pub mod session;

pub use config::Config;
pub use driver::{Driver, FixedTicks, FrameSink, IntervalTicker, StopHandle, Tick, Ticker};
pub use error::ChaosError;
pub use planes::{Canvas, Pixel, Point};
pub use polygon::{Polygon, ShapeCatalog, ShapeSpec};
pub use raster::{Drawing, Raster};
pub use rules::{Construction, Rule};
pub use sampler::Sampler;
pub use session::{Session, State};
