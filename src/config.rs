// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything a session needs to know before it starts.

use std::time::Duration;

use crate::polygon::ShapeCatalog;
use crate::raster::{Drawing, Rgba, PARCHMENT};
use crate::rules::Construction;

/// The knobs of a chaos game.  `Default` gives the reference
/// behavior: a 600x600 canvas, 100 points every 30 milliseconds,
/// simple drawing and construction, on a triangle with the
/// vector-center rule.
#[derive(Clone, Debug)]
pub struct Config {
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Pause between ticks
    pub interval: Duration,
    /// Points generated and painted per tick
    pub batch: usize,
    /// Fill color the buffer is cleared to on every start
    pub background: Rgba,
    /// How points are plotted
    pub drawing: Drawing,
    /// How step lengths are chosen
    pub construction: Construction,
    /// Paint the polygon's corners when a session starts
    pub mark_vertices: bool,
    /// The shapes that can be selected
    pub shapes: ShapeCatalog,
    /// Shape selected on start
    pub shape: String,
    /// Rule selected on start
    pub rule: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 600,
            height: 600,
            interval: Duration::from_millis(30),
            batch: 100,
            background: PARCHMENT,
            drawing: Drawing::Simple,
            construction: Construction::Simple,
            mark_vertices: true,
            shapes: ShapeCatalog::default(),
            shape: "triangle".to_string(),
            rule: "vector-center".to_string(),
        }
    }
}
