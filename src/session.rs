// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A Session is one run of the game: the selected shape and rule, the
//! walk, the buffer it is painted into and the count of points drawn
//! so far.  It is owned by whoever drives the animation; nothing in
//! here is global.
//!
//! ```text
//!   Idle --start--> Running --tick--> Running
//!                     |  ^
//!                stop |  | start / select_shape / select_rule
//!                     v  |
//!                   Stopped
//! ```
//!
//! Every start clears the buffer and begins a fresh walk from a random
//! point; there is no pausing.

use log::{debug, info, warn};
use rand::Rng;

use crate::config::Config;
use crate::error::ChaosError;
use crate::planes::{Canvas, Point};
use crate::polygon::Polygon;
use crate::raster::{Drawing, Raster};
use crate::rules::{Construction, Rule};
use crate::sampler::Sampler;

/// Where a session is in its life.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Never started.
    Idle,
    /// Producing points on every tick.
    Running,
    /// Explicitly stopped, or a restart was refused.
    Stopped,
}

/// One run of the game.
pub struct Session<R: Rng> {
    config: Config,
    canvas: Canvas,
    raster: Raster,
    sampler: Sampler<R>,
    drawing: Drawing,
    shape: Option<String>,
    state: State,
}

impl<R: Rng> Session<R> {
    /// An idle session on a freshly cleared buffer.  Fails only if the
    /// configured canvas has no pixels.
    pub fn new(config: Config, rng: R) -> Result<Self, ChaosError> {
        let canvas = Canvas::new(config.width, config.height)?;
        let mut sampler = Sampler::new(rng);
        sampler.set_construction(config.construction);
        Ok(Session {
            raster: Raster::new(canvas, config.background),
            drawing: config.drawing,
            canvas,
            sampler,
            config,
            shape: None,
            state: State::Idle,
        })
    }

    /// Start with the shape and rule named in the configuration.
    pub fn start_configured(&mut self) -> Result<(), ChaosError> {
        let (shape, rule) = (self.config.shape.clone(), self.config.rule.clone());
        self.start(&shape, &rule)
    }

    /// Start a fresh run: clear the buffer, mark the polygon's corners,
    /// drop the cursor at a random spot and zero the count.  Both names
    /// are checked before anything is touched; if either is unknown
    /// the buffer is left as it was and a running session is stopped.
    pub fn start(&mut self, shape: &str, rule: &str) -> Result<(), ChaosError> {
        let (polygon, rule) = match self.resolve(shape, rule) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Refusing to start: {}", e);
                if self.state == State::Running {
                    self.stop();
                }
                return Err(e);
            }
        };

        self.raster.fill(self.config.background);
        if self.config.mark_vertices {
            self.raster.paint(polygon.vertices(), self.drawing);
        }

        self.sampler.reset();
        self.sampler.select(polygon, rule);
        let cursor = self.sampler.seed_cursor(&self.canvas);
        self.shape = Some(shape.to_string());
        self.state = State::Running;
        info!(
            "Started {} with rule {} from ({:.2}, {:.2})",
            shape,
            rule.name(),
            cursor.re,
            cursor.im
        );
        Ok(())
    }

    fn resolve(&self, shape: &str, rule: &str) -> Result<(Polygon, Rule), ChaosError> {
        let spec = self.config.shapes.get(shape)?;
        let rule = Rule::from_name(rule)?;
        Ok((spec.polygon(&self.canvas)?, rule))
    }

    /// Switch shapes, keeping the current rule.  Always restarts.
    pub fn select_shape(&mut self, shape: &str) -> Result<(), ChaosError> {
        let rule = self.rule_name();
        self.start(shape, &rule)
    }

    /// Switch rules, keeping the current shape.  Always restarts.
    pub fn select_rule(&mut self, rule: &str) -> Result<(), ChaosError> {
        let shape = self
            .shape
            .clone()
            .unwrap_or_else(|| self.config.shape.clone());
        self.start(&shape, rule)
    }

    fn rule_name(&self) -> String {
        self.sampler
            .rule()
            .map(|rule| rule.name().to_string())
            .unwrap_or_else(|| self.config.rule.clone())
    }

    /// Clear the run flag.  The buffer and count are left for display;
    /// the next start discards them.
    pub fn stop(&mut self) {
        if self.state == State::Running {
            info!("Stopped after {} points", self.sampler.total());
            self.state = State::Stopped;
        }
    }

    /// Generate one batch of `count` points and paint them into the
    /// buffer.  Returns the number of points generated.
    pub fn tick(&mut self, count: usize) -> Result<usize, ChaosError> {
        if self.state != State::Running {
            return Err(ChaosError::NotInitialized);
        }
        let points = self.sampler.next_batch(count)?;
        let clipped = self.raster.paint(&points, self.drawing);
        debug!(
            "Painted {} points ({} off canvas), {} total",
            points.len(),
            clipped,
            self.sampler.total()
        );
        Ok(points.len())
    }

    /// Flip between simple and anti-aliased drawing.  Takes effect on
    /// the next tick; the buffer is not cleared.
    pub fn set_simple_drawing(&mut self, simple: bool) {
        self.drawing = Drawing::from_simple(simple);
    }

    /// Flip between fixed and random step lengths.  Takes effect on the
    /// next tick; the walk is not restarted.
    pub fn set_simple_construction(&mut self, simple: bool) {
        self.sampler.set_construction(Construction::from_simple(simple));
    }

    /// Where the session is in its life.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the next tick will produce points.
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Points generated since the last start.
    pub fn point_count(&self) -> u64 {
        self.sampler.total()
    }

    /// The buffer, as of the end of the last batch.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The configuration the session was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the selected shape.
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    /// The selected rule.
    pub fn rule(&self) -> Option<Rule> {
        self.sampler.rule()
    }

    /// Current drawing mode.
    pub fn drawing(&self) -> Drawing {
        self.drawing
    }

    /// Current construction mode.
    pub fn construction(&self) -> Construction {
        self.sampler.construction()
    }

    /// Where the walk currently stands.
    pub fn cursor(&self) -> Option<Point> {
        self.sampler.cursor()
    }
}
