// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The random walk itself.  A Sampler holds the cursor, the polygon
//! it wanders around in, and the rule it jumps by, and hands out the
//! walk a batch at a time.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::ChaosError;
use crate::planes::{Canvas, Point};
use crate::polygon::Polygon;
use crate::rules::{Construction, Rule};

/// The cursor and its surroundings.  The source of randomness is
/// injected, so a seeded generator replays the same walk.
pub struct Sampler<R: Rng> {
    polygon: Option<Polygon>,
    rule: Option<Rule>,
    // Uniform over the vertex indices of `polygon`; rebuilt with it.
    corners: Option<Uniform<usize>>,
    construction: Construction,
    cursor: Option<Point>,
    total: u64,
    rng: R,
}

impl<R: Rng> Sampler<R> {
    /// An uninitialized sampler: no polygon, no rule, no cursor, and
    /// simple construction.
    pub fn new(rng: R) -> Self {
        Sampler {
            polygon: None,
            rule: None,
            corners: None,
            construction: Construction::Simple,
            cursor: None,
            total: 0,
            rng,
        }
    }

    /// Establish the polygon and rule to walk with.  The cursor and the
    /// running total are left alone.
    pub fn select(&mut self, polygon: Polygon, rule: Rule) {
        self.corners = Some(Uniform::from(0..polygon.len()));
        self.polygon = Some(polygon);
        self.rule = Some(rule);
    }

    /// Forget the polygon, rule, cursor and total.
    pub fn reset(&mut self) {
        self.polygon = None;
        self.rule = None;
        self.corners = None;
        self.cursor = None;
        self.total = 0;
    }

    /// Drop the cursor somewhere uniformly random on the canvas, and
    /// zero the running total.
    pub fn seed_cursor(&mut self, canvas: &Canvas) -> Point {
        let point = Point::new(
            self.rng.gen_range(0.0, canvas.width() as f64),
            self.rng.gen_range(0.0, canvas.height() as f64),
        );
        self.place_cursor(point);
        point
    }

    /// Put the cursor at a known location, and zero the running total.
    pub fn place_cursor(&mut self, point: Point) {
        self.cursor = Some(point);
        self.total = 0;
    }

    /// Switch between fixed and random step lengths.  Takes effect on
    /// the next jump.
    pub fn set_construction(&mut self, construction: Construction) {
        self.construction = construction;
    }

    /// The current construction mode.
    pub fn construction(&self) -> Construction {
        self.construction
    }

    /// The polygon being walked, if one has been selected.
    pub fn polygon(&self) -> Option<&Polygon> {
        self.polygon.as_ref()
    }

    /// The rule being walked with, if one has been selected.
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    /// Where the walk currently stands.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// How many points have been produced since the cursor was placed.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Take `count` more steps.  Each step draws a uniformly random
    /// vertex, jumps by the active rule, and the landing point becomes
    /// the input to the next step, including the first step of the
    /// next batch.  The points come back in the order they were
    /// visited.
    pub fn next_batch(&mut self, count: usize) -> Result<Vec<Point>, ChaosError> {
        if count == 0 {
            return Err(ChaosError::EmptyBatch);
        }
        let (polygon, rule, corners, mut cursor) =
            match (&self.polygon, self.rule, &self.corners, self.cursor) {
                (Some(polygon), Some(rule), Some(corners), Some(cursor)) => {
                    (polygon, rule, corners, cursor)
                }
                _ => return Err(ChaosError::NotInitialized),
            };

        let vertices = polygon.vertices();
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let vertex = vertices[corners.sample(&mut self.rng)];
            cursor = rule.apply(
                cursor,
                vertex,
                vertices.len(),
                self.construction,
                &mut self.rng,
            );
            points.push(cursor);
        }

        self.cursor = Some(cursor);
        self.total += count as u64;
        Ok(points)
    }
}
