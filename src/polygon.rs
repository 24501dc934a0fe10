// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Regular polygons, and the catalog of named shapes the game may be
//! played on.

use std::f64::consts::PI;

use crate::error::ChaosError;
use crate::planes::{Canvas, Point};

/// How much of the available half-extent of the canvas the polygon's
/// circumradius occupies.
const FILL_RATIO: f64 = 0.9;

/// The ordered corners of a regular polygon, centered on a canvas.
/// Computed once per shape selection and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Lay out `vertex_count` corners around the center of the canvas.
    /// The first vertex sits straight up from the center, rotated
    /// clockwise by `start_angle` degrees; the rest follow clockwise at
    /// equal angles.  The circumradius is 0.9 times the smaller of the
    /// canvas' half-width and half-height.
    pub fn regular(
        vertex_count: usize,
        canvas: &Canvas,
        start_angle: f64,
    ) -> Result<Polygon, ChaosError> {
        if vertex_count < 3 {
            return Err(ChaosError::DegeneratePolygon(vertex_count));
        }

        let center = canvas.center();
        let size = center.re.min(center.im) * FILL_RATIO;
        let start = start_angle.to_radians();

        let vertices = (0..vertex_count)
            .map(|index| {
                let angle = start + (index as f64) / (vertex_count as f64) * 2.0 * PI;
                Point::new(center.re + size * angle.sin(), center.im - size * angle.cos())
            })
            .collect();
        Ok(Polygon { vertices })
    }

    /// The corners, in generation order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// How many corners there are.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Never true for a polygon built by `regular`.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The corner at `index`.
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }
}

/// A named recipe for a regular polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSpec {
    /// The name the shape is selected by
    pub name: String,
    /// Number of corners, at least 3
    pub vertex_count: usize,
    /// Clockwise rotation of the first corner away from straight up, in degrees
    pub start_angle: f64,
}

impl ShapeSpec {
    /// Constructor.
    pub fn new(name: &str, vertex_count: usize, start_angle: f64) -> Self {
        ShapeSpec {
            name: name.to_string(),
            vertex_count,
            start_angle,
        }
    }

    /// Build the polygon this recipe describes on the given canvas.
    pub fn polygon(&self, canvas: &Canvas) -> Result<Polygon, ChaosError> {
        Polygon::regular(self.vertex_count, canvas, self.start_angle)
    }
}

/// The set of shapes that can be selected by name, in registration
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCatalog {
    shapes: Vec<ShapeSpec>,
}

impl ShapeCatalog {
    /// A catalog with nothing in it.
    pub fn empty() -> Self {
        ShapeCatalog { shapes: vec![] }
    }

    /// Register a shape.  A later registration under an existing name
    /// replaces the earlier one.  Degenerate shapes are refused here,
    /// rather than when they are first selected.
    pub fn register(&mut self, spec: ShapeSpec) -> Result<(), ChaosError> {
        if spec.vertex_count < 3 {
            return Err(ChaosError::DegeneratePolygon(spec.vertex_count));
        }
        match self.shapes.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.shapes.push(spec),
        }
        Ok(())
    }

    /// Look a shape up by name.
    pub fn get(&self, name: &str) -> Result<&ShapeSpec, ChaosError> {
        self.shapes
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ChaosError::UnknownShape(name.to_string()))
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.shapes.iter().map(|s| s.name.as_str()).collect()
    }
}

impl Default for ShapeCatalog {
    /// The triangle, the square (turned 45 degrees so it sits flat),
    /// the pentagon and the hexagon.
    fn default() -> Self {
        ShapeCatalog {
            shapes: vec![
                ShapeSpec::new("triangle", 3, 0.0),
                ShapeSpec::new("square", 4, 45.0),
                ShapeSpec::new("pentagon", 5, 0.0),
                ShapeSpec::new("hexagon", 6, 0.0),
            ],
        }
    }
}
