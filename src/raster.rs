// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer the game is painted onto, and the two ways of
//! painting a point into it.
//!
//! Simple drawing floors a point to the pixel that contains it and
//! paints that pixel black.  Anti-aliased drawing instead darkens the
//! containing pixel by how close the point is to the pixel's center,
//! and lays a fainter shadow on whichever neighbors the point's
//! half-pixel footprint overlaps.  Darkening is a bitwise AND against
//! the existing color, so repeated hits only ever get darker and
//! hitting the same spot twice changes nothing.
//!
//! A batch of points is painted into the buffer in one go; whoever is
//! presenting the buffer only needs to pick it up once per batch.

use std::path::Path;

use itertools::iproduct;

use crate::planes::{Canvas, Pixel, Point};

/// An RGBA color.
pub type Rgba = [u8; 4];

/// Opaque black.
pub const BLACK: Rgba = [0, 0, 0, 255];

/// Opaque pale yellow, `#ffffcc`.
pub const PARCHMENT: Rgba = [255, 255, 204, 255];

// Where the corners of a point's half-pixel footprint sit, relative to
// the point itself.
const FOOTPRINT: [f64; 2] = [-0.5, 0.0];

/// How points are plotted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Drawing {
    /// One opaque black pixel per point.
    Simple,
    /// AND-darkening by sub-pixel coverage, spread onto neighbors.
    Antialiased,
}

impl Drawing {
    /// Map the user-facing "simple drawing" flag onto a mode.
    pub fn from_simple(simple: bool) -> Self {
        if simple {
            Drawing::Simple
        } else {
            Drawing::Antialiased
        }
    }
}

/// A full-canvas RGBA buffer, four bytes per pixel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    canvas: Canvas,
    pixels: Vec<u8>,
}

impl Raster {
    /// A buffer the size of the canvas, filled with `background`.
    pub fn new(canvas: Canvas, background: Rgba) -> Self {
        let mut raster = Raster {
            canvas,
            pixels: vec![0; canvas.len() * 4],
        };
        raster.fill(background);
        raster
    }

    /// The canvas this buffer covers.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The raw RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Paint every pixel the same color.
    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.pixels.chunks_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    /// The color of one pixel, or `None` off the canvas.
    pub fn get(&self, column: usize, row: usize) -> Option<Rgba> {
        if column >= self.canvas.width() || row >= self.canvas.height() {
            return None;
        }
        let offset = self.canvas.pixel_to_offset(Pixel(column, row)) * 4;
        let mut color = [0; 4];
        color.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(color)
    }

    /// Paint a batch of points.  Points whose pixels fall off the
    /// canvas are skipped; the return value is how many primary pixels
    /// were skipped that way.
    pub fn paint(&mut self, points: &[Point], drawing: Drawing) -> usize {
        let mut clipped = 0;
        for point in points {
            let painted = match drawing {
                Drawing::Simple => self.plot(point.re, point.im),
                Drawing::Antialiased => self.plot_antialiased(point.re, point.im),
            };
            if !painted {
                clipped += 1;
            }
        }
        clipped
    }

    fn plot(&mut self, x: f64, y: f64) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.pixels[offset..offset + 4].copy_from_slice(&BLACK);
                true
            }
            None => false,
        }
    }

    fn plot_antialiased(&mut self, x: f64, y: f64) -> bool {
        let painted = self.shade(x, y);

        let home = (x.floor(), y.floor());
        for (i, j) in iproduct!(FOOTPRINT.iter(), FOOTPRINT.iter()) {
            let neighbor = ((x + i).floor(), (y + j).floor());
            if neighbor != home {
                self.shade(neighbor.0, neighbor.1);
            }
        }
        painted
    }

    /// AND the pixel containing (x, y) with the gray level of the
    /// point's distance from the pixel center, and make it opaque.
    fn shade(&mut self, x: f64, y: f64) -> bool {
        let offset = match self.offset(x, y) {
            Some(offset) => offset,
            None => return false,
        };
        let c = coverage(x, y);
        let pixel = &mut self.pixels[offset..offset + 4];
        for channel in pixel[..3].iter_mut() {
            *channel &= c;
        }
        pixel[3] = 255;
        true
    }

    fn offset(&self, x: f64, y: f64) -> Option<usize> {
        self.canvas
            .point_to_pixel(x, y)
            .map(|pixel| self.canvas.pixel_to_offset(pixel) * 4)
    }

    /// Write the buffer out as an image.  The format follows the file
    /// extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), failure::Error> {
        image::save_buffer(
            path,
            &self.pixels,
            self.canvas.width() as u32,
            self.canvas.height() as u32,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// The gray level for a point: 0 at the exact center of its pixel,
/// rising to 180 at the pixel's corners.
pub fn coverage(x: f64, y: f64) -> u8 {
    let dx = x - x.floor() - 0.5;
    let dy = y - y.floor() - 0.5;
    (255.0 * (dx * dx + dy * dy).sqrt()).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    const WHITE: Rgba = [255, 255, 255, 255];

    fn raster(width: usize, height: usize, background: Rgba) -> Raster {
        Raster::new(Canvas::new(width, height).unwrap(), background)
    }

    #[test]
    fn new_raster_is_filled_with_the_background() {
        let r = raster(3, 2, PARCHMENT);
        assert_eq!(r.as_raw().len(), 24);
        for row in 0..2 {
            for column in 0..3 {
                assert_eq!(r.get(column, row), Some(PARCHMENT));
            }
        }
        assert_eq!(r.get(3, 0), None);
    }

    #[test]
    fn simple_plot_blackens_the_containing_pixel() {
        let mut r = raster(4, 4, PARCHMENT);
        r.paint(&[Point::new(2.7, 1.2)], Drawing::Simple);
        assert_eq!(r.get(2, 1), Some(BLACK));
        assert_eq!(r.get(1, 1), Some(PARCHMENT));
        assert_eq!(r.get(2, 2), Some(PARCHMENT));
    }

    #[test]
    fn simple_plot_is_idempotent() {
        let mut r = raster(4, 4, WHITE);
        let point = [Point::new(1.5, 3.25)];
        r.paint(&point, Drawing::Simple);
        let once = r.clone();
        r.paint(&point, Drawing::Simple);
        assert_eq!(r, once);
        assert_eq!(r.get(1, 3), Some(BLACK));
    }

    #[test]
    fn antialiased_center_hit_on_white_is_black() {
        let mut r = raster(4, 4, WHITE);
        r.paint(&[Point::new(2.5, 2.5)], Drawing::Antialiased);
        assert_eq!(r.get(2, 2), Some(BLACK));
    }

    #[test]
    fn antialiased_neighbors_get_the_corner_shade() {
        let mut r = raster(4, 4, WHITE);
        r.paint(&[Point::new(2.25, 2.25)], Drawing::Antialiased);
        // The footprint reaches up and to the left.
        let corner = [180, 180, 180, 255];
        assert_eq!(r.get(1, 1), Some(corner));
        assert_eq!(r.get(2, 1), Some(corner));
        assert_eq!(r.get(1, 2), Some(corner));
        // And not down or right.
        assert_eq!(r.get(3, 2), Some(WHITE));
        assert_eq!(r.get(2, 3), Some(WHITE));
        // dx = dy = -0.25, |d| = 0.3535..., 255 * that = 90.1
        assert_eq!(r.get(2, 2), Some([90, 90, 90, 255]));
    }

    #[test]
    fn antialiased_footprint_inside_one_pixel_touches_nothing_else() {
        let mut r = raster(4, 4, WHITE);
        r.paint(&[Point::new(1.75, 1.75)], Drawing::Antialiased);
        let touched: Vec<(usize, usize)> = iproduct!(0..4, 0..4)
            .filter(|(column, row)| r.get(*column, *row) != Some(WHITE))
            .collect();
        assert_eq!(touched, vec![(1, 1)]);
    }

    #[test]
    fn antialiasing_ands_rather_than_blends() {
        let mut r = raster(2, 2, [0b1010_1010, 0xff, 0x0f, 7]);
        r.paint(&[Point::new(0.0, 0.0)], Drawing::Antialiased);
        // Corner of pixel (0, 0): gray 180 = 0b1011_0100
        assert_eq!(r.get(0, 0), Some([0b1010_0000, 180, 0b0000_0100, 255]));
    }

    #[test]
    fn points_off_the_canvas_are_skipped() {
        let mut r = raster(4, 4, WHITE);
        let before = r.clone();
        let points = [
            Point::new(-1.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(std::f64::INFINITY, 1.0),
        ];
        assert_eq!(r.paint(&points, Drawing::Simple), 4);
        assert_eq!(r, before);
    }

    #[test]
    fn antialiased_edge_points_still_shade_their_neighbors() {
        let mut r = raster(4, 4, WHITE);
        assert_eq!(r.paint(&[Point::new(4.25, 1.75)], Drawing::Antialiased), 1);
        assert_eq!(r.get(3, 1), Some([180, 180, 180, 255]));
    }

    #[test]
    fn coverage_runs_from_center_to_corner() {
        assert_eq!(coverage(0.5, 0.5), 0);
        assert_eq!(coverage(3.0, 7.0), 180);
        assert_eq!(coverage(1.0, 1.5), 127);
    }

    #[test]
    fn saved_raster_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut r = raster(5, 3, PARCHMENT);
        r.paint(&[Point::new(1.5, 1.5)], Drawing::Simple);
        r.save(&path).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (5, 3));
        assert_eq!(image.get_pixel(1, 1).0, BLACK);
        assert_eq!(image.get_pixel(0, 0).0, PARCHMENT);
    }
}
