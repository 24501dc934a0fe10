// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Canvas struct, which describes a relationship between
//! the real-valued plane the chaos game wanders around in and the
//! integral grid of pixels it is painted onto.  Both planes share an
//! origin at the upper-left corner, with y growing downward.

use num::Complex;

use crate::error::ChaosError;

/// A location on the real plane, in canvas pixel units: the real part
/// is the column, the imaginary part the row, growing downward.  We
/// don't need a Point of our own, as a single Complex number is a Point.
pub type Point = Complex<f64>;

/// Describes the column, row of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// The integral plane: a grid of `width` by `height` pixels with the
/// upper-left corner at 0,0.
///
/// The only way to build one is `Canvas::new`, so a canvas always has
/// at least one pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
}

impl Canvas {
    /// Constructor.  A canvas without any pixels is refused.
    pub fn new(width: usize, height: usize) -> Result<Canvas, ChaosError> {
        if width == 0 || height == 0 {
            return Err(ChaosError::EmptyCanvas);
        }
        Ok(Canvas { width, height })
    }

    /// Number of pixel columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels in the grid.  Used to calculate
    /// memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the canvas is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The middle of the canvas on the real plane.
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Map a real-valued location to the pixel that contains it, by
    /// flooring both coordinates.  Anything that lands outside the
    /// grid (or isn't a number at all) has no pixel.
    pub fn point_to_pixel(&self, x: f64, y: f64) -> Option<Pixel> {
        let (left, top) = (x.floor(), y.floor());
        let inside = left >= 0.0
            && top >= 0.0
            && left < self.width as f64
            && top < self.height as f64;
        if !inside {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }

    /// The linear offset of a pixel from the root of a one-value-per-
    /// pixel buffer.
    pub fn pixel_to_offset(&self, pixel: Pixel) -> usize {
        pixel.1 * self.width + pixel.0
    }

    /// Shortcut for `point_to_pixel` followed by `pixel_to_offset`.
    pub fn point_to_offset(&self, point: &Point) -> Option<usize> {
        self.point_to_pixel(point.re, point.im)
            .map(|pixel| self.pixel_to_offset(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_fails_on_empty_shape() {
        assert_eq!(Canvas::new(0, 4), Err(ChaosError::EmptyCanvas));
        assert_eq!(Canvas::new(4, 0), Err(ChaosError::EmptyCanvas));
    }

    #[test]
    fn canvas_passes_on_good_shape() {
        let canvas = Canvas::new(4, 3).unwrap();
        assert_eq!(canvas.len(), 12);
        assert!(!canvas.is_empty());
        assert_eq!(canvas.center(), Point::new(2.0, 1.5));
    }

    #[test]
    fn point_to_pixel_floors_coordinates() {
        let canvas = Canvas::new(5, 5).unwrap();
        assert_eq!(canvas.point_to_pixel(0.0, 0.0), Some(Pixel(0, 0)));
        assert_eq!(canvas.point_to_pixel(2.99, 2.01), Some(Pixel(2, 2)));
        assert_eq!(canvas.point_to_pixel(4.5, 4.999), Some(Pixel(4, 4)));
    }

    #[test]
    fn point_to_pixel_refuses_points_off_the_grid() {
        let canvas = Canvas::new(5, 5).unwrap();
        assert_eq!(canvas.point_to_pixel(5.0, 0.0), None);
        assert_eq!(canvas.point_to_pixel(0.0, 5.0), None);
        assert_eq!(canvas.point_to_pixel(-0.01, 2.0), None);
        assert_eq!(canvas.point_to_pixel(2.0, -3.0), None);
        assert_eq!(canvas.point_to_pixel(std::f64::NAN, 2.0), None);
    }

    #[test]
    fn point_to_offset_is_row_major() {
        let canvas = Canvas::new(640, 480).unwrap();
        assert_eq!(canvas.point_to_offset(&Point::new(0.5, 0.5)), Some(0));
        assert_eq!(canvas.point_to_offset(&Point::new(3.2, 2.7)), Some(2 * 640 + 3));
        assert_eq!(canvas.point_to_offset(&Point::new(639.9, 479.9)), Some(640 * 480 - 1));
    }

    #[test]
    fn canvas_reports_its_size() {
        let canvas = Canvas::new(7, 3).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (7, 3));
    }
}
