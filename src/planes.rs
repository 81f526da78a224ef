// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane (the viewport) bounded by a
//! minimum and maximum on each axis.
use num::Complex;
use std::convert::TryFrom;

use crate::error::RenderError;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The rectangle of the complex plane that gets mapped onto the
/// image.  The real part runs along x, the imaginary part along y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge on the real axis.
    pub xmin: f64,
    /// Right edge on the real axis.
    pub xmax: f64,
    /// Lower edge on the imaginary axis.
    pub ymin: f64,
    /// Upper edge on the imaginary axis.
    pub ymax: f64,
}

impl Viewport {
    /// Builds a viewport, rejecting any rectangle that is empty,
    /// inverted, or has a non-finite edge.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Viewport, RenderError> {
        let viewport = Viewport {
            xmin,
            xmax,
            ymin,
            ymax,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Fields are public, so a viewport can be built by hand; this
    /// re-checks the invariants.
    pub fn validate(&self) -> Result<(), RenderError> {
        let finite = [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|v| v.is_finite());
        if !finite
            || self.xmin >= self.xmax
            || self.ymin >= self.ymax
            || !self.width().is_finite()
            || !self.height().is_finite()
        {
            return Err(RenderError::DegenerateViewport {
                xmin: self.xmin,
                xmax: self.xmax,
                ymin: self.ymin,
                ymax: self.ymax,
            });
        }
        Ok(())
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

impl Default for Viewport {
    /// The whole set, with a little margin.
    fn default() -> Self {
        Viewport {
            xmin: -2.2,
            xmax: 1.0,
            ymin: -1.6,
            ymax: 1.6,
        }
    }
}

/// Describes the x, y of a point in a region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps a pixel to a point of the complex plane.  Callers guarantee
/// that width and height are non-zero.
#[inline]
pub fn map_pixel(x: usize, y: usize, width: usize, height: usize, viewport: &Viewport) -> Complex<f64> {
    Complex::new(
        viewport.xmin + ((x as f64) / (width as f64)) * viewport.width(),
        viewport.ymin + ((y as f64) / (height as f64)) * viewport.height(),
    )
}

/// Contains the definitions of two planes: an integral cartesian plane,
/// and the complex viewport.  Maps points from the first to the
/// second.  Once built, both planes are known to be valid.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The region of the complex plane being rendered.
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// viewport, and refuses anything that would leave a pixel without
    /// a well-defined point.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(RenderError::ImageTooLarge { width, height });
        }
        viewport.validate()?;
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
        })
    }

    /// Width of the integral plane, in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the integral plane, in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of pixels in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.  Always false
    /// for a mapper that made it through `new`.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, map that to a
    /// point on the complex cartesian plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        map_pixel(
            pixel.0,
            pixel.1,
            self.integral_plane.0,
            self.integral_plane.1,
            &self.viewport,
        )
    }
}
