// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row-parallel rendering.
//!
//! The image buffer is carved into rows before any thread starts.  The
//! rows sit behind a single mutex as an iterator of `(index, &mut row)`
//! pairs, and each worker pulls the next pair off the iterator, renders
//! into it, and comes back for more.  Pulling a row off the iterator
//! hands that worker the only mutable reference to it, so the pixels
//! themselves never need a lock; the mutex is only held long enough to
//! call `next()`.
//!
//! Every pixel depends only on its own coordinates, so the output is
//! the same no matter how many workers there are or which of them
//! happened to grab which row.

use image::RgbaImage;
use std::convert::TryFrom;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::error::RenderError;
use crate::escape::{escape_time, Coloring};
use crate::palette::Gradient;
use crate::planes::{Pixel, PlaneMapper, Viewport};

/// Bytes per RGBA pixel.
const CHANNELS: usize = 4;

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u8>>>>;

/// The number of workers to use when the caller has no opinion.
pub fn default_threads() -> usize {
    num_cpus::get()
}

/// Holds everything needed to color any pixel of the image.  Once
/// built, every parameter is known to be valid and the gradient is
/// normalized, so rendering cannot fail on bad input.
#[derive(Debug, Clone)]
pub struct Renderer {
    plane: PlaneMapper,
    limit: usize,
    gradient: Gradient,
    coloring: Coloring,
}

impl Renderer {
    /// Requires the plane mapping, the per-point iteration limit, the
    /// gradient, and the coloring policy.  The gradient is normalized
    /// here if it isn't already.
    pub fn new(
        plane: PlaneMapper,
        limit: usize,
        gradient: &Gradient,
        coloring: Coloring,
    ) -> Result<Self, RenderError> {
        if limit == 0 {
            return Err(RenderError::NoIterations);
        }
        Ok(Renderer {
            plane,
            limit,
            gradient: gradient.normalized(),
            coloring,
        })
    }

    /// The plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The normalized gradient in use.
    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    /// Colors a single pixel.
    pub fn render_pixel(&self, pixel: &Pixel) -> image::Rgba<u8> {
        let c = self.plane.pixel_to_point(pixel);
        let escape = escape_time(c, self.limit);
        let t = self.coloring.position(&escape, self.limit);
        self.gradient.interpolate(t)
    }

    /// Fills one row of RGBA bytes.  `row` must be exactly one image
    /// row long.
    pub fn render_row(&self, y: usize, row: &mut [u8]) {
        debug_assert_eq!(row.len(), self.plane.width() * CHANNELS);
        for (x, out) in row.chunks_mut(CHANNELS).enumerate() {
            let color = self.render_pixel(&Pixel(x, y));
            out.copy_from_slice(&color.0);
        }
    }

    fn blank_image(&self) -> Result<RgbaImage, RenderError> {
        let (width, height) = (self.plane.width(), self.plane.height());
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(RgbaImage::new(w, h)),
            _ => Err(RenderError::ImageTooLarge { width, height }),
        }
    }

    /// Renders the whole image on the calling thread.
    pub fn render_single(&self) -> Result<RgbaImage, RenderError> {
        let mut image = self.blank_image()?;
        let stride = self.plane.width() * CHANNELS;
        for (y, row) in image.chunks_mut(stride).enumerate() {
            self.render_row(y, row);
        }
        Ok(image)
    }

    /// Renders the whole image with `threads` workers pulling rows off a
    /// shared queue.  Returns once every worker has finished.
    pub fn render(&self, threads: usize) -> Result<RgbaImage, RenderError> {
        if threads == 0 {
            return Err(RenderError::NoWorkers);
        }
        let started = Instant::now();
        info!(
            "rendering {}x{} with {} workers, limit {}, palette {}",
            self.plane.width(),
            self.plane.height(),
            threads,
            self.limit,
            self.gradient.name()
        );

        let mut image = self.blank_image()?;
        {
            let stride = self.plane.width() * CHANNELS;
            let rows: RowQueue = Arc::new(Mutex::new(image.chunks_mut(stride).enumerate()));
            self.render_rows(rows, threads)?;
        }

        info!("rendered in {:?}", started.elapsed());
        Ok(image)
    }

    fn render_rows(&self, rows: RowQueue, threads: usize) -> Result<(), RenderError> {
        crossbeam::scope(|spawner| {
            for worker in 0..threads {
                let rows = rows.clone();
                spawner.spawn(move |_| {
                    let mut done = 0;
                    loop {
                        // The guard never outlives next(), so this lock
                        // can't be poisoned; Err just ends the worker.
                        let row = match rows.lock() {
                            Ok(mut rows) => rows.next(),
                            Err(_) => None,
                        };
                        match row {
                            Some((y, row)) => {
                                self.render_row(y, row);
                                done += 1;
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    debug!("worker {} rendered {} rows", worker, done);
                });
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)
    }
}

/// One-call render: validates every parameter, then renders with
/// `threads` workers.
pub fn render_image(
    width: usize,
    height: usize,
    viewport: Viewport,
    limit: usize,
    gradient: &Gradient,
    coloring: Coloring,
    threads: usize,
) -> Result<RgbaImage, RenderError> {
    let plane = PlaneMapper::new(width, height, viewport)?;
    Renderer::new(plane, limit, gradient, coloring)?.render(threads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{rgba, ColorStop};
    use num::Complex;

    fn black_to_white() -> Gradient {
        Gradient::new(
            "bw",
            vec![
                ColorStop::new(0.0, rgba(0, 0, 0, 0xff)),
                ColorStop::new(1.0, rgba(0xff, 0xff, 0xff, 0xff)),
            ],
        )
    }

    fn renderer(width: usize, height: usize, coloring: Coloring) -> Renderer {
        let viewport = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        let plane = PlaneMapper::new(width, height, viewport).unwrap();
        Renderer::new(plane, 50, &black_to_white(), coloring).unwrap()
    }

    #[test]
    fn the_renderer_normalizes_its_gradient() {
        let r = renderer(4, 4, Coloring::Discrete);
        assert!(r.gradient().is_normalized());
    }

    #[test]
    fn a_zero_limit_is_rejected() {
        let plane = PlaneMapper::new(4, 4, Viewport::default()).unwrap();
        let r = Renderer::new(plane, 0, &black_to_white(), Coloring::Smooth);
        assert_eq!(r.unwrap_err(), RenderError::NoIterations);
    }

    #[test]
    fn zero_workers_are_rejected() {
        let r = renderer(4, 4, Coloring::Discrete);
        assert_eq!(r.render(0).unwrap_err(), RenderError::NoWorkers);
    }

    #[test]
    fn the_origin_is_bounded_and_the_far_corner_escapes_at_once() {
        let r = renderer(4, 4, Coloring::Discrete);
        let image = r.render(2).unwrap();
        assert_eq!(r.plane().pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(*image.get_pixel(2, 2), rgba(0, 0, 0, 0xff));

        // 2+2i is already outside the circle after the first update, so
        // discrete coloring puts it at t = 0 too.
        let corner = escape_time(r.plane().pixel_to_point(&Pixel(4, 4)), 50);
        assert_eq!(corner.iterations, 0);
        assert_eq!(r.render_pixel(&Pixel(4, 4)), rgba(0, 0, 0, 0xff));
    }

    #[test]
    fn slower_escapes_get_brighter() {
        let r = renderer(4, 4, Coloring::Discrete);
        // Pixel (3, 2) is 1+0i: z goes 1, 2, 5 and escapes at step 2.
        let image = r.render(3).unwrap();
        assert_eq!(*image.get_pixel(3, 2), rgba(10, 10, 10, 0xff));
    }

    #[test]
    fn single_and_threaded_renders_agree() {
        let r = renderer(37, 23, Coloring::Smooth);
        let single = r.render_single().unwrap();
        for threads in &[1, 3, 8] {
            assert_eq!(r.render(*threads).unwrap(), single);
        }
    }

    #[test]
    fn more_workers_than_rows_is_fine() {
        let r = renderer(5, 2, Coloring::Discrete);
        assert_eq!(r.render(16).unwrap(), r.render_single().unwrap());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_hand_built_planes_are_refused_not_truncated() {
        let mut plane = PlaneMapper::new(4, 1, Viewport::default()).unwrap();
        plane.integral_plane.0 = (u32::MAX as usize) + 2;
        let r = Renderer::new(plane, 10, &black_to_white(), Coloring::Discrete).unwrap();
        let expected = RenderError::ImageTooLarge {
            width: (u32::MAX as usize) + 2,
            height: 1,
        };
        assert_eq!(r.render(2).unwrap_err(), expected);
        assert_eq!(r.render_single().unwrap_err(), expected);
    }
}
