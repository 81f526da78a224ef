#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which repeatedly squaring `z` and adding `c`, starting from zero,
//! never runs off to infinity.  Points outside the set run off at
//! different speeds, and that "velocity" (how many steps it took to
//! leave the circle of radius two) is what gets colored.
//!
//! Rendering maps every pixel to a point on the plane, iterates it,
//! turns the escape step into a position between 0 and 1 (either the
//! raw step count, which produces bands, or a smoothed, continuous
//! estimate), and looks that position up in a color gradient.  Rows of
//! the image are spread across a pool of threads.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod error;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod registry;
pub mod render;

pub use config::RenderConfig;
pub use error::RenderError;
pub use escape::{escape_time, Coloring, Escape};
pub use palette::{ColorStop, Gradient};
pub use planes::{map_pixel, Pixel, PlaneMapper, Viewport};
pub use registry::PaletteRegistry;
pub use render::{default_threads, render_image, Renderer};
