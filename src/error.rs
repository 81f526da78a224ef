// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong before (or, in the case of a panicking
//! worker, during) a render.  Bad parameters are always caught before
//! the first pixel is computed.

use failure::Fail;

/// The failures a render can report.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum RenderError {
    /// The palette registry has no gradient under this keyword.
    #[fail(display = "palette {:?} not found", name)]
    UnknownPalette {
        /// The keyword that was looked up.
        name: String,
    },

    /// Width or height was zero.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    EmptyImage {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Width or height does not fit the image buffer's 32-bit sides.
    #[fail(display = "image dimensions {}x{} are too large", width, height)]
    ImageTooLarge {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The viewport has no area, is inverted, or is not finite.
    #[fail(
        display = "degenerate viewport: x {}..{}, y {}..{} (each min must be below its max)",
        xmin, xmax, ymin, ymax
    )]
    DegenerateViewport {
        /// Left edge on the real axis.
        xmin: f64,
        /// Right edge on the real axis.
        xmax: f64,
        /// Lower edge on the imaginary axis.
        ymin: f64,
        /// Upper edge on the imaginary axis.
        ymax: f64,
    },

    /// An iteration budget of zero.
    #[fail(display = "iteration limit must be positive")]
    NoIterations,

    /// A worker count of zero.
    #[fail(display = "worker count must be positive")]
    NoWorkers,

    /// One of the render threads panicked; the image is incomplete.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}
