// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! All the knobs for a single render, with the defaults the command
//! line falls back on.

use image::RgbaImage;
use std::convert::TryFrom;

use crate::error::RenderError;
use crate::escape::Coloring;
use crate::planes::{PlaneMapper, Viewport};
use crate::registry::{PaletteRegistry, DEFAULT_PALETTE};
use crate::render::{default_threads, Renderer};

/// Parameters for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// The region of the complex plane to draw.
    pub viewport: Viewport,
    /// Maximum iterations per point.
    pub iterations: usize,
    /// Keyword of the palette to look up.
    pub palette: String,
    /// Number of render workers.
    pub threads: usize,
    /// How escapes become colors.
    pub coloring: Coloring,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1600,
            height: 1200,
            viewport: Viewport::default(),
            iterations: 1200,
            palette: DEFAULT_PALETTE.to_string(),
            threads: default_threads(),
            coloring: Coloring::Smooth,
        }
    }
}

impl RenderConfig {
    /// Checks the numeric parameters.  The palette name can only be
    /// checked against a registry; see `renderer`.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if u32::try_from(self.width).is_err() || u32::try_from(self.height).is_err() {
            return Err(RenderError::ImageTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        self.viewport.validate()?;
        if self.iterations == 0 {
            return Err(RenderError::NoIterations);
        }
        if self.threads == 0 {
            return Err(RenderError::NoWorkers);
        }
        Ok(())
    }

    /// Validates everything, looks the palette up, and builds the
    /// renderer.
    pub fn renderer(&self, registry: &PaletteRegistry) -> Result<Renderer, RenderError> {
        self.validate()?;
        let gradient = registry.lookup(&self.palette)?;
        let plane = PlaneMapper::new(self.width, self.height, self.viewport)?;
        Renderer::new(plane, self.iterations, &gradient, self.coloring)
    }

    /// Validates, then renders with the configured number of workers.
    pub fn render(&self, registry: &PaletteRegistry) -> Result<RgbaImage, RenderError> {
        self.renderer(registry)?.render(self.threads)
    }
}
