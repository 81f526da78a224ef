// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A lookup table of named gradients.  Nothing here is global: build a
//! registry (usually `PaletteRegistry::builtin()`), then pass it to
//! whoever needs to find a palette by name.

use crate::error::RenderError;
use crate::palette::{rgba, ColorStop, Gradient};

/// The palette used when nobody asks for a particular one.
pub const DEFAULT_PALETTE: &str = "NebulaSpectre";

/// Named gradient templates.  Lookups hand back normalized copies; the
/// templates themselves are never modified.
#[derive(Clone, Debug, Default)]
pub struct PaletteRegistry {
    palettes: Vec<Gradient>,
}

impl PaletteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        PaletteRegistry {
            palettes: Vec::new(),
        }
    }

    /// The registry of palettes shipped with the renderer.
    pub fn builtin() -> Self {
        let mut registry = PaletteRegistry::new();
        for gradient in builtin_palettes() {
            registry.insert(gradient);
        }
        registry
    }

    /// Adds a gradient, replacing any existing gradient with the same
    /// name in place (so listing order is registration order).
    pub fn insert(&mut self, gradient: Gradient) {
        match self.palettes.iter_mut().find(|g| g.name() == gradient.name()) {
            Some(existing) => *existing = gradient,
            None => self.palettes.push(gradient),
        }
    }

    /// A normalized copy of the named gradient.  Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<Gradient> {
        self.palettes
            .iter()
            .find(|g| g.name() == name)
            .map(Gradient::normalized)
    }

    /// Like `get`, but a miss is an error.
    pub fn lookup(&self, name: &str) -> Result<Gradient, RenderError> {
        match self.get(name) {
            Some(gradient) => {
                debug!("palette {} has {} stops", name, gradient.len());
                Ok(gradient)
            }
            None => Err(RenderError::UnknownPalette {
                name: name.to_string(),
            }),
        }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(Gradient::name)
    }

    /// Number of registered palettes.
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

fn builtin_palettes() -> Vec<Gradient> {
    vec![
        Gradient::new(
            "NebulaSpectre",
            vec![
                ColorStop::new(0.0, rgba(0x09, 0x04, 0x20, 0xff)), // deep violet
                ColorStop::new(0.15, rgba(0x3a, 0x0f, 0x73, 0xff)), // purple
                ColorStop::new(0.35, rgba(0x8d, 0x1a, 0xa8, 0xff)), // magenta
                ColorStop::new(0.55, rgba(0xe7, 0x36, 0x7f, 0xff)), // hot pink
                ColorStop::new(0.75, rgba(0x3b, 0xd6, 0xc2, 0xff)), // teal
                ColorStop::new(1.0, rgba(0xf0, 0xff, 0xff, 0xff)),
            ],
        ),
        Gradient::new(
            "MonochromeSlate",
            vec![
                ColorStop::new(0.0, rgba(0x00, 0x00, 0x00, 0xff)),
                ColorStop::new(0.5, rgba(0x70, 0x70, 0x70, 0xff)),
                ColorStop::new(1.0, rgba(0xff, 0xff, 0xff, 0xff)),
            ],
        ),
        Gradient::new(
            "MetallicChrome",
            vec![
                ColorStop::new(0.0, rgba(0x06, 0x0b, 0x14, 0xff)),
                ColorStop::new(0.2, rgba(0x3a, 0x3f, 0x45, 0xff)),
                ColorStop::new(0.45, rgba(0x9e, 0xae, 0xb4, 0xff)),
                ColorStop::new(0.7, rgba(0xe7, 0xd8, 0xb0, 0xff)),
                ColorStop::new(1.0, rgba(0xff, 0xff, 0xff, 0xff)),
            ],
        ),
        Gradient::new(
            "ThermalHeat",
            vec![
                ColorStop::new(0.0, rgba(0x00, 0x00, 0x00, 0xff)),
                ColorStop::new(0.25, rgba(0x70, 0x00, 0x00, 0xff)),
                ColorStop::new(0.5, rgba(0xff, 0x40, 0x00, 0xff)),
                ColorStop::new(0.75, rgba(0xff, 0xd0, 0x00, 0xff)),
                ColorStop::new(1.0, rgba(0xff, 0xff, 0xff, 0xff)),
            ],
        ),
        Gradient::new(
            "AuroraArc",
            vec![
                ColorStop::new(0.0, rgba(0x01, 0x13, 0x1f, 0xff)),
                ColorStop::new(0.2, rgba(0x03, 0x6b, 0x5f, 0xff)),
                ColorStop::new(0.45, rgba(0x54, 0xe6, 0xb2, 0xff)),
                ColorStop::new(0.7, rgba(0x95, 0x43, 0xd6, 0xff)),
                ColorStop::new(1.0, rgba(0xf8, 0xf9, 0xff, 0xff)),
            ],
        ),
    ]
}
