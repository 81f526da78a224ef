// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color gradients.
//!
//! A gradient is a named, ordered list of color stops.  Each stop has a
//! position, nominally between 0.0 and 1.0, and an RGBA color.  A stop
//! position of exactly 0.0 is read as "don't care": normalization will
//! work out where the stop belongs by spreading it evenly between the
//! stops around it that *do* have a position.
//!
//! Gradients are values.  Normalizing one produces a fresh gradient and
//! leaves the original untouched, so a template sitting in a registry
//! can be handed out any number of times without anybody's render
//! stepping on anybody else's.

use image::{Pixel, Rgba};
use itertools::Itertools;
use num::clamp;
use std::cmp::Ordering;

/// What `interpolate` returns for a gradient with no stops at all.
pub const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 0xff]);

/// Builds an 8-bit RGBA color.
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// A single color at a single position along the gradient.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorStop {
    /// Where the color sits.  0.0 means "unspecified."
    pub position: f64,
    /// The color at that position.
    pub color: Rgba<u8>,
}

impl ColorStop {
    /// Constructor.
    pub fn new(position: f64, color: Rgba<u8>) -> Self {
        ColorStop { position, color }
    }
}

/// A named color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    name: String,
    stops: Vec<ColorStop>,
    normalized: bool,
}

impl Gradient {
    /// Creates an un-normalized gradient.  The stops are kept exactly
    /// as given; call `normalized` before rendering with it.
    pub fn new<S: Into<String>>(name: S, stops: Vec<ColorStop>) -> Self {
        Gradient {
            name: name.into(),
            stops,
            normalized: false,
        }
    }

    /// The keyword this gradient is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stops, in their current order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// The number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// True if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// True if this value came out of `normalized`.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Returns a normalized copy of this gradient: stops sorted by
    /// position, every position inside [0, 1], and unspecified
    /// positions filled in.
    ///
    /// If every stop carries an explicit (non-zero) position, the stops
    /// are only sorted and clamped.  Otherwise every stop with a
    /// positive position becomes an anchor, the first and last stops are
    /// pinned to 0 and 1 unless they are anchors themselves, and the
    /// stops between two anchors are spread evenly by index.  With no
    /// anchors at all the stops are spread evenly across the whole
    /// range.
    ///
    /// A lone stop always ends up at 0.  Normalizing a gradient that is
    /// already normalized returns an identical copy.
    pub fn normalized(&self) -> Gradient {
        if self.normalized {
            return self.clone();
        }
        let mut stops = self.stops.clone();
        normalize_stops(&mut stops);
        Gradient {
            name: self.name.clone(),
            stops,
            normalized: true,
        }
    }

    /// The color at position `t`.
    ///
    /// Anything at or below the first stop gets the first stop's color,
    /// anything at or above the last stop gets the last stop's color.
    /// In between, the two stops bracketing `t` are blended linearly,
    /// channel by channel (alpha included), in plain 8-bit sRGB values.
    /// An empty gradient is opaque black.
    pub fn interpolate(&self, t: f64) -> Rgba<u8> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return OPAQUE_BLACK,
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        for (a, b) in self.stops.iter().tuple_windows() {
            if t >= a.position && t <= b.position {
                let span = b.position - a.position;
                if span <= 0.0 {
                    return b.color;
                }
                return lerp(a.color, b.color, (t - a.position) / span);
            }
        }
        // Only reachable for NaN.
        last.color
    }
}

fn by_position(a: &ColorStop, b: &ColorStop) -> Ordering {
    a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal)
}

fn normalize_stops(stops: &mut Vec<ColorStop>) {
    let count = stops.len();
    match count {
        0 => return,
        1 => {
            stops[0].position = 0.0;
            return;
        }
        _ => {}
    }

    if stops.iter().all(|s| s.position != 0.0) {
        stops.sort_by(by_position);
        for stop in stops.iter_mut() {
            stop.position = clamp(stop.position, 0.0, 1.0);
        }
        return;
    }

    let mut anchors: Vec<(usize, f64)> = stops
        .iter()
        .enumerate()
        .filter(|(_, s)| s.position > 0.0)
        .map(|(i, s)| (i, s.position.min(1.0)))
        .collect();

    if anchors.is_empty() {
        let last = (count - 1) as f64;
        for (i, stop) in stops.iter_mut().enumerate() {
            stop.position = (i as f64) / last;
        }
        return;
    }

    if anchors[0].0 != 0 {
        anchors.insert(0, (0, 0.0));
    }
    if anchors[anchors.len() - 1].0 != count - 1 {
        anchors.push((count - 1, 1.0));
    }

    for (&(ia, pa), &(ib, pb)) in anchors.iter().tuple_windows() {
        let span = (ib - ia) as f64;
        for (offset, stop) in stops[ia..ib].iter_mut().enumerate() {
            stop.position = pa + ((offset as f64) / span) * (pb - pa);
        }
    }
    if let Some(&(last, position)) = anchors.last() {
        stops[last].position = position;
    }

    stops.sort_by(by_position);
}

fn lerp(a: Rgba<u8>, b: Rgba<u8>, t: f64) -> Rgba<u8> {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    a.map2(&b, |x, y| {
        let v = (1.0 - t) * f64::from(x) + t * f64::from(y);
        clamp(v.round(), 0.0, 255.0) as u8
    })
}
