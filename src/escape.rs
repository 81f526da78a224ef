// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel and the policies that turn its result into a
//! position along a gradient.

use num::Complex;
use std::f64::consts::LN_2;

/// Squared escape radius.  Once |z| passes 2 the orbit is gone for good.
pub const ESCAPE_NORM_SQR: f64 = 4.0;

/// Stands in for |z| when it comes out as zero, so the logarithm in
/// smooth coloring has something to chew on.
const MIN_MAGNITUDE: f64 = 1e-16;

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// The step at which the orbit escaped, or the limit if it never did.
    pub iterations: usize,
    /// The last value computed.
    pub z: Complex<f64>,
}

impl Escape {
    /// True if the point never escaped within `limit` steps, which we
    /// take to mean it's inside the set.
    pub fn is_bounded(&self, limit: usize) -> bool {
        self.iterations >= limit
    }
}

/// This is our classic iterator function.  Starting from zero, square
/// and add `c` until the orbit leaves the circle of radius two or
/// `limit` steps have gone by.  The escape is tested after each update,
/// so a `c` that is already outside the circle escapes at step 0.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: usize) -> Escape {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > ESCAPE_NORM_SQR {
            return Escape { iterations: i, z };
        }
    }
    Escape {
        iterations: limit,
        z,
    }
}

/// How an escape is turned into a gradient position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coloring {
    /// Iteration count over the limit.  Produces visible bands.
    Discrete,
    /// Continuous escape time, `n + 1 - log2(ln |z|)`, over the limit.
    Smooth,
}

impl Default for Coloring {
    fn default() -> Self {
        Coloring::Smooth
    }
}

impl Coloring {
    /// Picks a policy from a yes/no switch.
    pub fn from_smooth(smooth: bool) -> Self {
        if smooth {
            Coloring::Smooth
        } else {
            Coloring::Discrete
        }
    }

    /// Maps an escape to a gradient position.  Bounded points always
    /// land on 0, the start of the gradient.
    pub fn position(self, escape: &Escape, limit: usize) -> f64 {
        if escape.is_bounded(limit) {
            return 0.0;
        }
        let n = escape.iterations as f64;
        match self {
            Coloring::Discrete => n / (limit as f64),
            Coloring::Smooth => {
                let mut magnitude = escape.z.norm();
                if magnitude <= 0.0 {
                    magnitude = MIN_MAGNITUDE;
                }
                let mut nu = n + 1.0 - magnitude.ln().ln() / LN_2;
                // Can jump a band.
                if nu < 0.0 {
                    nu = n;
                }
                nu / (limit as f64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        for limit in &[1, 2, 50, 1000] {
            let escape = escape_time(Complex::new(0.0, 0.0), *limit);
            assert_eq!(escape.iterations, *limit);
            assert!(escape.is_bounded(*limit));
            assert_eq!(escape.z, Complex::new(0.0, 0.0));
        }
    }

    #[test]
    fn far_points_escape_on_the_first_step() {
        let escape = escape_time(Complex::new(3.0, 0.0), 1);
        assert_eq!(escape.iterations, 0);
        assert_eq!(escape.z, Complex::new(3.0, 0.0));
        assert_eq!(escape_time(Complex::new(0.0, -2.5), 100).iterations, 0);
    }

    #[test]
    fn the_radius_itself_does_not_count_as_escape() {
        // c = 2 gives z = 2 (|z|^2 == 4), then z = 6.
        let escape = escape_time(Complex::new(2.0, 0.0), 10);
        assert_eq!(escape.iterations, 1);
        assert_eq!(escape.z, Complex::new(6.0, 0.0));
    }

    #[test]
    fn a_zero_limit_is_immediately_bounded() {
        let escape = escape_time(Complex::new(3.0, 0.0), 0);
        assert_eq!(escape.iterations, 0);
        assert!(escape.is_bounded(0));
    }

    #[test]
    fn cycles_are_bounded() {
        // -1 falls into the 0, -1, 0, -1 cycle.
        assert!(escape_time(Complex::new(-1.0, 0.0), 500).is_bounded(500));
        assert!(escape_time(Complex::new(-2.0, 0.0), 500).is_bounded(500));
    }

    #[test]
    fn bounded_points_sit_at_the_start_of_the_gradient() {
        let escape = escape_time(Complex::new(0.0, 0.0), 64);
        assert_eq!(Coloring::Discrete.position(&escape, 64), 0.0);
        assert_eq!(Coloring::Smooth.position(&escape, 64), 0.0);
    }

    #[test]
    fn discrete_coloring_is_iterations_over_limit() {
        for re in &[0.3, 0.26, 0.5, 1.0, -2.1] {
            let escape = escape_time(Complex::new(*re, 0.0), 100);
            assert!(!escape.is_bounded(100));
            let t = Coloring::Discrete.position(&escape, 100);
            assert_eq!(t, escape.iterations as f64 / 100.0);
        }
    }

    #[test]
    fn smooth_coloring_follows_the_log_log_formula() {
        let escape = escape_time(Complex::new(0.3, 0.0), 200);
        let n = escape.iterations as f64;
        let expected = (n + 1.0 - escape.z.norm().ln().ln() / 2f64.ln()) / 200.0;
        let t = Coloring::Smooth.position(&escape, 200);
        assert!((t - expected).abs() < 1e-15);
        assert!(t > 0.0 && t < 1.0);
    }

    #[test]
    fn smooth_coloring_falls_back_when_the_estimate_goes_negative() {
        // |z| = e^(2^2) drives log2(ln|z|) to 2, so nu = 0 + 1 - 2 < 0.
        let escape = Escape {
            iterations: 0,
            z: Complex::new(4f64.exp(), 0.0),
        };
        assert_eq!(Coloring::Smooth.position(&escape, 10), 0.0);
        let escape = Escape {
            iterations: 3,
            z: Complex::new(1e300, 0.0),
        };
        assert_eq!(Coloring::Smooth.position(&escape, 10), 0.3);
    }

    #[test]
    fn smooth_coloring_survives_a_zero_magnitude() {
        let escape = Escape {
            iterations: 2,
            z: Complex::new(0.0, 0.0),
        };
        // ln(1e-16) is negative, so ln of it is NaN; nothing panics.
        let t = Coloring::Smooth.position(&escape, 10);
        assert!(t.is_nan());
    }

    #[test]
    fn smooth_is_the_default() {
        assert_eq!(Coloring::default(), Coloring::Smooth);
        assert_eq!(Coloring::from_smooth(false), Coloring::Discrete);
    }
}
