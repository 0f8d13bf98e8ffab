//! Cubic-bezier timing shared by every emitted timeline.
//!
//! The physical curve shape lives in the keyframe blocks; the bezier only
//! smooths interpolation between explicit blocks.

use serde::{Deserialize, Serialize};

/// Control points of the timing function applied between blocks.
pub const EASE: CubicBezier = CubicBezier {
    x1: 0.445,
    y1: 0.05,
    x2: 0.55,
    y2: 0.95,
};

const INVERT_STEPS: usize = 48;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[inline]
fn cubic(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

#[inline]
fn cubic_derivative(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

impl CubicBezier {
    #[inline]
    fn is_linear(&self) -> bool {
        self.x1 == self.y1 && self.x2 == self.y2
    }

    /// Curve parameter whose x equals `t`, found by bisection (x is monotonic
    /// for control points in [0,1]).
    fn solve_x(&self, t: f64) -> f64 {
        let mut lo = 0.0;
        let mut hi = 1.0;
        let mut mid = t;
        for _ in 0..INVERT_STEPS {
            let x = cubic(self.x1, self.x2, mid);
            if (x - t).abs() < 1e-12 {
                break;
            }
            if x < t {
                lo = mid;
            } else {
                hi = mid;
            }
            mid = 0.5 * (lo + hi);
        }
        mid
    }

    /// Eased progress at `t` ∈ [0,1].
    pub fn ease(&self, t: f64) -> f64 {
        self.ease_with_derivative(t).0
    }

    /// Eased progress and its derivative with respect to `t`.
    pub fn ease_with_derivative(&self, t: f64) -> (f64, f64) {
        let t = t.clamp(0.0, 1.0);
        if self.is_linear() {
            return (t, 1.0);
        }
        let s = self.solve_x(t);
        let eased = cubic(self.y1, self.y2, s);
        let dx = cubic_derivative(self.x1, self.x2, s);
        let dy = cubic_derivative(self.y1, self.y2, s);
        let slope = if dx.abs() > 1e-12 { dy / dx } else { 0.0 };
        (eased, slope)
    }

    /// CSS `cubic-bezier(...)` text.
    pub fn css(&self) -> String {
        format!(
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
