//! Velocity continuity for retargeting.
//!
//! A [`VelocityCurve`] is captured from a rendered timeline and answers "how
//! fast was property P moving `elapsed` ms after the timeline started?"
//! without re-running the oscillator. It differentiates what the rendering
//! surface actually plays: per property, the listed keyframe values joined by
//! the shared cubic-bezier timing function.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::easing::CubicBezier;
use crate::merge::{FrameSnapshot, LAST_LABEL};

/// A listed value of one property on the playback clock.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    pub time_ms: f64,
    pub value: f64,
}

/// Inverse-velocity function of one synthesized timeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityCurve {
    easing: Option<CubicBezier>,
    /// Property whose velocity [`VelocityCurve::velocity_at`] reports.
    primary: Option<String>,
    tracks: IndexMap<String, Vec<Knot>>,
}

impl VelocityCurve {
    /// Capture knots for every property listed in `snapshot`.
    ///
    /// `primary` names the slowest-settling property.
    pub fn from_snapshot(
        snapshot: &FrameSnapshot,
        duration_ms: f64,
        easing: CubicBezier,
        primary: Option<&str>,
    ) -> Self {
        let mut tracks: IndexMap<String, Vec<Knot>> = IndexMap::new();
        for (label, pairs) in snapshot.iter() {
            let time_ms = f64::from(label) / f64::from(LAST_LABEL) * duration_ms;
            for (spec, value) in pairs {
                tracks.entry(spec.name.to_string()).or_default().push(Knot {
                    time_ms,
                    value: *value,
                });
            }
        }
        Self {
            easing: Some(easing),
            primary: primary.map(str::to_string),
            tracks,
        }
    }

    #[inline]
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn knots(&self, property: &str) -> Option<&[Knot]> {
        self.tracks.get(property).map(Vec::as_slice)
    }

    /// Velocity of the primary property, in value units per second.
    pub fn velocity_at(&self, elapsed_ms: f64) -> f64 {
        self.primary
            .as_deref()
            .and_then(|p| self.property_velocity_at(p, elapsed_ms))
            .unwrap_or(0.0)
    }

    /// Velocity of `property`, or `None` if the timeline does not list it.
    pub fn property_velocity_at(&self, property: &str, elapsed_ms: f64) -> Option<f64> {
        let knots = self.tracks.get(property)?;
        let easing = self.easing?;
        Some(segment_velocity(knots, easing, elapsed_ms))
    }

    /// Borrow the curve as a plain `elapsed_ms -> velocity` function.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |elapsed_ms| self.velocity_at(elapsed_ms)
    }
}

fn segment_velocity(knots: &[Knot], easing: CubicBezier, elapsed_ms: f64) -> f64 {
    for pair in knots.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if elapsed_ms < a.time_ms || elapsed_ms >= b.time_ms {
            continue;
        }
        let span = b.time_ms - a.time_ms;
        if span <= 0.0 {
            return 0.0;
        }
        let u = (elapsed_ms - a.time_ms) / span;
        let (_, slope) = easing.ease_with_derivative(u);
        // units per ms -> units per second
        return (b.value - a.value) * slope / span * 1000.0;
    }
    0.0
}

/// Estimated instantaneous velocity `elapsed_ms` into a running timeline.
/// Zero when nothing was in flight.
pub fn estimate_velocity(elapsed_ms: f64, curve: &VelocityCurve) -> f64 {
    if elapsed_ms > 0.0 {
        curve.velocity_at(elapsed_ms)
    } else {
        0.0
    }
}
