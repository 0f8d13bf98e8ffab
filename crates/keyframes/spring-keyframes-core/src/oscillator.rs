//! Damped harmonic oscillator oracle.
//!
//! The oracle turns a scalar spring (`from` → `to` under stiffness, damping and
//! mass) into an ordered list of [`Sample`]s. Sample times are expressed in
//! frames of `1/60 s`; velocities in value units per second.
//!
//! Two samplers ship with the crate and both evaluate the closed-form
//! solution of `m·x'' + c·x' + k·x = 0`:
//! - [`TurningPointOscillator`] keeps the start, every turning point and the
//!   settle point.
//! - [`DenseOscillator`] keeps 101 evenly spaced points over the settle span.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthesisError};

/// Frames per second of the oracle's native time base.
pub const FRAMES_PER_SECOND: f64 = 60.0;

const BISECTION_STEPS: usize = 32;

/// One point on a simulated trajectory.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    /// Oracle-native time in frames.
    pub time: f64,
    /// Value units per second.
    pub velocity: f64,
}

/// Physical parameters handed to an [`Oscillator`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Initial velocity in value units per second.
    pub velocity: f64,
    pub precision: f64,
}

/// External integration boundary. Implementations return samples ordered by
/// time, ending with a sample at or after the settle threshold.
pub trait Oscillator: Debug {
    fn sample(&self, from: f64, to: f64, params: &SpringParams) -> Result<Vec<Sample>>;
}

/// Closed-form spring trajectory relative to its target.
#[derive(Copy, Clone, Debug)]
pub(crate) struct DampedSpring {
    to: f64,
    /// Initial displacement from the target.
    x0: f64,
    v0: f64,
    /// Decay rate `c / 2m`.
    beta: f64,
    /// Undamped angular frequency `sqrt(k / m)`.
    omega0: f64,
    precision: f64,
}

impl DampedSpring {
    pub(crate) fn new(from: f64, to: f64, params: &SpringParams) -> Self {
        Self {
            to,
            x0: from - to,
            v0: params.velocity,
            beta: params.damping / (2.0 * params.mass),
            omega0: (params.stiffness / params.mass).sqrt(),
            precision: params.precision,
        }
    }

    #[inline]
    fn is_critical(&self) -> bool {
        (self.beta - self.omega0).abs() <= f64::from(f32::EPSILON) * self.omega0.max(1.0)
    }

    /// Displacement from the target and velocity at `t` seconds.
    pub(crate) fn state(&self, t: f64) -> (f64, f64) {
        let (beta, x0, v0) = (self.beta, self.x0, self.v0);
        if self.is_critical() {
            let envelope = (-beta * t).exp();
            let c = beta * x0 + v0;
            let x = envelope * (x0 + c * t);
            let v = envelope * (c - beta * (x0 + c * t));
            (x, v)
        } else if beta < self.omega0 {
            let omega1 = (self.omega0 * self.omega0 - beta * beta).sqrt();
            let envelope = (-beta * t).exp();
            let b = (beta * x0 + v0) / omega1;
            let (sin, cos) = (omega1 * t).sin_cos();
            let x = envelope * (x0 * cos + b * sin);
            let v = envelope * ((b * omega1 - beta * x0) * cos - (beta * b + x0 * omega1) * sin);
            (x, v)
        } else {
            // Overdamped. Expand e^(-βt)·cosh/sinh into two decaying exponentials
            // so large t never overflows.
            let omega2 = (beta * beta - self.omega0 * self.omega0).sqrt();
            let b = (beta * x0 + v0) / omega2;
            let slow = ((omega2 - beta) * t).exp();
            let fast = (-(omega2 + beta) * t).exp();
            let cosh = 0.5 * (slow + fast);
            let sinh = 0.5 * (slow - fast);
            let x = x0 * cosh + b * sinh;
            let v = (b * omega2 - beta * x0) * cosh + (x0 * omega2 - beta * b) * sinh;
            (x, v)
        }
    }

    #[inline]
    pub(crate) fn value_at(&self, t: f64) -> f64 {
        self.to + self.state(t).0
    }

    #[inline]
    fn is_settled(&self, x: f64, v: f64) -> bool {
        x.abs() < self.precision && v.abs() < self.precision
    }

    /// Bisect the velocity zero crossing inside `[t0, t1]` (seconds).
    fn turning_point(&self, mut t0: f64, mut t1: f64, v0_sign: f64) -> f64 {
        for _ in 0..BISECTION_STEPS {
            let mid = 0.5 * (t0 + t1);
            let (_, v) = self.state(mid);
            if v * v0_sign > 0.0 {
                t0 = mid;
            } else {
                t1 = mid;
            }
        }
        0.5 * (t0 + t1)
    }

    fn sample_at(&self, t: f64) -> Sample {
        let (x, v) = self.state(t);
        Sample {
            value: self.to + x,
            time: t * FRAMES_PER_SECOND,
            velocity: v,
        }
    }

    /// First whole frame at which the spring is settled.
    pub(crate) fn settle_frame(&self, max_frames: u32) -> Option<u32> {
        (1..=max_frames).find(|&n| {
            let (x, v) = self.state(f64::from(n) / FRAMES_PER_SECOND);
            self.is_settled(x, v)
        })
    }
}

fn timeout(from: f64, to: f64, max_frames: u32) -> SynthesisError {
    SynthesisError::SettleTimeout {
        from,
        to,
        frames: max_frames,
    }
}

/// Adaptive sampler: start, turning points, settle.
#[derive(Copy, Clone, Debug)]
pub struct TurningPointOscillator {
    pub max_frames: u32,
}

impl TurningPointOscillator {
    pub fn new(max_frames: u32) -> Self {
        Self { max_frames }
    }
}

impl Oscillator for TurningPointOscillator {
    fn sample(&self, from: f64, to: f64, params: &SpringParams) -> Result<Vec<Sample>> {
        let spring = DampedSpring::new(from, to, params);
        let mut samples = vec![Sample {
            value: from,
            time: 0.0,
            velocity: params.velocity,
        }];

        let mut prev_v = params.velocity;
        for n in 1..=self.max_frames {
            let t = f64::from(n) / FRAMES_PER_SECOND;
            let (x, v) = spring.state(t);

            let reversed = (prev_v > 0.0 && v <= 0.0) || (prev_v < 0.0 && v >= 0.0);
            if reversed {
                let t_prev = f64::from(n - 1) / FRAMES_PER_SECOND;
                let t_peak = spring.turning_point(t_prev, t, prev_v.signum());
                samples.push(spring.sample_at(t_peak));
            }

            if spring.is_settled(x, v) {
                samples.push(Sample {
                    value: to + x,
                    time: f64::from(n),
                    velocity: v,
                });
                return Ok(samples);
            }
            prev_v = v;
        }

        Err(timeout(from, to, self.max_frames))
    }
}

/// Fixed-step sampler: 101 points, one per percentage label.
#[derive(Copy, Clone, Debug)]
pub struct DenseOscillator {
    pub max_frames: u32,
}

impl DenseOscillator {
    pub const POINTS: u32 = 101;

    pub fn new(max_frames: u32) -> Self {
        Self { max_frames }
    }
}

impl Oscillator for DenseOscillator {
    fn sample(&self, from: f64, to: f64, params: &SpringParams) -> Result<Vec<Sample>> {
        let spring = DampedSpring::new(from, to, params);
        let settle = spring
            .settle_frame(self.max_frames)
            .ok_or_else(|| timeout(from, to, self.max_frames))?;
        let span = f64::from(settle);
        let last = f64::from(Self::POINTS - 1);

        Ok((0..Self::POINTS)
            .map(|i| {
                let frame = span * f64::from(i) / last;
                spring.sample_at(frame / FRAMES_PER_SECOND)
            })
            .collect())
    }
}
