//! Per-property sampling: the call boundary around the oscillator oracle.

use crate::error::Result;
use crate::options::Options;
use crate::oscillator::{Oscillator, Sample, SpringParams};
use crate::property::{PropertySpec, SprungProperty};

/// Samples of one sprung property, ordered by strictly increasing time.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAmplitude {
    pub property: &'static PropertySpec,
    pub samples: Vec<Sample>,
    /// Oracle-native time of the last sample; 0 when nothing moves.
    pub settle_frame: f64,
}

/// Runs the oracle for one scalar at a time. Properties are never coupled.
#[derive(Debug)]
pub struct SpringSampler<'a> {
    oscillator: &'a dyn Oscillator,
}

impl<'a> SpringSampler<'a> {
    pub fn new(oscillator: &'a dyn Oscillator) -> Self {
        Self { oscillator }
    }

    /// Sample a scalar spring and normalize the oracle output: the first
    /// sample is `(from, 0, velocity)` and times strictly increase.
    pub fn sample(&self, from: f64, to: f64, options: &Options) -> Result<(Vec<Sample>, f64)> {
        if from == to && options.velocity == 0.0 {
            return Ok((Vec::new(), 0.0));
        }

        let params = SpringParams {
            stiffness: options.stiffness,
            damping: options.damping,
            mass: options.mass,
            velocity: options.velocity,
            precision: options.precision,
        };
        let raw = self.oscillator.sample(from, to, &params)?;

        let mut samples = Vec::with_capacity(raw.len() + 1);
        samples.push(Sample {
            value: from,
            time: 0.0,
            velocity: options.velocity,
        });
        for s in raw {
            if !(s.time.is_finite() && s.value.is_finite()) {
                continue;
            }
            // len >= 1 always holds here
            let last = samples.len() - 1;
            if s.time > samples[last].time {
                samples.push(s);
            } else if s.time == samples[last].time && last > 0 {
                samples[last] = s;
            }
        }

        let settle = samples.last().map(|s| s.time).unwrap_or(0.0);
        Ok((samples, settle))
    }

    pub fn sample_property(&self, prop: &SprungProperty, options: &Options) -> Result<PropertyAmplitude> {
        let (samples, settle_frame) = self.sample(prop.from, prop.to, options)?;
        log::trace!(
            "sampled '{}' {} -> {}: {} samples, settle frame {}",
            prop.spec.name,
            prop.from,
            prop.to,
            samples.len(),
            settle_frame
        );
        Ok(PropertyAmplitude {
            property: prop.spec,
            samples,
            settle_frame,
        })
    }
}
