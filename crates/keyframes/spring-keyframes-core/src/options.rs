//! Per-call spring options.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthesisError};

/// How a sprung property's trajectory is reduced to samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// Start, every turning point, and the settle point.
    #[default]
    Adaptive,
    /// 101 evenly spaced samples across the settle span.
    Dense,
}

/// Physical parameters for one synthesis call.
///
/// Missing fields fall back to the defaults when deserialized, so
/// `{"stiffness": 400}` is a complete options object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Restoring force; higher settles faster.
    pub stiffness: f64,
    /// Energy dissipation; higher oscillates less.
    pub damping: f64,
    /// Inertia of the simulated body.
    pub mass: f64,
    /// Settle threshold for both remaining displacement and velocity.
    pub precision: f64,
    /// Initial velocity in value units per second. Seeded when retargeting.
    pub velocity: f64,
    /// Length unit for properties that are not unitless.
    pub unit: String,
    pub strategy: SamplingStrategy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            stiffness: 180.0,
            damping: 12.0,
            mass: 1.0,
            precision: 0.01,
            velocity: 0.0,
            unit: "px".to_string(),
            strategy: SamplingStrategy::Adaptive,
        }
    }
}

impl Options {
    /// Copy of these options with a different initial velocity.
    pub fn with_velocity(&self, velocity: f64) -> Self {
        Self {
            velocity,
            ..self.clone()
        }
    }

    /// Check the physical parameters before any sampling happens.
    pub fn validate(&self) -> Result<()> {
        positive("stiffness", self.stiffness)?;
        positive("damping", self.damping)?;
        positive("mass", self.mass)?;
        positive("precision", self.precision)?;
        if !self.velocity.is_finite() {
            return Err(SynthesisError::OptionRange {
                option: "velocity",
                value: self.velocity,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

fn positive(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SynthesisError::OptionRange {
            option,
            value,
            reason: "must be finite and > 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let o: Options = serde_json::from_str(r#"{"stiffness": 400, "strategy": "dense"}"#).unwrap();
        assert_eq!(o.stiffness, 400.0);
        assert_eq!(o.damping, 12.0);
        assert_eq!(o.unit, "px");
        assert_eq!(o.strategy, SamplingStrategy::Dense);
    }

    #[test]
    fn non_positive_physics_are_rejected() {
        for (field, opts) in [
            ("stiffness", Options { stiffness: 0.0, ..Options::default() }),
            ("damping", Options { damping: -1.0, ..Options::default() }),
            ("mass", Options { mass: 0.0, ..Options::default() }),
        ] {
            match opts.validate() {
                Err(SynthesisError::OptionRange { option, .. }) => assert_eq!(option, field),
                other => panic!("expected OptionRange for {field}, got {other:?}"),
            }
        }
        assert!(Options::default().validate().is_ok());
    }
}
