//! Error taxonomy for keyframe synthesis.
//!
//! Every variant except [`SynthesisError::SettleTimeout`] is raised while the
//! inputs are validated, before any property is sampled. A synthesis call
//! either returns a complete timeline or one of these errors.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SynthesisError>;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SynthesisError {
    /// Property name is not part of the classification table.
    #[error("invalid property '{name}': not an animatable property")]
    InvalidProperty { name: String },

    /// A physical option is outside its valid range.
    #[error("option '{option}' out of range: {value} ({reason})")]
    OptionRange {
        option: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// `from` and `to` disagree about a property, or its value has the wrong kind.
    #[error("incompatible frame for '{property}': {reason}")]
    IncompatibleFrame { property: String, reason: String },

    /// The oscillator did not settle within the frame budget.
    #[error("spring from {from} to {to} did not settle within {frames} frames")]
    SettleTimeout { from: f64, to: f64, frames: u32 },

    /// A synthesis request could not be decoded.
    #[error("request error: {0}")]
    Request(String),
}

impl SynthesisError {
    pub(crate) fn incompatible(property: &str, reason: impl Into<String>) -> Self {
        Self::IncompatibleFrame {
            property: property.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SynthesisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Request(err.to_string())
    }
}
