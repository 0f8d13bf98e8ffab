//! Engine configuration for spring-keyframes-core.

use serde::{Deserialize, Serialize};

/// Engine-wide knobs shared by every synthesis call made through a
/// [`Synthesizer`](crate::Synthesizer). Per-call physics live in
/// [`Options`](crate::Options).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on simulated frames before a spring is reported as
    /// non-converging.
    pub max_settle_frames: u32,

    /// Decimal places kept for intermediate sampled values. Label 0 and
    /// label 100 are never rounded.
    pub value_decimals: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_settle_frames: 6_000,
            value_decimals: 2,
        }
    }
}
