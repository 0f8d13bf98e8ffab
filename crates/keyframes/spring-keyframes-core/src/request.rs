use serde::{Deserialize, Serialize};

use crate::engine::{SynthesizedAnimation, Synthesizer};
use crate::error::Result;
use crate::options::Options;
use crate::value::Frame;

/// A complete synthesis call in serialized form.
///
/// `{"from": {...}, "to": {...}, "options": {...}}`; `from` and `options` may
/// be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub from: Frame,
    pub to: Frame,
    #[serde(default)]
    pub options: Options,
}

impl SynthesisRequest {
    pub fn run(&self, synth: &Synthesizer) -> Result<SynthesizedAnimation> {
        synth.compute(&self.from, &self.to, &self.options)
    }
}

/// Parse a [`SynthesisRequest`] from JSON text.
pub fn parse_request_json(s: &str) -> Result<SynthesisRequest> {
    Ok(serde_json::from_str(s)?)
}
