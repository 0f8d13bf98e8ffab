//! Frame values: the per-property inputs of a synthesis call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A style frame keyed by camelCase property name. Key order is preserved and
/// drives the declaration order of the emitted keyframes.
pub type Frame = IndexMap<String, FrameValue>;

/// Value of one property in a [`Frame`].
///
/// Sprung and transform properties must be numbers. Text values are emitted
/// verbatim, which lets tweened properties carry colors or unit-bearing
/// strings such as `"50%"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameValue {
    Number(f64),
    Text(String),
}

impl FrameValue {
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FrameValue::Number(v) => Some(*v),
            FrameValue::Text(_) => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, FrameValue::Number(_))
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            FrameValue::Number(_) => "number",
            FrameValue::Text(_) => "text",
        }
    }
}

impl From<f64> for FrameValue {
    fn from(v: f64) -> Self {
        FrameValue::Number(v)
    }
}

impl From<&str> for FrameValue {
    fn from(v: &str) -> Self {
        FrameValue::Text(v.to_string())
    }
}

impl From<String> for FrameValue {
    fn from(v: String) -> Self {
        FrameValue::Text(v)
    }
}

/// Build a [`Frame`] from `(name, value)` pairs, keeping their order.
pub fn frame<K, V, I>(pairs: I) -> Frame
where
    K: Into<String>,
    V: Into<FrameValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Round to a fixed number of decimal places, folding `-0` into `0`.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a number the way CSS text expects it: no trailing `.0`, no `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
