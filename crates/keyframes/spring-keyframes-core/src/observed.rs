//! Reading a start frame off a subject that is mid-flight.
//!
//! Hosts can only observe computed style text: a `matrix(...)` transform and
//! unit-bearing strings such as `"12.5px"`. These helpers turn that text back
//! into a [`Frame`] usable as the `observed` argument of
//! [`AnimationState::animate_to`](crate::AnimationState::animate_to).

use indexmap::IndexMap;

use crate::property::{lookup, PropertyClass, TransformKind};
use crate::value::{Frame, FrameValue};

/// Computed style text keyed by camelCase property name.
pub type ComputedStyle = IndexMap<String, String>;

/// Decomposed 2D transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MatrixComponents {
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub rotate: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl MatrixComponents {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        rotate: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    fn component(&self, kind: TransformKind) -> f64 {
        match kind {
            TransformKind::TranslateX => self.x,
            TransformKind::TranslateY => self.y,
            TransformKind::Rotate => self.rotate,
            TransformKind::Scale | TransformKind::ScaleX => self.scale_x,
            TransformKind::ScaleY => self.scale_y,
        }
    }
}

/// Parse `none` or `matrix(a, b, c, d, tx, ty)`.
pub fn parse_matrix(text: &str) -> Option<MatrixComponents> {
    let text = text.trim();
    if text == "none" {
        return Some(MatrixComponents::IDENTITY);
    }
    let inner = text.strip_prefix("matrix(")?.strip_suffix(')')?;
    let nums = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    let [a, b, c, d, tx, ty] = nums.as_slice() else {
        return None;
    };
    Some(MatrixComponents {
        x: *tx,
        y: *ty,
        rotate: b.atan2(*a).to_degrees(),
        scale_x: a.hypot(*b),
        scale_y: c.hypot(*d),
    })
}

/// Leading number of a CSS value, e.g. `12.5` from `"12.5px"`.
pub fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, ch)| !(ch.is_ascii_digit() || ch == '.' || ((ch == '-' || ch == '+') && i == 0)))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().ok()
}

/// Build a start frame for the keys of `to` from computed style text.
///
/// Transform components come from the `transform` entry; other sprung
/// properties take the leading number of their entry; tweened properties keep
/// their text. Keys that cannot be read are left out, so the caller's resting
/// frame supplies them.
pub fn observed_frame(to: &Frame, computed: &ComputedStyle) -> Frame {
    let matrix = computed.get("transform").and_then(|t| parse_matrix(t));
    let mut out = Frame::new();
    for name in to.keys() {
        let Some(spec) = lookup(name) else {
            continue;
        };
        let value = match spec.class {
            PropertyClass::Transform(kind) => matrix.map(|m| FrameValue::Number(m.component(kind))),
            PropertyClass::Sprung => computed
                .get(name)
                .and_then(|t| leading_number(t))
                .map(FrameValue::Number),
            PropertyClass::Tweened => computed.get(name).map(|t| FrameValue::Text(t.clone())),
        };
        if let Some(value) = value {
            out.insert(name.clone(), value);
        }
    }
    out
}
