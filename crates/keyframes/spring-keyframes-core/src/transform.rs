//! Transform bundling.
//!
//! Keyframe text allows one `transform` declaration per block, so the
//! transform-group components present at a label are composed into a single
//! value, in the fixed order translate, rotate, uniform scale, axis scale.
//!
//! Components absent at a label are not carried over from earlier labels, so a
//! block that lists only `rotate` drops a translate set by a previous block.

use crate::merge::FramePairs;
use crate::property::{PropertySpec, TransformKind};
use crate::value::format_number;

/// Result of splitting one label's pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct BundledFrame {
    pub style: FramePairs,
    pub transform: Option<String>,
}

#[derive(Default)]
struct Components {
    x: Option<f64>,
    y: Option<f64>,
    rotate: Option<f64>,
    scale: Option<f64>,
    scale_x: Option<f64>,
    scale_y: Option<f64>,
}

impl Components {
    fn set(&mut self, kind: TransformKind, value: f64) {
        let slot = match kind {
            TransformKind::TranslateX => &mut self.x,
            TransformKind::TranslateY => &mut self.y,
            TransformKind::Rotate => &mut self.rotate,
            TransformKind::Scale => &mut self.scale,
            TransformKind::ScaleX => &mut self.scale_x,
            TransformKind::ScaleY => &mut self.scale_y,
        };
        *slot = Some(value);
    }

    fn compose(&self, unit: &str) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if self.x.is_some() || self.y.is_some() {
            parts.push(format!(
                "translate3d({}{unit}, {}{unit}, 0{unit})",
                format_number(self.x.unwrap_or(0.0)),
                format_number(self.y.unwrap_or(0.0)),
            ));
        }
        if let Some(r) = self.rotate {
            parts.push(format!("rotate3d(0, 0, 1, {}deg)", format_number(r)));
        }
        if let Some(s) = self.scale {
            let s = format_number(s);
            parts.push(format!("scale3d({s}, {s}, 1)"));
        }
        if self.scale_x.is_some() || self.scale_y.is_some() {
            parts.push(format!(
                "scale3d({}, {}, 1)",
                format_number(self.scale_x.unwrap_or(1.0)),
                format_number(self.scale_y.unwrap_or(1.0)),
            ));
        }
        parts.join(" ")
    }
}

/// Separate transform components from ordinary declarations and compose them.
pub fn bundle(pairs: &[(&'static PropertySpec, f64)], unit: &str) -> BundledFrame {
    let mut style = FramePairs::with_capacity(pairs.len());
    let mut components = Components::default();
    let mut any = false;

    for &(spec, value) in pairs {
        match spec.transform_kind() {
            Some(kind) => {
                components.set(kind, value);
                any = true;
            }
            None => style.push((spec, value)),
        }
    }

    BundledFrame {
        style,
        transform: any.then(|| components.compose(unit)),
    }
}
