//! Keyframe rendering: snapshot → ordered keyframe text blocks + duration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::merge::{FrameSnapshot, LAST_LABEL};
use crate::property::PropertySpec;
use crate::transform::bundle;
use crate::value::{format_number, round_to, FrameValue};

/// Time-scale constant converting oracle frames into milliseconds.
pub const MS_PER_FRAME: f64 = 1000.0 / 60.0;

/// One `{label}% {…}` block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyframeBlock {
    pub label: u8,
    /// Declarations joined by `"; "`, without braces.
    pub body: String,
}

impl fmt::Display for KeyframeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {{{};}}", self.label, self.body)
    }
}

/// Total duration in milliseconds, rounded to two decimals.
#[inline]
pub fn duration_ms(final_frame: f64) -> f64 {
    round_to(MS_PER_FRAME * final_frame, 2)
}

fn declaration(spec: &PropertySpec, value: &FrameValue, unit: &str) -> String {
    match value {
        FrameValue::Number(v) if spec.unitless => format!("{}: {}", spec.css_name, format_number(*v)),
        FrameValue::Number(v) => format!("{}: {}{unit}", spec.css_name, format_number(*v)),
        FrameValue::Text(text) => format!("{}: {text}", spec.css_name),
    }
}

#[derive(Copy, Clone, Debug)]
pub struct KeyframeRenderer<'a> {
    unit: &'a str,
}

impl<'a> KeyframeRenderer<'a> {
    pub fn new(unit: &'a str) -> Self {
        Self { unit }
    }

    /// Serialize every label in ascending order, dropping a block whose body
    /// repeats the previous retained block. The 100% block is always kept.
    pub fn render(&self, snapshot: &FrameSnapshot, final_frame: f64) -> (Vec<KeyframeBlock>, f64) {
        let mut blocks: Vec<KeyframeBlock> = Vec::with_capacity(snapshot.len());

        for (label, pairs) in snapshot.iter() {
            let bundled = bundle(pairs, self.unit);
            let mut decls: Vec<String> = bundled
                .style
                .iter()
                .map(|&(spec, v)| declaration(spec, &FrameValue::Number(v), self.unit))
                .collect();
            if let Some(transform) = bundled.transform {
                decls.push(format!("transform: {transform}"));
            }
            let body = decls.join("; ");

            let repeated = blocks.last().is_some_and(|prev| prev.body == body);
            if repeated && label != LAST_LABEL {
                continue;
            }
            blocks.push(KeyframeBlock { label, body });
        }

        (blocks, duration_ms(final_frame))
    }

    /// Two-point blocks for tweened properties. A property declared on one
    /// side only holds that value at the other endpoint too.
    pub fn render_tweened(
        &self,
        from: &[(&'static PropertySpec, FrameValue)],
        to: &[(&'static PropertySpec, FrameValue)],
    ) -> Vec<KeyframeBlock> {
        if from.is_empty() && to.is_empty() {
            return Vec::new();
        }
        let start = filled(from, to);
        let end = filled(to, from);
        [(0u8, start), (LAST_LABEL, end)]
            .into_iter()
            .map(|(label, pairs)| KeyframeBlock {
                label,
                body: pairs
                    .iter()
                    .map(|(spec, v)| declaration(spec, v, self.unit))
                    .collect::<Vec<_>>()
                    .join("; "),
            })
            .collect()
    }
}

/// `side` followed by the entries of `other` it does not declare.
fn filled<'a>(
    side: &'a [(&'static PropertySpec, FrameValue)],
    other: &'a [(&'static PropertySpec, FrameValue)],
) -> Vec<&'a (&'static PropertySpec, FrameValue)> {
    let missing = other
        .iter()
        .filter(|(spec, _)| !side.iter().any(|(s, _)| s.name == spec.name));
    side.iter().chain(missing).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::TimelineMerger;
    use crate::oscillator::Sample;
    use crate::property::{lookup, SprungProperty};
    use crate::sampler::PropertyAmplitude;

    fn amp(name: &str, points: &[(f64, f64)]) -> PropertyAmplitude {
        PropertyAmplitude {
            property: lookup(name).unwrap(),
            samples: points
                .iter()
                .map(|&(value, time)| Sample {
                    value,
                    time,
                    velocity: 0.0,
                })
                .collect(),
            settle_frame: points.last().map(|p| p.1).unwrap_or(0.0),
        }
    }

    fn target(name: &str, from: f64, to: f64) -> SprungProperty {
        SprungProperty {
            spec: lookup(name).unwrap(),
            from,
            to,
        }
    }

    #[test]
    fn block_text_format() {
        let b = KeyframeBlock {
            label: 100,
            body: "transform: translate3d(100px, 0px, 0px)".into(),
        };
        assert_eq!(b.to_string(), "100% {transform: translate3d(100px, 0px, 0px);}");
    }

    #[test]
    fn duplicate_blocks_are_elided_except_the_last() {
        let amps = [amp("opacity", &[(0.0, 0.0), (1.0, 10.0), (1.0, 20.0), (1.0, 30.0)])];
        let (snap, final_frame) = TimelineMerger::new(2).merge(&amps, &[target("opacity", 0.0, 1.0)]);
        let (blocks, duration) = KeyframeRenderer::new("px").render(&snap, final_frame);
        let text: Vec<String> = blocks.iter().map(ToString::to_string).collect();
        assert_eq!(
            text,
            ["0% {opacity: 0;}", "33% {opacity: 1;}", "100% {opacity: 1;}"]
        );
        assert_eq!(duration, 500.0);
    }

    #[test]
    fn units_follow_the_table() {
        let amps = [
            amp("width", &[(10.0, 0.0), (20.0, 6.0)]),
            amp("opacity", &[(0.5, 0.0), (1.0, 6.0)]),
        ];
        let targets = [target("width", 10.0, 20.0), target("opacity", 0.5, 1.0)];
        let (snap, final_frame) = TimelineMerger::new(2).merge(&amps, &targets);
        let (blocks, duration) = KeyframeRenderer::new("em").render(&snap, final_frame);
        assert_eq!(blocks[0].to_string(), "0% {width: 10em; opacity: 0.5;}");
        assert_eq!(duration, 100.0);
    }

    #[test]
    fn tweened_blocks_render_text_verbatim() {
        let color = lookup("color").unwrap();
        let radius = lookup("borderRadius").unwrap();
        let blocks = KeyframeRenderer::new("px").render_tweened(
            &[(color, "red".into()), (radius, 2.0.into())],
            &[(color, "blue".into()), (radius, "50%".into())],
        );
        assert_eq!(blocks[0].to_string(), "0% {color: red; border-radius: 2px;}");
        assert_eq!(blocks[1].to_string(), "100% {color: blue; border-radius: 50%;}");
    }

    #[test]
    fn one_sided_tweened_property_is_held_at_the_other_end() {
        let color = lookup("color").unwrap();
        let radius = lookup("borderRadius").unwrap();
        let renderer = KeyframeRenderer::new("px");

        let blocks = renderer.render_tweened(&[], &[(color, "blue".into())]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].to_string(), "0% {color: blue;}");
        assert_eq!(blocks[1].to_string(), "100% {color: blue;}");

        let blocks = renderer.render_tweened(
            &[(color, "red".into())],
            &[(radius, "50%".into()), (color, "blue".into())],
        );
        assert_eq!(blocks[0].to_string(), "0% {color: red; border-radius: 50%;}");
        assert_eq!(blocks[1].to_string(), "100% {border-radius: 50%; color: blue;}");

        assert!(renderer.render_tweened(&[], &[]).is_empty());
    }

    #[test]
    fn duration_rounds_to_hundredths() {
        assert_eq!(duration_ms(70.0), 1166.67);
        assert_eq!(duration_ms(0.0), 0.0);
    }
}
