//! Property classification table.
//!
//! Every animatable property is listed exactly once in [`PROPERTIES`]. The
//! table decides whether a property is simulated as a spring, tweened
//! between two points, or folded into the composed `transform` declaration.

use crate::error::{Result, SynthesisError};
use crate::value::{Frame, FrameValue};

/// Transform-group component, in composition order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    TranslateX,
    TranslateY,
    Rotate,
    Scale,
    ScaleX,
    ScaleY,
}

impl TransformKind {
    /// Start value used when `from` omits the component.
    #[inline]
    pub fn identity(self) -> f64 {
        match self {
            TransformKind::Scale | TransformKind::ScaleX | TransformKind::ScaleY => 1.0,
            TransformKind::TranslateX | TransformKind::TranslateY | TransformKind::Rotate => 0.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyClass {
    /// Animated by sampling a damped oscillator.
    Sprung,
    /// Direct two-point transition.
    Tweened,
    /// Sprung, but only ever emitted inside the composed `transform`.
    Transform(TransformKind),
}

/// One row of the classification table.
#[derive(Debug, PartialEq, Eq)]
pub struct PropertySpec {
    /// camelCase name used in frames.
    pub name: &'static str,
    /// Declaration name used in keyframe text.
    pub css_name: &'static str,
    pub class: PropertyClass,
    /// Numbers are emitted without a length unit.
    pub unitless: bool,
}

impl PropertySpec {
    #[inline]
    pub fn is_sampled(&self) -> bool {
        !matches!(self.class, PropertyClass::Tweened)
    }

    #[inline]
    pub fn transform_kind(&self) -> Option<TransformKind> {
        match self.class {
            PropertyClass::Transform(kind) => Some(kind),
            _ => None,
        }
    }
}

const fn sprung(name: &'static str, css_name: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        css_name,
        class: PropertyClass::Sprung,
        unitless: false,
    }
}

const fn unitless(name: &'static str, css_name: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        css_name,
        class: PropertyClass::Sprung,
        unitless: true,
    }
}

const fn tweened(name: &'static str, css_name: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        css_name,
        class: PropertyClass::Tweened,
        unitless: false,
    }
}

const fn transform(name: &'static str, kind: TransformKind) -> PropertySpec {
    PropertySpec {
        name,
        css_name: "transform",
        class: PropertyClass::Transform(kind),
        unitless: true,
    }
}

pub static PROPERTIES: &[PropertySpec] = &[
    // transform group
    transform("x", TransformKind::TranslateX),
    transform("y", TransformKind::TranslateY),
    transform("rotate", TransformKind::Rotate),
    transform("scale", TransformKind::Scale),
    transform("scaleX", TransformKind::ScaleX),
    transform("scaleY", TransformKind::ScaleY),
    // tweened
    tweened("color", "color"),
    tweened("background", "background"),
    tweened("backgroundColor", "background-color"),
    tweened("borderColor", "border-color"),
    tweened("borderRadius", "border-radius"),
    // sprung, unitless
    unitless("opacity", "opacity"),
    unitless("lineHeight", "line-height"),
    unitless("zIndex", "z-index"),
    unitless("flexGrow", "flex-grow"),
    // sprung lengths
    sprung("width", "width"),
    sprung("height", "height"),
    sprung("minWidth", "min-width"),
    sprung("minHeight", "min-height"),
    sprung("maxWidth", "max-width"),
    sprung("maxHeight", "max-height"),
    sprung("top", "top"),
    sprung("right", "right"),
    sprung("bottom", "bottom"),
    sprung("left", "left"),
    sprung("margin", "margin"),
    sprung("marginTop", "margin-top"),
    sprung("marginRight", "margin-right"),
    sprung("marginBottom", "margin-bottom"),
    sprung("marginLeft", "margin-left"),
    sprung("padding", "padding"),
    sprung("paddingTop", "padding-top"),
    sprung("paddingRight", "padding-right"),
    sprung("paddingBottom", "padding-bottom"),
    sprung("paddingLeft", "padding-left"),
    sprung("borderWidth", "border-width"),
    sprung("fontSize", "font-size"),
    sprung("letterSpacing", "letter-spacing"),
    sprung("gap", "gap"),
];

/// Look up a property by its frame name.
pub fn lookup(name: &str) -> Option<&'static PropertySpec> {
    PROPERTIES.iter().find(|p| p.name == name)
}

fn require(name: &str) -> Result<&'static PropertySpec> {
    lookup(name).ok_or_else(|| SynthesisError::InvalidProperty {
        name: name.to_string(),
    })
}

/// A sampled property with its endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct SprungProperty {
    pub spec: &'static PropertySpec,
    pub from: f64,
    pub to: f64,
}

/// Output of [`classify`]: the sampled properties in `to` order plus the two
/// endpoints of the tweened set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub sprung: Vec<SprungProperty>,
    pub tweened_from: Vec<(&'static PropertySpec, FrameValue)>,
    pub tweened_to: Vec<(&'static PropertySpec, FrameValue)>,
}

impl Classification {
    #[inline]
    pub fn has_tweened(&self) -> bool {
        !self.tweened_from.is_empty() || !self.tweened_to.is_empty()
    }
}

/// Partition the keys of `from ∪ to` using [`PROPERTIES`] and check that both
/// frames agree on each property's value kind.
pub fn classify(from: &Frame, to: &Frame) -> Result<Classification> {
    for name in from.keys().chain(to.keys()) {
        require(name)?;
    }

    let mut out = Classification::default();

    for (name, target) in to {
        let spec = require(name)?;
        let start = from.get(name);

        if let Some(start) = start {
            if start.is_number() != target.is_number() {
                return Err(SynthesisError::incompatible(
                    name,
                    format!(
                        "from is {} but to is {}",
                        start.kind_name(),
                        target.kind_name()
                    ),
                ));
            }
        }

        match spec.class {
            PropertyClass::Tweened => {
                out.tweened_to.push((spec, target.clone()));
            }
            PropertyClass::Sprung | PropertyClass::Transform(_) => {
                let to_value = target.as_number().ok_or_else(|| {
                    SynthesisError::incompatible(name, "sprung properties require numeric values")
                })?;
                let from_value = match (start, spec.transform_kind()) {
                    (Some(v), _) => v.as_number().ok_or_else(|| {
                        SynthesisError::incompatible(
                            name,
                            "sprung properties require numeric values",
                        )
                    })?,
                    (None, Some(kind)) => kind.identity(),
                    (None, None) => {
                        return Err(SynthesisError::incompatible(name, "missing from value"))
                    }
                };
                if !from_value.is_finite() || !to_value.is_finite() {
                    return Err(SynthesisError::incompatible(name, "values must be finite"));
                }
                out.sprung.push(SprungProperty {
                    spec,
                    from: from_value,
                    to: to_value,
                });
            }
        }
    }

    for (name, start) in from {
        let spec = require(name)?;
        if matches!(spec.class, PropertyClass::Tweened) {
            out.tweened_from.push((spec, start.clone()));
        } else if !to.contains_key(name) {
            log::trace!("ignoring '{name}': present in from but not in to");
        }
    }

    Ok(out)
}
