//! Spring keyframes core.
//!
//! Turns a pair of style frames into a declarative keyframe timeline whose
//! discrete blocks, interpolated by a fixed cubic-bezier, approximate
//! damped-spring motion. Each sprung property is simulated independently by a
//! closed-form oscillator; the samples are merged onto a shared 0..=100 label
//! scale, transform components are bundled into one declaration, and the
//! result is rendered as keyframe text plus a duration.
//!
//! [`AnimationState`] threads per-subject state (active timeline, captured
//! velocity) between calls so a moving subject can be retargeted without a
//! velocity discontinuity.

pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod ids;
pub mod merge;
pub mod observed;
pub mod options;
pub mod oscillator;
pub mod property;
pub mod render;
pub mod request;
pub mod sampler;
pub mod state;
pub mod transform;
pub mod value;
pub mod velocity;

pub use config::Config;
pub use easing::{CubicBezier, EASE};
pub use engine::{compute, SynthesizedAnimation, Synthesizer};
pub use error::{Result, SynthesisError};
pub use ids::{TimelineToken, TokenAllocator};
pub use merge::{FrameSnapshot, TimelineMerger};
pub use observed::{observed_frame, parse_matrix, ComputedStyle};
pub use options::{Options, SamplingStrategy};
pub use oscillator::{DenseOscillator, Oscillator, Sample, SpringParams, TurningPointOscillator};
pub use property::{classify, lookup, PropertyClass, PropertySpec, TransformKind, PROPERTIES};
pub use render::{KeyframeBlock, KeyframeRenderer, MS_PER_FRAME};
pub use request::{parse_request_json, SynthesisRequest};
pub use sampler::{PropertyAmplitude, SpringSampler};
pub use state::{ActiveTimeline, AnimationFinished, AnimationState, Settlement, StartedTimeline};
pub use transform::{bundle, BundledFrame};
pub use value::{frame, Frame, FrameValue};
pub use velocity::{estimate_velocity, VelocityCurve};
