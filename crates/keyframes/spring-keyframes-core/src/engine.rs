//! Synthesis entry point: frames + options → keyframe timeline.
//!
//! Pipeline: validate → classify → sample each sprung property → merge onto
//! the 0..=100 label scale → bundle transforms and render → capture the
//! velocity curve. Every call is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::easing::EASE;
use crate::error::Result;
use crate::merge::TimelineMerger;
use crate::options::{Options, SamplingStrategy};
use crate::oscillator::{DenseOscillator, Oscillator, TurningPointOscillator};
use crate::property::classify;
use crate::render::{duration_ms, KeyframeBlock, KeyframeRenderer};
use crate::sampler::{PropertyAmplitude, SpringSampler};
use crate::value::{format_number, Frame};
use crate::velocity::VelocityCurve;

/// Output of one synthesis call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedAnimation {
    /// Sprung timeline, labels strictly increasing, ending at 100.
    pub blocks: Vec<KeyframeBlock>,
    /// Two-point timeline for tweened properties; empty if there are none.
    pub tweened: Vec<KeyframeBlock>,
    /// Slowest settle time in oracle frames.
    pub final_frame: f64,
    pub duration_ms: f64,
    /// Timing function text shared by both timelines.
    pub easing: String,
    pub velocity: VelocityCurve,
}

impl SynthesizedAnimation {
    /// Block texts of the sprung timeline.
    pub fn keyframes(&self) -> Vec<String> {
        self.blocks.iter().map(ToString::to_string).collect()
    }

    /// Sprung timeline as one keyframes body.
    pub fn css(&self) -> String {
        join_blocks(&self.blocks)
    }

    pub fn tweened_css(&self) -> String {
        join_blocks(&self.tweened)
    }

    /// Duration text, e.g. `"1166.67ms"`.
    pub fn duration(&self) -> String {
        format!("{}ms", format_number(self.duration_ms))
    }

    /// `animation` shorthand: `name easing duration [delay] 1 both`.
    pub fn animation_shorthand(&self, name: &str, delay_ms: Option<f64>) -> String {
        let mut parts = vec![name.to_string(), self.easing.clone(), self.duration()];
        if let Some(delay) = delay_ms.filter(|d| *d != 0.0) {
            parts.push(format!("{}ms", format_number(delay)));
        }
        parts.push("1".to_string());
        parts.push("both".to_string());
        parts.join(" ")
    }
}

fn join_blocks(blocks: &[KeyframeBlock]) -> String {
    blocks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n ")
}

/// Reusable synthesis engine.
#[derive(Debug, Default)]
pub struct Synthesizer {
    cfg: Config,
    custom: Option<Box<dyn Oscillator>>,
}

impl Synthesizer {
    pub fn new(cfg: Config) -> Self {
        Self { cfg, custom: None }
    }

    /// Replace the shipped oscillators. `Options::strategy` is then ignored.
    pub fn with_oscillator(mut self, oscillator: Box<dyn Oscillator>) -> Self {
        self.custom = Some(oscillator);
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn compute(&self, from: &Frame, to: &Frame, options: &Options) -> Result<SynthesizedAnimation> {
        options.validate()?;
        let classes = classify(from, to)?;

        let adaptive;
        let dense;
        let oscillator: &dyn Oscillator = match (&self.custom, options.strategy) {
            (Some(custom), _) => &**custom,
            (None, SamplingStrategy::Adaptive) => {
                adaptive = TurningPointOscillator::new(self.cfg.max_settle_frames);
                &adaptive
            }
            (None, SamplingStrategy::Dense) => {
                dense = DenseOscillator::new(self.cfg.max_settle_frames);
                &dense
            }
        };
        let sampler = SpringSampler::new(oscillator);

        let amplitudes = classes
            .sprung
            .iter()
            .map(|prop| sampler.sample_property(prop, options))
            .collect::<Result<Vec<PropertyAmplitude>>>()?;

        let (snapshot, mut final_frame) =
            TimelineMerger::new(self.cfg.value_decimals).merge(&amplitudes, &classes.sprung);

        if final_frame == 0.0 && classes.has_tweened() {
            // Nothing sprung moves: time the tween like a unit spring.
            let (_, reference) = sampler.sample(0.0, 1.0, options)?;
            final_frame = reference;
        }

        let renderer = KeyframeRenderer::new(&options.unit);
        let (blocks, _) = renderer.render(&snapshot, final_frame);
        let tweened = if classes.has_tweened() {
            renderer.render_tweened(&classes.tweened_from, &classes.tweened_to)
        } else {
            Vec::new()
        };
        let duration = duration_ms(final_frame);

        let primary = slowest(&amplitudes);
        let velocity = VelocityCurve::from_snapshot(&snapshot, duration, EASE, primary);

        log::debug!(
            "synthesized {} sprung / {} tweened blocks, final frame {final_frame}, {duration}ms",
            blocks.len(),
            tweened.len()
        );

        Ok(SynthesizedAnimation {
            blocks,
            tweened,
            final_frame,
            duration_ms: duration,
            easing: EASE.css(),
            velocity,
        })
    }
}

/// Slowest-settling property, first in `to` order on ties.
fn slowest(amplitudes: &[PropertyAmplitude]) -> Option<&'static str> {
    let mut best: Option<&PropertyAmplitude> = None;
    for amp in amplitudes {
        if best.map_or(true, |b| amp.settle_frame > b.settle_frame) {
            best = Some(amp);
        }
    }
    best.map(|a| a.property.name)
}

/// Synthesize with the default [`Config`].
pub fn compute(from: &Frame, to: &Frame, options: &Options) -> Result<SynthesizedAnimation> {
    Synthesizer::default().compute(from, to, options)
}
