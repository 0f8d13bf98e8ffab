//! Per-subject animation state.
//!
//! The engine is pure; everything that survives between synthesis calls for
//! one animated subject lives in an [`AnimationState`] owned by the caller.
//! Two transitions drive it: [`AnimationState::begin`] when a new timeline
//! starts playing and [`AnimationState::on_settled`] when the host reports a
//! finished timeline.

use serde::{Deserialize, Serialize};

use crate::engine::{SynthesizedAnimation, Synthesizer};
use crate::error::Result;
use crate::ids::{TimelineToken, TokenAllocator};
use crate::options::Options;
use crate::value::Frame;
use crate::velocity::{estimate_velocity, VelocityCurve};

/// Default prefix of generated keyframes names.
pub const DEFAULT_PREFIX: &str = "spring";

/// The timeline currently playing on a subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveTimeline {
    pub token: TimelineToken,
    /// Keyframes name, `"{prefix}-{token}"`.
    pub name: String,
    pub started_at_ms: f64,
    pub velocity: VelocityCurve,
}

/// Finished-notification delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFinished {
    pub token: TimelineToken,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The active timeline finished; the subject is at rest.
    Completed,
    /// The notification names a superseded timeline and was ignored.
    Stale,
}

/// A timeline started by [`AnimationState::animate_to`].
#[derive(Clone, Debug, PartialEq)]
pub struct StartedTimeline {
    pub token: TimelineToken,
    pub name: String,
    pub animation: SynthesizedAnimation,
}

impl StartedTimeline {
    /// `animation` shorthand for this timeline.
    pub fn shorthand(&self, delay_ms: Option<f64>) -> String {
        self.animation.animation_shorthand(&self.name, delay_ms)
    }
}

#[derive(Clone, Debug)]
pub struct AnimationState {
    prefix: String,
    /// Target of the most recent timeline, or the initial frame.
    resting: Frame,
    active: Option<ActiveTimeline>,
    tokens: TokenAllocator,
}

impl AnimationState {
    pub fn new(initial: Frame) -> Self {
        Self::with_prefix(initial, DEFAULT_PREFIX)
    }

    pub fn with_prefix(initial: Frame, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            resting: initial,
            active: None,
            tokens: TokenAllocator::new(),
        }
    }

    #[inline]
    pub fn resting(&self) -> &Frame {
        &self.resting
    }

    #[inline]
    pub fn active(&self) -> Option<&ActiveTimeline> {
        self.active.as_ref()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Record that `animation` toward `target` started playing at `now_ms`.
    /// Supersedes any timeline still in flight.
    pub fn begin(&mut self, target: Frame, animation: &SynthesizedAnimation, now_ms: f64) -> &ActiveTimeline {
        let token = self.tokens.alloc();
        self.resting = target;
        self.active.insert(ActiveTimeline {
            token,
            name: format!("{}-{}", self.prefix, token.0),
            started_at_ms: now_ms,
            velocity: animation.velocity.clone(),
        })
    }

    pub fn on_settled(&mut self, event: AnimationFinished) -> Settlement {
        match &self.active {
            Some(active) if active.token == event.token => {
                self.active = None;
                Settlement::Completed
            }
            _ => {
                log::debug!("ignoring finished-notification for stale timeline {:?}", event.token);
                Settlement::Stale
            }
        }
    }

    /// Velocity of the playing timeline at `now_ms`; 0 when at rest.
    pub fn estimate_velocity(&self, now_ms: f64) -> f64 {
        self.active
            .as_ref()
            .map_or(0.0, |a| estimate_velocity(now_ms - a.started_at_ms, &a.velocity))
    }

    /// Retarget toward `to`.
    ///
    /// While a timeline is in flight the start frame is the resting frame
    /// overlaid with `observed` (values read off the subject), and the
    /// current velocity seeds the new springs. State is only updated when
    /// synthesis succeeds.
    pub fn animate_to(
        &mut self,
        synth: &Synthesizer,
        to: Frame,
        observed: Option<&Frame>,
        options: &Options,
        now_ms: f64,
    ) -> Result<StartedTimeline> {
        let mut from = self.resting.clone();
        if self.is_animating() {
            if let Some(observed) = observed {
                for (name, value) in observed {
                    from.insert(name.clone(), value.clone());
                }
            }
        }
        let options = options.with_velocity(self.estimate_velocity(now_ms));

        let animation = synth.compute(&from, &to, &options)?;
        let active = self.begin(to, &animation, now_ms);
        Ok(StartedTimeline {
            token: active.token,
            name: active.name.clone(),
            animation,
        })
    }
}
