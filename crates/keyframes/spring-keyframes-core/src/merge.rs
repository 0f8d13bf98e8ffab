//! Timeline merging: maps each property's oracle-native sample times onto the
//! shared 0..=100 label scale and groups them into a sparse snapshot.

use std::collections::BTreeMap;

use crate::property::{PropertySpec, SprungProperty};
use crate::sampler::PropertyAmplitude;
use crate::value::round_to;

/// Label of the first keyframe block.
pub const FIRST_LABEL: u8 = 0;
/// Label of the terminal keyframe block.
pub const LAST_LABEL: u8 = 100;

/// `(property, value)` pairs that change at one label.
pub type FramePairs = Vec<(&'static PropertySpec, f64)>;

/// Sparse label → changed-properties map. A property missing from a label is
/// not asserted to hold any value there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    frames: BTreeMap<u8, FramePairs>,
}

impl FrameSnapshot {
    #[inline]
    pub fn get(&self, label: u8) -> Option<&FramePairs> {
        self.frames.get(&label)
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = u8> + '_ {
        self.frames.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &FramePairs)> + '_ {
        self.frames.iter().map(|(label, pairs)| (*label, pairs))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Every `(label, value)` at which `property` is listed, ascending.
    pub fn property_track(&self, property: &str) -> Vec<(u8, f64)> {
        self.iter()
            .filter_map(|(label, pairs)| {
                pairs
                    .iter()
                    .find(|(spec, _)| spec.name == property)
                    .map(|(_, v)| (label, *v))
            })
            .collect()
    }

    /// A repeat landing replaces the earlier value, except at label 0 where
    /// the exact start value is kept.
    fn insert(&mut self, label: u8, spec: &'static PropertySpec, value: f64) {
        let pairs = self.frames.entry(label).or_default();
        match pairs.iter_mut().find(|(p, _)| p.name == spec.name) {
            Some(slot) if label != FIRST_LABEL => slot.1 = value,
            Some(_) => {}
            None => pairs.push((spec, value)),
        }
    }
}

/// Map an oracle-native time onto an integer label using `final_frame` as the
/// upper bound.
#[inline]
pub fn to_label(time: f64, final_frame: f64) -> u8 {
    if final_frame <= 0.0 {
        return FIRST_LABEL;
    }
    let scaled = (time / final_frame * f64::from(LAST_LABEL)).round();
    scaled.clamp(f64::from(FIRST_LABEL), f64::from(LAST_LABEL)) as u8
}

#[derive(Copy, Clone, Debug)]
pub struct TimelineMerger {
    decimals: u32,
}

impl TimelineMerger {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// Merge every property's samples into one snapshot.
    ///
    /// Returns the snapshot and the final frame, i.e. the slowest settle time.
    /// Label 100 always lists every target with its exact `to` value.
    pub fn merge(
        &self,
        amplitudes: &[PropertyAmplitude],
        targets: &[SprungProperty],
    ) -> (FrameSnapshot, f64) {
        let final_frame = amplitudes
            .iter()
            .map(|a| a.settle_frame)
            .fold(0.0_f64, f64::max);

        let mut snapshot = FrameSnapshot::default();
        for amp in amplitudes {
            for sample in &amp.samples {
                let label = to_label(sample.time, final_frame);
                let value = if sample.time == 0.0 {
                    sample.value
                } else {
                    round_to(sample.value, self.decimals)
                };
                snapshot.insert(label, amp.property, value);
            }
        }

        if !targets.is_empty() {
            let landing: FramePairs = targets.iter().map(|t| (t.spec, t.to)).collect();
            if !snapshot.frames.contains_key(&FIRST_LABEL) {
                snapshot.frames.insert(FIRST_LABEL, landing.clone());
            }
            snapshot.frames.insert(LAST_LABEL, landing);
        }

        (snapshot, final_frame)
    }
}
