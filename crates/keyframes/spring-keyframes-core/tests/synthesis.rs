use spring_keyframes_core::{
    compute, frame,
    oscillator::{Oscillator, Sample, SpringParams},
    render::MS_PER_FRAME,
    Config, Frame, FrameValue, Options, SamplingStrategy, Synthesizer,
};

/// Settles after `|to - from|` frames with one overshoot halfway.
#[derive(Debug)]
struct LinearSettle;

impl Oscillator for LinearSettle {
    fn sample(&self, from: f64, to: f64, _params: &SpringParams) -> spring_keyframes_core::Result<Vec<Sample>> {
        let settle = (to - from).abs();
        let overshoot = to + (to - from) * 0.1;
        Ok(vec![
            Sample { value: from, time: 0.0, velocity: 0.0 },
            Sample { value: overshoot, time: settle / 2.0, velocity: 0.0 },
            Sample { value: to, time: settle, velocity: 0.0 },
        ])
    }
}

fn labels(blocks: &[spring_keyframes_core::KeyframeBlock]) -> Vec<u8> {
    blocks.iter().map(|b| b.label).collect()
}

fn cases() -> Vec<(Frame, Frame)> {
    vec![
        (frame([("x", 0.0)]), frame([("x", 100.0)])),
        (frame([("opacity", 0.0)]), frame([("opacity", 1.0)])),
        (
            frame([("x", -40.0), ("y", 10.0), ("rotate", 90.0), ("scale", 0.2)]),
            frame([("x", 0.0), ("y", 0.0), ("rotate", 0.0), ("scale", 1.0)]),
        ),
        (
            frame([("width", 100.0), ("height", 40.0), ("opacity", 1.0)]),
            frame([("width", 320.0), ("height", 40.0), ("opacity", 0.3)]),
        ),
    ]
}

#[test]
fn labels_start_at_0_end_at_100_and_strictly_increase() {
    for strategy in [SamplingStrategy::Adaptive, SamplingStrategy::Dense] {
        let options = Options {
            strategy,
            ..Options::default()
        };
        for (from, to) in cases() {
            let anim = compute(&from, &to, &options).unwrap();
            let l = labels(&anim.blocks);
            assert_eq!(l.first(), Some(&0), "{strategy:?} {to:?}");
            assert_eq!(l.last(), Some(&100), "{strategy:?} {to:?}");
            for pair in l.windows(2) {
                assert!(pair[0] < pair[1], "labels not increasing: {l:?}");
            }
        }
    }
}

#[test]
fn synthesis_is_deterministic() {
    for (from, to) in cases() {
        let a = compute(&from, &to, &Options::default()).unwrap();
        let b = compute(&from, &to, &Options::default()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn consecutive_blocks_never_repeat_except_the_last() {
    let options = Options {
        strategy: SamplingStrategy::Dense,
        ..Options::default()
    };
    for (from, to) in cases() {
        let anim = compute(&from, &to, &options).unwrap();
        let n = anim.blocks.len();
        for (i, pair) in anim.blocks.windows(2).enumerate() {
            if i + 2 < n {
                assert_ne!(pair[0].body, pair[1].body, "repeated body at {}", pair[1].label);
            }
        }
    }
}

#[test]
fn translate_x_example() {
    let anim = compute(&frame([("x", 0.0)]), &frame([("x", 100.0)]), &Options::default()).unwrap();
    let text = anim.keyframes();
    assert_eq!(text.first().unwrap(), "0% {transform: translate3d(0px, 0px, 0px);}");
    assert_eq!(text.last().unwrap(), "100% {transform: translate3d(100px, 0px, 0px);}");
    // underdamped defaults overshoot
    assert!(text.len() > 2);
    assert!(anim.final_frame > 0.0);
    assert_eq!(
        anim.duration_ms,
        (MS_PER_FRAME * anim.final_frame * 100.0).round() / 100.0
    );
    assert_eq!(anim.duration(), format!("{}ms", anim.duration_ms));
    assert_eq!(anim.easing, "cubic-bezier(0.445, 0.05, 0.55, 0.95)");
    assert!(anim.tweened.is_empty());
}

#[test]
fn unitless_properties_have_no_unit() {
    let anim = compute(&frame([("opacity", 0.0)]), &frame([("opacity", 1.0)]), &Options::default()).unwrap();
    for block in &anim.blocks {
        assert!(!block.body.contains("px"), "{block}");
    }
    assert_eq!(anim.keyframes().last().unwrap(), "100% {opacity: 1;}");
}

#[test]
fn custom_unit_applies_to_lengths_and_translate() {
    let options = Options {
        unit: "em".into(),
        ..Options::default()
    };
    let anim = compute(
        &frame([("fontSize", 1.0), ("y", 0.0)]),
        &frame([("fontSize", 2.0), ("y", 3.0)]),
        &options,
    )
    .unwrap();
    assert_eq!(
        anim.keyframes().last().unwrap(),
        "100% {font-size: 2em; transform: translate3d(0em, 3em, 0em);}"
    );
}

#[test]
fn slowest_property_sets_duration() {
    let synth = Synthesizer::new(Config::default()).with_oscillator(Box::new(LinearSettle));
    let anim = synth
        .compute(
            &frame([("x", 0.0), ("rotate", 0.0)]),
            &frame([("x", 40.0), ("rotate", 70.0)]),
            &Options::default(),
        )
        .unwrap();
    assert_eq!(anim.final_frame, 70.0);
    assert_eq!(anim.duration_ms, 1166.67);
    assert_eq!(anim.duration(), "1166.67ms");
    assert_eq!(anim.velocity.primary(), Some("rotate"));
}

#[test]
fn absent_transform_components_are_not_carried_forward() {
    let synth = Synthesizer::new(Config::default()).with_oscillator(Box::new(LinearSettle));
    let anim = synth
        .compute(
            &frame([("x", 0.0), ("rotate", 0.0)]),
            &frame([("x", 10.0), ("rotate", 70.0)]),
            &Options::default(),
        )
        .unwrap();
    assert_eq!(
        anim.keyframes(),
        [
            "0% {transform: translate3d(0px, 0px, 0px) rotate3d(0, 0, 1, 0deg);}",
            "7% {transform: translate3d(11px, 0px, 0px);}",
            "14% {transform: translate3d(10px, 0px, 0px);}",
            "50% {transform: rotate3d(0, 0, 1, 77deg);}",
            "100% {transform: translate3d(10px, 0px, 0px) rotate3d(0, 0, 1, 70deg);}",
        ]
    );
}

#[test]
fn static_properties_yield_two_blocks() {
    let anim = compute(&frame([("opacity", 1.0)]), &frame([("opacity", 1.0)]), &Options::default()).unwrap();
    assert_eq!(anim.keyframes(), ["0% {opacity: 1;}", "100% {opacity: 1;}"]);
    assert_eq!(anim.final_frame, 0.0);
    assert_eq!(anim.duration(), "0ms");
}

#[test]
fn tweened_properties_render_separately() {
    let from = frame([("y", FrameValue::from(20.0)), ("color", "red".into())]);
    let to = frame([("y", FrameValue::from(0.0)), ("color", "blue".into())]);
    let anim = compute(&from, &to, &Options::default()).unwrap();
    assert_eq!(anim.tweened_css(), "0% {color: red;}\n 100% {color: blue;}");
    assert!(anim.blocks.iter().all(|b| !b.body.contains("color")));
}

#[test]
fn tweened_only_animation_is_timed_by_a_unit_spring() {
    let from = frame([("backgroundColor", "white")]);
    let to = frame([("backgroundColor", "black")]);
    let anim = compute(&from, &to, &Options::default()).unwrap();
    assert!(anim.blocks.is_empty());
    assert_eq!(
        anim.tweened_css(),
        "0% {background-color: white;}\n 100% {background-color: black;}"
    );
    let reference = compute(&frame([("opacity", 0.0)]), &frame([("opacity", 1.0)]), &Options::default()).unwrap();
    assert_eq!(anim.final_frame, reference.final_frame);
    assert!(anim.duration_ms > 0.0);
}

#[test]
fn static_sprung_properties_do_not_snap_the_tween() {
    let from = frame([("opacity", FrameValue::from(1.0)), ("color", "red".into())]);
    let to = frame([("opacity", FrameValue::from(1.0)), ("color", "blue".into())]);
    let anim = compute(&from, &to, &Options::default()).unwrap();
    assert!(anim.duration_ms > 0.0);
    assert_eq!(anim.tweened_css(), "0% {color: red;}\n 100% {color: blue;}");

    let tween_only = compute(
        &frame([("color", "red")]),
        &frame([("color", "blue")]),
        &Options::default(),
    )
    .unwrap();
    assert_eq!(anim.final_frame, tween_only.final_frame);
    assert_eq!(anim.duration_ms, tween_only.duration_ms);
    assert_eq!(anim.velocity.velocity_at(anim.duration_ms / 2.0), 0.0);
}

#[test]
fn missing_tweened_endpoint_is_filled_from_the_other_side() {
    let anim = compute(&Frame::new(), &frame([("color", "blue")]), &Options::default()).unwrap();
    assert_eq!(anim.tweened_css(), "0% {color: blue;}\n 100% {color: blue;}");

    let from = frame([("color", FrameValue::from("red")), ("borderRadius", "4px".into())]);
    let anim = compute(&from, &frame([("color", "blue")]), &Options::default()).unwrap();
    assert_eq!(
        anim.tweened_css(),
        "0% {color: red; border-radius: 4px;}\n 100% {color: blue; border-radius: 4px;}"
    );
}

#[test]
fn initial_velocity_changes_the_trajectory_but_not_the_endpoints() {
    let from = frame([("x", 0.0)]);
    let to = frame([("x", 100.0)]);
    let still = compute(&from, &to, &Options::default()).unwrap();
    let moving = compute(&from, &to, &Options::default().with_velocity(800.0)).unwrap();
    assert_ne!(still.blocks, moving.blocks);
    assert_eq!(still.blocks.first(), moving.blocks.first());
    assert_eq!(still.blocks.last(), moving.blocks.last());
}

#[test]
fn stiffer_springs_settle_sooner() {
    let from = frame([("x", 0.0)]);
    let to = frame([("x", 100.0)]);
    let soft = compute(&from, &to, &Options::default()).unwrap();
    let stiff = compute(
        &from,
        &to,
        &Options {
            stiffness: 600.0,
            damping: 40.0,
            ..Options::default()
        },
    )
    .unwrap();
    assert!(stiff.final_frame < soft.final_frame);
}
