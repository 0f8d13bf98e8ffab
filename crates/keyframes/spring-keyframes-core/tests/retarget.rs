use spring_keyframes_core::{
    frame, AnimationFinished, AnimationState, Config, Options, Settlement, Synthesizer,
};

fn synth() -> Synthesizer {
    Synthesizer::new(Config::default())
}

#[test]
fn in_flight_retarget_carries_velocity_and_observed_position() {
    let synth = synth();
    let mut state = AnimationState::new(frame([("x", 0.0)]));
    let options = Options::default();

    let first = state
        .animate_to(&synth, frame([("x", 100.0)]), None, &options, 1_000.0)
        .unwrap();
    assert!(state.is_animating());

    let v = state.estimate_velocity(1_050.0);
    assert!(v > 0.0, "expected forward motion, got {v}");
    assert_eq!(v, first.animation.velocity.velocity_at(50.0));

    let observed = frame([("x", 30.0)]);
    let second = state
        .animate_to(&synth, frame([("x", 300.0)]), Some(&observed), &options, 1_050.0)
        .unwrap();
    assert_eq!(
        second.animation.keyframes().first().unwrap(),
        "0% {transform: translate3d(30px, 0px, 0px);}"
    );

    let expected = synth
        .compute(&observed, &frame([("x", 300.0)]), &options.with_velocity(v))
        .unwrap();
    assert_eq!(second.animation, expected);
    assert_ne!(second.token, first.token);
    assert_eq!(state.active().unwrap().name, second.name);
}

#[test]
fn at_rest_retarget_starts_from_last_target_with_no_velocity() {
    let synth = synth();
    let mut state = AnimationState::new(frame([("opacity", 0.0)]));
    let options = Options::default();

    let first = state
        .animate_to(&synth, frame([("opacity", 1.0)]), None, &options, 0.0)
        .unwrap();
    assert_eq!(
        state.on_settled(AnimationFinished { token: first.token }),
        Settlement::Completed
    );
    assert_eq!(state.estimate_velocity(10.0), 0.0);

    // observed values are ignored once settled
    let second = state
        .animate_to(
            &synth,
            frame([("opacity", 0.5)]),
            Some(&frame([("opacity", 0.9)])),
            &options,
            5_000.0,
        )
        .unwrap();
    let expected = synth
        .compute(&frame([("opacity", 1.0)]), &frame([("opacity", 0.5)]), &options)
        .unwrap();
    assert_eq!(second.animation, expected);
}

#[test]
fn stale_finish_does_not_clear_the_active_timeline() {
    let synth = synth();
    let mut state = AnimationState::new(frame([("x", 0.0)]));
    let options = Options::default();

    let a = state
        .animate_to(&synth, frame([("x", 50.0)]), None, &options, 0.0)
        .unwrap();
    let b = state
        .animate_to(&synth, frame([("x", 80.0)]), Some(&frame([("x", 20.0)])), &options, 100.0)
        .unwrap();

    assert_eq!(state.on_settled(AnimationFinished { token: a.token }), Settlement::Stale);
    assert!(state.is_animating());
    assert!(state.estimate_velocity(150.0) != 0.0);

    assert_eq!(state.on_settled(AnimationFinished { token: b.token }), Settlement::Completed);
    assert_eq!(state.on_settled(AnimationFinished { token: b.token }), Settlement::Stale);
    assert_eq!(state.resting(), &frame([("x", 80.0)]));
}

#[test]
fn velocity_is_zero_before_start_and_after_the_timeline() {
    let synth = synth();
    let mut state = AnimationState::new(frame([("x", 0.0)]));
    let started = state
        .animate_to(&synth, frame([("x", 100.0)]), None, &Options::default(), 200.0)
        .unwrap();
    assert_eq!(state.estimate_velocity(200.0), 0.0);
    assert_eq!(state.estimate_velocity(100.0), 0.0);
    let end = 200.0 + started.animation.duration_ms + 1.0;
    assert_eq!(state.estimate_velocity(end), 0.0);
}
