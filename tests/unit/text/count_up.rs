use super::*;

#[test]
fn frames_end_exactly_at_target() {
    let c = CountUp::new(0, 250, 2.0);
    let frames = c.frames(Fps::display());
    assert_eq!(frames.first(), Some(&0));
    assert_eq!(frames.last(), Some(&250));
    assert_eq!(frames.len(), 121);
}

#[test]
fn frames_are_monotonic_even_with_overshoot() {
    let c = CountUp::new(10, 50, 1.0).ease(Ease::OutBack { overshoot: 3.0 });
    let frames = c.frames(Fps::display());
    assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    assert!(frames.iter().all(|&v| (10..=50).contains(&v)));

    let down = CountUp::new(100, 0, 0.5).frames(Fps::display());
    assert!(down.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(down.last(), Some(&0));
}

#[test]
fn zero_duration_yields_single_end_frame() {
    assert_eq!(CountUp::new(3, 9, 0.0).frames(Fps::display()), vec![9]);
    assert_eq!(CountUp::new(3, 9, 0.0).sample(0.0), 9);
}

#[test]
fn sample_clamps_out_of_range_elapsed() {
    let c = CountUp::new(0, 100, 1.0).ease(Ease::Linear);
    assert_eq!(c.sample(-1.0), 0);
    assert_eq!(c.sample(0.5), 50);
    assert_eq!(c.sample(5.0), 100);
    assert_eq!(c.sample(f64::NAN), 0);
}

#[test]
fn negative_duration_is_rejected() {
    assert!(CountUp::new(0, 1, -1.0).validate().is_err());
    assert!(CountUp::new(0, 1, f64::NAN).validate().is_err());
    assert!(CountUp::new(0, 1, 1.5).validate().is_ok());
}
