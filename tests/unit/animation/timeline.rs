use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animation::stagger::Stagger;
use crate::foundation::core::ElementBox;
use crate::render::surface::InMemorySurface;

fn surface(nodes: u64) -> InMemorySurface {
    let mut s = InMemorySurface::new(800.0, 4000.0);
    for i in 1..=nodes {
        s.insert_node(NodeId(i), ElementBox::new(i as f64 * 100.0, 50.0));
    }
    s
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

fn fade(node: u64) -> Tween {
    Tween::from_to([NodeId(node)], 1.0)
        .from(Property::Opacity, 0.0)
        .prop(Property::Opacity, 1.0)
        .ease(Ease::Linear)
}

#[test]
fn entries_run_in_insertion_order() {
    let mut s = surface(2);
    let mut tl = Timeline::new(Ease::Linear)
        .with(fade(1), Position::Sequence)
        .with(
            Tween::to([NodeId(2)], 1.0).prop(Property::Y, 100.0),
            Position::Sequence,
        );
    assert_eq!(tl.duration(), 2.0);

    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.5));
    assert_eq!(s.style(NodeId(2), Property::Y), None);

    tl.advance(1.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));
    assert!(approx(s.number(NodeId(2), Property::Y), 50.0));
}

#[test]
fn negative_offset_overlaps_previous_entry() {
    let mut s = surface(2);
    let mut tl = Timeline::new(Ease::Linear)
        .with(fade(1), Position::Sequence)
        .with(
            Tween::to([NodeId(2)], 1.0).prop(Property::Y, 100.0),
            Position::Offset(-0.5),
        );
    assert_eq!(tl.duration(), 1.5);

    tl.advance(0.75, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.75));
    assert!(approx(s.number(NodeId(2), Property::Y), 25.0));
}

#[test]
fn with_previous_and_absolute_positions() {
    let tl = Timeline::new(Ease::Linear)
        .with(fade(1), Position::At(2.0))
        .with(fade(2), Position::WithPrevious(0.25))
        .with(fade(3), Position::Offset(-10.0));
    assert_eq!(tl.duration(), 3.25);
    let starts: Vec<f64> = tl.entries.iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![2.0, 2.25, 0.0]);
}

#[test]
fn per_entry_ease_overrides_default() {
    let mut s = surface(2);
    let mut tl = Timeline::new(Ease::OutQuart)
        .with(fade(1), Position::At(0.0))
        .with(
            Tween::from_to([NodeId(2)], 1.0)
                .from(Property::Opacity, 0.0)
                .prop(Property::Opacity, 1.0),
            Position::At(0.0),
        );
    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.5));
    assert!(approx(
        s.number(NodeId(2), Property::Opacity),
        Ease::OutQuart.apply(0.5)
    ));
}

#[test]
fn completion_fires_exactly_once() {
    let mut s = surface(1);
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    let mut tl = Timeline::single(fade(1), Ease::Linear).on_complete(move || c.set(c.get() + 1));

    assert_eq!(tl.advance(0.6, &mut s), TickOutcome::Running);
    assert_eq!(tl.advance(0.6, &mut s), TickOutcome::Completed);
    assert_eq!(tl.advance(0.6, &mut s), TickOutcome::Idle);
    tl.play();
    tl.advance(0.6, &mut s);
    assert_eq!(count.get(), 1);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));
}

#[test]
fn kill_halts_writes_and_drops_callbacks() {
    let mut s = surface(1);
    let fired = Rc::new(Cell::new(false));
    let f = fired.clone();
    let mut tl = Timeline::single(fade(1), Ease::Linear).on_complete(move || f.set(true));

    tl.advance(0.3, &mut s);
    let writes = s.write_count();
    tl.kill();
    tl.kill();
    assert_eq!(tl.advance(0.3, &mut s), TickOutcome::Idle);
    tl.seek_progress(1.0, &mut s);
    tl.complete(&mut s);
    assert_eq!(s.write_count(), writes);
    assert!(tl.is_killed());
    assert!(!fired.get());
}

#[test]
fn from_to_renders_start_values_before_delay() {
    let mut s = surface(1);
    let mut tl = Timeline::single(fade(1).delay(0.5), Ease::Linear);
    tl.advance(0.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.0));
    tl.advance(0.25, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.0));
    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.25));
}

#[test]
fn to_tween_starts_from_current_value() {
    let mut s = surface(1);
    s.set_property(NodeId(1), Property::Y, 40.0.into());
    let mut tl = Timeline::single(
        Tween::to([NodeId(1)], 1.0).prop(Property::Y, 0.0),
        Ease::Linear,
    );
    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Y), 20.0));
}

#[test]
fn detached_targets_are_skipped() {
    let mut s = surface(2);
    s.detach(NodeId(2));
    let mut tl = Timeline::single(
        Tween::from_to([NodeId(1), NodeId(2)], 1.0)
            .from(Property::Opacity, 0.0)
            .prop(Property::Opacity, 1.0),
        Ease::Linear,
    );
    tl.advance(2.0, &mut s);
    assert_eq!(s.detached_writes(), 0);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));
}

#[test]
fn reverse_returns_to_start_values() {
    let mut s = surface(1);
    let rewound = Rc::new(Cell::new(false));
    let r = rewound.clone();
    let mut tl =
        Timeline::single(fade(1), Ease::Linear).on_reverse_complete(move || r.set(true));
    tl.advance(1.0, &mut s);
    assert_eq!(tl.state(), PlayState::Completed);

    tl.reverse();
    assert!(tl.is_active());
    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.5));
    assert_eq!(tl.advance(1.0, &mut s), TickOutcome::Rewound);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.0));
    assert!(rewound.get());
}

#[test]
fn seek_does_not_fire_completion() {
    let mut s = surface(1);
    let fired = Rc::new(Cell::new(false));
    let f = fired.clone();
    let mut tl = Timeline::single(
        Tween::to([NodeId(1)], 2.0).prop(Property::YPercent, -20.0),
        Ease::Linear,
    )
    .paused()
    .on_complete(move || f.set(true));
    tl.seek_progress(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::YPercent), -10.0));
    tl.seek_progress(1.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::YPercent), -20.0));
    assert!(!fired.get());
    assert_eq!(tl.advance(1.0, &mut s), TickOutcome::Idle);
}

#[test]
fn yoyo_repeat_ends_where_it_started() {
    let mut s = surface(1);
    let mut tl = Timeline::single(
        Tween::to([NodeId(1)], 1.0).prop(Property::Y, -10.0),
        Ease::Linear,
    )
    .repeat(1)
    .yoyo(true);
    assert_eq!(tl.total_duration(), 2.0);
    tl.advance(1.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Y), -10.0));
    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Y), -5.0));
    assert_eq!(tl.advance(0.5, &mut s), TickOutcome::Completed);
    assert!(approx(s.number(NodeId(1), Property::Y), 0.0));
}

#[test]
fn infinite_repeat_never_completes() {
    let mut s = surface(1);
    let mut tl = Timeline::single(
        Tween::to([NodeId(1)], 1.0).prop(Property::Y, -10.0),
        Ease::Linear,
    )
    .repeat(-1)
    .yoyo(true);
    for _ in 0..100 {
        assert_eq!(tl.advance(0.37, &mut s), TickOutcome::Running);
    }
}

#[test]
fn stagger_extends_duration_and_offsets_targets() {
    let mut s = surface(3);
    let mut tl = Timeline::single(
        Tween::from_to([NodeId(1), NodeId(2), NodeId(3)], 1.0)
            .from(Property::Opacity, 0.0)
            .prop(Property::Opacity, 1.0)
            .stagger(Stagger::each(0.1)),
        Ease::Linear,
    );
    assert!((tl.duration() - 1.2).abs() < 1e-12);
    tl.advance(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.5));
    assert!(approx(s.number(NodeId(2), Property::Opacity), 0.4));
    assert!(approx(s.number(NodeId(3), Property::Opacity), 0.3));
}

#[test]
fn settled_targets_are_not_rewritten() {
    let mut s = surface(1);
    let mut tl = Timeline::single(fade(1), Ease::Linear).repeat(-1);
    tl.advance(1.0, &mut s);
    let _ = s.take_writes();
    tl.pause();
    tl.advance(0.1, &mut s);
    tl.seek_progress(1.0, &mut s);
    assert_eq!(s.write_count(), 0);
}

#[test]
fn on_update_reports_linear_progress() {
    let mut s = surface(1);
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = seen.clone();
    let mut tl = Timeline::single(
        fade(1).on_update(move |p, targets, _| {
            assert_eq!(targets, &[NodeId(1)]);
            log.borrow_mut().push(p);
        }),
        Ease::Linear,
    );
    tl.advance(0.0, &mut s);
    tl.advance(0.5, &mut s);
    tl.advance(0.5, &mut s);
    assert_eq!(*seen.borrow(), vec![0.5, 1.0]);
}

#[test]
fn invalid_timings_are_rejected() {
    assert!(Tween::to([NodeId(1)], -1.0).validate().is_err());
    assert!(Tween::to([NodeId(1)], 1.0).delay(f64::NAN).validate().is_err());
    let tl = Timeline::single(Tween::to([NodeId(1)], f64::INFINITY), Ease::Linear);
    assert!(tl.validate().is_err());
}
