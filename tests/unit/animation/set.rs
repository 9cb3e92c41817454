use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, Tween};
use crate::foundation::core::{ElementBox, NodeId, Property};
use crate::render::surface::InMemorySurface;

fn surface() -> InMemorySurface {
    InMemorySurface::new(800.0, 4000.0)
        .with_node(NodeId(1), ElementBox::new(100.0, 50.0))
        .with_node(NodeId(2), ElementBox::new(300.0, 50.0))
}

fn fade(node: u64) -> Timeline {
    Timeline::single(
        Tween::from_to([NodeId(node)], 1.0)
            .from(Property::Opacity, 0.0)
            .prop(Property::Opacity, 1.0),
        Ease::Linear,
    )
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

#[test]
fn fire_and_forget_timelines_are_dropped_on_completion() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    let id = set.play(fade(1), &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.0));
    assert_eq!(set.len(), 1);

    set.tick(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.5));
    set.tick(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));
    assert!(!set.contains(id));
    assert!(set.is_empty());
}

#[test]
fn retained_timelines_can_be_reversed_after_completion() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    let id = set.attach_paused(fade(1));
    set.tick(1.0, &mut s);
    assert_eq!(s.write_count(), 0);

    set.control(id, Control::Play, &mut s);
    set.tick(1.0, &mut s);
    assert!(set.contains(id));
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));

    set.control(id, Control::Reverse, &mut s);
    set.tick(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.5));
    set.tick(1.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.0));
    assert!(set.contains(id));
    assert_eq!(set.active_count(), 0);
}

#[test]
fn seek_scrubs_a_retained_timeline() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    let id = set.attach_paused(fade(1));
    set.seek(id, 0.25, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 0.25));
    set.seek(id, 1.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));
}

#[test]
fn overwrite_kills_conflicting_tweens() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    let first = set.play(
        Timeline::single(
            Tween::to([NodeId(1)], 1.0).prop(Property::Y, 100.0),
            Ease::Linear,
        ),
        &mut s,
    );
    let unrelated = set.play(fade(2), &mut s);
    set.tick(0.5, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Y), 50.0));

    let second = set.play(
        Timeline::single(
            Tween::to([NodeId(1)], 1.0).prop(Property::Y, -20.0),
            Ease::Linear,
        )
        .overwrite(true),
        &mut s,
    );
    assert!(!set.contains(first));
    assert!(set.contains(unrelated));
    assert!(set.contains(second));

    set.tick(1.0, &mut s);
    assert!(approx(s.number(NodeId(1), Property::Y), -20.0));
}

#[test]
fn follow_up_starts_when_the_first_completes() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    set.play(fade(1).then(fade(2)), &mut s);
    assert_eq!(s.number(NodeId(2), Property::Opacity), None);

    set.tick(1.0, &mut s);
    assert_eq!(set.len(), 1);
    assert!(approx(s.number(NodeId(2), Property::Opacity), 0.0));

    set.tick(1.0, &mut s);
    assert!(approx(s.number(NodeId(2), Property::Opacity), 1.0));
    assert!(set.is_empty());
}

#[test]
fn reduced_motion_jumps_straight_to_the_end() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    set.set_reduced_motion(true);
    let done = Rc::new(Cell::new(false));
    let flag = done.clone();
    set.play(fade(1).on_complete(move || flag.set(true)), &mut s);
    assert!(approx(s.number(NodeId(1), Property::Opacity), 1.0));
    assert!(done.get());
    assert!(set.is_empty());
}

#[test]
fn kill_is_idempotent_and_drops_callbacks() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let id = set.play(
        Timeline::new(Ease::Linear)
            .with(
                Tween::to([NodeId(1)], 1.0).prop(Property::Scale, 2.0),
                Position::Sequence,
            )
            .on_complete(move || flag.set(true)),
        &mut s,
    );
    assert!(set.kill(id));
    assert!(!set.kill(id));
    set.tick(2.0, &mut s);
    assert!(!fired.get());
    assert_eq!(s.number(NodeId(1), Property::Scale), None);
}

#[test]
fn kill_all_empties_the_set() {
    let mut s = surface();
    let mut set = TimelineSet::new();
    set.play(fade(1), &mut s);
    set.attach_paused(fade(2));
    set.kill_all();
    assert!(set.is_empty());
    let before = s.write_count();
    set.tick(1.0, &mut s);
    assert_eq!(s.write_count(), before);
}
