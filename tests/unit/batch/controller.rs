use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::ElementBox;
use crate::render::surface::InMemorySurface;

// Node i sits at 1000 + 10i; with `top 80%` -> `top 20%` in a 1000px viewport it enters at
// offset 200 + 10i and leaves at 800 + 10i.
fn grid(n: u64) -> InMemorySurface {
    let mut s = InMemorySurface::new(1000.0, 8000.0);
    for i in 0..n {
        s.insert_node(NodeId(i), ElementBox::new(1000.0 + i as f64 * 10.0, 100.0));
    }
    s
}

fn controller(n: u64, config: BatchConfig) -> BatchController {
    BatchController::new(Region::parse("top 80%", "top 20%").unwrap(), config)
        .unwrap()
        .with_members((0..n).map(NodeId))
}

fn at(offset: f64) -> ScrollState {
    ScrollState::at(offset)
}

#[test]
fn twenty_entries_within_the_window_fire_once() {
    let mut s = grid(20);
    let mut tls = TimelineSet::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = calls.clone();
    let mut b = controller(20, BatchConfig::default())
        .on_enter(move |nodes, _| log.borrow_mut().push(nodes.to_vec()));

    assert!(b.update(&at(100.0), 0.9, &mut tls, &mut s).is_empty());
    assert!(b.update(&at(300.0), 1.0, &mut tls, &mut s).is_empty());
    assert!(b.update(&at(500.0), 1.05, &mut tls, &mut s).is_empty());
    assert_eq!(b.pending(Transition::Enter), 20);

    let fired = b.update(&at(500.0), 1.1, &mut tls, &mut s);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].transition, Transition::Enter);
    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (0..20).map(NodeId).collect::<Vec<_>>());
    assert_eq!(b.pending(Transition::Enter), 0);
}

#[test]
fn batch_max_flushes_early_in_chunks() {
    let mut s = grid(10);
    let mut tls = TimelineSet::new();
    let mut b = controller(
        10,
        BatchConfig {
            interval: 0.1,
            batch_max: Some(4),
        },
    );
    b.update(&at(0.0), 0.0, &mut tls, &mut s);
    let fired = b.update(&at(500.0), 0.01, &mut tls, &mut s);
    let sizes: Vec<usize> = fired.iter().map(|f| f.nodes.len()).collect();
    assert_eq!(sizes, vec![4, 4]);
    assert_eq!(b.pending(Transition::Enter), 2);

    let fired = b.update(&at(500.0), 0.2, &mut tls, &mut s);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].nodes, vec![NodeId(8), NodeId(9)]);
}

#[test]
fn backward_crossings_are_batched_separately() {
    let mut s = grid(3);
    let mut tls = TimelineSet::new();
    let mut b = controller(3, BatchConfig::default());
    b.update(&at(0.0), 0.0, &mut tls, &mut s);
    let fired = b.update(&at(2000.0), 1.0, &mut tls, &mut s);
    assert!(fired.is_empty());
    let fired = b.update(&at(2000.0), 1.2, &mut tls, &mut s);
    let kinds: Vec<Transition> = fired.iter().map(|f| f.transition).collect();
    assert_eq!(kinds, vec![Transition::Enter, Transition::Leave]);

    b.update(&at(0.0), 2.0, &mut tls, &mut s);
    let fired = b.update(&at(0.0), 2.5, &mut tls, &mut s);
    let kinds: Vec<Transition> = fired.iter().map(|f| f.transition).collect();
    assert_eq!(kinds, vec![Transition::EnterBack, Transition::LeaveBack]);
}

#[test]
fn reversed_crossings_within_a_window_cancel_out() {
    let mut s = grid(1);
    let mut tls = TimelineSet::new();
    let mut b = controller(1, BatchConfig::default());

    let mut fired = Vec::new();
    for (offset, now) in [(100.0, 0.0), (300.0, 0.016), (100.0, 0.033), (300.0, 0.05)] {
        fired.extend(b.update(&at(offset), now, &mut tls, &mut s));
    }
    assert_eq!(b.pending(Transition::Enter), 1);
    assert_eq!(b.pending(Transition::LeaveBack), 0);
    fired.extend(b.update(&at(300.0), 0.2, &mut tls, &mut s));
    fired.extend(b.update(&at(300.0), 0.4, &mut tls, &mut s));

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].transition, Transition::Enter);
    assert_eq!(fired[0].nodes, vec![NodeId(0)]);
}

#[test]
fn entering_and_leaving_back_before_a_flush_fires_nothing() {
    let mut s = grid(1);
    let mut tls = TimelineSet::new();
    let mut b = controller(1, BatchConfig::default());
    b.update(&at(100.0), 0.0, &mut tls, &mut s);
    b.update(&at(300.0), 0.016, &mut tls, &mut s);
    b.update(&at(100.0), 0.033, &mut tls, &mut s);
    assert_eq!(b.pending(Transition::Enter), 0);
    assert!(b.update(&at(100.0), 0.5, &mut tls, &mut s).is_empty());
}

#[test]
fn members_added_mid_region_start_silently() {
    let mut s = grid(2);
    let mut tls = TimelineSet::new();
    let mut b = controller(2, BatchConfig::default()).starting_at(500.0);
    assert!(b.update(&at(500.0), 0.0, &mut tls, &mut s).is_empty());
    assert!(b.update(&at(500.0), 1.0, &mut tls, &mut s).is_empty());
    assert_eq!(b.pending(Transition::Enter), 0);
}

#[test]
fn detached_members_are_skipped() {
    let mut s = grid(3);
    let mut tls = TimelineSet::new();
    let mut b = controller(3, BatchConfig::default());
    b.update(&at(0.0), 0.0, &mut tls, &mut s);
    b.update(&at(500.0), 1.0, &mut tls, &mut s);
    s.detach(NodeId(1));
    let fired = b.update(&at(500.0), 1.5, &mut tls, &mut s);
    assert_eq!(fired[0].nodes, vec![NodeId(0), NodeId(2)]);
}

#[test]
fn callbacks_can_play_timelines() {
    use crate::animation::ease::Ease;
    use crate::animation::timeline::Tween;
    use crate::foundation::core::Property;

    let mut s = grid(2);
    let mut tls = TimelineSet::new();
    let mut b = controller(2, BatchConfig::default()).on_enter(|nodes, ctx| {
        ctx.play(Timeline::single(
            Tween::from_to(nodes.iter().copied(), 1.0)
                .from(Property::Opacity, 0.0)
                .prop(Property::Opacity, 1.0),
            Ease::Linear,
        ));
    });
    b.update(&at(0.0), 0.0, &mut tls, &mut s);
    b.update(&at(500.0), 1.0, &mut tls, &mut s);
    b.update(&at(500.0), 1.2, &mut tls, &mut s);
    assert_eq!(tls.len(), 1);
    assert_eq!(s.number(NodeId(1), Property::Opacity), Some(0.0));
}

#[test]
fn kill_is_idempotent() {
    let mut s = grid(2);
    let mut tls = TimelineSet::new();
    let mut b = controller(2, BatchConfig::default());
    b.update(&at(0.0), 0.0, &mut tls, &mut s);
    b.update(&at(500.0), 1.0, &mut tls, &mut s);
    b.kill();
    b.kill();
    assert!(b.is_killed());
    assert!(b.update(&at(500.0), 2.0, &mut tls, &mut s).is_empty());
    b.add(NodeId(0));
    assert!(b.is_empty());
}

#[test]
fn config_is_validated() {
    let region = Region::default();
    assert!(BatchController::new(region, BatchConfig { interval: -1.0, batch_max: None }).is_err());
    let zero = BatchConfig {
        interval: 0.1,
        batch_max: Some(0),
    };
    assert!(BatchController::new(region, zero).is_err());
}
