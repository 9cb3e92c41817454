use super::*;
use crate::animation::set::TimelineSet;
use crate::foundation::core::ElementBox;
use crate::render::surface::InMemorySurface;
use crate::scroll::coordinator::ScrollState;
use crate::trigger::registry::{Transition, TriggerRegistry};

const SECTION: NodeId = NodeId(10);

// Section at 1000..1200 in a 1000px viewport; children 0..3 live inside it.
fn page() -> InMemorySurface {
    let mut s =
        InMemorySurface::new(1000.0, 5000.0).with_node(SECTION, ElementBox::new(1000.0, 200.0));
    for i in 0..3 {
        s.insert_node(NodeId(i), ElementBox::new(1000.0 + i as f64 * 50.0, 50.0));
    }
    s
}

fn kids() -> Vec<NodeId> {
    (0..3).map(NodeId).collect()
}

#[test]
fn letters_play_on_enter_and_reverse_on_leave_back() {
    let mut s = page();
    let mut tls = TimelineSet::new();
    let mut reg = TriggerRegistry::new(0.0);
    let id = reg.register(letters(SECTION, kids(), 0.0), &mut tls, &mut s);

    reg.update(&ScrollState::at(300.0), 0.016, &mut tls, &mut s);
    tls.tick(0.0, &mut s);
    assert_eq!(s.number(NodeId(2), Property::RotationX), Some(-90.0));
    tls.tick(2.0, &mut s);
    for n in kids() {
        assert_eq!(s.number(n, Property::Opacity), Some(1.0));
        assert_eq!(s.number(n, Property::RotationX), Some(0.0));
    }

    reg.update(&ScrollState::at(0.0), 0.016, &mut tls, &mut s);
    let anim = reg.animation(id).unwrap();
    assert!(tls.get(anim).unwrap().is_reversed());
    tls.tick(2.0, &mut s);
    assert_eq!(s.number(NodeId(0), Property::Opacity), Some(0.0));
}

#[test]
fn card_region_starts_at_85_percent() {
    let mut s = page();
    let mut tls = TimelineSet::new();
    let mut reg = TriggerRegistry::new(0.0);
    let id = reg.register(card(SECTION, 0.0), &mut tls, &mut s);
    assert_eq!(reg.span(id).map(|sp| sp.start), Some(150.0));
}

#[test]
fn staggered_reveal_uses_the_pronounced_variant_on_the_way_back() {
    let mut s = page();
    let mut tls = TimelineSet::new();
    let mut reg = TriggerRegistry::new(0.0);
    reg.register(staggered_reveal(SECTION, kids(), 0.3), &mut tls, &mut s);

    let fired = reg.update(&ScrollState::at(300.0), 0.016, &mut tls, &mut s);
    assert_eq!(fired[0].transition, Transition::Enter);
    assert_eq!(s.number(NodeId(0), Property::Y), Some(50.0));
    tls.tick(2.0, &mut s);
    assert_eq!(s.number(NodeId(2), Property::Scale), Some(1.0));

    reg.update(&ScrollState::at(900.0), 0.016, &mut tls, &mut s);
    let fired = reg.update(&ScrollState::at(500.0), 0.016, &mut tls, &mut s);
    assert_eq!(fired[0].transition, Transition::EnterBack);
    assert_eq!(s.number(NodeId(0), Property::Opacity), Some(0.5));
    assert_eq!(s.number(NodeId(0), Property::RotationX), Some(10.0));

    // Reversed stagger: the last target finishes first.
    tls.tick(0.6, &mut s);
    assert_eq!(s.number(NodeId(2), Property::RotationX), Some(0.0));
    assert_ne!(s.number(NodeId(0), Property::RotationX), Some(0.0));
}

#[test]
fn staggered_styles_are_asymmetric() {
    let styles = staggered_styles(0.5);
    assert_eq!(styles.down.stagger.from, StaggerFrom::Start);
    assert_eq!(styles.up.stagger.from, StaggerFrom::End);
    assert!(styles.up.duration < styles.down.duration);
}

#[test]
fn wave_reveal_only_reacts_to_scrolling_back_up() {
    let mut s = page();
    let mut tls = TimelineSet::new();
    let mut reg = TriggerRegistry::new(0.0);
    reg.register(wave_reveal(SECTION, kids()), &mut tls, &mut s);
    reg.update(&ScrollState::at(300.0), 0.016, &mut tls, &mut s);
    assert!(tls.is_empty());
    assert_eq!(s.write_count(), 0);

    reg.update(&ScrollState::at(1500.0), 0.016, &mut tls, &mut s);
    reg.update(&ScrollState::at(1000.0), 0.016, &mut tls, &mut s);
    assert_eq!(s.number(NodeId(1), Property::Y), Some(-20.0));
    tls.tick(2.0, &mut s);
    assert_eq!(s.number(NodeId(1), Property::Y), Some(0.0));
    assert!(tls.is_empty());
}
