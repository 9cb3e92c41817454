use super::*;
use crate::foundation::core::{ElementBox, NodeId};
use crate::render::surface::InMemorySurface;
use crate::scroll::coordinator::{Direction, SCROLLED_ATTRIBUTE};
use crate::trigger::region::Region;
use crate::trigger::registry::{Transition, Trigger};

const SECTION: NodeId = NodeId(7);

fn surface() -> InMemorySurface {
    InMemorySurface::new(1000.0, 5000.0).with_node(SECTION, ElementBox::new(1000.0, 100.0))
}

fn section_trigger() -> Trigger {
    Trigger::node(SECTION)
        .label("section")
        .region(Region::parse("top 80%", "top 20%").unwrap())
}

fn page_with_section(s: &mut InMemorySurface) -> (Page, ViewId) {
    let mut page = Page::new(MotionConfig::default(), 1200.0, 1000.0);
    let mut view = page.create_view();
    view.add_trigger(section_trigger(), s);
    let id = page.mount(view);
    (page, id)
}

#[test]
fn idle_frames_report_no_motion() {
    let mut s = surface();
    let (mut page, _) = page_with_section(&mut s);
    let report = page.frame(0.0, &mut s);
    assert!(!report.scrolled);
    assert_eq!(report.scroll.velocity, 0.0);
    assert!(report.events.is_empty());
    assert!(report.scroll_to.is_none());
}

#[test]
fn scroll_events_are_folded_into_the_next_frame() {
    let mut s = surface();
    let (mut page, _) = page_with_section(&mut s);
    page.frame(0.0, &mut s);

    assert!(page.on_scroll(150.0));
    assert!(!page.on_scroll(300.0));
    let report = page.frame(0.1, &mut s);
    assert!(report.scrolled);
    assert_eq!(report.scroll.offset, 300.0);
    assert_eq!(report.scroll.direction, Direction::Down);
    assert_eq!(report.events.triggers.len(), 1);
    assert_eq!(report.events.triggers[0].transition, Transition::Enter);
    assert_eq!(report.events.triggers[0].label.as_deref(), Some("section"));
    assert!(s.has_body_attribute(SCROLLED_ATTRIBUTE));

    let report = page.frame(0.2, &mut s);
    assert!(!report.scrolled);
    assert_eq!(report.scroll.offset, 300.0);
    assert_eq!(report.scroll.velocity, 0.0);
}

#[test]
fn views_created_mid_page_do_not_fire_for_the_current_position() {
    let mut s = surface();
    let mut page = Page::new(MotionConfig::default(), 1200.0, 1000.0);
    page.on_scroll(500.0);
    page.frame(0.0, &mut s);

    let mut view = page.create_view();
    view.add_trigger(section_trigger(), &mut s);
    page.mount(view);
    page.on_scroll(520.0);
    assert!(page.frame(0.1, &mut s).events.is_empty());

    page.on_scroll(900.0);
    let report = page.frame(0.2, &mut s);
    assert_eq!(report.events.triggers[0].transition, Transition::Leave);
}

#[test]
fn programmatic_scroll_reaches_its_target() {
    let mut s = surface();
    let (mut page, _) = page_with_section(&mut s);
    page.scroll_to(ScrollTo::new(400.0, 1.0).unwrap());
    assert!(page.is_scrolling_to());

    assert_eq!(page.frame(0.0, &mut s).scroll_to, Some(ScrollToStatus::Running));
    assert_eq!(page.frame(0.5, &mut s).scroll_to, Some(ScrollToStatus::Running));
    let report = page.frame(1.0, &mut s);
    assert_eq!(report.scroll_to, Some(ScrollToStatus::Done));
    assert_eq!(report.scroll.offset, 400.0);
    assert_eq!(s.scroll_offset(), 400.0);
    assert!(!page.is_scrolling_to());
    assert!(page.frame(1.1, &mut s).scroll_to.is_none());
}

#[test]
fn user_scroll_interrupts_a_programmatic_scroll() {
    let mut s = surface();
    let (mut page, _) = page_with_section(&mut s);
    page.scroll_to(ScrollTo::new(400.0, 1.0).unwrap());
    page.frame(0.0, &mut s);
    page.frame(0.5, &mut s);

    page.on_scroll(50.0);
    let report = page.frame(0.6, &mut s);
    assert_eq!(report.scroll_to, Some(ScrollToStatus::Interrupted));
    assert_eq!(report.scroll.offset, 50.0);
    assert!(!page.is_scrolling_to());
}

#[test]
fn pointer_is_smoothed_per_frame() {
    let mut s = surface();
    let mut page = Page::new(MotionConfig::default(), 1000.0, 1000.0);
    page.on_pointer_move(1000.0, 0.0);
    let first = page.frame(0.0, &mut s).pointer;
    assert!((first.position.x - 100.0).abs() < 1e-9);
    let second = page.frame(0.016, &mut s).pointer;
    assert!(second.position.x > first.position.x);
    assert!(second.position.x < 1000.0);
}

#[test]
fn unmounted_views_stop_receiving_frames() {
    let mut s = surface();
    let (mut page, id) = page_with_section(&mut s);
    assert_eq!(page.view_count(), 1);
    assert!(page.unmount(id));
    assert!(!page.unmount(id));
    assert!(page.view(id).is_none());

    page.on_scroll(300.0);
    assert!(page.frame(0.0, &mut s).events.is_empty());
}
