use super::*;
use crate::render::surface::InMemorySurface;

#[test]
fn parses_keywords_percentages_and_pixels() {
    let e = Edge::parse("top 80%").unwrap();
    assert_eq!(e.element, EdgeOffset::Top);
    assert_eq!(e.viewport, EdgeOffset::Percent(80.0));

    let e = Edge::parse("  center   120px ").unwrap();
    assert_eq!(e, Edge::new(EdgeOffset::Center, EdgeOffset::Px(120.0)));
    assert_eq!(Edge::parse("50% -20").unwrap().viewport, EdgeOffset::Px(-20.0));
}

#[test]
fn rejects_malformed_edges() {
    for bad in ["", "top", "top 80% extra", "middle top", "top abc%", "top NaN"] {
        assert!(
            matches!(Edge::parse(bad), Err(ScrollfxError::Trigger(_))),
            "{bad:?} should fail"
        );
    }
}

#[test]
fn edges_round_trip_through_strings() {
    let e: Edge = serde_json::from_str("\"bottom 25%\"").unwrap();
    assert_eq!(serde_json::to_string(&e).unwrap(), "\"bottom 25%\"");
}

#[test]
fn span_resolves_against_element_and_viewport() {
    let region = Region::parse("top 80%", "top 20%").unwrap();
    let span = region.span(ElementBox::new(1000.0, 200.0), 1000.0);
    assert_eq!(span, ScrollSpan { start: 200.0, end: 800.0 });
}

#[test]
fn end_is_clamped_to_start() {
    let region = Region::parse("top top", "top bottom").unwrap();
    let span = region.span(ElementBox::new(2000.0, 100.0), 800.0);
    assert_eq!(span.start, 2000.0);
    assert_eq!(span.end, 2000.0);
    assert!(span.is_empty());
    assert_eq!(span.phase(2000.0), Phase::After);
    assert_eq!(span.phase(1999.0), Phase::Before);
}

#[test]
fn phase_is_half_open() {
    let span = ScrollSpan { start: 100.0, end: 200.0 };
    assert_eq!(span.phase(99.9), Phase::Before);
    assert_eq!(span.phase(100.0), Phase::Inside);
    assert_eq!(span.phase(199.9), Phase::Inside);
    assert_eq!(span.phase(200.0), Phase::After);
    assert_eq!(span.progress(150.0), 0.5);
    assert_eq!(span.progress(-50.0), 0.0);
    assert_eq!(span.progress(500.0), 1.0);
}

#[test]
fn default_region_covers_visibility() {
    let span = Region::default().span(ElementBox::new(1000.0, 200.0), 800.0);
    assert_eq!(span, ScrollSpan { start: 200.0, end: 1200.0 });
}

#[test]
fn page_anchor_uses_document_box() {
    let s = InMemorySurface::new(800.0, 4000.0);
    let region = Region::parse("top top", "bottom bottom").unwrap();
    let span = resolve(Anchor::Page, &region, &s).unwrap();
    assert_eq!(span, ScrollSpan { start: 0.0, end: 3200.0 });
    assert_eq!(resolve(Anchor::Node(NodeId(9)), &region, &s), None);
}
