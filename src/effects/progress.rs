use std::f64::consts::PI;

use crate::animation::ease::Ease;
use crate::animation::timeline::{Timeline, Tween};
use crate::effects::direction::{REWIND_DOWN, REWIND_UP};
use crate::foundation::core::{NodeId, Property};
use crate::foundation::error::ScrollfxResult;
use crate::scroll::scroll_to::ScrollTo;
use crate::trigger::region::{Edge, EdgeOffset, Region};
use crate::trigger::registry::{Scrub, Trigger};

/// Class set on the ring container while scrolling up.
pub const SCROLLING_UP_CLASS: &str = "scrolling-up";

/// Progress change per update above which the ring pulses.
pub const PULSE_THRESHOLD: f64 = 0.005;

/// `top top` to `bottom bottom` on the page: the whole scrollable range.
pub fn page_region() -> Region {
    Region {
        start: Edge::new(EdgeOffset::Top, EdgeOffset::Top),
        end: Edge::new(EdgeOffset::Bottom, EdgeOffset::Bottom),
    }
}

/// Circular page-progress indicator: an SVG circle whose dash offset tracks the scroll,
/// tinted by direction, pulsing on fast scrolls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressRing {
    /// Element holding the ring; receives the pulse and the direction class.
    pub container: NodeId,
    /// The stroked circle.
    pub circle: NodeId,
    /// Circle radius in pixels.
    pub radius: f64,
}

impl ProgressRing {
    /// Ring of `radius` px drawn by `circle` inside `container`.
    pub fn new(container: NodeId, circle: NodeId, radius: f64) -> Self {
        Self {
            container,
            circle,
            radius,
        }
    }

    /// Dash length of the full ring.
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Scrubbed stroke trigger that also writes the direction tint and class.
    pub fn stroke_trigger(&self) -> Trigger {
        let Self {
            container, circle, ..
        } = *self;
        let animation = Timeline::single(
            Tween::from_to([circle], 1.0)
                .from(Property::StrokeDashoffset, self.circumference())
                .prop(Property::StrokeDashoffset, 0.0),
            Ease::Linear,
        );
        Trigger::page()
            .region(page_region())
            .label("progress-ring")
            .scrub(Scrub::Smoothed(1.0))
            .animation(animation)
            .on_update(move |ctx| {
                let up = ctx.event.direction.is_up();
                let color = if up { REWIND_UP } else { REWIND_DOWN };
                if ctx.surface.is_attached(circle) {
                    ctx.surface.set_property(circle, Property::Stroke, color.into());
                }
                if ctx.surface.is_attached(container) {
                    ctx.surface.set_class(container, SCROLLING_UP_CLASS, up);
                }
            })
    }

    /// Trigger that pulses the container when progress jumps by more than
    /// [`PULSE_THRESHOLD`] between updates.
    pub fn pulse_trigger(&self) -> Trigger {
        let container = self.container;
        let mut last = 0.0;
        Trigger::page()
            .region(page_region())
            .label("progress-pulse")
            .on_update(move |ctx| {
                let progress = ctx.event.progress;
                let jump = (progress - last).abs();
                last = progress;
                if jump > PULSE_THRESHOLD {
                    ctx.play(pulse(container));
                }
            })
    }

    /// Both triggers of the ring.
    pub fn triggers(&self) -> Vec<Trigger> {
        vec![self.stroke_trigger(), self.pulse_trigger()]
    }
}

/// Grow to 1.2 over 0.2 s, then settle elastically back to 1.
pub fn pulse(node: NodeId) -> Timeline {
    let settle = Timeline::single(
        Tween::to([node], 0.3).prop(Property::Scale, 1.0),
        Ease::OutElastic {
            amplitude: 1.0,
            period: 0.5,
        },
    );
    Timeline::single(
        Tween::to([node], 0.2).prop(Property::Scale, 1.2),
        Ease::OutCubic,
    )
    .overwrite(true)
    .then(settle)
}

/// Triggers for a [`ProgressRing`].
pub fn progress_ring(container: NodeId, circle: NodeId, radius: f64) -> Vec<Trigger> {
    ProgressRing::new(container, circle, radius).triggers()
}

/// Smooth scroll back to the top of the page (1.5 s, `power3.inOut`).
pub fn scroll_to_top() -> ScrollfxResult<ScrollTo> {
    ScrollTo::new(0.0, 1.5)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/progress.rs"]
mod tests;
