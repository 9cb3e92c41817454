use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, Timeline, Tween};
use crate::effects::glow::flip_glow_on_update;
use crate::effects::reveal::crossing_region;
use crate::foundation::core::{NodeId, Property, Rgba8};
use crate::scroll::coordinator::Direction;
use crate::scroll::directional::Directional;
use crate::trigger::region::{Edge, EdgeOffset, Region};
use crate::trigger::registry::{Scrub, Trigger};

/// Progress bar color while scrolling up.
pub const REWIND_UP: Rgba8 = Rgba8::rgb(0x3b, 0x82, 0xf6);
/// Progress bar color while scrolling down.
pub const REWIND_DOWN: Rgba8 = Rgba8::rgb(0x60, 0xa5, 0xfa);

/// Default velocity (px/s) above which [`velocity_scale`] reacts.
pub const VELOCITY_THRESHOLD: f64 = 1000.0;

/// Sharpen blurred `targets` as `trigger` crosses the viewport; coming back up they spring
/// out of a `start_blur` px blur with a slight overshoot.
pub fn unblur(targets: Vec<NodeId>, trigger: NodeId, start_blur: f64) -> Trigger {
    let back = targets.clone();
    Trigger::node(trigger)
        .region(crossing_region())
        .scrub(Scrub::Smoothed(1.0))
        .on_enter(move |ctx| {
            let tween = Tween::to(targets.iter().copied(), 0.6)
                .prop(Property::Blur, 0.0)
                .prop(Property::Scale, 1.0);
            ctx.play(Timeline::single(tween, Ease::OutCubic).overwrite(true));
        })
        .on_enter_back(move |ctx| {
            let tween = Tween::from_to(back.iter().copied(), 0.8)
                .from(Property::Blur, start_blur)
                .from(Property::Scale, 0.95)
                .prop(Property::Blur, 0.0)
                .prop(Property::Scale, 1.02);
            ctx.play(
                Timeline::single(tween, Ease::OutBack { overshoot: 1.7 }).overwrite(true),
            );
        })
}

/// One trigger per card: cards rise in one after another going down, and flip back from
/// -15° with a bell-shaped `glow` when scrolling up.
pub fn flip_back(cards: Vec<NodeId>, trigger: NodeId, glow: Rgba8) -> Vec<Trigger> {
    cards
        .into_iter()
        .enumerate()
        .map(|(i, card)| {
            let i = i as f64;
            Trigger::node(trigger)
                .region(crossing_region())
                .on_enter(move |ctx| {
                    let tween = Tween::from_to([card], 0.6)
                        .from(Property::Opacity, 0.0)
                        .from(Property::Y, 30.0)
                        .from(Property::RotationY, 0.0)
                        .prop(Property::Opacity, 1.0)
                        .prop(Property::Y, 0.0)
                        .prop(Property::RotationY, 0.0)
                        .delay(i * 0.1);
                    ctx.play(Timeline::single(tween, Ease::OutCubic).overwrite(true));
                })
                .on_enter_back(move |ctx| {
                    // Placed with `At` so the glow follows the flip itself, not the delay.
                    let tween = Tween::from_to([card], 0.7)
                        .from(Property::RotationY, -15.0)
                        .from(Property::Perspective, 1000.0)
                        .prop(Property::RotationY, 0.0)
                        .prop(Property::Perspective, 1000.0)
                        .on_update(flip_glow_on_update(glow));
                    let tl = Timeline::new(Ease::OutBack { overshoot: 1.7 })
                        .with(tween, Position::At(i * 0.08))
                        .overwrite(true);
                    ctx.play(tl);
                })
        })
        .collect()
}

/// Fade `target`'s background to the color of the direction it was entered from.
pub fn background_shift(target: NodeId, trigger: NodeId, colors: Directional<Rgba8>) -> Trigger {
    let shift = move |color: Rgba8| {
        Timeline::single(
            Tween::to([target], 0.8).prop(Property::BackgroundColor, color),
            Ease::InOutCubic,
        )
        .overwrite(true)
    };
    Trigger::node(trigger)
        .region(Region {
            start: Edge::new(EdgeOffset::Top, EdgeOffset::Percent(50.0)),
            end: Edge::new(EdgeOffset::Bottom, EdgeOffset::Percent(50.0)),
        })
        .on_enter(move |ctx| {
            ctx.play(shift(colors.down));
        })
        .on_enter_back(move |ctx| {
            ctx.play(shift(colors.up));
        })
}

/// Scrubbed parallax that switches to a faster `speeds.up` (yPercent) when the reader
/// reverses direction.
pub fn smart_parallax(target: NodeId, trigger: NodeId, speeds: Directional<f64>) -> Trigger {
    let mut last = Direction::Down;
    let animation = Timeline::single(
        Tween::to([target], 1.0).prop(Property::YPercent, speeds.down),
        Ease::Linear,
    );
    Trigger::node(trigger)
        .scrub(Scrub::Smoothed(1.0))
        .animation(animation)
        .on_update(move |ctx| {
            let direction = match ctx.event.direction {
                Direction::None => Direction::Down,
                d => d,
            };
            if direction == last {
                return;
            }
            last = direction;
            let speed = *speeds.select(direction);
            let tween =
                Tween::to([target], 0.3).prop(Property::YPercent, speed * ctx.event.progress);
            ctx.play(Timeline::single(tween, Ease::OutCubic));
        })
}

/// Which scale a progress bar grows along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// `scaleX`.
    #[default]
    Horizontal,
    /// `scaleY`.
    Vertical,
}

impl Axis {
    fn property(self) -> Property {
        match self {
            Self::Horizontal => Property::ScaleX,
            Self::Vertical => Property::ScaleY,
        }
    }
}

/// Progress bar scrubbed over `trigger`, tinted by scroll direction.
pub fn rewind_progress(bar: NodeId, trigger: NodeId, axis: Axis) -> Trigger {
    let animation = Timeline::single(
        Tween::from_to([bar], 1.0)
            .from(axis.property(), 0.0)
            .prop(axis.property(), 1.0),
        Ease::Linear,
    );
    Trigger::node(trigger)
        .scrub(Scrub::Smoothed(1.0))
        .animation(animation)
        .on_update(move |ctx| {
            let color = if ctx.event.direction.is_up() {
                REWIND_UP
            } else {
                REWIND_DOWN
            };
            if ctx.surface.is_attached(bar) {
                ctx.surface
                    .set_property(bar, Property::BackgroundColor, color.into());
            }
        })
}

/// Brief scale pulse for fast scrolling: up to 5% larger over 0.3 s, then an elastic settle.
///
/// `velocity` and `threshold` are in px/s; returns `None` at or below the threshold.
pub fn velocity_scale(node: NodeId, velocity: f64, threshold: f64) -> Option<Timeline> {
    if velocity.is_nan() || velocity <= threshold {
        return None;
    }
    let scale = 1.0 + (velocity / 10_000.0).min(0.05);
    let settle = Timeline::single(
        Tween::to([node], 0.5).prop(Property::Scale, 1.0),
        Ease::OutElastic {
            amplitude: 1.0,
            period: 0.5,
        },
    );
    Some(
        Timeline::single(
            Tween::to([node], 0.3).prop(Property::Scale, scale),
            Ease::OutCubic,
        )
        .then(settle),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/effects/direction.rs"]
mod tests;
