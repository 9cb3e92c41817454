use crate::animation::ease::Ease;
use crate::animation::timeline::{Timeline, Tween};
use crate::foundation::core::{NodeId, Property};

/// Endless sine bob of `node` between its rest position and `y` px, `duration` seconds per
/// leg, starting after `delay` seconds.
pub fn floating(node: NodeId, y: f64, duration: f64, delay: f64) -> Timeline {
    let bob = Timeline::single(
        Tween::to([node], duration).prop(Property::Y, y),
        Ease::InOutSine,
    )
    .repeat(-1)
    .yoyo(true);
    if delay > 0.0 {
        // The wait must not be part of the repeating loop.
        Timeline::single(Tween::to(std::iter::empty::<NodeId>(), delay), Ease::Linear).then(bob)
    } else {
        bob
    }
}
