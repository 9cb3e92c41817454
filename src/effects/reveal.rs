use crate::animation::ease::Ease;
use crate::animation::stagger::{Stagger, StaggerFrom};
use crate::animation::timeline::{Timeline, Tween};
use crate::foundation::core::{NodeId, Property};
use crate::scroll::directional::Directional;
use crate::trigger::region::{Edge, EdgeOffset, Region};
use crate::trigger::registry::{ToggleActions, Trigger};

/// `top 80%` to `bottom top`: the usual "comes into view" region.
pub fn entering_region() -> Region {
    Region {
        start: Edge::new(EdgeOffset::Top, EdgeOffset::Percent(80.0)),
        ..Region::default()
    }
}

/// `top 80%` to `top 20%`: active while the element crosses the middle of the viewport.
pub fn crossing_region() -> Region {
    Region {
        start: Edge::new(EdgeOffset::Top, EdgeOffset::Percent(80.0)),
        end: Edge::new(EdgeOffset::Top, EdgeOffset::Percent(20.0)),
    }
}

/// A from-to reveal over a group of targets.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealStyle {
    /// Hidden state.
    pub from: Vec<(Property, f64)>,
    /// Revealed state.
    pub to: Vec<(Property, f64)>,
    /// Per-target duration in seconds.
    pub duration: f64,
    /// Spread across targets.
    pub stagger: Stagger,
    /// Tween ease.
    pub ease: Ease,
}

impl RevealStyle {
    /// Tween applying this style to `targets`.
    pub fn tween(&self, targets: &[NodeId]) -> Tween {
        let mut tween = Tween::from_to(targets.iter().copied(), self.duration)
            .stagger(self.stagger)
            .ease(self.ease);
        for &(p, v) in &self.from {
            tween = tween.from(p, v);
        }
        for &(p, v) in &self.to {
            tween = tween.prop(p, v);
        }
        tween
    }

    /// Single-tween timeline applying this style to `targets`.
    pub fn timeline(&self, targets: &[NodeId]) -> Timeline {
        Timeline::single(self.tween(targets), self.ease)
    }
}

fn toggled(container: NodeId, region: Region, animation: Timeline) -> Trigger {
    Trigger::node(container)
        .region(region)
        .toggle_actions(ToggleActions::PLAY_REVERSE)
        .animation(animation)
}

/// Letters flip up into place one after another as `container` comes into view.
pub fn letters(container: NodeId, letters: Vec<NodeId>, delay: f64) -> Trigger {
    let tween = Tween::from_to(letters, 0.8)
        .from(Property::Opacity, 0.0)
        .from(Property::Y, 20.0)
        .from(Property::RotationX, -90.0)
        .prop(Property::Opacity, 1.0)
        .prop(Property::Y, 0.0)
        .prop(Property::RotationX, 0.0)
        .stagger(Stagger::each(0.03))
        .delay(delay);
    toggled(
        container,
        entering_region(),
        Timeline::single(tween, Ease::OutQuart),
    )
}

/// Words rise into place one after another as `container` comes into view.
pub fn words(container: NodeId, words: Vec<NodeId>, delay: f64) -> Trigger {
    let tween = Tween::from_to(words, 0.6)
        .from(Property::Opacity, 0.0)
        .from(Property::Y, 30.0)
        .prop(Property::Opacity, 1.0)
        .prop(Property::Y, 0.0)
        .stagger(Stagger::each(0.1))
        .delay(delay);
    toggled(
        container,
        entering_region(),
        Timeline::single(tween, Ease::OutQuart),
    )
}

/// A card scales and rises into place once it is 85% down the viewport.
pub fn card(card: NodeId, delay: f64) -> Trigger {
    let tween = Tween::from_to([card], 0.8)
        .from(Property::Opacity, 0.0)
        .from(Property::Scale, 0.9)
        .from(Property::Y, 50.0)
        .prop(Property::Opacity, 1.0)
        .prop(Property::Scale, 1.0)
        .prop(Property::Y, 0.0)
        .delay(delay);
    let region = Region {
        start: Edge::new(EdgeOffset::Top, EdgeOffset::Percent(85.0)),
        ..Region::default()
    };
    toggled(card, region, Timeline::single(tween, Ease::OutQuart))
}

/// Forward and backward variants of [`staggered_reveal`] for a stagger window of `amount`
/// seconds.
pub fn staggered_styles(amount: f64) -> Directional<RevealStyle> {
    Directional::new(
        RevealStyle {
            from: vec![
                (Property::Opacity, 0.0),
                (Property::Y, 50.0),
                (Property::Scale, 0.9),
            ],
            to: vec![
                (Property::Opacity, 1.0),
                (Property::Y, 0.0),
                (Property::Scale, 1.0),
            ],
            duration: 0.8,
            stagger: Stagger::total(amount)
                .from(StaggerFrom::Start)
                .ease(Ease::OutCubic),
            ease: Ease::OutBack { overshoot: 1.7 },
        },
        RevealStyle {
            from: vec![
                (Property::Opacity, 0.5),
                (Property::Scale, 0.95),
                (Property::RotationX, 10.0),
            ],
            to: vec![
                (Property::Opacity, 1.0),
                (Property::Scale, 1.0),
                (Property::RotationX, 0.0),
            ],
            duration: 0.6,
            stagger: Stagger::total(amount * 0.8)
                .from(StaggerFrom::End)
                .ease(Ease::OutCubic),
            ease: Ease::OutBack { overshoot: 2.0 },
        },
    )
}

/// Reveal `targets` first-to-last on the way down, and re-reveal them last-to-first with a
/// tilt when scrolling back up into `trigger`.
pub fn staggered_reveal(trigger: NodeId, targets: Vec<NodeId>, amount: f64) -> Trigger {
    let styles = staggered_styles(amount);
    let forward = styles.down.clone();
    let back = styles.up;
    let back_targets = targets.clone();
    Trigger::node(trigger)
        .region(crossing_region())
        .on_enter(move |ctx| {
            ctx.play(forward.timeline(&targets).overwrite(true));
        })
        .on_enter_back(move |ctx| {
            ctx.play(back.timeline(&back_targets).overwrite(true));
        })
}

/// Targets drop back in along a sine-wave stagger when scrolling up into `trigger`.
pub fn wave_reveal(trigger: NodeId, targets: Vec<NodeId>) -> Trigger {
    Trigger::node(trigger)
        .region(entering_region())
        .on_enter_back(move |ctx| {
            let tween = Tween::from_to(targets.iter().copied(), 0.8)
                .from(Property::Y, -20.0)
                .from(Property::Opacity, 0.0)
                .prop(Property::Y, 0.0)
                .prop(Property::Opacity, 1.0)
                .stagger(Stagger::wave(0.5, 0.2));
            ctx.play(Timeline::single(tween, Ease::OutQuart).overwrite(true));
        })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reveal.rs"]
mod tests;
