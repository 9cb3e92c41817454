use std::collections::BTreeSet;

use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::value::Lerp;
use crate::foundation::core::{NodeId, Property, PropertyValue};
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::render::surface::Surface;

/// Per-frame tween hook: `(linear progress, targets, surface)`.
pub type UpdateFn = Box<dyn FnMut(f64, &[NodeId], &mut dyn Surface)>;

/// One-shot completion hook.
pub type CompleteFn = Box<dyn FnOnce()>;

/// Property interpolation over one or more targets.
pub struct Tween {
    targets: Vec<NodeId>,
    to: Vec<(Property, PropertyValue)>,
    from: Vec<(Property, PropertyValue)>,
    duration: f64,
    delay: f64,
    ease: Option<Ease>,
    stagger: Option<Stagger>,
    immediate_render: bool,
    on_update: Option<UpdateFn>,
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("targets", &self.targets)
            .field("to", &self.to)
            .field("from", &self.from)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("ease", &self.ease)
            .field("stagger", &self.stagger)
            .finish_non_exhaustive()
    }
}

impl Tween {
    /// Animate `targets` from their current values to the properties given with
    /// [`Tween::prop`].
    pub fn to(targets: impl IntoIterator<Item = NodeId>, duration: f64) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            to: Vec::new(),
            from: Vec::new(),
            duration,
            delay: 0.0,
            ease: None,
            stagger: None,
            immediate_render: false,
            on_update: None,
        }
    }

    /// Like [`Tween::to`], but the start values given with [`Tween::from`] are rendered as soon
    /// as the timeline starts, before any delay elapses.
    pub fn from_to(targets: impl IntoIterator<Item = NodeId>, duration: f64) -> Self {
        Self {
            immediate_render: true,
            ..Self::to(targets, duration)
        }
    }

    /// Target value of `prop`.
    pub fn prop(mut self, prop: Property, value: impl Into<PropertyValue>) -> Self {
        upsert(&mut self.to, prop, value.into());
        self
    }

    /// Start value of `prop`. Without a matching [`Tween::prop`] the tween animates back to the
    /// value the node had when the tween first rendered.
    pub fn from(mut self, prop: Property, value: impl Into<PropertyValue>) -> Self {
        upsert(&mut self.from, prop, value.into());
        self
    }

    /// Override the timeline's default ease for this tween.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Delay before the first target starts, in seconds.
    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = secs;
        self
    }

    /// Spread target start times.
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    /// Force (or suppress) rendering the start values when the timeline starts.
    pub fn immediate_render(mut self, on: bool) -> Self {
        self.immediate_render = on;
        self
    }

    /// Hook called whenever the tween's linear progress changes.
    pub fn on_update(mut self, f: impl FnMut(f64, &[NodeId], &mut dyn Surface) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Targets of this tween.
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Reject non-finite or negative timings.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollfxError::validation(
                "tween duration must be finite and >= 0",
            ));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(ScrollfxError::validation("tween delay must be finite and >= 0"));
        }
        if let Some(stagger) = &self.stagger {
            stagger.validate()?;
        }
        Ok(())
    }

    fn start_delays(&self) -> Vec<f64> {
        let stagger = self
            .stagger
            .map(|s| s.delays(self.targets.len()))
            .unwrap_or_else(|| vec![0.0; self.targets.len()]);
        stagger.into_iter().map(|d| d + self.delay).collect()
    }

    fn resolve(&self, node: NodeId, surface: &dyn Surface) -> Vec<ResolvedProp> {
        let current = |prop: Property| {
            surface
                .get_property(node, prop)
                .unwrap_or_else(|| prop.default_value())
        };
        let mut props: Vec<Property> = self.to.iter().map(|(p, _)| *p).collect();
        for (p, _) in &self.from {
            if !props.contains(p) {
                props.push(*p);
            }
        }
        props
            .into_iter()
            .map(|prop| ResolvedProp {
                prop,
                start: lookup(&self.from, prop).unwrap_or_else(|| current(prop)),
                end: lookup(&self.to, prop).unwrap_or_else(|| current(prop)),
            })
            .collect()
    }
}

fn upsert(list: &mut Vec<(Property, PropertyValue)>, prop: Property, value: PropertyValue) {
    match list.iter_mut().find(|(p, _)| *p == prop) {
        Some(slot) => slot.1 = value,
        None => list.push((prop, value)),
    }
}

fn lookup(list: &[(Property, PropertyValue)], prop: Property) -> Option<PropertyValue> {
    list.iter().find(|(p, _)| *p == prop).map(|(_, v)| v.clone())
}

#[derive(Clone, Debug)]
struct ResolvedProp {
    prop: Property,
    start: PropertyValue,
    end: PropertyValue,
}

/// Where an entry is placed relative to the entries already in the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Position {
    /// Right after the previous entry ends.
    #[default]
    Sequence,
    /// Relative to the previous entry's end; negative values overlap it.
    Offset(f64),
    /// Relative to the previous entry's start.
    WithPrevious(f64),
    /// Absolute time in the timeline.
    At(f64),
}

#[derive(Debug)]
struct Entry {
    tween: Tween,
    start: f64,
    delays: Vec<f64>,
    resolved: Vec<Option<Vec<ResolvedProp>>>,
    last: Vec<Option<f64>>,
    last_update: Option<f64>,
}

impl Entry {
    fn end(&self) -> f64 {
        self.start + self.span()
    }

    fn span(&self) -> f64 {
        self.delays.iter().copied().fold(0.0, f64::max) + self.tween.duration
    }
}

/// Playback state of a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Advancing with time.
    Running,
    /// Frozen at the current playhead.
    Paused,
    /// Reached the end playing forward.
    Completed,
    /// Reached the start playing backward.
    Rewound,
    /// Torn down; never writes again.
    Killed,
}

/// Result of one [`Timeline::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do (paused, killed or already settled).
    Idle,
    /// Still playing.
    Running,
    /// Finished playing forward during this tick.
    Completed,
    /// Finished playing backward during this tick.
    Rewound,
}

/// Ordered sequence of tweens sharing a single playhead.
pub struct Timeline {
    default_ease: Ease,
    entries: Vec<Entry>,
    total_time: f64,
    reversed: bool,
    state: PlayState,
    repeat: i32,
    yoyo: bool,
    overwrite: bool,
    rendered: bool,
    on_complete: Option<CompleteFn>,
    on_reverse_complete: Option<CompleteFn>,
    follow_up: Option<Box<Timeline>>,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("default_ease", &self.default_ease)
            .field("entries", &self.entries.len())
            .field("total_time", &self.total_time)
            .field("reversed", &self.reversed)
            .field("state", &self.state)
            .field("repeat", &self.repeat)
            .field("yoyo", &self.yoyo)
            .finish_non_exhaustive()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(Ease::DEFAULT)
    }
}

impl Timeline {
    /// Empty, running timeline whose tweens default to `default_ease`.
    pub fn new(default_ease: Ease) -> Self {
        Self {
            default_ease,
            entries: Vec::new(),
            total_time: 0.0,
            reversed: false,
            state: PlayState::Running,
            repeat: 0,
            yoyo: false,
            overwrite: false,
            rendered: false,
            on_complete: None,
            on_reverse_complete: None,
            follow_up: None,
        }
    }

    /// Single-tween timeline.
    pub fn single(tween: Tween, default_ease: Ease) -> Self {
        Self::new(default_ease).with(tween, Position::Sequence)
    }

    /// Append `tween` at `position`.
    pub fn add(&mut self, tween: Tween, position: Position) -> &mut Self {
        let (prev_start, prev_end) = self
            .entries
            .last()
            .map(|e| (e.start, e.end()))
            .unwrap_or((0.0, 0.0));
        let start = match position {
            Position::Sequence => prev_end,
            Position::Offset(o) => prev_end + o,
            Position::WithPrevious(o) => prev_start + o,
            Position::At(t) => t,
        }
        .max(0.0);

        let delays = tween.start_delays();
        let n = tween.targets.len();
        self.entries.push(Entry {
            tween,
            start,
            delays,
            resolved: vec![None; n],
            last: vec![None; n],
            last_update: None,
        });
        self
    }

    /// Builder-style [`Timeline::add`].
    pub fn with(mut self, tween: Tween, position: Position) -> Self {
        self.add(tween, position);
        self
    }

    /// Start paused (for scrubbed or toggle-driven animations).
    pub fn paused(mut self) -> Self {
        self.state = PlayState::Paused;
        self
    }

    /// Repeat count; `-1` repeats forever.
    pub fn repeat(mut self, times: i32) -> Self {
        self.repeat = times.max(-1);
        self
    }

    /// Alternate direction on every repeat.
    pub fn yoyo(mut self, on: bool) -> Self {
        self.yoyo = on;
        self
    }

    /// Kill other running tweens on the same node/property when this one is played.
    pub fn overwrite(mut self, on: bool) -> Self {
        self.overwrite = on;
        self
    }

    /// Called once when the timeline finishes playing forward.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Called once when the timeline finishes playing backward.
    pub fn on_reverse_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_reverse_complete = Some(Box::new(f));
        self
    }

    /// Timeline started by the owning set once this one completes.
    pub fn then(mut self, next: Timeline) -> Self {
        self.follow_up = Some(Box::new(next));
        self
    }

    /// Validate every entry.
    pub fn validate(&self) -> ScrollfxResult<()> {
        self.entries.iter().try_for_each(|e| e.tween.validate())
    }

    /// Length of one iteration in seconds.
    pub fn duration(&self) -> f64 {
        self.entries.iter().map(Entry::end).fold(0.0, f64::max)
    }

    /// Length including repeats; infinite when repeating forever.
    pub fn total_duration(&self) -> f64 {
        if self.repeat < 0 {
            f64::INFINITY
        } else {
            self.duration() * f64::from(self.repeat + 1)
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether the playhead moves on [`Timeline::advance`].
    pub fn is_active(&self) -> bool {
        self.state == PlayState::Running
    }

    /// Whether the timeline reached either end or was killed.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            PlayState::Completed | PlayState::Rewound | PlayState::Killed
        )
    }

    /// Whether [`Timeline::kill`] was called.
    pub fn is_killed(&self) -> bool {
        self.state == PlayState::Killed
    }

    /// Whether the timeline is currently playing backward.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Playhead as a fraction of the first iteration, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if self.total_time > 0.0 || self.state == PlayState::Completed {
                1.0
            } else {
                0.0
            };
        }
        (self.total_time / d).clamp(0.0, 1.0)
    }

    /// Every `(node, property)` pair this timeline writes.
    pub fn touched(&self) -> BTreeSet<(NodeId, Property)> {
        let mut out = BTreeSet::new();
        for e in &self.entries {
            for &node in &e.tween.targets {
                for (p, _) in e.tween.to.iter().chain(e.tween.from.iter()) {
                    out.insert((node, *p));
                }
            }
        }
        out
    }

    pub(crate) fn wants_overwrite(&self) -> bool {
        self.overwrite
    }

    pub(crate) fn take_follow_up(&mut self) -> Option<Timeline> {
        self.follow_up.take().map(|b| *b)
    }

    /// Move the playhead by `dt` seconds in the current direction and render.
    pub fn advance(&mut self, dt: f64, surface: &mut dyn Surface) -> TickOutcome {
        if self.state != PlayState::Running {
            return TickOutcome::Idle;
        }
        let total = self.total_duration();
        let step = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let next = if self.reversed {
            (self.total_time - step).max(0.0)
        } else {
            (self.total_time + step).min(total)
        };
        self.total_time = next;
        self.render(surface);

        if !self.reversed && total.is_finite() && next >= total {
            self.state = PlayState::Completed;
            if let Some(f) = self.on_complete.take() {
                f();
            }
            return TickOutcome::Completed;
        }
        if self.reversed && next <= 0.0 {
            self.state = PlayState::Rewound;
            if let Some(f) = self.on_reverse_complete.take() {
                f();
            }
            return TickOutcome::Rewound;
        }
        TickOutcome::Running
    }

    /// Jump to `progress` (fraction of one iteration) without firing completion hooks.
    pub fn seek_progress(&mut self, progress: f64, surface: &mut dyn Surface) {
        if self.state == PlayState::Killed {
            return;
        }
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.total_time = p * self.duration();
        self.render(surface);
    }

    /// Play forward from the current playhead.
    pub fn play(&mut self) {
        if self.state == PlayState::Killed {
            return;
        }
        self.reversed = false;
        if self.total_time < self.total_duration() {
            self.state = PlayState::Running;
        }
    }

    /// Freeze the playhead.
    pub fn pause(&mut self) {
        if self.state == PlayState::Running {
            self.state = PlayState::Paused;
        }
    }

    /// Continue in the current direction.
    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Running;
        }
    }

    /// Play backward from the current playhead.
    pub fn reverse(&mut self) {
        if self.state == PlayState::Killed {
            return;
        }
        self.reversed = true;
        if self.total_time > 0.0 {
            self.state = PlayState::Running;
        }
    }

    /// Jump to the start and play forward.
    pub fn restart(&mut self, surface: &mut dyn Surface) {
        if self.state == PlayState::Killed {
            return;
        }
        self.total_time = 0.0;
        self.reversed = false;
        self.state = PlayState::Running;
        self.render(surface);
    }

    /// Jump to the start and pause there.
    pub fn reset(&mut self, surface: &mut dyn Surface) {
        if self.state == PlayState::Killed {
            return;
        }
        self.total_time = 0.0;
        self.reversed = false;
        self.state = PlayState::Paused;
        self.render(surface);
    }

    /// Jump to the end of the current run and fire the completion hook.
    pub fn complete(&mut self, surface: &mut dyn Surface) {
        if self.state == PlayState::Killed {
            return;
        }
        let total = self.total_duration();
        self.total_time = if total.is_finite() {
            total
        } else {
            self.duration()
        };
        self.reversed = false;
        self.render(surface);
        self.state = PlayState::Completed;
        if let Some(f) = self.on_complete.take() {
            f();
        }
    }

    /// Halt all interpolation and drop every pending callback. Idempotent.
    pub fn kill(&mut self) {
        if self.state == PlayState::Killed {
            return;
        }
        self.state = PlayState::Killed;
        self.on_complete = None;
        self.on_reverse_complete = None;
        self.follow_up = None;
        for e in &mut self.entries {
            e.tween.on_update = None;
        }
    }

    /// Playhead inside the current iteration, with yoyo folding applied.
    fn local_time(&self) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return 0.0;
        }
        let t = self.total_time;
        let mut iteration = (t / d).floor();
        let mut local = t - iteration * d;
        // The exact end of a run belongs to the last iteration, not the start of the next.
        if local <= f64::EPSILON && t > 0.0 {
            iteration -= 1.0;
            local = d;
        }
        if self.yoyo && (iteration as i64) % 2 == 1 {
            d - local
        } else {
            local
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let local = self.local_time();
        let default_ease = self.default_ease;
        let first = !self.rendered;
        self.rendered = true;

        for entry in &mut self.entries {
            let ease = entry.tween.ease.unwrap_or(default_ease);
            let duration = entry.tween.duration;

            for (i, &node) in entry.tween.targets.iter().enumerate() {
                let t = local - entry.start - entry.delays[i];
                let p = if duration <= 0.0 {
                    if t >= 0.0 { 1.0 } else { 0.0 }
                } else {
                    (t / duration).clamp(0.0, 1.0)
                };

                if entry.last[i] == Some(p) {
                    continue;
                }
                let immediate =
                    first && entry.tween.immediate_render && !entry.tween.from.is_empty();
                if p <= 0.0 && entry.last[i].is_none() && !immediate {
                    continue;
                }
                if !surface.is_attached(node) {
                    continue;
                }

                let resolved = entry.resolved[i]
                    .get_or_insert_with(|| entry.tween.resolve(node, &*surface));
                let eased = ease.apply(p);
                for rp in resolved.iter() {
                    let value = if p >= 1.0 {
                        rp.end.clone()
                    } else {
                        PropertyValue::lerp(&rp.start, &rp.end, eased)
                    };
                    surface.set_property(node, rp.prop, value);
                }
                entry.last[i] = Some(p);
            }

            if entry.tween.on_update.is_some() {
                let span = entry.span();
                let overall = if span <= 0.0 {
                    if local >= entry.start { 1.0 } else { 0.0 }
                } else {
                    ((local - entry.start) / span).clamp(0.0, 1.0)
                };
                let changed = entry.last_update != Some(overall);
                if changed && (overall > 0.0 || entry.last_update.is_some()) {
                    entry.last_update = Some(overall);
                    if let Some(f) = entry.tween.on_update.as_mut() {
                        f(overall, &entry.tween.targets, surface);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
