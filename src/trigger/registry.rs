use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::animation::set::{Control, TimelineId, TimelineSet};
use crate::animation::timeline::Timeline;
use crate::foundation::core::NodeId;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::render::surface::Surface;
use crate::scroll::coordinator::{Direction, ScrollState};
use crate::trigger::region::{Anchor, Phase, Region, ScrollSpan};

new_key_type! {
    /// Handle to a registered trigger.
    pub struct TriggerId;
}

/// Boundary crossing of a trigger region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Crossed the start scrolling down.
    Enter,
    /// Crossed the end scrolling down.
    Leave,
    /// Crossed the end scrolling up.
    EnterBack,
    /// Crossed the start scrolling up.
    LeaveBack,
}

impl Transition {
    /// All transitions, in callback slot order.
    pub const ALL: [Self; 4] = [Self::Enter, Self::Leave, Self::EnterBack, Self::LeaveBack];

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Enter => 0,
            Self::Leave => 1,
            Self::EnterBack => 2,
            Self::LeaveBack => 3,
        }
    }

    /// Whether this transition makes the region active.
    pub fn is_enter(self) -> bool {
        matches!(self, Self::Enter | Self::EnterBack)
    }
}

/// Transitions emitted moving from phase `from` to phase `to`.
///
/// Skipping over the whole region in one frame emits both crossings, so enter-class and
/// leave-class events always alternate.
pub fn transitions(from: Phase, to: Phase) -> &'static [Transition] {
    use Phase::*;
    use Transition::*;
    match (from, to) {
        (Before, Inside) => &[Enter],
        (Before, After) => &[Enter, Leave],
        (Inside, After) => &[Leave],
        (Inside, Before) => &[LeaveBack],
        (After, Inside) => &[EnterBack],
        (After, Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

/// Playback commands applied to an attached animation on each transition, in the order
/// enter, leave, enter-back, leave-back (`"play none none reverse"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions(pub [Control; 4]);

impl Default for ToggleActions {
    fn default() -> Self {
        Self([Control::Play, Control::None, Control::None, Control::None])
    }
}

impl ToggleActions {
    /// Play forward on enter, reverse on leave-back.
    pub const PLAY_REVERSE: Self = Self([
        Control::Play,
        Control::None,
        Control::None,
        Control::Reverse,
    ]);

    /// Command for `transition`.
    pub fn action(self, transition: Transition) -> Control {
        self.0[transition.slot()]
    }

    /// Parse four space-separated commands.
    pub fn parse(s: &str) -> ScrollfxResult<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.len() != 4 {
            return Err(ScrollfxError::trigger(format!(
                "toggle actions '{s}' must name exactly four commands"
            )));
        }
        let mut out = [Control::None; 4];
        for (slot, word) in out.iter_mut().zip(words) {
            *slot = match word {
                "play" => Control::Play,
                "pause" => Control::Pause,
                "resume" => Control::Resume,
                "reverse" => Control::Reverse,
                "restart" => Control::Restart,
                "reset" => Control::Reset,
                "complete" => Control::Complete,
                "none" => Control::None,
                other => {
                    return Err(ScrollfxError::trigger(format!(
                        "unknown toggle action '{other}' in '{s}'"
                    )));
                }
            };
        }
        Ok(Self(out))
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .0
            .iter()
            .map(|c| match c {
                Control::Play => "play",
                Control::Pause => "pause",
                Control::Resume => "resume",
                Control::Reverse => "reverse",
                Control::Restart => "restart",
                Control::Reset => "reset",
                Control::Complete => "complete",
                Control::None => "none",
            })
            .collect();
        f.write_str(&names.join(" "))
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = ScrollfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ToggleActions> for String {
    fn from(value: ToggleActions) -> Self {
        value.to_string()
    }
}

/// How scroll progress drives an attached animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scrub {
    /// Progress follows the scroll offset exactly.
    Locked,
    /// Progress catches up with the scroll offset over roughly this many seconds.
    Smoothed(f64),
}

/// What a trigger callback sees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TriggerEvent {
    /// Trigger that fired.
    pub trigger: TriggerId,
    /// Crossing, or `None` for progress updates.
    pub transition: Option<Transition>,
    /// Progress through the region in `[0, 1]`.
    pub progress: f64,
    /// Scroll offset of the frame.
    pub offset: f64,
    /// Scroll direction of the frame.
    pub direction: Direction,
    /// Scroll velocity of the frame, px/s.
    pub velocity: f64,
    /// Anchor node, if the trigger has one.
    pub node: Option<NodeId>,
    /// Attached animation, if any.
    pub animation: Option<TimelineId>,
}

/// Mutable context handed to trigger callbacks.
pub struct TriggerCtx<'a> {
    /// The firing event.
    pub event: TriggerEvent,
    /// Timelines of the owning view.
    pub timelines: &'a mut TimelineSet,
    /// Page surface.
    pub surface: &'a mut dyn Surface,
    retire: bool,
}

impl<'a> TriggerCtx<'a> {
    pub(crate) fn new(
        event: TriggerEvent,
        timelines: &'a mut TimelineSet,
        surface: &'a mut dyn Surface,
    ) -> Self {
        Self {
            event,
            timelines,
            surface,
            retire: false,
        }
    }

    /// Start a fire-and-forget timeline.
    pub fn play(&mut self, timeline: Timeline) -> TimelineId {
        self.timelines.play(timeline, self.surface)
    }

    /// Remove the firing trigger after this callback returns. Its animation keeps playing.
    pub fn retire(&mut self) {
        self.retire = true;
    }
}

/// Trigger callback.
pub type TriggerFn = Box<dyn FnMut(&mut TriggerCtx<'_>)>;

/// One recorded crossing, as returned by [`TriggerRegistry::update`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Fired {
    /// Trigger that fired.
    pub trigger: TriggerId,
    /// Label given with [`Trigger::label`].
    pub label: Option<String>,
    /// Crossing.
    pub transition: Transition,
    /// Scroll offset of the frame.
    pub offset: f64,
}

/// Builder for a viewport trigger.
pub struct Trigger {
    anchor: Anchor,
    region: Region,
    label: Option<String>,
    once: bool,
    scrub: Option<Scrub>,
    toggle: ToggleActions,
    animation: Option<Timeline>,
    callbacks: [Option<TriggerFn>; 4],
    on_update: Option<TriggerFn>,
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("anchor", &self.anchor)
            .field("region", &self.region)
            .field("label", &self.label)
            .field("once", &self.once)
            .field("scrub", &self.scrub)
            .field("toggle", &self.toggle)
            .finish_non_exhaustive()
    }
}

impl Trigger {
    /// Trigger on `anchor` with the default region.
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            region: Region::default(),
            label: None,
            once: false,
            scrub: None,
            toggle: ToggleActions::default(),
            animation: None,
            callbacks: [None, None, None, None],
            on_update: None,
        }
    }

    /// Trigger on a node.
    pub fn node(node: NodeId) -> Self {
        Self::new(Anchor::Node(node))
    }

    /// Trigger on the whole page.
    pub fn page() -> Self {
        Self::new(Anchor::Page)
    }

    /// Set the region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Name used in event logs.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Retire the trigger after its first [`Transition::Leave`].
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Drive the attached animation (and `on_update`) from scroll progress.
    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = Some(scrub);
        self
    }

    /// Commands applied to the attached animation on each crossing (ignored when scrubbing).
    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.toggle = actions;
        self
    }

    /// Animation owned by the trigger.
    pub fn animation(mut self, timeline: Timeline) -> Self {
        self.animation = Some(timeline);
        self
    }

    /// Callback for one transition.
    pub fn on(
        mut self,
        transition: Transition,
        f: impl FnMut(&mut TriggerCtx<'_>) + 'static,
    ) -> Self {
        self.callbacks[transition.slot()] = Some(Box::new(f));
        self
    }

    /// Callback for [`Transition::Enter`].
    pub fn on_enter(self, f: impl FnMut(&mut TriggerCtx<'_>) + 'static) -> Self {
        self.on(Transition::Enter, f)
    }

    /// Callback for [`Transition::Leave`].
    pub fn on_leave(self, f: impl FnMut(&mut TriggerCtx<'_>) + 'static) -> Self {
        self.on(Transition::Leave, f)
    }

    /// Callback for [`Transition::EnterBack`].
    pub fn on_enter_back(self, f: impl FnMut(&mut TriggerCtx<'_>) + 'static) -> Self {
        self.on(Transition::EnterBack, f)
    }

    /// Callback for [`Transition::LeaveBack`].
    pub fn on_leave_back(self, f: impl FnMut(&mut TriggerCtx<'_>) + 'static) -> Self {
        self.on(Transition::LeaveBack, f)
    }

    /// Callback for every change of progress through the region.
    pub fn on_update(mut self, f: impl FnMut(&mut TriggerCtx<'_>) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }
}

struct Entry {
    anchor: Anchor,
    region: Region,
    label: Option<String>,
    once: bool,
    scrub: Option<Scrub>,
    toggle: ToggleActions,
    animation: Option<TimelineId>,
    callbacks: [Option<TriggerFn>; 4],
    on_update: Option<TriggerFn>,
    span: Option<ScrollSpan>,
    phase: Phase,
    progress: f64,
}

impl Entry {
    fn event(
        &self,
        id: TriggerId,
        transition: Option<Transition>,
        state: &ScrollState,
    ) -> TriggerEvent {
        TriggerEvent {
            trigger: id,
            transition,
            progress: self.progress,
            offset: state.offset,
            direction: state.direction,
            velocity: state.velocity,
            node: self.anchor.node(),
            animation: self.animation,
        }
    }

    /// Resolve the span and adopt the phase and progress of `offset` without firing.
    fn settle(&mut self, offset: f64, timelines: &mut TimelineSet, surface: &mut dyn Surface) {
        let Some(span) = super::region::resolve(self.anchor, &self.region, &*surface) else {
            return;
        };
        self.span = Some(span);
        self.phase = span.phase(offset);
        self.progress = span.progress(offset);
        let Some(anim) = self.animation else {
            return;
        };
        match self.scrub {
            Some(_) => timelines.seek(anim, self.progress, surface),
            // Content already scrolled past must not sit in its hidden start state.
            None if self.phase != Phase::Before => {
                timelines.control(anim, Control::Complete, surface)
            }
            None => {}
        }
    }
}

/// Per-view set of viewport triggers.
#[derive(Default)]
pub struct TriggerRegistry {
    entries: SlotMap<TriggerId, Entry>,
    order: Vec<TriggerId>,
    offset: f64,
}

impl fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("len", &self.entries.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl TriggerRegistry {
    /// Empty registry assuming the page is scrolled to `offset`.
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    /// Register `trigger`. Its initial phase is computed silently: a trigger registered inside
    /// its region starts [`Phase::Inside`] without an `Enter`.
    pub fn register(
        &mut self,
        trigger: Trigger,
        timelines: &mut TimelineSet,
        surface: &mut dyn Surface,
    ) -> TriggerId {
        let animation = trigger.animation.map(|tl| timelines.attach_paused(tl));
        let mut entry = Entry {
            anchor: trigger.anchor,
            region: trigger.region,
            label: trigger.label,
            once: trigger.once,
            scrub: trigger.scrub,
            toggle: trigger.toggle,
            animation,
            callbacks: trigger.callbacks,
            on_update: trigger.on_update,
            span: None,
            phase: Phase::Before,
            progress: 0.0,
        };
        entry.settle(self.offset, timelines, surface);
        let id = self.entries.insert(entry);
        self.order.push(id);
        tracing::trace!(?id, "trigger registered");
        id
    }

    /// Number of live triggers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no trigger is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is still registered.
    pub fn contains(&self, id: TriggerId) -> bool {
        self.entries.contains_key(id)
    }

    /// Current phase of a trigger.
    pub fn phase(&self, id: TriggerId) -> Option<Phase> {
        self.entries.get(id).map(|e| e.phase)
    }

    /// Current (possibly smoothed) progress of a trigger.
    pub fn progress(&self, id: TriggerId) -> Option<f64> {
        self.entries.get(id).map(|e| e.progress)
    }

    /// Resolved span of a trigger.
    pub fn span(&self, id: TriggerId) -> Option<ScrollSpan> {
        self.entries.get(id).and_then(|e| e.span)
    }

    /// Attached animation of a trigger.
    pub fn animation(&self, id: TriggerId) -> Option<TimelineId> {
        self.entries.get(id).and_then(|e| e.animation)
    }

    /// Re-resolve every span (after a resize or layout change). Nothing fires here; phase
    /// changes caused by the new geometry fire on the next [`TriggerRegistry::update`].
    pub fn refresh(&mut self, surface: &dyn Surface) {
        for entry in self.entries.values_mut() {
            if let Some(span) = super::region::resolve(entry.anchor, &entry.region, surface) {
                entry.span = Some(span);
            }
        }
    }

    /// Apply one frame's scroll state: fire crossings, toggle and scrub attached animations.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(offset = state.offset, triggers = self.order.len())
    )]
    pub fn update(
        &mut self,
        state: &ScrollState,
        dt: f64,
        timelines: &mut TimelineSet,
        surface: &mut dyn Surface,
    ) -> Vec<Fired> {
        self.offset = state.offset;
        let mut fired = Vec::new();
        let mut retired = Vec::new();

        for &id in &self.order {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            if let Some(node) = entry.anchor.node() {
                if !surface.is_attached(node) {
                    continue;
                }
            }
            let Some(span) = entry.span else {
                entry.settle(state.offset, timelines, surface);
                continue;
            };

            let target = span.progress(state.offset);
            let progress = match entry.scrub {
                Some(Scrub::Smoothed(lag)) if lag > 0.0 => {
                    approach(entry.progress, target, dt, lag)
                }
                _ => target,
            };

            let next = span.phase(state.offset);
            let mut retire = false;
            for &transition in transitions(entry.phase, next) {
                tracing::debug!(
                    ?id,
                    label = ?entry.label,
                    ?transition,
                    offset = state.offset,
                    "trigger crossed"
                );
                fired.push(Fired {
                    trigger: id,
                    label: entry.label.clone(),
                    transition,
                    offset: state.offset,
                });
                if entry.scrub.is_none() {
                    if let Some(anim) = entry.animation {
                        timelines.control(anim, entry.toggle.action(transition), surface);
                    }
                }
                let event = TriggerEvent {
                    progress: target,
                    ..entry.event(id, Some(transition), state)
                };
                if let Some(cb) = entry.callbacks[transition.slot()].as_mut() {
                    let mut ctx = TriggerCtx::new(event, timelines, surface);
                    cb(&mut ctx);
                    retire |= ctx.retire;
                }
                if entry.once && transition == Transition::Leave {
                    retire = true;
                }
            }
            entry.phase = next;

            if progress != entry.progress {
                entry.progress = progress;
                if entry.scrub.is_some() {
                    if let Some(anim) = entry.animation {
                        timelines.seek(anim, progress, surface);
                    }
                }
                let event = entry.event(id, None, state);
                if let Some(cb) = entry.on_update.as_mut() {
                    let mut ctx = TriggerCtx::new(event, timelines, surface);
                    cb(&mut ctx);
                    retire |= ctx.retire;
                }
            }

            if retire {
                retired.push(id);
            }
        }

        for id in retired {
            tracing::debug!(?id, "trigger retired");
            self.remove(id);
        }
        fired
    }

    fn remove(&mut self, id: TriggerId) -> Option<Entry> {
        let entry = self.entries.remove(id)?;
        self.order.retain(|&o| o != id);
        Some(entry)
    }

    /// Unregister a trigger and kill its animation. Unknown ids are a no-op.
    pub fn kill(&mut self, id: TriggerId, timelines: &mut TimelineSet) -> bool {
        match self.remove(id) {
            Some(entry) => {
                if let Some(anim) = entry.animation {
                    timelines.kill(anim);
                }
                true
            }
            None => false,
        }
    }

    /// Unregister every trigger and kill their animations.
    pub fn kill_all(&mut self, timelines: &mut TimelineSet) {
        for (_, entry) in self.entries.drain() {
            if let Some(anim) = entry.animation {
                timelines.kill(anim);
            }
        }
        self.order.clear();
    }
}

/// Move `current` toward `target`, covering `dt / lag` of the gap per frame.
fn approach(current: f64, target: f64, dt: f64, lag: f64) -> f64 {
    let step = if dt.is_finite() { (dt / lag).clamp(0.0, 1.0) } else { 1.0 };
    let next = current + (target - current) * step;
    if (target - next).abs() < 1e-4 { target } else { next }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/registry.rs"]
mod tests;
