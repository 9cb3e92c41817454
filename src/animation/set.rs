use slotmap::{SlotMap, new_key_type};

use crate::animation::timeline::{TickOutcome, Timeline};
use crate::render::surface::Surface;

new_key_type! {
    /// Handle to a timeline owned by a [`TimelineSet`].
    pub struct TimelineId;
}

/// Playback command applied to a timeline by trigger toggle actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Play forward.
    Play,
    /// Freeze.
    Pause,
    /// Continue in the current direction.
    Resume,
    /// Play backward.
    Reverse,
    /// Jump to start and play.
    Restart,
    /// Jump to start and pause.
    Reset,
    /// Jump to end.
    Complete,
    /// Do nothing.
    None,
}

struct Slot {
    timeline: Timeline,
    retain: bool,
}

/// Timelines owned by one view.
///
/// Fire-and-forget timelines are dropped once they complete; retained ones stay addressable so
/// a trigger can reverse or restart them later.
#[derive(Default)]
pub struct TimelineSet {
    slots: SlotMap<TimelineId, Slot>,
    order: Vec<TimelineId>,
    reduced_motion: bool,
}

impl std::fmt::Debug for TimelineSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineSet")
            .field("len", &self.slots.len())
            .field("reduced_motion", &self.reduced_motion)
            .finish()
    }
}

impl TimelineSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump every newly played timeline straight to its end.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
    }

    /// Start `timeline`; it is dropped from the set once it completes.
    pub fn play(&mut self, timeline: Timeline, surface: &mut dyn Surface) -> TimelineId {
        self.insert(timeline, false, surface)
    }

    /// Start `timeline` and keep it after completion.
    pub fn play_retained(&mut self, timeline: Timeline, surface: &mut dyn Surface) -> TimelineId {
        self.insert(timeline, true, surface)
    }

    /// Keep `timeline` without rendering it (scrubbed and toggle-driven animations).
    pub fn attach_paused(&mut self, timeline: Timeline) -> TimelineId {
        let id = self.slots.insert(Slot {
            timeline: timeline.paused(),
            retain: true,
        });
        self.order.push(id);
        id
    }

    fn insert(
        &mut self,
        timeline: Timeline,
        retain: bool,
        surface: &mut dyn Surface,
    ) -> TimelineId {
        if timeline.wants_overwrite() {
            let touched = timeline.touched();
            let conflicting: Vec<TimelineId> = self
                .order
                .iter()
                .copied()
                .filter(|id| {
                    self.slots.get(*id).is_some_and(|s| {
                        !s.retain
                            && s.timeline.is_active()
                            && !s.timeline.touched().is_disjoint(&touched)
                    })
                })
                .collect();
            for id in conflicting {
                tracing::trace!(?id, "overwriting conflicting timeline");
                self.kill(id);
            }
        }

        let id = self.slots.insert(Slot { timeline, retain });
        self.order.push(id);

        let mut follow_ups = Vec::new();
        if let Some(slot) = self.slots.get_mut(id) {
            if self.reduced_motion {
                slot.timeline.complete(surface);
            } else {
                slot.timeline.advance(0.0, surface);
            }
            if slot.timeline.is_settled() {
                if let Some(next) = slot.timeline.take_follow_up() {
                    follow_ups.push(next);
                }
            }
        }
        self.sweep();
        for next in follow_ups {
            self.play(next, surface);
        }
        id
    }

    /// Borrow a timeline.
    pub fn get(&self, id: TimelineId) -> Option<&Timeline> {
        self.slots.get(id).map(|s| &s.timeline)
    }

    /// Mutably borrow a timeline.
    pub fn get_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.slots.get_mut(id).map(|s| &mut s.timeline)
    }

    /// Whether `id` is still owned by the set.
    pub fn contains(&self, id: TimelineId) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of owned timelines.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set owns no timelines.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of timelines currently advancing.
    pub fn active_count(&self) -> usize {
        self.slots.values().filter(|s| s.timeline.is_active()).count()
    }

    /// Seek a retained timeline to `progress` of its first iteration.
    pub fn seek(&mut self, id: TimelineId, progress: f64, surface: &mut dyn Surface) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.timeline.seek_progress(progress, surface);
        }
    }

    /// Apply a playback command; unknown ids are ignored.
    pub fn control(&mut self, id: TimelineId, control: Control, surface: &mut dyn Surface) {
        let reduced = self.reduced_motion;
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        let tl = &mut slot.timeline;
        match control {
            Control::Play => tl.play(),
            Control::Pause => tl.pause(),
            Control::Resume => tl.resume(),
            Control::Reverse => tl.reverse(),
            Control::Restart => tl.restart(surface),
            Control::Reset => tl.reset(surface),
            Control::Complete => tl.complete(surface),
            Control::None => {}
        }
        if reduced && tl.is_active() {
            if tl.is_reversed() {
                tl.seek_progress(0.0, surface);
                tl.pause();
            } else {
                tl.complete(surface);
            }
        }
    }

    /// Kill and drop one timeline. Unknown or already-killed ids are a no-op.
    pub fn kill(&mut self, id: TimelineId) -> bool {
        match self.slots.remove(id) {
            Some(mut slot) => {
                slot.timeline.kill();
                self.order.retain(|&o| o != id);
                true
            }
            None => false,
        }
    }

    /// Kill every timeline.
    pub fn kill_all(&mut self) {
        for (_, mut slot) in self.slots.drain() {
            slot.timeline.kill();
        }
        self.order.clear();
    }

    /// Advance every running timeline by `dt` seconds.
    pub fn tick(&mut self, dt: f64, surface: &mut dyn Surface) {
        let mut follow_ups = Vec::new();
        for &id in &self.order {
            let Some(slot) = self.slots.get_mut(id) else {
                continue;
            };
            if slot.timeline.advance(dt, surface) == TickOutcome::Completed {
                if let Some(next) = slot.timeline.take_follow_up() {
                    follow_ups.push(next);
                }
            }
        }
        self.sweep();
        for next in follow_ups {
            self.play(next, surface);
        }
    }

    fn sweep(&mut self) {
        let slots = &mut self.slots;
        self.order.retain(|&id| {
            let drop = slots
                .get(id)
                .is_some_and(|s| !s.retain && s.timeline.is_settled());
            if drop {
                slots.remove(id);
            }
            slots.contains_key(id)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/set.rs"]
mod tests;
