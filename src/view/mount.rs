use slotmap::{SlotMap, new_key_type};

use crate::animation::set::{TimelineId, TimelineSet};
use crate::animation::timeline::{CompleteFn, Timeline};
use crate::batch::controller::{BatchController, BatchFired};
use crate::config::MotionConfig;
use crate::foundation::core::{NodeId, Property};
use crate::foundation::error::ScrollfxResult;
use crate::foundation::math::stable_seed;
use crate::render::surface::Surface;
use crate::scroll::coordinator::ScrollState;
use crate::text::count_up::CountUp;
use crate::text::scramble::{ScrambleConfig, Scrambler};
use crate::trigger::registry::{Fired, Trigger, TriggerId, TriggerRegistry};

new_key_type! {
    /// Handle to a batch controller owned by a [`View`].
    pub struct BatchId;
    /// Handle to a frame-stepped text effect owned by a [`View`].
    pub struct TaskId;
}

/// Everything a view reported during one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ViewEvents {
    /// Trigger crossings, in registration order.
    pub triggers: Vec<Fired>,
    /// Flushed batches.
    pub batches: Vec<BatchFired>,
}

impl ViewEvents {
    /// Whether nothing fired.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.batches.is_empty()
    }

    /// Append `other`.
    pub fn extend(&mut self, other: ViewEvents) {
        self.triggers.extend(other.triggers);
        self.batches.extend(other.batches);
    }
}

enum TextEffect {
    Count {
        count: CountUp,
        elapsed: f64,
        shown: Option<i64>,
    },
    Scramble {
        scrambler: Scrambler,
        pending: f64,
    },
}

struct TextTask {
    node: NodeId,
    effect: TextEffect,
    on_complete: Option<CompleteFn>,
}

impl TextTask {
    /// Write the first value.
    fn start(&mut self, surface: &mut dyn Surface) {
        let text = match &mut self.effect {
            TextEffect::Count { count, shown, .. } => {
                let v = count.sample(0.0);
                *shown = Some(v);
                Some(v.to_string())
            }
            TextEffect::Scramble { scrambler, .. } => scrambler.next_frame(),
        };
        self.write(text, surface);
    }

    /// Advance by `dt` and write the text. Returns `true` once the final value is shown.
    fn step(&mut self, dt: f64, surface: &mut dyn Surface) -> bool {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        let (text, done) = match &mut self.effect {
            TextEffect::Count {
                count,
                elapsed,
                shown,
            } => {
                *elapsed += dt;
                let mut v = count.sample(*elapsed);
                // Overshooting eases must not make the counter tick backwards.
                if let Some(prev) = *shown {
                    v = if count.end >= count.start {
                        v.max(prev)
                    } else {
                        v.min(prev)
                    };
                }
                let done = count.duration <= 0.0 || *elapsed >= count.duration;
                let text = (*shown != Some(v)).then(|| v.to_string());
                *shown = Some(v);
                (text, done)
            }
            TextEffect::Scramble { scrambler, pending } => {
                let frame_secs = scrambler.frame_duration_secs();
                let mut latest = None;
                *pending += dt;
                while *pending >= frame_secs {
                    match scrambler.next_frame() {
                        Some(frame) => latest = Some(frame),
                        None => break,
                    }
                    *pending -= frame_secs;
                }
                (latest, scrambler.is_finished())
            }
        };
        self.write(text, surface);
        done
    }

    fn write(&self, text: Option<String>, surface: &mut dyn Surface) {
        if let Some(text) = text {
            if surface.is_attached(self.node) {
                surface.set_property(self.node, Property::Text, text.into());
            }
        }
    }
}

/// Per-section animation state: triggers, batches, timelines and text effects, torn down
/// together.
pub struct View {
    config: MotionConfig,
    triggers: TriggerRegistry,
    batches: SlotMap<BatchId, BatchController>,
    timelines: TimelineSet,
    tasks: SlotMap<TaskId, TextTask>,
    offset: f64,
    mounted: bool,
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("triggers", &self.triggers.len())
            .field("batches", &self.batches.len())
            .field("timelines", &self.timelines.len())
            .field("tasks", &self.tasks.len())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl View {
    /// Mount an empty view, assuming the page is at offset 0.
    pub fn mount(config: MotionConfig) -> Self {
        let mut timelines = TimelineSet::new();
        timelines.set_reduced_motion(config.reduced_motion);
        Self {
            config,
            triggers: TriggerRegistry::new(0.0),
            batches: SlotMap::with_key(),
            timelines,
            tasks: SlotMap::with_key(),
            offset: 0.0,
            mounted: true,
        }
    }

    /// Assume the page is at `offset`, so triggers registered next start in the right phase.
    pub fn starting_at(mut self, offset: f64) -> Self {
        self.offset = offset;
        if self.triggers.is_empty() {
            self.triggers = TriggerRegistry::new(offset);
        }
        self
    }

    /// Settings this view was mounted with.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Whether [`View::unmount`] has not been called yet.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Register a trigger.
    pub fn add_trigger(&mut self, trigger: Trigger, surface: &mut dyn Surface) -> TriggerId {
        self.triggers.register(trigger, &mut self.timelines, surface)
    }

    /// Register several triggers (effect presets return one per card).
    pub fn add_triggers(
        &mut self,
        triggers: impl IntoIterator<Item = Trigger>,
        surface: &mut dyn Surface,
    ) -> Vec<TriggerId> {
        triggers
            .into_iter()
            .map(|t| self.add_trigger(t, surface))
            .collect()
    }

    /// Take ownership of a batch controller. It resolves its members against the view's
    /// current offset.
    pub fn add_batch(&mut self, controller: BatchController) -> BatchId {
        self.batches.insert(controller.starting_at(self.offset))
    }

    /// Borrow a batch controller, e.g. to add members.
    pub fn batch_mut(&mut self, id: BatchId) -> Option<&mut BatchController> {
        self.batches.get_mut(id)
    }

    /// Start a fire-and-forget timeline.
    pub fn play(&mut self, timeline: Timeline, surface: &mut dyn Surface) -> TimelineId {
        self.timelines.play(timeline, surface)
    }

    /// Count `node`'s text from `count.start` to `count.end`. The start value is written now.
    pub fn count_up(
        &mut self,
        node: NodeId,
        count: CountUp,
        surface: &mut dyn Surface,
    ) -> ScrollfxResult<TaskId> {
        count.validate()?;
        let effect = TextEffect::Count {
            count,
            elapsed: 0.0,
            shown: None,
        };
        Ok(self.start_task(node, effect, surface))
    }

    /// Classic scramble timing with this view's alphabet and frame rate.
    pub fn scramble_config(&self) -> ScrambleConfig {
        ScrambleConfig {
            alphabet: self.config.scramble_alphabet.clone(),
            fps: self.config.fps,
            ..ScrambleConfig::classic()
        }
    }

    /// Scramble `node`'s text into `text`. The first frame is written now.
    ///
    /// The seed is mixed with the node and the text, so identical labels on different nodes
    /// show different decoys.
    pub fn scramble(
        &mut self,
        node: NodeId,
        text: &str,
        config: ScrambleConfig,
        surface: &mut dyn Surface,
    ) -> ScrollfxResult<TaskId> {
        let seed = stable_seed(config.seed, node.0, text);
        let effect = TextEffect::Scramble {
            scrambler: Scrambler::new(text, config.seed(seed))?,
            pending: 0.0,
        };
        Ok(self.start_task(node, effect, surface))
    }

    fn start_task(
        &mut self,
        node: NodeId,
        effect: TextEffect,
        surface: &mut dyn Surface,
    ) -> TaskId {
        let mut task = TextTask {
            node,
            effect,
            on_complete: None,
        };
        task.start(surface);
        if self.config.reduced_motion {
            task.step(f64::INFINITY, surface);
        }
        self.tasks.insert(task)
    }

    /// Run `f` once the text task finishes. Returns `false` for unknown or finished tasks.
    pub fn on_task_complete(&mut self, id: TaskId, f: impl FnOnce() + 'static) -> bool {
        match self.tasks.get_mut(id) {
            Some(task) => {
                task.on_complete = Some(Box::new(f));
                true
            }
            None => false,
        }
    }

    /// Text tasks still running.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Trigger registry.
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    /// Timelines owned by this view.
    pub fn timelines(&self) -> &TimelineSet {
        &self.timelines
    }

    /// Mutable access to the timelines, e.g. to kill one.
    pub fn timelines_mut(&mut self) -> &mut TimelineSet {
        &mut self.timelines
    }

    /// Kill one trigger and its animation.
    pub fn kill_trigger(&mut self, id: TriggerId) -> bool {
        self.triggers.kill(id, &mut self.timelines)
    }

    /// Re-resolve every trigger and batch member after a layout change.
    pub fn refresh(&mut self, surface: &dyn Surface) {
        self.triggers.refresh(surface);
        for batch in self.batches.values_mut() {
            batch.refresh(surface);
        }
    }

    /// Run one frame: triggers, then batches, then timelines and text tasks.
    pub fn update(
        &mut self,
        state: &ScrollState,
        now: f64,
        dt: f64,
        surface: &mut dyn Surface,
    ) -> ViewEvents {
        if !self.mounted {
            return ViewEvents::default();
        }
        self.offset = state.offset;
        let mut events = ViewEvents {
            triggers: self.triggers.update(state, dt, &mut self.timelines, surface),
            batches: Vec::new(),
        };
        for batch in self.batches.values_mut() {
            events
                .batches
                .extend(batch.update(state, now, &mut self.timelines, surface));
        }
        self.timelines.tick(dt, surface);

        let done: Vec<TaskId> = self
            .tasks
            .iter_mut()
            .filter_map(|(id, task)| task.step(dt, surface).then_some(id))
            .collect();
        for id in done {
            if let Some(f) = self.tasks.remove(id).and_then(|t| t.on_complete) {
                f();
            }
        }
        events
    }

    /// Kill every trigger, batch, timeline and text task. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        tracing::debug!(
            triggers = self.triggers.len(),
            batches = self.batches.len(),
            timelines = self.timelines.len(),
            "view unmounted"
        );
        self.triggers.kill_all(&mut self.timelines);
        for batch in self.batches.values_mut() {
            batch.kill();
        }
        self.batches.clear();
        self.timelines.kill_all();
        self.tasks.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/mount.rs"]
mod tests;
