use crate::animation::set::{TimelineId, TimelineSet};
use crate::animation::timeline::Timeline;
use crate::foundation::core::NodeId;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::render::surface::Surface;
use crate::scroll::coordinator::{Direction, ScrollState};
use crate::trigger::region::{Anchor, Phase, Region, ScrollSpan, resolve};
use crate::trigger::registry::{Transition, transitions};

/// Batching window settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Seconds after the first queued crossing before the queue is flushed.
    pub interval: f64,
    /// Flush early once this many nodes are queued; also the largest batch size.
    pub batch_max: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            interval: 0.1,
            batch_max: None,
        }
    }
}

impl BatchConfig {
    /// Reject negative windows and a zero batch size.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.interval.is_finite() || self.interval < 0.0 {
            return Err(ScrollfxError::validation(
                "batch interval must be finite and >= 0",
            ));
        }
        if self.batch_max == Some(0) {
            return Err(ScrollfxError::validation("batch_max must be > 0"));
        }
        Ok(())
    }
}

/// Mutable context handed to batch callbacks.
pub struct BatchCtx<'a> {
    /// Crossing shared by every node of the batch.
    pub transition: Transition,
    /// Scroll direction at flush time.
    pub direction: Direction,
    /// Timelines of the owning view.
    pub timelines: &'a mut TimelineSet,
    /// Page surface.
    pub surface: &'a mut dyn Surface,
}

impl BatchCtx<'_> {
    /// Start a fire-and-forget timeline.
    pub fn play(&mut self, timeline: Timeline) -> TimelineId {
        self.timelines.play(timeline, self.surface)
    }
}

/// Batch callback: the nodes that crossed, in membership order.
pub type BatchFn = Box<dyn FnMut(&[NodeId], &mut BatchCtx<'_>)>;

/// One flushed batch, as returned by [`BatchController::update`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BatchFired {
    /// Label given with [`BatchController::label`].
    pub label: Option<String>,
    /// Crossing.
    pub transition: Transition,
    /// Nodes of the batch.
    pub nodes: Vec<NodeId>,
}

#[derive(Debug)]
struct Member {
    node: NodeId,
    span: Option<ScrollSpan>,
    phase: Phase,
}

#[derive(Debug, Default)]
struct Queue {
    nodes: Vec<NodeId>,
    first_at: Option<f64>,
}

/// Crossing that puts a member back in the phase it had before `t`.
fn reverse_of(t: Transition) -> Transition {
    match t {
        Transition::Enter => Transition::LeaveBack,
        Transition::LeaveBack => Transition::Enter,
        Transition::Leave => Transition::EnterBack,
        Transition::EnterBack => Transition::Leave,
    }
}

/// Groups crossings of many nodes sharing one region into a single callback per window.
pub struct BatchController {
    region: Region,
    config: BatchConfig,
    label: Option<String>,
    members: Vec<Member>,
    queues: [Queue; 4],
    callbacks: [Option<BatchFn>; 4],
    offset: f64,
    killed: bool,
}

impl std::fmt::Debug for BatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchController")
            .field("region", &self.region)
            .field("config", &self.config)
            .field("label", &self.label)
            .field("members", &self.members.len())
            .field("killed", &self.killed)
            .finish_non_exhaustive()
    }
}

impl BatchController {
    /// Controller for `region` with `config`.
    pub fn new(region: Region, config: BatchConfig) -> ScrollfxResult<Self> {
        config.validate()?;
        Ok(Self {
            region,
            config,
            label: None,
            members: Vec::new(),
            queues: Default::default(),
            callbacks: [None, None, None, None],
            offset: 0.0,
            killed: false,
        })
    }

    /// Name used in event logs.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Callback for one transition.
    pub fn on(
        mut self,
        transition: Transition,
        f: impl FnMut(&[NodeId], &mut BatchCtx<'_>) + 'static,
    ) -> Self {
        self.callbacks[transition.slot()] = Some(Box::new(f));
        self
    }

    /// Callback for batched [`Transition::Enter`].
    pub fn on_enter(self, f: impl FnMut(&[NodeId], &mut BatchCtx<'_>) + 'static) -> Self {
        self.on(Transition::Enter, f)
    }

    /// Callback for batched [`Transition::Leave`].
    pub fn on_leave(self, f: impl FnMut(&[NodeId], &mut BatchCtx<'_>) + 'static) -> Self {
        self.on(Transition::Leave, f)
    }

    /// Callback for batched [`Transition::EnterBack`].
    pub fn on_enter_back(self, f: impl FnMut(&[NodeId], &mut BatchCtx<'_>) + 'static) -> Self {
        self.on(Transition::EnterBack, f)
    }

    /// Callback for batched [`Transition::LeaveBack`].
    pub fn on_leave_back(self, f: impl FnMut(&[NodeId], &mut BatchCtx<'_>) + 'static) -> Self {
        self.on(Transition::LeaveBack, f)
    }

    /// Assume the page is at `offset` when members first resolve.
    pub fn starting_at(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Add a member. Its phase is taken silently from the last known offset.
    pub fn add(&mut self, node: NodeId) {
        if self.killed || self.members.iter().any(|m| m.node == node) {
            return;
        }
        self.members.push(Member {
            node,
            span: None,
            phase: Phase::Before,
        });
    }

    /// Builder-style [`BatchController::add`] for many nodes.
    pub fn with_members(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        for node in nodes {
            self.add(node);
        }
        self
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the controller has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Nodes queued for `transition` and not yet flushed.
    pub fn pending(&self, transition: Transition) -> usize {
        self.queues[transition.slot()].nodes.len()
    }

    /// Whether [`BatchController::kill`] was called.
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Re-resolve member spans after a layout change. Nothing fires here.
    pub fn refresh(&mut self, surface: &dyn Surface) {
        for m in &mut self.members {
            if let Some(span) = resolve(Anchor::Node(m.node), &self.region, surface) {
                m.span = Some(span);
            }
        }
    }

    /// Queue this frame's crossings and flush every queue whose window elapsed or that
    /// reached `batch_max`.
    pub fn update(
        &mut self,
        state: &ScrollState,
        now: f64,
        timelines: &mut TimelineSet,
        surface: &mut dyn Surface,
    ) -> Vec<BatchFired> {
        if self.killed {
            return Vec::new();
        }
        let baseline = self.offset;
        self.offset = state.offset;

        for m in &mut self.members {
            let Some(bounds) = surface.element_box(m.node) else {
                continue;
            };
            let span = match m.span {
                Some(span) => span,
                None => {
                    let span = self.region.span(bounds, surface.viewport_height());
                    m.span = Some(span);
                    m.phase = span.phase(baseline);
                    span
                }
            };
            let next = span.phase(state.offset);
            for &t in transitions(m.phase, next) {
                // A crossing that undoes a still-queued one cancels it instead of queueing.
                let undone = &mut self.queues[reverse_of(t).slot()];
                if let Some(pos) = undone.nodes.iter().position(|&n| n == m.node) {
                    undone.nodes.remove(pos);
                    if undone.nodes.is_empty() {
                        undone.first_at = None;
                    }
                    continue;
                }
                let q = &mut self.queues[t.slot()];
                if !q.nodes.contains(&m.node) {
                    q.nodes.push(m.node);
                    q.first_at.get_or_insert(now);
                }
            }
            m.phase = next;
        }

        let mut fired = Vec::new();
        for t in Transition::ALL {
            let due = {
                let q = &self.queues[t.slot()];
                match q.first_at {
                    Some(first) => now - first >= self.config.interval,
                    None => false,
                }
            };
            let max = self.config.batch_max.unwrap_or(usize::MAX);
            loop {
                let q = &mut self.queues[t.slot()];
                if q.nodes.is_empty() {
                    q.first_at = None;
                    break;
                }
                if !due && q.nodes.len() < max {
                    break;
                }
                let take = q.nodes.len().min(max);
                let chunk: Vec<NodeId> = q.nodes.drain(..take).collect();
                if q.nodes.is_empty() {
                    q.first_at = None;
                }
                self.flush(t, chunk, state.direction, timelines, surface, &mut fired);
            }
        }
        fired
    }

    fn flush(
        &mut self,
        transition: Transition,
        mut nodes: Vec<NodeId>,
        direction: Direction,
        timelines: &mut TimelineSet,
        surface: &mut dyn Surface,
        fired: &mut Vec<BatchFired>,
    ) {
        nodes.retain(|&n| surface.is_attached(n));
        if nodes.is_empty() {
            return;
        }
        tracing::debug!(label = ?self.label, ?transition, size = nodes.len(), "batch flushed");
        if let Some(cb) = self.callbacks[transition.slot()].as_mut() {
            let mut ctx = BatchCtx {
                transition,
                direction,
                timelines,
                surface,
            };
            cb(&nodes, &mut ctx);
        }
        fired.push(BatchFired {
            label: self.label.clone(),
            transition,
            nodes,
        });
    }

    /// Stop tracking and drop every callback and queued crossing. Idempotent.
    pub fn kill(&mut self) {
        if self.killed {
            return;
        }
        self.killed = true;
        self.members.clear();
        self.queues = Default::default();
        self.callbacks = [None, None, None, None];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/controller.rs"]
mod tests;
