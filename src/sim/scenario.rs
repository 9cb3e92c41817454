use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::timeline::{Timeline, Tween};
use crate::batch::controller::BatchController;
use crate::config::MotionConfig;
use crate::foundation::core::{ElementBox, Fps, NodeId, Property, PropertyValue};
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::render::surface::{InMemorySurface, StyleWrite};
use crate::scroll::scroll_to::{ScrollTo, ScrollToStatus};
use crate::trigger::region::{Edge, Region};
use crate::trigger::registry::{Scrub, ToggleActions, Transition, Trigger};
use crate::view::page::Page;

/// Scripted page: a document layout, the triggers and batches mounted on it, and timed input.
///
/// Running it drives a [`Page`] over an [`InMemorySurface`] at a fixed frame rate, which is how
/// the CLI and the integration tests exercise the whole stack without a browser.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Viewport size in pixels.
    pub viewport: Viewport,
    /// Total document height in pixels.
    pub document_height: f64,
    /// Frame rate of the simulated loop; the config's `fps` when absent.
    #[serde(default)]
    pub fps: Option<Fps>,
    /// Scroll offset the page is restored at.
    #[serde(default)]
    pub start_offset: f64,
    /// Simulated seconds; one second past the last event when absent.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Node layout.
    pub nodes: Vec<NodeSpec>,
    /// Triggers mounted on the page.
    #[serde(default)]
    pub triggers: Vec<TriggerSpec>,
    /// Batch controllers mounted on the page.
    #[serde(default)]
    pub batches: Vec<BatchSpec>,
    /// Timed input.
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// Viewport size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// One node of the document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Handle used by triggers and tweens.
    pub id: NodeId,
    /// Document-space top edge.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

/// A single tween, played as a one-tween timeline.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TweenSpec {
    /// Animated nodes; the owning trigger's node or the flushed batch when empty.
    #[serde(default)]
    pub targets: Vec<NodeId>,
    /// Seconds per target.
    pub duration: f64,
    /// Seconds before the first target starts.
    #[serde(default)]
    pub delay: f64,
    /// GSAP ease name; the config default when absent.
    #[serde(default)]
    pub ease: Option<Ease>,
    /// Per-target offsets.
    #[serde(default)]
    pub stagger: Option<Stagger>,
    /// Start values. A non-empty map renders them immediately (`fromTo`).
    #[serde(default)]
    pub from: BTreeMap<Property, PropertyValue>,
    /// End values.
    #[serde(default)]
    pub to: BTreeMap<Property, PropertyValue>,
}

impl TweenSpec {
    /// Build the timeline, animating `fallback` when no targets were named.
    pub fn timeline(&self, fallback: &[NodeId], default_ease: Ease) -> ScrollfxResult<Timeline> {
        let targets = if self.targets.is_empty() {
            fallback.to_vec()
        } else {
            self.targets.clone()
        };
        let mut tween = if self.from.is_empty() {
            Tween::to(targets, self.duration)
        } else {
            Tween::from_to(targets, self.duration)
        };
        for (&prop, value) in &self.from {
            tween = tween.from(prop, value.clone());
        }
        for (&prop, value) in &self.to {
            tween = tween.prop(prop, value.clone());
        }
        tween = tween.delay(self.delay);
        if let Some(ease) = self.ease {
            tween = tween.ease(ease);
        }
        if let Some(stagger) = self.stagger {
            tween = tween.stagger(stagger);
        }
        let timeline = Timeline::single(tween, default_ease);
        timeline.validate()?;
        Ok(timeline)
    }
}

/// A viewport trigger.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerSpec {
    /// Anchor node; the whole page when absent.
    #[serde(default)]
    pub node: Option<NodeId>,
    /// Name in the event log.
    #[serde(default)]
    pub label: Option<String>,
    /// Start edge, e.g. `"top 80%"`.
    #[serde(default)]
    pub start: Option<Edge>,
    /// End edge, e.g. `"top 20%"`.
    #[serde(default)]
    pub end: Option<Edge>,
    /// Retire after the first leave.
    #[serde(default)]
    pub once: bool,
    /// Drive the animation from scroll progress.
    #[serde(default)]
    pub scrub: Option<Scrub>,
    /// Commands per crossing, e.g. `"play none none reverse"`.
    #[serde(default)]
    pub toggle_actions: Option<ToggleActions>,
    /// Animation owned by the trigger.
    #[serde(default)]
    pub animation: Option<TweenSpec>,
}

impl TriggerSpec {
    fn build(&self, default_ease: Ease) -> ScrollfxResult<Trigger> {
        let mut trigger = match self.node {
            Some(node) => Trigger::node(node),
            None => Trigger::page(),
        }
        .region(region(self.start, self.end));
        if let Some(label) = &self.label {
            trigger = trigger.label(label.clone());
        }
        if self.once {
            trigger = trigger.once();
        }
        if let Some(scrub) = self.scrub {
            trigger = trigger.scrub(scrub);
        }
        if let Some(actions) = self.toggle_actions {
            trigger = trigger.toggle_actions(actions);
        }
        if let Some(anim) = &self.animation {
            let owner: Vec<NodeId> = self.node.into_iter().collect();
            trigger = trigger.animation(anim.timeline(&owner, default_ease)?);
        }
        Ok(trigger)
    }
}

/// A batch controller over many nodes sharing one region.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSpec {
    /// Name in the event log.
    #[serde(default)]
    pub label: Option<String>,
    /// Start edge.
    #[serde(default)]
    pub start: Option<Edge>,
    /// End edge.
    #[serde(default)]
    pub end: Option<Edge>,
    /// Members, in order.
    pub nodes: Vec<NodeId>,
    /// Played on each flushed enter batch.
    #[serde(default)]
    pub on_enter: Option<TweenSpec>,
    /// Played on each flushed leave-back batch.
    #[serde(default)]
    pub on_leave_back: Option<TweenSpec>,
}

impl BatchSpec {
    fn build(&self, config: &MotionConfig) -> ScrollfxResult<BatchController> {
        let mut controller =
            BatchController::new(region(self.start, self.end), config.batch())?
                .with_members(self.nodes.iter().copied());
        if let Some(label) = &self.label {
            controller = controller.label(label.clone());
        }
        let ease = config.default_ease;
        for (transition, spec) in [
            (Transition::Enter, &self.on_enter),
            (Transition::LeaveBack, &self.on_leave_back),
        ] {
            let Some(spec) = spec.clone() else {
                continue;
            };
            // Surface bad tweens at load time rather than on the first flush.
            spec.timeline(&self.nodes, ease)?;
            controller = controller.on(transition, move |nodes, ctx| {
                match spec.timeline(nodes, ease) {
                    Ok(timeline) => {
                        ctx.play(timeline);
                    }
                    Err(e) => tracing::warn!(error = %e, "skipping batch tween"),
                }
            });
        }
        Ok(controller)
    }
}

fn region(start: Option<Edge>, end: Option<Edge>) -> Region {
    let default = Region::default();
    Region {
        start: start.unwrap_or(default.start),
        end: end.unwrap_or(default.end),
    }
}

/// Timed input, tagged by `kind`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// The user scrolled to `offset`.
    Scroll {
        /// Seconds since start.
        at: f64,
        /// New scroll offset.
        offset: f64,
    },
    /// The pointer moved.
    Pointer {
        /// Seconds since start.
        at: f64,
        /// Viewport x.
        x: f64,
        /// Viewport y.
        y: f64,
    },
    /// Start a programmatic smooth scroll.
    ScrollTo {
        /// Seconds since start.
        at: f64,
        /// Destination offset.
        offset: f64,
        /// Seconds.
        duration: f64,
    },
    /// The viewport was resized.
    Resize {
        /// Seconds since start.
        at: f64,
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// A node left the document.
    Detach {
        /// Seconds since start.
        at: f64,
        /// Removed node.
        node: NodeId,
    },
}

impl InputEvent {
    /// Time the event is delivered.
    pub fn at(&self) -> f64 {
        match *self {
            Self::Scroll { at, .. }
            | Self::Pointer { at, .. }
            | Self::ScrollTo { at, .. }
            | Self::Resize { at, .. }
            | Self::Detach { at, .. } => at,
        }
    }
}

/// One logged event of a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportEvent {
    /// A trigger crossed a region edge.
    Trigger {
        /// Frame time.
        at: f64,
        /// Trigger label.
        label: Option<String>,
        /// Crossing.
        transition: Transition,
        /// Scroll offset of the frame.
        offset: f64,
    },
    /// A batch flushed.
    Batch {
        /// Frame time.
        at: f64,
        /// Batch label.
        label: Option<String>,
        /// Crossing.
        transition: Transition,
        /// Nodes of the batch.
        nodes: Vec<NodeId>,
    },
    /// A programmatic scroll ended.
    ScrollTo {
        /// Frame time.
        at: f64,
        /// How it ended.
        status: ScrollToStatus,
    },
}

/// Outcome of [`Scenario::run`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Report {
    /// Frames simulated.
    pub frames: u64,
    /// Scroll offset after the last frame.
    pub final_offset: f64,
    /// Event log in frame order.
    pub events: Vec<ReportEvent>,
    /// Final style of every written `(node, property)`.
    pub styles: Vec<StyleWrite>,
}

impl Report {
    /// Transitions logged for the trigger or batch named `label`, in order.
    pub fn transitions(&self, label: &str) -> Vec<Transition> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Trigger {
                    label: Some(l),
                    transition,
                    ..
                }
                | ReportEvent::Batch {
                    label: Some(l),
                    transition,
                    ..
                } if l == label => Some(*transition),
                _ => None,
            })
            .collect()
    }

    /// Final value of `prop` on `node`, if it was ever written.
    pub fn style(&self, node: NodeId, prop: Property) -> Option<&PropertyValue> {
        self.styles
            .iter()
            .find(|w| w.node == node && w.prop == prop)
            .map(|w| &w.value)
    }
}

impl Scenario {
    /// Parse a scenario from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollfxResult<Self> {
        let scenario: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollfxError::serde(format!("parse scenario JSON: {e}")))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parse a scenario from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollfxResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scenario from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollfxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollfxError::serde(format!("open scenario '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Static checks on layout, timing and frame rate.
    pub fn validate(&self) -> ScrollfxResult<()> {
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ScrollfxError::validation("viewport must be finite and > 0"));
        }
        if !self.document_height.is_finite() || self.document_height < 0.0 {
            return Err(ScrollfxError::validation(
                "document_height must be finite and >= 0",
            ));
        }
        if !self.start_offset.is_finite() {
            return Err(ScrollfxError::validation("start_offset must be finite"));
        }
        if let Some(fps) = self.fps {
            if fps.num == 0 || fps.den == 0 {
                return Err(ScrollfxError::validation("fps must be > 0"));
            }
        }
        if let Some(d) = self.duration {
            if !d.is_finite() || d < 0.0 {
                return Err(ScrollfxError::validation("duration must be finite and >= 0"));
            }
        }
        for n in &self.nodes {
            if !n.top.is_finite() || !n.height.is_finite() {
                return Err(ScrollfxError::validation(format!(
                    "node {} has a non-finite box",
                    n.id.0
                )));
            }
        }
        if let Some(e) = self.events.iter().find(|e| !(e.at().is_finite() && e.at() >= 0.0)) {
            return Err(ScrollfxError::validation(format!(
                "event time {} must be finite and >= 0",
                e.at()
            )));
        }
        Ok(())
    }

    fn end_time(&self) -> f64 {
        self.duration.unwrap_or_else(|| {
            self.events
                .iter()
                .map(InputEvent::at)
                .fold(0.0, f64::max)
                + 1.0
        })
    }

    /// Simulate the scenario frame by frame under `config`.
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(nodes = self.nodes.len(), triggers = self.triggers.len(), events = self.events.len())
    )]
    pub fn run(&self, config: &MotionConfig) -> ScrollfxResult<Report> {
        self.validate()?;
        config.validate()?;

        let mut surface = InMemorySurface::new(self.viewport.height, self.document_height);
        for n in &self.nodes {
            surface.insert_node(n.id, ElementBox::new(n.top, n.height));
        }
        let mut page = Page::new(config.clone(), self.viewport.width, self.viewport.height)
            .starting_at(self.start_offset);

        let mut view = page.create_view();
        for spec in &self.triggers {
            view.add_trigger(spec.build(config.default_ease)?, &mut surface);
        }
        for spec in &self.batches {
            view.add_batch(spec.build(config)?);
        }
        page.mount(view);

        let mut input: Vec<&InputEvent> = self.events.iter().collect();
        input.sort_by(|a, b| a.at().total_cmp(&b.at()));
        let mut input = input.into_iter().peekable();

        let frame_secs = self.fps.unwrap_or(config.fps).frame_duration_secs();
        let end = self.end_time();
        let mut log = Vec::new();
        let mut frames = 0u64;
        loop {
            let now = frames as f64 * frame_secs;
            if now > end + 1e-9 {
                break;
            }
            while let Some(event) = input.next_if(|e| e.at() <= now + 1e-9) {
                apply(event, &mut page, &mut surface)?;
            }

            let report = page.frame(now, &mut surface);
            log.extend(report.events.triggers.into_iter().map(|f| ReportEvent::Trigger {
                at: now,
                label: f.label,
                transition: f.transition,
                offset: f.offset,
            }));
            log.extend(report.events.batches.into_iter().map(|b| ReportEvent::Batch {
                at: now,
                label: b.label,
                transition: b.transition,
                nodes: b.nodes,
            }));
            if let Some(status) = report.scroll_to.filter(|s| *s != ScrollToStatus::Running) {
                log.push(ReportEvent::ScrollTo { at: now, status });
            }
            frames += 1;
        }

        page.unmount_all();
        tracing::info!(frames, events = log.len(), "scenario finished");
        Ok(Report {
            frames,
            final_offset: page.scroll().offset,
            events: log,
            styles: surface.snapshot(),
        })
    }
}

fn apply(event: &InputEvent, page: &mut Page, surface: &mut InMemorySurface) -> ScrollfxResult<()> {
    match *event {
        InputEvent::Scroll { offset, .. } => {
            page.on_scroll(offset);
        }
        InputEvent::Pointer { x, y, .. } => page.on_pointer_move(x, y),
        InputEvent::ScrollTo {
            offset, duration, ..
        } => page.scroll_to(ScrollTo::new(offset, duration)?),
        InputEvent::Resize { width, height, .. } => {
            surface.set_viewport_height(height);
            page.on_resize(width, height, &*surface);
        }
        InputEvent::Detach { node, .. } => surface.detach(node),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/sim/scenario.rs"]
mod tests;
