use slotmap::{SlotMap, new_key_type};

use crate::config::MotionConfig;
use crate::render::surface::Surface;
use crate::scroll::coordinator::{ScrollCoordinator, ScrollState};
use crate::scroll::pointer::{PointerState, PointerTracker};
use crate::scroll::scroll_to::{ScrollTo, ScrollToStatus};
use crate::view::mount::{View, ViewEvents};

new_key_type! {
    /// Handle to a view mounted on a [`Page`].
    pub struct ViewId;
}

/// Result of one [`Page::frame`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Scroll state the views were updated with.
    pub scroll: ScrollState,
    /// Whether a scroll event was folded into this frame.
    pub scrolled: bool,
    /// Smoothed pointer.
    pub pointer: PointerState,
    /// Everything the views fired, in mount order.
    pub events: ViewEvents,
    /// Progress of a programmatic scroll, if one ran this frame.
    pub scroll_to: Option<ScrollToStatus>,
}

/// The page-level frame loop: one scroll coordinator and pointer tracker shared by every
/// mounted view.
#[derive(Debug)]
pub struct Page {
    config: MotionConfig,
    coordinator: ScrollCoordinator,
    pointer: PointerTracker,
    views: SlotMap<ViewId, View>,
    order: Vec<ViewId>,
    scroll_to: Option<ScrollTo>,
    last_frame: Option<f64>,
}

impl Page {
    /// Page with a `width` x `height` viewport, resting at offset 0.
    pub fn new(config: MotionConfig, width: f64, height: f64) -> Self {
        Self {
            coordinator: ScrollCoordinator::new(
                config.direction_threshold,
                config.scrolled_threshold,
            ),
            pointer: PointerTracker::new(config.pointer_smoothing, width, height),
            config,
            views: SlotMap::with_key(),
            order: Vec::new(),
            scroll_to: None,
            last_frame: None,
        }
    }

    /// Start from `offset` (page restored mid-scroll).
    pub fn starting_at(mut self, offset: f64) -> Self {
        self.coordinator = self.coordinator.starting_at(offset);
        self
    }

    /// Page settings.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Latest scroll state.
    pub fn scroll(&self) -> ScrollState {
        self.coordinator.state()
    }

    /// Empty view positioned at the current scroll offset, ready to be filled and mounted.
    pub fn create_view(&self) -> View {
        View::mount(self.config.clone()).starting_at(self.coordinator.raw_offset())
    }

    /// Take ownership of `view`; it is updated every frame until unmounted.
    pub fn mount(&mut self, view: View) -> ViewId {
        let id = self.views.insert(view);
        self.order.push(id);
        id
    }

    /// Tear down a view. Unknown ids are a no-op.
    pub fn unmount(&mut self, id: ViewId) -> bool {
        match self.views.remove(id) {
            Some(mut view) => {
                view.unmount();
                self.order.retain(|&o| o != id);
                true
            }
            None => false,
        }
    }

    /// Tear down every view.
    pub fn unmount_all(&mut self) {
        for (_, mut view) in self.views.drain() {
            view.unmount();
        }
        self.order.clear();
    }

    /// Borrow a mounted view.
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    /// Mutably borrow a mounted view.
    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id)
    }

    /// Number of mounted views.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Raw scroll event. Returns `true` when the host must schedule a frame.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.coordinator.on_scroll(offset)
    }

    /// Raw pointer event, in viewport pixels.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.on_move(x, y);
    }

    /// Viewport resize; views should be refreshed afterwards.
    pub fn on_resize(&mut self, width: f64, height: f64, surface: &dyn Surface) {
        self.pointer.set_viewport(width, height);
        for view in self.views.values_mut() {
            view.refresh(surface);
        }
    }

    /// Start a programmatic smooth scroll, replacing any running one.
    pub fn scroll_to(&mut self, scroll: ScrollTo) {
        self.scroll_to = Some(scroll);
    }

    /// Whether a programmatic scroll is in flight.
    pub fn is_scrolling_to(&self) -> bool {
        self.scroll_to.is_some()
    }

    /// Run one animation frame at time `now` (seconds).
    #[tracing::instrument(level = "debug", skip_all, fields(now = now, views = self.order.len()))]
    pub fn frame(&mut self, now: f64, surface: &mut dyn Surface) -> FrameReport {
        let dt = self.last_frame.map_or(0.0, |t| (now - t).max(0.0));
        self.last_frame = Some(now);

        let scroll_to = self.step_scroll_to(dt, surface);

        let (scroll, scrolled) = match self.coordinator.on_frame(now, surface) {
            Some(state) => (state, true),
            None => (
                ScrollState {
                    velocity: 0.0,
                    delta: 0.0,
                    ..self.coordinator.state()
                },
                false,
            ),
        };
        let pointer = self.pointer.frame();

        let mut events = ViewEvents::default();
        for &id in &self.order {
            if let Some(view) = self.views.get_mut(id) {
                events.extend(view.update(&scroll, now, dt, surface));
            }
        }
        if !events.is_empty() {
            tracing::trace!(
                triggers = events.triggers.len(),
                batches = events.batches.len(),
                "frame events"
            );
        }

        FrameReport {
            scroll,
            scrolled,
            pointer,
            events,
            scroll_to,
        }
    }

    fn step_scroll_to(&mut self, dt: f64, surface: &mut dyn Surface) -> Option<ScrollToStatus> {
        let st = self.scroll_to.as_mut()?;
        let status = st.step(dt, self.coordinator.raw_offset(), surface);
        if status != ScrollToStatus::Interrupted {
            // The host would echo our write back as a scroll event.
            if let Some(written) = st.last_written() {
                self.coordinator.on_scroll(written);
            }
        }
        if status != ScrollToStatus::Running {
            tracing::debug!(?status, "programmatic scroll finished");
            self.scroll_to = None;
        }
        Some(status)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/page.rs"]
mod tests;
