use crate::animation::ease::Ease;
use crate::foundation::core::NodeId;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::render::surface::Surface;

/// Any offset further than this from the last written one counts as user input.
const AUTO_KILL_TOLERANCE_PX: f64 = 1.0;

/// Result of one [`ScrollTo::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollToStatus {
    /// Still moving.
    Running,
    /// Reached the destination.
    Done,
    /// The user scrolled meanwhile; the animation stopped where they left it.
    Interrupted,
}

/// Programmatic smooth scroll that yields to the user.
#[derive(Clone, Debug)]
pub struct ScrollTo {
    from: Option<f64>,
    to: f64,
    duration: f64,
    ease: Ease,
    elapsed: f64,
    last_written: Option<f64>,
    status: ScrollToStatus,
}

impl ScrollTo {
    /// Scroll to `offset` over `duration` seconds with `power3.inOut`.
    pub fn new(offset: f64, duration: f64) -> ScrollfxResult<Self> {
        if !offset.is_finite() {
            return Err(ScrollfxError::validation("scroll target must be finite"));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(ScrollfxError::validation(
                "scroll duration must be finite and >= 0",
            ));
        }
        Ok(Self {
            from: None,
            to: offset,
            duration,
            ease: Ease::InOutQuart,
            elapsed: 0.0,
            last_written: None,
            status: ScrollToStatus::Running,
        })
    }

    /// Scroll so `node`'s top sits `offset` pixels below the viewport top.
    pub fn to_node(
        node: NodeId,
        offset: f64,
        duration: f64,
        surface: &dyn Surface,
    ) -> ScrollfxResult<Self> {
        let bounds = surface
            .element_box(node)
            .ok_or_else(|| ScrollfxError::validation(format!("node {} is not attached", node.0)))?;
        Self::new((bounds.top - offset).clamp(0.0, surface.max_scroll()), duration)
    }

    /// Override the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Destination offset.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Latest status.
    pub fn status(&self) -> ScrollToStatus {
        self.status
    }

    /// Advance by `dt` given the offset the page currently reports.
    pub fn step(&mut self, dt: f64, observed: f64, surface: &mut dyn Surface) -> ScrollToStatus {
        if self.status != ScrollToStatus::Running {
            return self.status;
        }
        if let Some(written) = self.last_written {
            if (observed - written).abs() > AUTO_KILL_TOLERANCE_PX {
                tracing::debug!(observed, written, "smooth scroll interrupted by user");
                self.status = ScrollToStatus::Interrupted;
                return self.status;
            }
        }
        let from = *self.from.get_or_insert(observed);

        self.elapsed += if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let p = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        let value = if p >= 1.0 {
            self.to
        } else {
            from + (self.to - from) * self.ease.apply(p)
        };
        let value = value.clamp(0.0, surface.max_scroll());
        surface.set_scroll_offset(value);
        self.last_written = Some(value);

        if p >= 1.0 {
            self.status = ScrollToStatus::Done;
        }
        self.status
    }

    /// Offset written by the last step.
    pub fn last_written(&self) -> Option<f64> {
        self.last_written
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scroll_to.rs"]
mod tests;
