use crate::render::surface::Surface;

/// Body attribute present while the page is scrolled past the threshold.
pub const SCROLLED_ATTRIBUTE: &str = "data-scrolled";

/// Vertical scroll direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the top of the document.
    Up,
    /// Toward the bottom of the document.
    Down,
    /// No movement seen yet.
    #[default]
    None,
}

impl Direction {
    /// Whether the user is scrolling back up.
    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

/// Scroll position, direction and speed of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Scroll offset in pixels.
    pub offset: f64,
    /// Direction after hysteresis.
    pub direction: Direction,
    /// Absolute speed in px/s.
    pub velocity: f64,
    /// Signed displacement since the previous frame.
    pub delta: f64,
}

impl ScrollState {
    /// Resting state at `offset`.
    pub fn at(offset: f64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }
}

/// Coalesces raw scroll events into one [`ScrollState`] per animation frame.
#[derive(Clone, Debug)]
pub struct ScrollCoordinator {
    direction_threshold: f64,
    scrolled_threshold: f64,
    raw: f64,
    pending: bool,
    state: ScrollState,
    last_time: Option<f64>,
    extreme: f64,
    scrolled: bool,
}

impl ScrollCoordinator {
    /// Coordinator resting at offset 0.
    ///
    /// `direction_threshold` is the displacement (px) from the last extreme required before
    /// the direction flips; `scrolled_threshold` is the offset past which `data-scrolled` is
    /// set on the body.
    pub fn new(direction_threshold: f64, scrolled_threshold: f64) -> Self {
        Self {
            direction_threshold: direction_threshold.max(0.0),
            scrolled_threshold,
            raw: 0.0,
            pending: false,
            state: ScrollState::default(),
            last_time: None,
            extreme: 0.0,
            scrolled: false,
        }
    }

    /// Start from `offset` instead of 0 (page restored mid-scroll).
    pub fn starting_at(mut self, offset: f64) -> Self {
        self.raw = offset;
        self.state = ScrollState::at(offset);
        self.extreme = offset;
        self
    }

    /// Latest raw offset seen.
    pub fn raw_offset(&self) -> f64 {
        self.raw
    }

    /// State computed by the last frame.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Whether a frame has been requested and not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a raw scroll event. Returns `true` only for the first event since the last
    /// frame, i.e. when the host must schedule a frame.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if !offset.is_finite() {
            return false;
        }
        self.raw = offset;
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Recompute the scroll state if an event arrived since the last frame.
    pub fn on_frame(&mut self, now: f64, surface: &mut dyn Surface) -> Option<ScrollState> {
        if !self.pending {
            return None;
        }
        self.pending = false;

        let offset = self.raw;
        let delta = offset - self.state.offset;
        let dt = self.last_time.map_or(0.0, |t| now - t);
        let velocity = if dt > 0.0 { delta.abs() / dt } else { 0.0 };
        self.last_time = Some(now);

        let direction = self.next_direction(offset);
        if direction != self.state.direction {
            tracing::debug!(?direction, offset, "scroll direction changed");
        }

        let scrolled = offset > self.scrolled_threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            surface.set_body_attribute(SCROLLED_ATTRIBUTE, scrolled);
        }

        self.state = ScrollState {
            offset,
            direction,
            velocity,
            delta,
        };
        Some(self.state)
    }

    fn next_direction(&mut self, offset: f64) -> Direction {
        let threshold = self.direction_threshold;
        match self.state.direction {
            Direction::Down => {
                if offset > self.extreme {
                    self.extreme = offset;
                } else if self.extreme - offset > threshold {
                    self.extreme = offset;
                    return Direction::Up;
                }
                Direction::Down
            }
            Direction::Up => {
                if offset < self.extreme {
                    self.extreme = offset;
                } else if offset - self.extreme > threshold {
                    self.extreme = offset;
                    return Direction::Down;
                }
                Direction::Up
            }
            Direction::None => {
                let moved = offset - self.extreme;
                if moved.abs() > threshold {
                    self.extreme = offset;
                    if moved > 0.0 {
                        Direction::Down
                    } else {
                        Direction::Up
                    }
                } else {
                    Direction::None
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/coordinator.rs"]
mod tests;
