use crate::foundation::core::Vec2;

/// Smoothed pointer position for mouse parallax.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PointerState {
    /// Smoothed position in viewport pixels.
    pub position: Vec2,
    /// Position mapped to `[-1, 1]` on both axes, y pointing up.
    pub normalized: Vec2,
}

/// Eases the tracked position toward the latest pointer position once per frame.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    smoothing: f64,
    viewport: Vec2,
    target: Vec2,
    current: Vec2,
}

impl PointerTracker {
    /// Tracker covering a `width` x `height` viewport. `smoothing` is the fraction of the
    /// remaining distance covered each frame.
    pub fn new(smoothing: f64, width: f64, height: f64) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 1.0),
            viewport: Vec2::new(width, height),
            target: Vec2::ZERO,
            current: Vec2::ZERO,
        }
    }

    /// Record the latest pointer position.
    pub fn on_move(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.target = Vec2::new(x, y);
        }
    }

    /// Viewport resize.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Vec2::new(width, height);
    }

    /// Advance one frame.
    pub fn frame(&mut self) -> PointerState {
        self.current += (self.target - self.current) * self.smoothing;
        self.state()
    }

    /// Current state without advancing.
    pub fn state(&self) -> PointerState {
        let norm = |v: f64, extent: f64| {
            if extent > 0.0 { v / extent * 2.0 - 1.0 } else { 0.0 }
        };
        PointerState {
            position: self.current,
            normalized: Vec2::new(
                norm(self.current.x, self.viewport.x),
                -norm(self.current.y, self.viewport.y),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/pointer.rs"]
mod tests;
