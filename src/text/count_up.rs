use crate::animation::ease::Ease;
use crate::foundation::core::Fps;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};

/// Integer count-up between two values (stat counters).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CountUp {
    /// Value shown first.
    pub start: i64,
    /// Value shown last.
    pub end: i64,
    /// Seconds from `start` to `end`.
    pub duration: f64,
    /// Ease applied to the elapsed fraction.
    pub ease: Ease,
}

impl CountUp {
    /// Count from `start` to `end` over `duration` seconds with `power2.out`.
    pub fn new(start: i64, end: i64, duration: f64) -> Self {
        Self {
            start,
            end,
            duration,
            ease: Ease::OutCubic,
        }
    }

    /// Override the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Reject negative or non-finite durations.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollfxError::validation(
                "count-up duration must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Displayed value `elapsed` seconds in.
    pub fn sample(&self, elapsed: f64) -> i64 {
        if self.duration <= 0.0 || elapsed >= self.duration {
            return self.end;
        }
        let t = if elapsed.is_nan() {
            0.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        };
        let eased = self.ease.apply(t);
        let (lo, hi) = (self.start.min(self.end), self.start.max(self.end));
        let v = self.start as f64 + (self.end as f64 - self.start as f64) * eased;
        (v.round() as i64).clamp(lo, hi)
    }

    /// One value per frame at `fps`, the last being exactly `end`.
    pub fn frames(&self, fps: Fps) -> Vec<i64> {
        if self.duration <= 0.0 {
            return vec![self.end];
        }
        let n = fps.secs_to_frames_floor(self.duration).max(1);
        let step = fps.frame_duration_secs();
        let mut out: Vec<i64> = (0..n).map(|i| self.sample(i as f64 * step)).collect();
        out.push(self.end);

        // Overshooting eases may step backwards; the displayed value never does.
        let rising = self.end >= self.start;
        for i in 1..out.len() {
            out[i] = if rising {
                out[i].max(out[i - 1])
            } else {
                out[i].min(out[i - 1])
            };
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/count_up.rs"]
mod tests;
