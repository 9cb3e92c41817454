use crate::animation::ease::Ease;
use crate::animation::proc::Rng64;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};

/// Where a stagger starts propagating from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    /// First target moves first.
    Start,
    /// Last target moves first (used for the reversed re-reveal on upward scroll).
    End,
    /// Middle targets move first.
    Center,
    /// Outermost targets move first.
    Edges,
    /// Shuffled order (seeded).
    Random,
    /// Distance from a specific index.
    Index(usize),
    /// `|sin(i * frequency)| * amplitude` seconds per target, ignoring the amount.
    Wave {
        /// Angular step between consecutive targets.
        frequency: f64,
        /// Peak delay in seconds.
        amplitude: f64,
    },
}

/// How the stagger amount is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerAmount {
    /// Seconds between adjacent targets.
    Each(f64),
    /// Seconds split across all targets.
    Total(f64),
}

/// Delay distribution across the targets of one tween.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Spacing between targets.
    pub amount: StaggerAmount,
    /// Propagation origin.
    pub from: StaggerFrom,
    /// Ease applied to the normalized distance before scaling.
    pub ease: Ease,
    /// Seed for [`StaggerFrom::Random`].
    pub seed: u64,
}

impl Stagger {
    /// Fixed spacing of `secs` between adjacent targets.
    pub fn each(secs: f64) -> Self {
        Self {
            amount: StaggerAmount::Each(secs),
            from: StaggerFrom::Start,
            ease: Ease::Linear,
            seed: 0,
        }
    }

    /// `secs` split across all targets.
    pub fn total(secs: f64) -> Self {
        Self {
            amount: StaggerAmount::Total(secs),
            ..Self::each(0.0)
        }
    }

    /// Sine-wave delays (`|sin(i * frequency)| * amplitude`).
    pub fn wave(frequency: f64, amplitude: f64) -> Self {
        Self {
            from: StaggerFrom::Wave {
                frequency,
                amplitude,
            },
            ..Self::each(0.0)
        }
    }

    /// Set the propagation origin.
    pub fn from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    /// Set the distribution ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the seed used by random ordering.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject negative or non-finite amounts.
    pub fn validate(&self) -> ScrollfxResult<()> {
        let v = match self.amount {
            StaggerAmount::Each(v) | StaggerAmount::Total(v) => v,
        };
        if !v.is_finite() || v < 0.0 {
            return Err(ScrollfxError::animation(
                "stagger amount must be finite and >= 0",
            ));
        }
        if let StaggerFrom::Wave { amplitude, .. } = self.from {
            if !amplitude.is_finite() {
                return Err(ScrollfxError::animation("stagger wave amplitude must be finite"));
            }
        }
        Ok(())
    }

    /// Per-target start delays in seconds for `count` targets.
    pub fn delays(&self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }

        if let StaggerFrom::Wave {
            frequency,
            amplitude,
        } = self.from
        {
            return (0..count)
                .map(|i| ((i as f64) * frequency).sin().abs() * amplitude.abs())
                .collect();
        }

        let last = (count - 1) as f64;
        let mid = last / 2.0;
        let distances: Vec<f64> = match self.from {
            StaggerFrom::Start => (0..count).map(|i| i as f64).collect(),
            StaggerFrom::End => (0..count).map(|i| last - i as f64).collect(),
            StaggerFrom::Center => (0..count).map(|i| (i as f64 - mid).abs()).collect(),
            StaggerFrom::Edges => (0..count).map(|i| mid - (i as f64 - mid).abs()).collect(),
            StaggerFrom::Index(k) => (0..count).map(|i| (i as f64 - k as f64).abs()).collect(),
            StaggerFrom::Random => {
                let mut order: Vec<usize> = (0..count).collect();
                Rng64::new(self.seed).shuffle(&mut order);
                order.into_iter().map(|d| d as f64).collect()
            }
            StaggerFrom::Wave { .. } => unreachable!("handled above"),
        };

        let max = distances.iter().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return vec![0.0; count];
        }

        let total = match self.amount {
            StaggerAmount::Each(each) => each * max,
            StaggerAmount::Total(total) => total,
        };

        distances
            .into_iter()
            .map(|d| (self.ease.apply(d / max) * total).max(0.0))
            .collect()
    }

    /// Largest delay produced for `count` targets.
    pub fn span(&self, count: usize) -> f64 {
        self.delays(count).into_iter().fold(0.0, f64::max)
    }
}

/// Named distributions the site uses for grids and card rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerPreset {
    /// From the middle, `back.out(1.7)`.
    Center,
    /// From the edges, `back.out(2)`.
    Edges,
    /// From the first target, `power2.out`.
    Start,
    /// From the last target, `power2.out`.
    End,
    /// Shuffled, `power3.out`.
    Random,
}

impl StaggerPreset {
    /// Build the preset with `each` seconds between adjacent targets.
    pub fn with_each(self, each: f64) -> Stagger {
        let (from, ease) = match self {
            Self::Center => (StaggerFrom::Center, Ease::OutBack { overshoot: 1.7 }),
            Self::Edges => (StaggerFrom::Edges, Ease::OutBack { overshoot: 2.0 }),
            Self::Start => (StaggerFrom::Start, Ease::OutCubic),
            Self::End => (StaggerFrom::End, Ease::OutCubic),
            Self::Random => (StaggerFrom::Random, Ease::OutQuart),
        };
        Stagger::each(each).from(from).ease(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
