use std::fmt;

use crate::foundation::error::{ScrollfxError, ScrollfxResult};

/// Easing functions used to map normalized animation progress.
///
/// Names follow the GSAP convention used by the site (`power1` = quad, `power2` = cubic,
/// `power3` = quart) and round-trip through [`Ease::parse`] / [`fmt::Display`], which is also
/// how they (de)serialize.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation (`none`).
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Ease-out that overshoots the target before settling.
    OutBack {
        /// Overshoot strength; GSAP's default is `1.70158`.
        overshoot: f64,
    },
    /// Damped oscillation around the target.
    OutElastic {
        /// Peak amplitude (values below 1 are treated as 1).
        amplitude: f64,
        /// Oscillation period in normalized time.
        period: f64,
    },
}

impl Ease {
    /// The site's timeline default (`power3.out`).
    pub const DEFAULT: Self = Self::OutQuart;

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// Endpoints are exact: `apply(0) == 0` and `apply(1) == 1` for every variant.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutBack { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
            Self::OutElastic { amplitude, period } => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let a = amplitude.max(1.0);
                let p = if period > 0.0 { period } else { 0.3 };
                let tau = std::f64::consts::TAU;
                let s = p / tau * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * ((t - s) * tau / p).sin() + 1.0
            }
        }
    }

    /// Whether the curve can leave `[0, 1]` in between its endpoints.
    pub fn overshoots(self) -> bool {
        matches!(self, Self::OutBack { .. } | Self::OutElastic { .. })
    }

    /// Parse a GSAP-style ease name such as `power3.out`, `back.out(1.7)` or
    /// `elastic.out(1, 0.5)`.
    pub fn parse(s: &str) -> ScrollfxResult<Self> {
        let raw = s.trim();
        let (head, args) = match raw.find('(') {
            Some(open) => {
                let close = raw
                    .rfind(')')
                    .filter(|&c| c > open)
                    .ok_or_else(|| ScrollfxError::animation(format!("unbalanced ease '{raw}'")))?;
                (&raw[..open], Some(&raw[open + 1..close]))
            }
            None => (raw, None),
        };

        let args: Vec<f64> = match args {
            None => Vec::new(),
            Some(a) if a.trim().is_empty() => Vec::new(),
            Some(a) => a
                .split(',')
                .map(|p| {
                    p.trim().parse::<f64>().map_err(|_| {
                        ScrollfxError::animation(format!("invalid ease parameter in '{raw}'"))
                    })
                })
                .collect::<ScrollfxResult<_>>()?,
        };

        let (family, kind) = match head.split_once('.') {
            Some((f, k)) => (f, k),
            None => (head, "out"),
        };

        let ease = match (family.to_ascii_lowercase().as_str(), kind) {
            ("none" | "linear", _) => Self::Linear,
            ("power1" | "quad", "in") => Self::InQuad,
            ("power1" | "quad", "out") => Self::OutQuad,
            ("power1" | "quad", "inOut") => Self::InOutQuad,
            ("power2" | "cubic", "in") => Self::InCubic,
            ("power2" | "cubic", "out") => Self::OutCubic,
            ("power2" | "cubic", "inOut") => Self::InOutCubic,
            ("power3" | "quart", "in") => Self::InQuart,
            ("power3" | "quart", "out") => Self::OutQuart,
            ("power3" | "quart", "inOut") => Self::InOutQuart,
            ("sine", "inOut") => Self::InOutSine,
            ("back", "out") => Self::OutBack {
                overshoot: args.first().copied().unwrap_or(1.70158),
            },
            ("elastic", "out") => Self::OutElastic {
                amplitude: args.first().copied().unwrap_or(1.0),
                period: args.get(1).copied().unwrap_or(0.3),
            },
            _ => return Err(ScrollfxError::animation(format!("unknown ease '{raw}'"))),
        };
        Ok(ease)
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("none"),
            Self::InQuad => f.write_str("power1.in"),
            Self::OutQuad => f.write_str("power1.out"),
            Self::InOutQuad => f.write_str("power1.inOut"),
            Self::InCubic => f.write_str("power2.in"),
            Self::OutCubic => f.write_str("power2.out"),
            Self::InOutCubic => f.write_str("power2.inOut"),
            Self::InQuart => f.write_str("power3.in"),
            Self::OutQuart => f.write_str("power3.out"),
            Self::InOutQuart => f.write_str("power3.inOut"),
            Self::InOutSine => f.write_str("sine.inOut"),
            Self::OutBack { overshoot } => write!(f, "back.out({overshoot})"),
            Self::OutElastic { amplitude, period } => {
                write!(f, "elastic.out({amplitude}, {period})")
            }
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrollfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
