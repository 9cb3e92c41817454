use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::batch::controller::BatchConfig;
use crate::foundation::core::Fps;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::text::scramble::CLASSIC_ALPHABET;

/// Page-wide motion settings, loaded from JSON.
///
/// Every field has a default, so `{}` is a valid config. Eases use their GSAP names
/// (`"power3.out"`, `"back.out(1.7)"`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Ease used by timelines that do not set their own.
    pub default_ease: Ease,
    /// Displacement (px) from the last extreme before the scroll direction flips.
    pub direction_threshold: f64,
    /// Offset (px) past which the body carries `data-scrolled`.
    pub scrolled_threshold: f64,
    /// Batch window in seconds.
    pub batch_interval: f64,
    /// Largest batch; `None` flushes whole windows.
    pub batch_max: Option<usize>,
    /// Frame rate for frame-stepped text effects.
    pub fps: Fps,
    /// Per-frame pointer interpolation factor in `(0, 1]`.
    pub pointer_smoothing: f64,
    /// Complete every animation immediately.
    pub reduced_motion: bool,
    /// Decoy characters for the scramble effect.
    pub scramble_alphabet: String,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_ease: Ease::DEFAULT,
            direction_threshold: 5.0,
            scrolled_threshold: 100.0,
            batch_interval: 0.1,
            batch_max: None,
            fps: Fps::display(),
            pointer_smoothing: 0.1,
            reduced_motion: false,
            scramble_alphabet: CLASSIC_ALPHABET.to_owned(),
        }
    }
}

impl MotionConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollfxResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollfxError::config(format!("parse motion config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollfxResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollfxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollfxError::config(format!("open motion config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.direction_threshold.is_finite() || self.direction_threshold < 0.0 {
            return Err(ScrollfxError::config(
                "direction_threshold must be finite and >= 0",
            ));
        }
        if !self.scrolled_threshold.is_finite() {
            return Err(ScrollfxError::config("scrolled_threshold must be finite"));
        }
        if !(self.pointer_smoothing > 0.0 && self.pointer_smoothing <= 1.0) {
            return Err(ScrollfxError::config("pointer_smoothing must be in (0, 1]"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ScrollfxError::config("fps must be > 0"));
        }
        if self.scramble_alphabet.is_empty() {
            return Err(ScrollfxError::config("scramble_alphabet must not be empty"));
        }
        self.batch()
            .validate()
            .map_err(|e| ScrollfxError::config(e.to_string()))
    }

    /// Batch settings carried by this config.
    pub fn batch(&self) -> BatchConfig {
        BatchConfig {
            interval: self.batch_interval,
            batch_max: self.batch_max,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
