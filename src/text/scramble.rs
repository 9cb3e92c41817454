use unicode_segmentation::UnicodeSegmentation;

use crate::animation::proc::Rng64;
use crate::foundation::core::Fps;
use crate::foundation::error::{ScrollfxError, ScrollfxResult};

/// Decoy characters of the classic scramble.
pub const CLASSIC_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Decoy characters of the block-glyph wave scramble.
pub const WAVE_ALPHABET: &str = "XO10▓█░▒ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Scramble reveal parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    /// Seconds at `speed == 1`.
    pub duration: f64,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Decoy characters.
    pub alphabet: String,
    /// Reveal offset of the last character, as a fraction of the run.
    pub reveal_delay: f64,
    /// Add a `sin(i * 0.3) * 0.1` offset per character.
    pub wave: bool,
    /// Frame rate the frames are produced at.
    pub fps: Fps,
    /// Seed for decoy selection.
    pub seed: u64,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl ScrambleConfig {
    /// Left-to-right reveal over the alphanumeric alphabet.
    pub fn classic() -> Self {
        Self {
            duration: 1.5,
            speed: 1.0,
            alphabet: CLASSIC_ALPHABET.to_owned(),
            reveal_delay: 0.3,
            wave: false,
            fps: Fps::display(),
            seed: 0,
        }
    }

    /// Fast, wavy reveal over block glyphs.
    pub fn wave() -> Self {
        Self {
            alphabet: WAVE_ALPHABET.to_owned(),
            reveal_delay: 0.05,
            wave: true,
            ..Self::classic()
        }
    }

    /// Override the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total frames: `floor(duration / speed * fps)`.
    pub fn total_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.duration / self.speed)
    }

    /// Reject unusable timings or an empty alphabet.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollfxError::validation(
                "scramble duration must be finite and >= 0",
            ));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ScrollfxError::validation("scramble speed must be > 0"));
        }
        if !self.reveal_delay.is_finite() || !(0.0..1.0).contains(&self.reveal_delay) {
            return Err(ScrollfxError::validation(
                "scramble reveal_delay must be in [0, 1)",
            ));
        }
        if self.alphabet.is_empty() {
            return Err(ScrollfxError::validation("scramble alphabet must not be empty"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ScrollfxError::validation("scramble fps must be > 0"));
        }
        Ok(())
    }
}

/// Frame-by-frame scramble of a target string.
///
/// Each character shows random decoys until its local progress reaches 1, then freezes on
/// its final value. Whitespace is never scrambled. The last frame is the target verbatim.
#[derive(Clone, Debug)]
pub struct Scrambler {
    target: String,
    chars: Vec<String>,
    alphabet: Vec<char>,
    offsets: Vec<f64>,
    window: f64,
    frozen: Vec<bool>,
    frame: u64,
    total_frames: u64,
    frame_secs: f64,
    rng: Rng64,
    finished: bool,
}

impl Scrambler {
    /// Validate `config` and prepare the frames for `target`.
    pub fn new(target: &str, config: ScrambleConfig) -> ScrollfxResult<Self> {
        config.validate()?;
        let chars: Vec<String> = target.graphemes(true).map(str::to_owned).collect();
        let len = chars.len().max(1) as f64;
        let offsets: Vec<f64> = (0..chars.len())
            .map(|i| {
                let wave = if config.wave {
                    (i as f64 * 0.3).sin() * 0.1
                } else {
                    0.0
                };
                (wave + config.reveal_delay * i as f64 / len).max(0.0)
            })
            .collect();
        let max_offset = offsets.iter().copied().fold(0.0, f64::max);
        // Stretch the per-character window so the last character still reaches 1.
        let window = (1.0 - max_offset).max(f64::EPSILON);

        Ok(Self {
            target: target.to_owned(),
            frozen: vec![false; chars.len()],
            chars,
            alphabet: config.alphabet.chars().collect(),
            offsets,
            window,
            frame: 0,
            total_frames: config.total_frames(),
            frame_secs: config.fps.frame_duration_secs(),
            rng: Rng64::new(config.seed),
            finished: false,
        })
    }

    /// Target text.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of frames before the final one.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Seconds each frame stays on screen.
    pub fn frame_duration_secs(&self) -> f64 {
        self.frame_secs
    }

    /// Whether the final frame has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Next displayed string, or `None` once the target has been shown.
    pub fn next_frame(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        if self.frame >= self.total_frames {
            self.finished = true;
            self.frozen.iter_mut().for_each(|f| *f = true);
            return Some(self.target.clone());
        }

        let progress = self.frame as f64 / self.total_frames as f64;
        let mut out = String::with_capacity(self.target.len());
        for (i, ch) in self.chars.iter().enumerate() {
            if self.frozen[i] || ch.chars().all(char::is_whitespace) {
                out.push_str(ch);
                continue;
            }
            let local = ((progress - self.offsets[i]) / self.window).clamp(0.0, 1.0);
            if local >= 1.0 {
                self.frozen[i] = true;
                out.push_str(ch);
            } else {
                out.push(self.alphabet[self.rng.next_index(self.alphabet.len())]);
            }
        }
        self.frame += 1;
        Some(out)
    }
}

impl Iterator for Scrambler {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/scramble.rs"]
mod tests;
