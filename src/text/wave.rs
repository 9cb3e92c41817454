use std::f64::consts::PI;

/// Shape of a scrubbed per-character wave.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveShape {
    /// Half-turns of the wave over the full scroll progress.
    pub cycles: f64,
    /// Phase step between consecutive characters, in radians.
    pub phase_step: f64,
    /// Peak offset in pixels.
    pub amplitude: f64,
}

impl WaveShape {
    /// Headline wave: one full turn, 10 px.
    pub const HEADLINE: Self = Self {
        cycles: 2.0,
        phase_step: 0.3,
        amplitude: 10.0,
    };

    /// Section wave: one and a half turns, 15 px.
    pub const SECTION: Self = Self {
        cycles: 3.0,
        phase_step: 0.2,
        amplitude: 15.0,
    };

    /// Offsets for `count` characters at scroll `progress`.
    pub fn offsets(self, count: usize, progress: f64) -> Vec<f64> {
        wave_offsets(count, progress, self.cycles, self.phase_step, self.amplitude)
    }
}

/// `sin(progress * cycles * PI + i * phase_step) * amplitude` for each of `count` characters.
pub fn wave_offsets(
    count: usize,
    progress: f64,
    cycles: f64,
    phase_step: f64,
    amplitude: f64,
) -> Vec<f64> {
    let base = progress * cycles * PI;
    (0..count)
        .map(|i| (base + i as f64 * phase_step).sin() * amplitude)
        .collect()
}
