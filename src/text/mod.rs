//! Text effects: splitting, counting, scrambling and waves.

/// Count-up number sampling.
pub mod count_up;
/// Frame-stepped scramble decoder.
pub mod scramble;
/// Grapheme and word splitting.
pub mod segment;
/// Scrubbed per-character wave offsets.
pub mod wave;
