//! Tweens, timelines and the per-view timeline set.

/// Easing curves with GSAP names.
pub mod ease;
/// Timeline set: playback, overwrite and reduced motion.
pub mod set;
/// Deterministic random numbers for decoys and random staggers.
pub mod proc;
/// Per-target stagger offsets.
pub mod stagger;
/// Tween and timeline builders plus their playback state.
pub mod timeline;
/// Property interpolation.
pub mod value;
