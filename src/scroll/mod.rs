//! Scroll and pointer input.

/// Per-frame scroll state and direction detection.
pub mod coordinator;
/// Values chosen by scroll direction.
pub mod directional;
/// Smoothed pointer tracking for parallax.
pub mod pointer;
/// Programmatic smooth scrolling.
pub mod scroll_to;
