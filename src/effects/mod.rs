//! Ready-made scroll effects built on triggers and timelines.
//!
//! Each preset returns [`Trigger`](crate::trigger::registry::Trigger) builders or
//! [`Timeline`](crate::animation::timeline::Timeline)s; register them through a
//! [`View`](crate::view::mount::View).

/// Direction-aware presets: unblur, card flips, background shifts, parallax, rewind bars.
pub mod direction;
/// Idle floating loops.
pub mod float;
/// Glow shadows driven by progress.
pub mod glow;
/// Scroll progress ring and scroll-to-top.
pub mod progress;
/// Reveal presets.
pub mod reveal;
