//! Viewport triggers.

/// Start/end region parsing and resolution.
pub mod region;
/// Trigger registry: phases, transitions, scrub and toggle actions.
pub mod registry;
