//! Host page access.

/// The [`surface::Surface`] capability trait and an in-memory implementation.
pub mod surface;
