//! Lifecycle scopes: views own animation state, the page drives them every frame.

/// A mounted view.
pub mod mount;
/// The page frame loop.
pub mod page;
