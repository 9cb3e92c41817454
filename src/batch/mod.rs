//! Batched viewport reveals.

/// Batch controller.
pub mod controller;
