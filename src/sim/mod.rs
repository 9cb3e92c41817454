//! Headless simulation of scripted pages.

/// JSON scenarios and their event reports.
pub mod scenario;
