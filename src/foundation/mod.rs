//! Shared primitives: node handles, style values, errors and hashing.

/// Node handles, style properties and values.
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;
