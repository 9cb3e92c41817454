/// Result alias used across the crate.
pub type ScrollfxResult<T> = Result<T, ScrollfxError>;

/// Errors raised while building or parsing animation descriptions.
///
/// Frame-time operations never return these: a detached node or an already-killed handle is a
/// silent no-op.
#[derive(thiserror::Error, Debug)]
pub enum ScrollfxError {
    /// A value failed a static check (negative duration, empty alphabet, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// An animation description could not be parsed (ease names, stagger settings).
    #[error("animation error: {0}")]
    Animation(String),

    /// A trigger region descriptor could not be parsed.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollfxError {
    /// Build a [`ScrollfxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollfxError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollfxError::Trigger`].
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`ScrollfxError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollfxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollfxError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
