/// Convenience result type used across the walkthrough engine.
pub type WalkthroughResult<T> = Result<T, WalkthroughError>;

/// Top-level error taxonomy used at the engine boundaries.
///
/// The per-frame path never returns errors: missing model data or missing sub-blocks simply
/// skip the dependent visual. Errors only surface while building the phase catalogue, loading
/// configuration, or reading and writing snapshots.
#[derive(thiserror::Error, Debug)]
pub enum WalkthroughError {
    /// Invalid configuration (phase catalogue, script registry, model shape).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid layout construction parameters.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing snapshots and configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WalkthroughError {
    /// Build a [`WalkthroughError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WalkthroughError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }
}

impl From<serde_json::Error> for WalkthroughError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
