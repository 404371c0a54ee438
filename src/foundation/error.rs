/// Convenience result type used across trailpulse.
pub type TrailResult<T> = Result<T, TrailError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime misuse (unknown ids, out-of-range settings) never produces one of these; it is
/// absorbed where it happens. Errors are reserved for malformed boundary payloads.
#[derive(thiserror::Error, Debug)]
pub enum TrailError {
    /// Input with the wrong shape (e.g. an edge entry that is not a pair).
    #[error("validation error: {0}")]
    Validation(String),

    /// Settings payload that cannot be interpreted at all.
    #[error("settings error: {0}")]
    Settings(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl TrailError {
    /// Build a [`TrailError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrailError::Settings`] value.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Build a [`TrailError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
