/// Convenience result type used across photostrip.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by booth APIs.
///
/// Operations that are only reachable through UI races (capturing while busy, retaking an empty
/// strip) are silent no-ops and never produce one of these.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Camera or frame acquisition failed; the session stays ready and no frame is stored.
    #[error("device error: {0}")]
    Device(String),

    /// Overlay resource is missing or could not be decoded; the prior overlay stays active.
    #[error("load error: {0}")]
    Load(String),

    /// Invalid configuration or an operation whose preconditions do not hold.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while serializing the final strip.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Device`] value.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Build a [`BoothError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for acquisition failures.
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }

    /// Return `true` for overlay load failures.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
