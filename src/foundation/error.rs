/// Convenience result type used across the studio core.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy used by the editor, generator, and persistence APIs.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// A row/column/module/frame index fell outside its valid bounds.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// An operation targeted a scene id that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// An operation was rejected without touching state: playback was active,
    /// or applying it would break a structural invariant.
    #[error("rejected: {0}")]
    Guard(String),

    /// A project file could not be read, parsed, or written.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`StudioError::InvalidReference`] value.
    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    /// Build a [`StudioError::Guard`] value.
    pub fn guard(msg: impl Into<String>) -> Self {
        Self::Guard(msg.into())
    }

    /// Build a [`StudioError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
