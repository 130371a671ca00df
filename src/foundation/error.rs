/// Convenience result type used across badgekit.
pub type BadgeResult<T> = Result<T, BadgeError>;

/// Top-level error taxonomy used by the public APIs.
///
/// The geometry and color math never produce these; they document preconditions instead.
#[derive(thiserror::Error, Debug)]
pub enum BadgeError {
    /// Invalid user-provided parameters, rejected at the input boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster buffers or render targets that do not fit together.
    #[error("render error: {0}")]
    Render(String),

    /// Failure surfaced at the export pipeline boundary.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing jobs and manifests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeError {
    /// Build a [`BadgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BadgeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BadgeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`BadgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
