/// Convenience result type used across vitae.
pub type VitaeResult<T> = Result<T, VitaeError>;

/// Top-level error taxonomy used by the document, layout, draft, and export APIs.
///
/// None of these are fatal to an editing session: callers surface
/// [`VitaeError::user_message`] and let the user retry.
#[derive(thiserror::Error, Debug)]
pub enum VitaeError {
    /// Rejected user input (oversized image, bad record index, bad config value).
    #[error("validation error: {0}")]
    Validation(String),

    /// Export was requested before any layout was rendered.
    #[error("render target missing: {0}")]
    RenderTargetMissing(String),

    /// Settle, rasterization, or PDF assembly failed. Carries the underlying cause.
    #[error("export failed: {0}")]
    Export(String),

    /// A second export was requested while one is still running.
    #[error("export already in progress")]
    ExportInFlight,

    /// The remote persistence service failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The operation needs an authenticated identity.
    #[error("not authenticated")]
    Unauthenticated,

    /// A remote document does not exist or is not visible to the caller.
    #[error("not found: {0}")]
    NotFound(String),

    /// The local key-value store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitaeError {
    /// Build a [`VitaeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VitaeError::RenderTargetMissing`] value.
    pub fn render_target_missing(msg: impl Into<String>) -> Self {
        Self::RenderTargetMissing(msg.into())
    }

    /// Build a [`VitaeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`VitaeError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`VitaeError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`VitaeError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`VitaeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Message suitable for showing to the person editing the resume.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::RenderTargetMissing(_) => {
                "Nothing to export yet: the resume preview has not been rendered.".to_string()
            }
            Self::Export(cause) => format!("Failed to generate PDF: {cause}"),
            Self::ExportInFlight => "A PDF export is already running.".to_string(),
            Self::Persistence(cause) => format!("Failed to save resume: {cause}"),
            Self::Unauthenticated => "Sign in to save your resume.".to_string(),
            Self::NotFound(_) => "Resume not found.".to_string(),
            Self::Storage(cause) => format!("Could not access local draft: {cause}"),
            Self::Serde(cause) => format!("Invalid resume data: {cause}"),
            Self::Other(e) => e.to_string(),
        }
    }

    /// Return `true` for failures the user can retry without changing anything.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Export(_) | Self::ExportInFlight | Self::Persistence(_) | Self::Storage(_)
        )
    }
}

impl From<serde_json::Error> for VitaeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
