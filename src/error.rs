use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MogSynthError>;

/// Every failure a user action can surface.
///
/// Errors are caught at the boundary of the action that triggered them
/// (generate, upload, lookup, submit) and rendered as a message; nothing
/// in the crate retries.
#[derive(Debug, Error)]
pub enum MogSynthError {
    /// Bad user input: oversized or unreadable file, malformed payload,
    /// out-of-domain parameter.
    #[error("{0}")]
    InvalidInput(String),

    /// The upload path failed to deflate the file bytes.
    #[error("Failed to compress file: {0}")]
    CompressionFailure(String),

    /// The offline render backend failed or is unavailable.
    #[error("Render failed: {0}")]
    RenderFailure(String),

    /// Library-address lookup or transaction submission failed.
    #[error("Network error: {0}")]
    NetworkFailure(String),
}

impl MogSynthError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        MogSynthError::InvalidInput(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        MogSynthError::RenderFailure(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        MogSynthError::NetworkFailure(msg.into())
    }
}

impl From<std::io::Error> for MogSynthError {
    fn from(e: std::io::Error) -> Self {
        log::warn!("file read failed: {e}");
        MogSynthError::InvalidInput("Failed to read file.".to_string())
    }
}

#[cfg(feature = "network")]
impl From<reqwest::Error> for MogSynthError {
    fn from(e: reqwest::Error) -> Self {
        MogSynthError::NetworkFailure(e.to_string())
    }
}
