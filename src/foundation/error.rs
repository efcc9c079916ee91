/// Convenience result alias used across the crate.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Error taxonomy for project validation, decoding, rendering and export.
#[derive(thiserror::Error, Debug)]
pub enum CarouselError {
    /// Input data (project, style, deck operation) is invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// A slide image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Compositing failed (surface allocation, missing fonts, layout).
    #[error("render error: {0}")]
    Render(String),

    /// A rendered slide could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Project JSON could not be read or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, usually IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CarouselError {
    /// Build a [`CarouselError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CarouselError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CarouselError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CarouselError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CarouselError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CarouselError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
