/// Convenience result type used across the preview renderer.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Top-level error taxonomy used by renderer APIs.
///
/// Most failure modes in the preview path (font loads, poster loads, single
/// text elements) are recovered locally and never surface here; these
/// variants cover invalid input data and genuine raster-pipeline failures.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// Invalid user-provided style or canvas data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or decoding an asset (poster image, font file).
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rasterizing a frame.
    #[error("draw error: {0}")]
    Draw(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreviewError {
    /// Build a [`PreviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PreviewError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PreviewError::Draw`] value.
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
