use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilmError {
    #[error("GPU unavailable: {message}")]
    GpuUnavailable { message: String },

    #[error("Surface readback failed: {message}")]
    ReadbackFailed { message: String },

    #[error("JPEG encoding failed: {message}")]
    EncodingFailed { message: String },
}

pub type Result<T> = std::result::Result<T, FilmError>;

impl FilmError {
    /// Returns true if retrying in another context (new renderer, smaller
    /// image) can reasonably succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FilmError::ReadbackFailed { .. } | FilmError::EncodingFailed { .. }
        )
    }

    /// Returns an error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FilmError::GpuUnavailable { .. } => "GPU_UNAVAILABLE",
            FilmError::ReadbackFailed { .. } => "READBACK_FAILED",
            FilmError::EncodingFailed { .. } => "ENCODING_FAILED",
        }
    }
}
