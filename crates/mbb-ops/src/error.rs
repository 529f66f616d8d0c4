//! Error types for blending operations.

use thiserror::Error;

/// Error type for resampling, pyramid, and blending operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Target, source, mask, or pyramid levels have incompatible shapes.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Requested level count would halve a dimension down to zero.
    #[error(
        "invalid level count {requested} for {width}x{height} input (maximum is {max})"
    )]
    InvalidLevels {
        /// Levels requested by the caller.
        requested: usize,
        /// `floor(log2(min(height, width)))` of the input.
        max: usize,
        /// Input height.
        height: usize,
        /// Input width.
        width: usize,
    },

    /// Pyramids passed to a per-level operation have different lengths.
    #[error("level count mismatch: {0}")]
    LevelMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer-level error from mbb-core.
    #[error(transparent)]
    Core(#[from] mbb_core::Error),
}

impl OpsError {
    /// Returns `true` for errors raised because inputs disagree in shape.
    pub fn is_shape_error(&self) -> bool {
        match self {
            Self::ShapeMismatch(_) | Self::LevelMismatch(_) => true,
            Self::Core(e) => e.is_shape_error(),
            _ => false,
        }
    }

    /// Returns `true` for errors raised because a size or level count is out
    /// of range.
    pub fn is_size_error(&self) -> bool {
        matches!(self, Self::InvalidLevels { .. } | Self::InvalidDimensions(_))
    }
}

/// Result type for blending operations.
pub type OpsResult<T> = Result<T, OpsError>;
