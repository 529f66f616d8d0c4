//! Single-resolution weighted average, the baseline for multi-band output.
//!
//! ```text
//! result = target * mask + source * (1 - mask)
//! ```
//!
//! A hard mask edge produces a hard seam.

use crate::band::blend_level;
use crate::blender::{validate_inputs, Blender};
use crate::OpsResult;
use mbb_core::ImageBuf;
use tracing::debug;

/// Per-pixel blend at full resolution only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaiveBlending;

impl NaiveBlending {
    /// Creates the blender.
    pub fn new() -> Self {
        Self
    }
}

impl Blender for NaiveBlending {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn blend(&self, target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<ImageBuf> {
        blend(target, source, mask)
    }
}

/// Blends `target` over `source` with `mask` at full resolution.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`](crate::OpsError::ShapeMismatch) if the
/// shapes disagree.
///
/// # Example
///
/// ```rust
/// use mbb_core::ImageBuf;
/// use mbb_ops::naive;
///
/// let t = ImageBuf::filled(2, 1, &[1.0, 1.0, 1.0]).unwrap();
/// let s = ImageBuf::filled(2, 1, &[0.0, 0.0, 0.0]).unwrap();
/// let m = ImageBuf::from_data(2, 1, 1, vec![1.0, 0.25]).unwrap();
///
/// let out = naive::blend(&t, &s, &m).unwrap();
/// assert_eq!(out.pixel(0, 0), &[1.0, 1.0, 1.0]);
/// assert_eq!(out.pixel(1, 0), &[0.25, 0.25, 0.25]);
/// ```
pub fn blend(target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<ImageBuf> {
    validate_inputs(target, source, mask)?;
    debug!(w = target.width(), h = target.height(), "naive blend");
    blend_level(target, source, mask)
}
