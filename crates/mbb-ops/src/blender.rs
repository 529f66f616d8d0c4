//! Common contract for mask-driven two-image blends.

use crate::{OpsError, OpsResult};
use mbb_core::{ImageBuf, MASK_CHANNELS};

/// A blend of `target` and `source` under a per-pixel `mask`.
///
/// Mask convention: **1.0 selects the target, 0.0 selects the source**.
/// `target` and `source` must share shape; `mask` must share width and
/// height and have one channel.
pub trait Blender {
    /// Short name for logs and CLI output.
    fn name(&self) -> &'static str;

    /// Produces the composite, shaped like `target`.
    fn blend(&self, target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<ImageBuf>;
}

/// Checks the shared shape contract of every [`Blender`].
///
/// Runs before any pyramid work.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if target and source differ in height,
/// width, or channels, or if the mask differs in height/width or has more
/// than one channel.
pub fn validate_inputs(target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<()> {
    if target.shape() != source.shape() {
        return Err(OpsError::ShapeMismatch(format!(
            "target is {:?} but source is {:?} (height, width, channels)",
            target.shape(),
            source.shape()
        )));
    }
    if !mask.same_size(target) {
        return Err(OpsError::ShapeMismatch(format!(
            "mask is {}x{} but images are {}x{}",
            mask.width(),
            mask.height(),
            target.width(),
            target.height()
        )));
    }
    if mask.channels() != MASK_CHANNELS {
        return Err(OpsError::ShapeMismatch(format!(
            "mask must have 1 channel, got {}",
            mask.channels()
        )));
    }
    Ok(())
}
