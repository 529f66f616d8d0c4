//! Collapsing a band pyramid back into one image.
//!
//! ```text
//! acc = bands[L]
//! for i in L-1 ..= 0:
//!     acc = upsample(acc, shape of bands[i]) + bands[i]
//! ```
//!
//! Output is not clamped. Band sums can leave `[0, 1]`; display code is
//! expected to normalize.

use crate::pyramid::Pyramid;
use crate::resample::upsample;
use crate::OpsResult;
use mbb_core::ImageBuf;
use tracing::trace;

/// Reconstructs the finest-level image from a Laplacian (or blended) pyramid.
///
/// The result has the shape of level 0.
///
/// # Errors
///
/// Propagates buffer errors from the upsample-and-add steps. A [`Pyramid`]
/// never mixes channel counts, so these do not occur for built pyramids.
///
/// # Example
///
/// ```rust
/// use mbb_core::ImageBuf;
/// use mbb_ops::pyramid::build_laplacian;
/// use mbb_ops::reconstruct::reconstruct;
///
/// let img = ImageBuf::from_fn(20, 12, 3, |x, y, c| ((x + y + c) % 4) as f32 / 3.0).unwrap();
/// let back = reconstruct(&build_laplacian(&img, 3).unwrap()).unwrap();
/// assert!(back.max_abs_diff(&img).unwrap() < 1e-5);
/// ```
pub fn reconstruct(pyramid: &Pyramid) -> OpsResult<ImageBuf> {
    let levels = pyramid.levels();
    let mut acc = pyramid.coarsest().clone();

    for (i, band) in levels.iter().enumerate().rev().skip(1) {
        let expanded = upsample(&acc, band.height(), band.width())?;
        acc = expanded.add(band)?;
        trace!(level = i, w = acc.width(), h = acc.height(), "reconstructed level");
    }
    Ok(acc)
}
