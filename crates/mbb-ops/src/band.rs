//! Per-band blending of two Laplacian pyramids.
//!
//! Each band is mixed with the Gaussian-smoothed mask at the same level:
//!
//! ```text
//! blended[i] = target[i] * mask[i] + source[i] * (1 - mask[i])
//! ```
//!
//! Mask value 1 selects the target, 0 selects the source. Because the mask
//! pyramid is itself blurred and halved, the transition zone widens at
//! coarse bands and stays narrow at fine ones.
//!
//! # Broadcast rule
//!
//! Masks have one channel; bands have `C` channels. The mask sample at pixel
//! `(x, y)` weights every channel of that pixel:
//!
//! ```text
//! mask_c(x, y, c) = mask(x, y, 0)   for c in 0..C
//! ```
//!
//! [`broadcast_mask`] materializes this rule; [`blend_level`] applies it
//! in place without allocating the broadcast copy.

use crate::pyramid::Pyramid;
use crate::{OpsError, OpsResult};
use mbb_core::{ImageBuf, MASK_CHANNELS};
use tracing::debug;

/// Expands a single-channel mask to `channels` channels.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if `mask` has more than one channel.
pub fn broadcast_mask(mask: &ImageBuf, channels: usize) -> OpsResult<ImageBuf> {
    if mask.channels() != MASK_CHANNELS {
        return Err(OpsError::ShapeMismatch(format!(
            "mask must have 1 channel, got {}",
            mask.channels()
        )));
    }
    Ok(mask.broadcast(channels)?)
}

/// Mixes one target band with one source band under one mask level.
///
/// # Errors
///
/// [`OpsError::ShapeMismatch`] if target and source differ in shape, or the
/// mask differs in width/height or is not single-channel.
pub fn blend_level(target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<ImageBuf> {
    check_level_shapes(target, source, mask)?;

    let channels = target.channels();
    let mut out = ImageBuf::new(target.width(), target.height(), channels)?;
    let pixels = out
        .data_mut()
        .chunks_exact_mut(channels)
        .zip(target.data().chunks_exact(channels))
        .zip(source.data().chunks_exact(channels))
        .zip(mask.data());

    for (((dst, t), s), &m) in pixels {
        let inv = 1.0 - m;
        for c in 0..channels {
            dst[c] = t[c] * m + s[c] * inv;
        }
    }
    Ok(out)
}

/// Blends two Laplacian pyramids level by level with a Gaussian mask pyramid.
///
/// # Errors
///
/// [`OpsError::LevelMismatch`] if the three pyramids differ in length;
/// [`OpsError::ShapeMismatch`] if any level disagrees in shape.
pub fn blend(lap_target: &Pyramid, lap_source: &Pyramid, gauss_mask: &Pyramid) -> OpsResult<Pyramid> {
    if lap_target.len() != lap_source.len() || lap_target.len() != gauss_mask.len() {
        return Err(OpsError::LevelMismatch(format!(
            "target has {} levels, source {}, mask {}",
            lap_target.len(),
            lap_source.len(),
            gauss_mask.len()
        )));
    }

    let levels = lap_target
        .iter()
        .zip(lap_source)
        .zip(gauss_mask)
        .enumerate()
        .map(|(i, ((t, s), m))| {
            blend_level(t, s, m).map_err(|e| match e {
                OpsError::ShapeMismatch(msg) => {
                    OpsError::ShapeMismatch(format!("level {}: {}", i, msg))
                }
                other => other,
            })
        })
        .collect::<OpsResult<Vec<_>>>()?;

    debug!(levels = levels.len(), "blended band pyramid");
    Pyramid::from_levels(levels)
}

fn check_level_shapes(target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<()> {
    if target.shape() != source.shape() {
        return Err(OpsError::ShapeMismatch(format!(
            "target {:?} vs source {:?}",
            target.shape(),
            source.shape()
        )));
    }
    if !mask.same_size(target) || mask.channels() != MASK_CHANNELS {
        return Err(OpsError::ShapeMismatch(format!(
            "mask {:?} does not fit target {:?}",
            mask.shape(),
            target.shape()
        )));
    }
    Ok(())
}
