//! Gaussian and Laplacian image pyramids.
//!
//! A [`Pyramid`] is an ordered, owned sequence of levels; index 0 is the
//! finest (input resolution) and the last index is the coarsest. A pyramid
//! built with `num_levels` halvings always holds `num_levels + 1` levels.
//!
//! ```text
//! gaussian[0] = input
//! gaussian[i] = downsample(gaussian[i - 1])
//!
//! laplacian[i] = gaussian[i] - upsample(gaussian[i + 1], shape of gaussian[i])
//! laplacian[L] = gaussian[L]
//! ```
//!
//! Collapsing a Laplacian pyramid with
//! [`reconstruct`](crate::reconstruct::reconstruct) gives back the input up
//! to float round-off.
//!
//! # Example
//!
//! ```rust
//! use mbb_core::ImageBuf;
//! use mbb_ops::pyramid::{build_laplacian, max_levels};
//!
//! let img = ImageBuf::filled(64, 48, &[0.5, 0.5, 0.5]).unwrap();
//! let levels = max_levels(img.height(), img.width()).unwrap();
//! assert_eq!(levels, 5);
//!
//! let lap = build_laplacian(&img, levels).unwrap();
//! assert_eq!(lap.len(), 6);
//! assert_eq!(lap.coarsest().dimensions(), (2, 1));
//! ```

use crate::resample::{downsample, upsample};
use crate::{OpsError, OpsResult};
use mbb_core::ImageBuf;
use tracing::trace;

/// Ordered pyramid levels, finest first.
///
/// Never empty, and every level has the same channel count. Levels are
/// read-only once the pyramid is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    levels: Vec<ImageBuf>,
}

impl Pyramid {
    /// Wraps pre-built levels.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `levels` is empty;
    /// [`OpsError::ShapeMismatch`] if channel counts differ between levels.
    pub fn from_levels(levels: Vec<ImageBuf>) -> OpsResult<Self> {
        let Some(first) = levels.first() else {
            return Err(OpsError::InvalidParameter(
                "pyramid needs at least one level".into(),
            ));
        };
        let channels = first.channels();
        if let Some((i, bad)) = levels
            .iter()
            .enumerate()
            .find(|(_, l)| l.channels() != channels)
        {
            return Err(OpsError::ShapeMismatch(format!(
                "level {} has {} channels, level 0 has {}",
                i,
                bad.channels(),
                channels
            )));
        }
        Ok(Self { levels })
    }

    /// Number of stored levels (`num_levels + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of halvings between the finest and the coarsest level.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len() - 1
    }

    /// Channel count shared by all levels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.levels[0].channels()
    }

    /// Level `i`, or `None` past the coarsest.
    #[inline]
    pub fn level(&self, i: usize) -> Option<&ImageBuf> {
        self.levels.get(i)
    }

    /// All levels, finest first.
    #[inline]
    pub fn levels(&self) -> &[ImageBuf] {
        &self.levels
    }

    /// Level 0.
    #[inline]
    pub fn finest(&self) -> &ImageBuf {
        &self.levels[0]
    }

    /// The last level.
    #[inline]
    pub fn coarsest(&self) -> &ImageBuf {
        &self.levels[self.levels.len() - 1]
    }

    /// Iterates finest to coarsest.
    pub fn iter(&self) -> std::slice::Iter<'_, ImageBuf> {
        self.levels.iter()
    }

    /// `(width, height)` of every level.
    pub fn sizes(&self) -> Vec<(usize, usize)> {
        self.levels.iter().map(ImageBuf::dimensions).collect()
    }

    /// Consumes the pyramid, returning its levels.
    pub fn into_levels(self) -> Vec<ImageBuf> {
        self.levels
    }
}

impl<'a> IntoIterator for &'a Pyramid {
    type Item = &'a ImageBuf;
    type IntoIter = std::slice::Iter<'a, ImageBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// Largest usable level count for a `height` x `width` input:
/// `floor(log2(min(height, width)))`.
///
/// One more halving would take the short side below one pixel.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if either dimension is zero.
///
/// # Example
///
/// ```rust
/// use mbb_ops::pyramid::max_levels;
///
/// assert_eq!(max_levels(64, 64).unwrap(), 6);
/// assert_eq!(max_levels(480, 640).unwrap(), 8);
/// assert_eq!(max_levels(1, 100).unwrap(), 0);
/// ```
pub fn max_levels(height: usize, width: usize) -> OpsResult<usize> {
    let short = height.min(width);
    if short == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot build a pyramid for a {}x{} input",
            width, height
        )));
    }
    Ok(short.ilog2() as usize)
}

/// Checks `num_levels` against [`max_levels`] for `signal`.
///
/// # Errors
///
/// [`OpsError::InvalidLevels`] if `num_levels` is too large.
pub fn check_levels(signal: &ImageBuf, num_levels: usize) -> OpsResult<()> {
    let (width, height) = signal.dimensions();
    let max = max_levels(height, width)?;
    if num_levels > max {
        return Err(OpsError::InvalidLevels {
            requested: num_levels,
            max,
            height,
            width,
        });
    }
    Ok(())
}

/// Builds a Gaussian pyramid with `num_levels + 1` levels.
///
/// Level 0 is a copy of `signal`; each next level is
/// [`downsample`] of the previous one.
///
/// # Errors
///
/// [`OpsError::InvalidLevels`] if `num_levels > max_levels(h, w)`.
pub fn build_gaussian(signal: &ImageBuf, num_levels: usize) -> OpsResult<Pyramid> {
    check_levels(signal, num_levels)?;

    let mut levels = Vec::with_capacity(num_levels + 1);
    levels.push(signal.clone());
    for i in 0..num_levels {
        let next = downsample(&levels[i]);
        trace!(level = i + 1, w = next.width(), h = next.height(), "gaussian level");
        levels.push(next);
    }
    Pyramid::from_levels(levels)
}

/// Builds a Laplacian pyramid with `num_levels + 1` levels.
///
/// Every level but the last holds the detail lost between two Gaussian
/// levels; the last holds the coarsest Gaussian level unchanged.
///
/// # Errors
///
/// [`OpsError::InvalidLevels`] if `num_levels > max_levels(h, w)`.
pub fn build_laplacian(signal: &ImageBuf, num_levels: usize) -> OpsResult<Pyramid> {
    let gaussian = build_gaussian(signal, num_levels)?;
    laplacian_from_gaussian(gaussian)
}

/// Derives the Laplacian pyramid from an already-built Gaussian one.
pub fn laplacian_from_gaussian(gaussian: Pyramid) -> OpsResult<Pyramid> {
    let mut gauss = gaussian.into_levels();
    let coarsest = gauss.pop().ok_or_else(|| {
        OpsError::InvalidParameter("pyramid needs at least one level".into())
    })?;

    let mut levels = Vec::with_capacity(gauss.len() + 1);
    for (i, fine) in gauss.iter().enumerate() {
        let coarse = gauss.get(i + 1).unwrap_or(&coarsest);
        let expanded = upsample(coarse, fine.height(), fine.width())?;
        levels.push(fine.sub(&expanded)?);
    }
    levels.push(coarsest);
    Pyramid::from_levels(levels)
}
