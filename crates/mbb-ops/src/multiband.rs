//! Multi-band (Laplacian pyramid) blending.
//!
//! Each frequency band is blended with a mask smoothed to that band's scale,
//! then the bands are collapsed:
//!
//! ```text
//! LT = laplacian(target, L)
//! LS = laplacian(source, L)
//! GM = gaussian(mask, L)
//! result = reconstruct([LT[i] * GM[i] + LS[i] * (1 - GM[i]) for i in 0..=L])
//! ```
//!
//! Coarse bands see a wide, soft transition and fine bands a narrow one, so
//! hard mask edges turn into seams that are smooth in low frequencies while
//! fine detail stays sharp.
//!
//! # Example
//!
//! ```rust
//! use mbb_core::ImageBuf;
//! use mbb_ops::{Blender, MultiBandBlending};
//!
//! let t = ImageBuf::filled(32, 32, &[1.0, 1.0, 1.0]).unwrap();
//! let s = ImageBuf::filled(32, 32, &[0.0, 0.0, 0.0]).unwrap();
//! let m = ImageBuf::from_fn(32, 32, 1, |x, _, _| if x < 16 { 1.0 } else { 0.0 }).unwrap();
//!
//! let out = MultiBandBlending::new(3).blend(&t, &s, &m).unwrap();
//! assert_eq!(out.shape(), (32, 32, 3));
//! ```

use crate::band;
use crate::blender::{validate_inputs, Blender};
use crate::parallel::join;
use crate::pyramid::{build_gaussian, build_laplacian, check_levels, max_levels};
use crate::reconstruct::reconstruct;
use crate::OpsResult;
use mbb_core::ImageBuf;
use tracing::{debug, info};

/// Laplacian-pyramid blender.
///
/// `num_levels` is the number of halvings. `None` uses the deepest pyramid
/// the input allows ([`max_levels`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiBandBlending {
    num_levels: Option<usize>,
}

impl MultiBandBlending {
    /// Blender with a fixed level count. `0` degenerates to the naive blend.
    pub fn new(num_levels: usize) -> Self {
        Self {
            num_levels: Some(num_levels),
        }
    }

    /// Blender that picks the maximum level count per input.
    pub fn auto() -> Self {
        Self { num_levels: None }
    }

    /// The configured level count, if fixed.
    pub fn num_levels(&self) -> Option<usize> {
        self.num_levels
    }

    /// Level count that will be used for `target`.
    pub fn resolve_levels(&self, target: &ImageBuf) -> OpsResult<usize> {
        match self.num_levels {
            Some(n) => Ok(n),
            None => max_levels(target.height(), target.width()),
        }
    }
}

impl Blender for MultiBandBlending {
    fn name(&self) -> &'static str {
        "multiband"
    }

    fn blend(&self, target: &ImageBuf, source: &ImageBuf, mask: &ImageBuf) -> OpsResult<ImageBuf> {
        validate_inputs(target, source, mask)?;
        let levels = self.resolve_levels(target)?;
        blend(target, source, mask, levels)
    }
}

/// Blends `target` over `source` through `num_levels` pyramid halvings.
///
/// Inputs are validated before any pyramid is built. The result is not
/// clamped and may leave `[0, 1]` slightly near strong edges.
///
/// # Errors
///
/// - [`OpsError::ShapeMismatch`](crate::OpsError::ShapeMismatch) if the
///   shapes disagree
/// - [`OpsError::InvalidLevels`](crate::OpsError::InvalidLevels) if
///   `num_levels` exceeds `floor(log2(min(h, w)))`
pub fn blend(
    target: &ImageBuf,
    source: &ImageBuf,
    mask: &ImageBuf,
    num_levels: usize,
) -> OpsResult<ImageBuf> {
    validate_inputs(target, source, mask)?;
    check_levels(target, num_levels)?;
    info!(
        w = target.width(),
        h = target.height(),
        channels = target.channels(),
        levels = num_levels,
        "multi-band blend"
    );

    // The three pyramids are independent.
    let (lap_target, (lap_source, gauss_mask)) = join(
        || build_laplacian(target, num_levels),
        || {
            join(
                || build_laplacian(source, num_levels),
                || build_gaussian(mask, num_levels),
            )
        },
    );
    let (lap_target, lap_source, gauss_mask) = (lap_target?, lap_source?, gauss_mask?);
    debug!(sizes = ?lap_target.sizes(), "pyramids built");

    let blended = band::blend(&lap_target, &lap_source, &gauss_mask)?;
    reconstruct(&blended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naive::NaiveBlending;
    use crate::OpsError;
    use approx::assert_abs_diff_eq;

    fn textured(w: usize, h: usize, seed: usize) -> ImageBuf {
        ImageBuf::from_fn(w, h, 3, |x, y, c| {
            ((x * 31 + y * 17 + c * 7 + seed * 13) % 23) as f32 / 22.0
        })
        .unwrap()
    }

    fn step_scene() -> (ImageBuf, ImageBuf, ImageBuf) {
        let t = ImageBuf::filled(64, 64, &[1.0, 1.0, 1.0]).unwrap();
        let s = ImageBuf::filled(64, 64, &[0.0, 0.0, 0.0]).unwrap();
        let m = ImageBuf::from_fn(64, 64, 1, |x, _, _| if x < 32 { 1.0 } else { 0.0 }).unwrap();
        (t, s, m)
    }

    #[test]
    fn test_full_mask_returns_target() {
        let t = textured(40, 30, 1);
        let s = textured(40, 30, 2);
        let ones = ImageBuf::filled(40, 30, &[1.0]).unwrap();
        let out = blend(&t, &s, &ones, 4).unwrap();
        assert!(out.max_abs_diff(&t).unwrap() < 1e-5);
    }

    #[test]
    fn test_empty_mask_returns_source() {
        let t = textured(40, 30, 1);
        let s = textured(40, 30, 2);
        let zeros = ImageBuf::filled(40, 30, &[0.0]).unwrap();
        let out = blend(&t, &s, &zeros, 4).unwrap();
        assert!(out.max_abs_diff(&s).unwrap() < 1e-5);
    }

    #[test]
    fn test_step_mask_gives_smooth_seam() {
        let (t, s, m) = step_scene();
        let out = MultiBandBlending::new(4).blend(&t, &s, &m).unwrap();
        assert_eq!(out.shape(), (64, 64, 3));

        let row: Vec<f32> = (0..64).map(|x| out.get(x, 20, 0)).collect();
        assert!(row[0] > 0.9, "left edge {}", row[0]);
        assert!(row[63] < 0.1, "right edge {}", row[63]);
        assert!(row[32] > 0.2 && row[32] < 0.8, "seam {}", row[32]);
        for x in 1..64 {
            assert!(row[x] <= row[x - 1] + 1e-5, "not monotone at {}", x);
            assert!(row[x - 1] - row[x] < 0.1, "jump at {}", x);
        }

        let (lo, hi) = out.min_max();
        assert!(lo >= -0.05 && hi <= 1.05, "range {}..{}", lo, hi);

        // Constant inputs: every row and channel is identical.
        for y in [0, 33, 63] {
            for x in 0..64 {
                for c in 0..3 {
                    assert_abs_diff_eq!(out.get(x, y, c), row[x], epsilon = 1e-5);
                }
            }
        }

        let naive = NaiveBlending.blend(&t, &s, &m).unwrap();
        assert!(out.max_abs_diff(&naive).unwrap() > 0.1);
    }

    #[test]
    fn test_step_seam_is_antisymmetric() {
        let (t, s, m) = step_scene();
        let out = blend(&t, &s, &m, 4).unwrap();
        for x in 0..32 {
            assert_abs_diff_eq!(out.get(x, 7, 0) + out.get(63 - x, 7, 0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_default_levels_split_flat_step_evenly() {
        // Flat inputs have no detail bands; at full depth only the 1x1 mask
        // mean is left, and a half mask must weigh both sides equally.
        let (t, s, m) = step_scene();
        let out = MultiBandBlending::auto().blend(&t, &s, &m).unwrap();
        for &v in out.data() {
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_blend_commutes_with_mirror() {
        let mirror = |im: &ImageBuf| {
            ImageBuf::from_fn(im.width(), im.height(), im.channels(), |x, y, c| {
                im.get(im.width() - 1 - x, y, c)
            })
            .unwrap()
        };
        let t = textured(64, 32, 5);
        let s = textured(64, 32, 6);
        let m = ImageBuf::from_fn(64, 32, 1, |x, y, _| if x + y / 2 < 40 { 1.0 } else { 0.0 })
            .unwrap();

        let out = blend(&t, &s, &m, 4).unwrap();
        let out_mirrored = blend(&mirror(&t), &mirror(&s), &mirror(&m), 4).unwrap();
        assert!(out_mirrored.max_abs_diff(&mirror(&out)).unwrap() < 1e-5);
    }

    #[test]
    fn test_zero_levels_equals_naive() {
        let t = textured(17, 11, 3);
        let s = textured(17, 11, 4);
        let m = ImageBuf::from_fn(17, 11, 1, |x, y, _| ((x + y) % 5) as f32 / 4.0).unwrap();
        let multi = blend(&t, &s, &m, 0).unwrap();
        let naive = NaiveBlending.blend(&t, &s, &m).unwrap();
        assert!(multi.max_abs_diff(&naive).unwrap() < 1e-6);
    }

    #[test]
    fn test_too_many_levels_rejected() {
        let (t, s, m) = step_scene();
        let err = blend(&t, &s, &m, 7).unwrap_err();
        assert!(matches!(err, OpsError::InvalidLevels { requested: 7, max: 6, .. }));
        assert!(blend(&t, &s, &m, 6).is_ok());
    }

    #[test]
    fn test_shape_mismatch_checked_first() {
        let t = textured(16, 16, 0);
        let s = textured(16, 8, 0);
        let m = ImageBuf::filled(16, 16, &[0.5]).unwrap();
        // 99 levels would also fail; the shape error must win.
        let err = blend(&t, &s, &m, 99).unwrap_err();
        assert!(err.is_shape_error());

        let rgb_mask = ImageBuf::filled(16, 16, &[0.5, 0.5, 0.5]).unwrap();
        assert!(blend(&t, &t, &rgb_mask, 2).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_auto_levels() {
        let b = MultiBandBlending::auto();
        assert_eq!(b.num_levels(), None);
        let img = textured(48, 20, 0);
        assert_eq!(b.resolve_levels(&img).unwrap(), 4);
        assert_eq!(MultiBandBlending::new(2).resolve_levels(&img).unwrap(), 2);

        let m = ImageBuf::filled(48, 20, &[0.5]).unwrap();
        let out = b.blend(&img, &img, &m).unwrap();
        assert!(out.max_abs_diff(&img).unwrap() < 1e-5);
        assert_eq!(b.name(), "multiband");
    }
}
