//! Pyramid resampling: blur + decimate, and interpolate + crop.
//!
//! Both directions use the same kernel and the same border policy
//! ([`RESAMPLE_BORDER`]), applied as two separable passes (horizontal, then
//! vertical).
//!
//! # Kernel
//!
//! ```text
//! KERNEL = [1, 4, 6, 4, 1] / 16  *  [1, 1] / 2  =  [1, 5, 10, 10, 5, 1] / 32
//! ```
//!
//! The 5-tap binomial is combined with a 2x2 box prefilter, so coarse sample
//! `i` sits between fine samples `2i` and `2i + 1`. No level shifts toward
//! the top-left, however deep the pyramid.
//!
//! [`downsample`] convolves with `KERNEL` and keeps one sample per pair.
//! [`upsample`] is the adjoint: source sample `j` spreads `KERNEL` over fine
//! positions `2j - 2 ..= 2j + 3`, and each output is divided by the weight it
//! received. In the interior that gives `(5, 10, 1) / 16` for even outputs
//! and `(1, 10, 5) / 16` for odd ones. Every output is a convex combination,
//! so a constant signal survives a down/up round trip exactly.
//!
//! Both directions reflect at the borders of the *fine* grid, the grid the
//! kernel actually runs on. For even sizes the whole round trip commutes with
//! mirroring the image.
//!
//! # Sizes
//!
//! `downsample` halves with floor division, keeping a floor of one sample per
//! axis. `upsample` takes an explicit target size because odd sizes do not
//! round trip: `downsample` maps both 5 and 4 columns to 2.
//!
//! # Example
//!
//! ```rust
//! use mbb_core::ImageBuf;
//! use mbb_ops::resample::{downsample, upsample};
//!
//! let img = ImageBuf::filled(9, 7, &[0.5, 0.5, 0.5]).unwrap();
//! let small = downsample(&img);
//! assert_eq!(small.dimensions(), (4, 3));
//!
//! let back = upsample(&small, 7, 9).unwrap();
//! assert_eq!(back.dimensions(), (9, 7));
//! ```

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use mbb_core::{map_index, BorderMode, ImageBuf};
use tracing::trace;

/// Low-pass kernel shared by both resampling directions.
///
/// Tap `k` of coarse sample `i` reads fine sample `2i + k - 2`.
pub const KERNEL: [f32; 6] = [
    1.0 / 32.0,
    5.0 / 32.0,
    10.0 / 32.0,
    10.0 / 32.0,
    5.0 / 32.0,
    1.0 / 32.0,
];

/// Edge policy used by [`downsample`] and [`upsample`].
pub const RESAMPLE_BORDER: BorderMode = BorderMode::Reflect101;

/// Fine-grid position of tap `k` for coarse sample `i`.
#[inline]
fn fine_position(i: usize, k: usize) -> isize {
    (2 * i + k) as isize - 2
}

/// Source taps for every output sample along one axis.
///
/// Entry `i` lists `(source_index, weight)` pairs whose weighted sum is
/// output sample `i`. Indices are already folded through the border map.
#[derive(Debug, Clone)]
struct AxisTaps {
    taps: Vec<Vec<(usize, f32)>>,
}

impl AxisTaps {
    /// Taps for blur-then-decimate from `src_len` to `dst_len` samples.
    fn decimate(src_len: usize, dst_len: usize) -> Self {
        let taps = (0..dst_len)
            .map(|i| {
                KERNEL
                    .iter()
                    .enumerate()
                    .map(|(k, &w)| (map_index(fine_position(i, k), src_len, RESAMPLE_BORDER), w))
                    .collect()
            })
            .collect();
        Self { taps }
    }

    /// Taps for interpolating `src_len` samples up to `dst_len` samples.
    ///
    /// Scatters each source sample through the decimation taps, then
    /// normalizes. Targets longer than `2 * src_len + 1` leave trailing
    /// outputs untouched; those repeat the last source sample.
    fn interpolate(src_len: usize, dst_len: usize) -> Self {
        let mut taps: Vec<Vec<(usize, f32)>> = vec![Vec::with_capacity(4); dst_len];
        for j in 0..src_len {
            for (k, &w) in KERNEL.iter().enumerate() {
                let q = map_index(fine_position(j, k), dst_len, RESAMPLE_BORDER);
                taps[q].push((j, w));
            }
        }
        for row in &mut taps {
            let total: f32 = row.iter().map(|&(_, w)| w).sum();
            if total > 0.0 {
                for tap in row.iter_mut() {
                    tap.1 /= total;
                }
            } else {
                row.push((src_len - 1, 1.0));
            }
        }
        Self { taps }
    }

    #[inline]
    fn len(&self) -> usize {
        self.taps.len()
    }
}

/// Output size of one [`downsample`] step along an axis of length `len`.
///
/// Floor division with a floor of one: `5 -> 2`, `4 -> 2`, `1 -> 1`.
#[inline]
pub fn half_size(len: usize) -> usize {
    (len / 2).max(1)
}

/// Blurs with [`KERNEL`] and decimates by two in each dimension.
///
/// Output size is `(half_size(width), half_size(height))`. A 1x1 input is
/// returned unchanged. Works for any channel count.
pub fn downsample(signal: &ImageBuf) -> ImageBuf {
    let (w, h) = signal.dimensions();
    if w == 1 && h == 1 {
        return signal.clone();
    }
    let (dw, dh) = (half_size(w), half_size(h));
    trace!(w, h, dw, dh, channels = signal.channels(), "downsample");

    let cols = AxisTaps::decimate(w, dw);
    let rows = AxisTaps::decimate(h, dh);
    separable(signal, &cols, &rows)
}

/// Interpolates up to exactly `height` x `width`.
///
/// The target is normally `2n` or `2n + 1` for an `n`-sample source. Output
/// positions past the last source sample repeat it, so other targets crop or
/// pad. Works for any channel count.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if `height` or `width` is zero.
pub fn upsample(signal: &ImageBuf, height: usize, width: usize) -> OpsResult<ImageBuf> {
    if height == 0 || width == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "upsample target {}x{} must be non-empty",
            width, height
        )));
    }
    let (w, h) = signal.dimensions();
    trace!(w, h, width, height, channels = signal.channels(), "upsample");

    let cols = AxisTaps::interpolate(w, width);
    let rows = AxisTaps::interpolate(h, height);
    Ok(separable(signal, &cols, &rows))
}

/// Horizontal pass with `cols`, then vertical pass with `rows`.
fn separable(src: &ImageBuf, cols: &AxisTaps, rows: &AxisTaps) -> ImageBuf {
    let channels = src.channels();
    let temp = pass_horizontal(src.data(), src.width(), src.height(), channels, cols);
    let data = pass_vertical(&temp, cols.len(), channels, rows);

    // Sizes come from validated inputs and non-zero tap counts.
    ImageBuf::from_data(cols.len(), rows.len(), channels, data)
        .unwrap_or_else(|_| unreachable!("separable pass produced a mis-sized buffer"))
}

/// Resamples each row independently.
fn pass_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    cols: &AxisTaps,
) -> Vec<f32> {
    let dst_w = cols.len();
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    for_each_row(&mut dst, dst_w * channels, |y, row| {
        let src_row = &src[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, taps) in cols.taps.iter().enumerate() {
            let out = &mut row[x * channels..(x + 1) * channels];
            for &(sx, wt) in taps {
                let px = &src_row[sx * channels..(sx + 1) * channels];
                for c in 0..channels {
                    out[c] += px[c] * wt;
                }
            }
        }
    });

    dst
}

/// Each output row is a weighted sum of whole source rows.
fn pass_vertical(src: &[f32], width: usize, channels: usize, rows: &AxisTaps) -> Vec<f32> {
    let row_len = width * channels;
    let mut dst = vec![0.0f32; row_len * rows.len()];

    for_each_row(&mut dst, row_len, |y, row| {
        for &(sy, wt) in &rows.taps[y] {
            let src_row = &src[sy * row_len..(sy + 1) * row_len];
            for (d, &s) in row.iter_mut().zip(src_row) {
                *d += s * wt;
            }
        }
    });

    dst
}
